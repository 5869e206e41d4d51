// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};
use url::Url;

use crate::auth::apply_auth;
use crate::config::DiscogsConfig;
use crate::error::{DiscogsError, HttpError, Result};
use crate::query::QueryParams;
use crate::rate_limiter::RateLimiter;
use crate::routes::RouteTable;

pub const BASE_URL: &str = "https://api.discogs.com";
/// Response header carrying the server's requests-per-minute limit.
pub const RATE_LIMIT_HEADER: &str = "X-Discogs-Ratelimit";

/// Discogs API client.
///
/// Clones share the same rate limiter, so every request issued through
/// any clone draws from one bucket.
#[derive(Debug, Clone)]
pub struct DiscogsClient {
    client: Client,
    base_url: String,
    config: Arc<DiscogsConfig>,
    routes: Arc<RouteTable>,
    rate_limiter: RateLimiter,
}

impl DiscogsClient {
    /// Create a client against the public API with default settings.
    pub fn new(config: DiscogsConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: DiscogsConfig) -> DiscogsClientBuilder {
        DiscogsClientBuilder::new(config)
    }

    pub fn config(&self) -> &DiscogsConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Current refill rate in requests per second.
    pub fn limit(&self) -> f64 {
        self.rate_limiter.limit()
    }

    /// Requests that can be issued right now without waiting.
    pub fn tokens(&self) -> f64 {
        self.rate_limiter.tokens()
    }

    /// Cap the client at `requests_per_minute`, including any limit the
    /// server reports later. Zero is ignored.
    pub fn set_max_requests(&self, requests_per_minute: u32) {
        self.rate_limiter.set_max_requests(requests_per_minute);
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        endpoint: &str,
        params: &QueryParams,
        headers: &HeaderMap,
    ) -> Result<Option<T>> {
        self.request(cancel, Method::GET, endpoint, params, headers, None::<&()>)
            .await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        endpoint: &str,
        params: &QueryParams,
        headers: &HeaderMap,
        body: &B,
    ) -> Result<Option<T>> {
        self.request(cancel, Method::POST, endpoint, params, headers, Some(body))
            .await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        endpoint: &str,
        params: &QueryParams,
        headers: &HeaderMap,
        body: &B,
    ) -> Result<Option<T>> {
        self.request(cancel, Method::PUT, endpoint, params, headers, Some(body))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        endpoint: &str,
        params: &QueryParams,
        headers: &HeaderMap,
    ) -> Result<Option<T>> {
        self.request(cancel, Method::DELETE, endpoint, params, headers, None::<&()>)
            .await
    }

    /// Issue one request against `endpoint` and decode the JSON response.
    ///
    /// Returns `Ok(None)` for a successful response with an empty body. Use
    /// [`serde::de::IgnoredAny`] as `T` when the body is not needed. Nothing
    /// is retried: each failure is reported once.
    pub async fn request<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        cancel: &CancellationToken,
        method: Method,
        endpoint: &str,
        params: &QueryParams,
        headers: &HeaderMap,
        body: Option<&B>,
    ) -> Result<Option<T>> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, endpoint))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }

        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(DiscogsError::EncodeBody)?;

        let mut request_headers = headers.clone();
        let app_name =
            HeaderValue::from_str(&self.config.app_name).map_err(|e| DiscogsError::InvalidHeader {
                name: USER_AGENT.to_string(),
                reason: e.to_string(),
            })?;
        request_headers.insert(USER_AGENT, app_name);
        if body.is_some() {
            request_headers
                .entry(CONTENT_TYPE)
                .or_insert(HeaderValue::from_static("application/json"));
        }

        let auth_type = self.routes.resolve(endpoint)?;
        apply_auth(&mut request_headers, auth_type, &self.config, endpoint)?;

        let mut builder = self
            .client
            .request(method.clone(), url.clone())
            .headers(request_headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        self.rate_limiter.acquire(cancel).await?;

        trace!(target: "discogs", "{} {}", method, url);

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(DiscogsError::Cancelled),
            response = builder.send() => response?,
        };

        let status = response.status();
        debug!(target: "discogs", "response status: {}", status);

        self.update_rate_limit_from_headers(response.headers());

        let response_body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(DiscogsError::Cancelled),
            bytes = response.bytes() => bytes?,
        };

        if !status.is_success() {
            return Err(HttpError {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&response_body).into_owned(),
            }
            .into());
        }

        if response_body.is_empty() {
            return Ok(None);
        }

        trace!(target: "discogs", "response body: {}", String::from_utf8_lossy(&response_body));

        serde_json::from_slice(&response_body)
            .map(Some)
            .map_err(DiscogsError::MalformedResponse)
    }

    fn update_rate_limit_from_headers(&self, headers: &HeaderMap) {
        let Some(value) = headers.get(RATE_LIMIT_HEADER) else {
            return;
        };

        match value.to_str().ok().and_then(|v| v.trim().parse::<u32>().ok()) {
            Some(limit) => self.rate_limiter.update_from_server(limit),
            None => warn!(
                target: "discogs",
                value = ?value,
                "ignoring unparsable {} header",
                RATE_LIMIT_HEADER
            ),
        }
    }
}

/// Builder for configuring a Discogs client.
#[derive(Debug)]
pub struct DiscogsClientBuilder {
    config: DiscogsConfig,
    base_url: String,
    timeout: Duration,
    routes: RouteTable,
}

impl DiscogsClientBuilder {
    fn new(config: DiscogsConfig) -> Self {
        Self {
            config,
            base_url: BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            routes: RouteTable::default(),
        }
    }

    /// Set a custom base URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the endpoint-to-auth route table.
    pub fn routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    /// Build the Discogs client.
    pub fn build(self) -> Result<DiscogsClient> {
        let config = self.config.normalized();

        let rate_limiter = match config.max_requests {
            Some(max_requests) if max_requests > 0 => RateLimiter::with_ceiling(max_requests),
            _ => RateLimiter::baseline(config.has_key_secret()),
        };

        let client = Client::builder().timeout(self.timeout).build()?;

        let base_url = self.base_url.trim_end_matches('/').to_string();
        debug!(
            target: "discogs",
            base_url = %base_url,
            requests_per_minute = rate_limiter.burst(),
            "initialized Discogs client"
        );

        Ok(DiscogsClient {
            client,
            base_url,
            config: Arc::new(config),
            routes: Arc::new(self.routes),
            rate_limiter,
        })
    }
}
