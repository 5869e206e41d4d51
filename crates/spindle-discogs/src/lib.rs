// SPDX-License-Identifier: GPL-3.0-or-later

//! Discogs API client.
//!
//! Every request goes through one pipeline: the endpoint is matched against
//! a route table to find the authentication it needs, credentials are
//! attached, a shared token-bucket limiter paces the request, and the
//! response is either decoded or turned into a typed error. The limiter
//! follows the `X-Discogs-Ratelimit` header returned with each response.

pub mod auth;
pub mod client;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod query;
pub mod rate_limiter;
pub mod routes;

pub use auth::AuthType;
pub use client::{DiscogsClient, DiscogsClientBuilder, BASE_URL, RATE_LIMIT_HEADER};
pub use config::{DiscogsConfig, DEFAULT_APP_NAME};
pub use error::{DiscogsError, HttpError, Resource, Result};
pub use models::{
    Artist, Currency, EntityType, Label, MasterRelease, Pagination, PaginationParams,
    ReleaseOptions, ReleaseResponse, SearchOptions, SearchResponse, SearchResult,
};
pub use query::QueryParams;
pub use rate_limiter::{RateLimiter, RATE_LIMIT_ANONYMOUS, RATE_LIMIT_AUTHENTICATED};
pub use routes::RouteTable;
pub use tokio_util::sync::CancellationToken;
