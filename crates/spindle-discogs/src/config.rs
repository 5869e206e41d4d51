// SPDX-License-Identifier: GPL-3.0-or-later

/// Default `User-Agent` sent when no application name is configured.
pub const DEFAULT_APP_NAME: &str = concat!("SpindleDiscogs/", env!("CARGO_PKG_VERSION"));

/// Identity and credentials for a Discogs client.
///
/// `app_name` is sent as the `User-Agent`; Discogs asks for something in
/// the RFC 1945 product form, e.g. `MyDiscogsClient/1.0 +http://example.org`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DiscogsConfig {
    pub app_name: String,
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub access_token: Option<String>,
    /// Explicit requests-per-minute ceiling. Overrides the default baseline
    /// and caps whatever the server reports.
    pub max_requests: Option<u32>,
}

impl DiscogsConfig {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            ..Self::default()
        }
    }

    pub fn with_key_secret(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.consumer_key = Some(key.into());
        self.consumer_secret = Some(secret.into());
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_max_requests(mut self, requests_per_minute: u32) -> Self {
        self.max_requests = Some(requests_per_minute);
        self
    }

    pub fn has_key_secret(&self) -> bool {
        self.consumer_key.is_some() && self.consumer_secret.is_some()
    }

    /// Fill in the default application name when none was given.
    pub(crate) fn normalized(mut self) -> Self {
        if self.app_name.trim().is_empty() {
            self.app_name = DEFAULT_APP_NAME.to_string();
        }
        self
    }
}

// Credentials stay out of logs.
impl std::fmt::Debug for DiscogsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn redact(value: &Option<String>) -> &'static str {
            if value.is_some() {
                "Some(<redacted>)"
            } else {
                "None"
            }
        }

        f.debug_struct("DiscogsConfig")
            .field("app_name", &self.app_name)
            .field("consumer_key", &redact(&self.consumer_key))
            .field("consumer_secret", &redact(&self.consumer_secret))
            .field("access_token", &redact(&self.access_token))
            .field("max_requests", &self.max_requests)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_app_name_gets_default() {
        let config = DiscogsConfig::default().normalized();
        assert_eq!(config.app_name, DEFAULT_APP_NAME);

        let config = DiscogsConfig::new("Test/1.0").normalized();
        assert_eq!(config.app_name, "Test/1.0");
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let config = DiscogsConfig::new("Test")
            .with_key_secret("key", "secret")
            .with_access_token("token");
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret\""));
        assert!(!debug.contains("token\""));
        assert!(debug.contains("<redacted>"));
    }
}
