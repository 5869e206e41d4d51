// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::Path;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Clone, Serialize, Deserialize)]
pub struct DiscogsSettings {
    /// Sent as the `User-Agent`. Left empty, the client picks its default.
    pub app_name: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub access_token: Option<String>,
    /// Requests-per-minute ceiling; unset means the server decides.
    pub max_requests: Option<u32>,
}

impl Default for DiscogsSettings {
    fn default() -> Self {
        Self {
            app_name: String::new(),
            base_url: "https://api.discogs.com".to_string(),
            timeout_secs: 30,
            consumer_key: None,
            consumer_secret: None,
            access_token: None,
            max_requests: None,
        }
    }
}

impl std::fmt::Debug for DiscogsSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscogsSettings")
            .field("app_name", &self.app_name)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("consumer_key", &self.consumer_key.as_ref().map(|_| "<redacted>"))
            .field(
                "consumer_secret",
                &self.consumer_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("max_requests", &self.max_requests)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub discogs: DiscogsSettings,
    pub telemetry: TelemetryConfig,
}

/// Load configuration from defaults, optional TOML file, and environment overrides (prefix: SPINDLE_).
pub fn load(config_path: Option<&Path>) -> Result<AppConfig> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("SPINDLE_").split("__"));

    let config: AppConfig = figment.extract()?;
    info!(target: "config", "configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn load_in_jail(path: Option<&Path>) -> figment::error::Result<AppConfig> {
        load(path).map_err(|e| figment::Error::from(e.to_string()))
    }

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = load_in_jail(None)?;
            assert_eq!(config.discogs.base_url, "https://api.discogs.com");
            assert_eq!(config.discogs.timeout_secs, 30);
            assert!(config.discogs.app_name.is_empty());
            assert!(config.discogs.consumer_key.is_none());
            assert!(config.discogs.max_requests.is_none());
            assert_eq!(config.telemetry.log_level, "info");
            Ok(())
        });
    }

    #[test]
    fn test_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "spindle.toml",
                r#"
                [discogs]
                app_name = "Spindle/1.0 +https://example.org"
                consumer_key = "key"
                consumer_secret = "secret"
                max_requests = 30

                [telemetry]
                log_level = "debug"
                "#,
            )?;

            let config = load_in_jail(Some(Path::new("spindle.toml")))?;
            assert_eq!(config.discogs.app_name, "Spindle/1.0 +https://example.org");
            assert_eq!(config.discogs.consumer_key.as_deref(), Some("key"));
            assert_eq!(config.discogs.consumer_secret.as_deref(), Some("secret"));
            assert_eq!(config.discogs.max_requests, Some(30));
            assert_eq!(config.telemetry.log_level, "debug");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "spindle.toml",
                r#"
                [discogs]
                max_requests = 30
                "#,
            )?;
            jail.set_env("SPINDLE_DISCOGS__MAX_REQUESTS", "10");
            jail.set_env("SPINDLE_DISCOGS__ACCESS_TOKEN", "token");

            let config = load_in_jail(Some(Path::new("spindle.toml")))?;
            assert_eq!(config.discogs.max_requests, Some(10));
            assert_eq!(config.discogs.access_token.as_deref(), Some("token"));
            Ok(())
        });
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let settings = DiscogsSettings {
            consumer_secret: Some("hunter2".to_string()),
            ..DiscogsSettings::default()
        };
        let debug = format!("{settings:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
