//! Runtime configuration.
//!
//! Timing constants and HTTP settings shared by every widget in a
//! [`Document`](crate::Document). Values can be loaded from TOML; any key that
//! is absent keeps its default.
//!
//! ```toml
//! message_dismiss_ms = 3000
//! viewport_width = 1280
//! base_url = "https://example.com/"
//!
//! [http]
//! timeout_ms = 15000
//! user_agent = "my-site/1.0"
//! ```

use std::path::Path;
use std::time::Duration;

use lume_net::HttpClient;
use serde::{Deserialize, Serialize};

use crate::error::{LumeError, Result};

/// Settings for the HTTP client used by form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Whole-request timeout in milliseconds. `0` disables it.
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// User agent override.
    pub user_agent: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
            user_agent: None,
        }
    }
}

/// Configuration for a [`Document`](crate::Document) and its widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LumeConfig {
    /// How long form success/failure banners stay visible.
    pub message_dismiss_ms: u64,
    /// How long a toast stays before it starts leaving.
    pub toast_duration_ms: u64,
    /// Length of the toast leave transition.
    pub toast_leave_ms: u64,
    /// Lifetime of a button ripple.
    pub ripple_duration_ms: u64,
    /// Length of the modal close transition.
    pub modal_close_ms: u64,
    /// Initial viewport width in pixels.
    pub viewport_width: u32,
    /// Base URL that relative form actions are resolved against.
    pub base_url: Option<String>,
    /// HTTP client settings.
    pub http: HttpSettings,
}

impl Default for LumeConfig {
    fn default() -> Self {
        Self {
            message_dismiss_ms: 5_000,
            toast_duration_ms: 4_000,
            toast_leave_ms: 300,
            ripple_duration_ms: 600,
            modal_close_ms: 300,
            viewport_width: 1024,
            base_url: None,
            http: HttpSettings::default(),
        }
    }
}

impl LumeConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LumeError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Serialise to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// [`message_dismiss_ms`](Self::message_dismiss_ms) as a duration.
    pub fn message_dismiss(&self) -> Duration {
        Duration::from_millis(self.message_dismiss_ms)
    }

    /// [`toast_duration_ms`](Self::toast_duration_ms) as a duration.
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    /// [`toast_leave_ms`](Self::toast_leave_ms) as a duration.
    pub fn toast_leave(&self) -> Duration {
        Duration::from_millis(self.toast_leave_ms)
    }

    /// [`ripple_duration_ms`](Self::ripple_duration_ms) as a duration.
    pub fn ripple_duration(&self) -> Duration {
        Duration::from_millis(self.ripple_duration_ms)
    }

    /// [`modal_close_ms`](Self::modal_close_ms) as a duration.
    pub fn modal_close(&self) -> Duration {
        Duration::from_millis(self.modal_close_ms)
    }

    /// Build an HTTP client from [`http`](Self::http).
    pub fn http_client(&self) -> Result<HttpClient> {
        let mut builder = HttpClient::builder()
            .connect_timeout(Duration::from_millis(self.http.connect_timeout_ms));
        builder = if self.http.timeout_ms == 0 {
            builder.no_timeout()
        } else {
            builder.timeout(Duration::from_millis(self.http.timeout_ms))
        };
        if let Some(user_agent) = &self.http.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LumeConfig::default();
        assert_eq!(config.message_dismiss(), Duration::from_secs(5));
        assert_eq!(config.toast_duration(), Duration::from_secs(4));
        assert_eq!(config.ripple_duration(), Duration::from_millis(600));
        assert_eq!(config.modal_close(), Duration::from_millis(300));
        assert_eq!(config.viewport_width, 1024);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = LumeConfig::from_toml_str(
            r#"
            message_dismiss_ms = 1500

            [http]
            user_agent = "lume-tests"
            "#,
        )
        .unwrap();
        assert_eq!(config.message_dismiss_ms, 1500);
        assert_eq!(config.toast_duration_ms, 4000);
        assert_eq!(config.http.user_agent.as_deref(), Some("lume-tests"));
        assert_eq!(config.http.timeout_ms, 30_000);
    }

    #[test]
    fn test_invalid_toml() {
        let err = LumeConfig::from_toml_str("message_dismiss_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, LumeError::ConfigParse(_)));
    }

    #[test]
    fn test_toml_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lume.toml");
        let config = LumeConfig {
            viewport_width: 640,
            base_url: Some("https://example.com/".into()),
            ..LumeConfig::default()
        };
        std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();
        assert_eq!(LumeConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_http_client_settings() {
        let config = LumeConfig::from_toml_str("[http]\ntimeout_ms = 0\nuser_agent = \"lume-tests\"").unwrap();
        let client = config.http_client().unwrap();
        assert_eq!(client.settings().timeout, None);
        assert_eq!(client.settings().connect_timeout, Some(Duration::from_secs(10)));
        assert_eq!(client.settings().user_agent, "lume-tests");
    }

    #[test]
    fn test_missing_file() {
        let err = LumeConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, LumeError::ConfigIo { .. }));
    }
}
