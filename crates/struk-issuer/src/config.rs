//! # Backend Configuration
//!
//! Where the receipt service lives and how patient the client is.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STRUK_BACKEND_URL=https://struk.example.com                        │
//! │                                                                         │
//! │  2. TOML Config File ([backend] section, loaded by the app)            │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:8000 (local development service)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [backend]
//! base_url = "http://localhost:8000"
//! connect_timeout_secs = 10
//! # request_timeout_secs = 30   # unset: no overall submission timeout
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{IssueError, IssueResult};

/// Local development default for the receipt service.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Environment variable overriding the backend URL.
pub const BACKEND_URL_ENV: &str = "STRUK_BACKEND_URL";

/// Path of the receipt-issuing endpoint.
pub const RECEIPTS_PATH: &str = "/api/receipts";

/// Receipt service connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerConfig {
    /// Base URL of the receipt service, without the `/api/...` path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// TCP connect timeout (seconds).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Overall request timeout (seconds). `None` leaves it to the transport.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for IssuerConfig {
    fn default() -> Self {
        IssuerConfig {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: None,
        }
    }
}

impl IssuerConfig {
    /// Creates a config pointing at `base_url` with default timeouts.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        IssuerConfig {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Applies environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                debug!(url = %url, "Overriding backend URL from environment");
                self.base_url = url.trim().to_string();
            }
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> IssueResult<()> {
        let url = Url::parse(self.base_url.trim()).map_err(|e| {
            IssueError::InvalidConfig(format!("backend URL '{}': {}", self.base_url, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(IssueError::InvalidConfig(format!(
                "backend URL must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(IssueError::InvalidConfig(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Base URL without trailing slashes.
    pub fn base(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    /// Full URL of the receipt-issuing endpoint.
    pub fn receipts_url(&self) -> String {
        format!("{}{}", self.base(), RECEIPTS_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IssuerConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_secs, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_receipts_url_ignores_trailing_slash() {
        let config = IssuerConfig::with_base_url("https://struk.example.com/");
        assert_eq!(config.receipts_url(), "https://struk.example.com/api/receipts");
    }

    #[test]
    fn test_config_validation() {
        let mut config = IssuerConfig::with_base_url("not a url");
        assert!(config.validate().is_err());

        config.base_url = "ws://localhost:8000".to_string();
        assert!(config.validate().is_err());

        config.base_url = "https://struk.example.com".to_string();
        assert!(config.validate().is_ok());

        config.request_timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: IssuerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, IssuerConfig::default());
    }
}
