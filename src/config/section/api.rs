//! `[api]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:3333"   # Serves GET /episodes/{slug}
//! timeout = 20                         # Seconds per request
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{ConfigDiagnostics, FieldPath};

/// Remote episode API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL the `/episodes/{slug}` path is appended to.
    pub base_url: String,

    /// Transport timeout in seconds.
    pub timeout: u64,
}

impl ApiConfig {
    pub const BASE_URL: FieldPath = FieldPath::new("api.base_url");
    pub const TIMEOUT: FieldPath = FieldPath::new("api.timeout");

    /// Parsed base URL.
    pub fn url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        match self.url() {
            Ok(url) if url.cannot_be_a_base() => {
                diag.error(Self::BASE_URL, "cannot carry a path");
            }
            Ok(url) if !matches!(url.scheme(), "http" | "https") => {
                diag.error(
                    Self::BASE_URL,
                    format!("unsupported scheme `{}`", url.scheme()),
                );
            }
            Ok(_) => {}
            Err(e) => diag.error_with_hint(
                Self::BASE_URL,
                format!("invalid url: {e}"),
                "e.g. base_url = \"http://localhost:3333\"",
            ),
        }

        if self.timeout == 0 {
            diag.error(Self::TIMEOUT, "must be at least 1 second");
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3333".to_string(),
            timeout: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_api_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.api.base_url, "http://localhost:3333");
        assert_eq!(config.api.timeout(), Duration::from_secs(20));
    }

    #[test]
    fn test_api_validate() {
        let mut diag = ConfigDiagnostics::new();
        ApiConfig::default().validate(&mut diag);
        assert!(diag.is_empty());

        let bad = ApiConfig {
            base_url: "not a url".into(),
            timeout: 0,
        };
        let mut diag = ConfigDiagnostics::new();
        bad.validate(&mut diag);
        assert_eq!(diag.len(), 2);
    }

    #[test]
    fn test_api_rejects_non_http() {
        let config = ApiConfig {
            base_url: "mailto:someone@example.com".into(),
            timeout: 5,
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.errors()[0].field, ApiConfig::BASE_URL);
    }
}
