//! Client configuration.
//!
//! Built with the builder pattern; `from_env` overlays environment
//! variables on the defaults.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `PORTAL_API_URL` | API base URL | [`DEFAULT_BASE_URL`] |
//! | `PORTAL_TIMEOUT_SECS` | Per-request timeout | 15 |
//! | `PORTAL_LOG` | tracing filter when `RUST_LOG` is unset | `info` |

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://portal-api.university.ac.id/api";

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq)]
pub struct PortalConfig {
    /// Base URL every endpoint path is appended to (no trailing slash).
    pub base_url: String,
    /// Applied to every API request.
    pub request_timeout: Duration,
    /// Default tracing filter directive.
    pub log_filter: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_filter: "info".to_string(),
        }
    }
}

impl PortalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url: String = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Defaults overridden by `PORTAL_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("PORTAL_API_URL") {
            if url.trim().is_empty() {
                return Err(ConfigError::EmptyBaseUrl);
            }
            config = config.with_base_url(url.trim());
        }

        if let Ok(raw) = std::env::var("PORTAL_TIMEOUT_SECS") {
            config = config.with_request_timeout(parse_timeout(&raw)?);
        }

        if let Ok(filter) = std::env::var("PORTAL_LOG") {
            config = config.with_log_filter(filter);
        }

        Ok(config)
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("PORTAL_API_URL");
        std::env::remove_var("PORTAL_TIMEOUT_SECS");
        std::env::remove_var("PORTAL_LOG");
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let config = PortalConfig::new().with_base_url("http://localhost:8080/api/");
        assert_eq!(config.base_url, "http://localhost:8080/api");
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("30").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_timeout(" 5 ").unwrap(), Duration::from_secs(5));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        assert_eq!(PortalConfig::from_env().unwrap(), PortalConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("PORTAL_API_URL", "http://127.0.0.1:9000/");
        std::env::set_var("PORTAL_TIMEOUT_SECS", "3");
        std::env::set_var("PORTAL_LOG", "campus_portal=debug");

        let config = PortalConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.log_filter, "campus_portal=debug");
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_values() {
        clear_env();
        std::env::set_var("PORTAL_TIMEOUT_SECS", "-1");
        assert!(matches!(
            PortalConfig::from_env(),
            Err(ConfigError::InvalidTimeout { .. })
        ));

        clear_env();
        std::env::set_var("PORTAL_API_URL", "  ");
        assert_eq!(PortalConfig::from_env(), Err(ConfigError::EmptyBaseUrl));
        clear_env();
    }
}
