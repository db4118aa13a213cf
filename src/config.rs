//! Configuration module for netavail.
//!
//! Loads configuration from environment variables and validates it before
//! any network call is made.

use std::env;

use thiserror::Error;

/// Configuration error types.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("NETAVAIL_URL is not set; expected the monitoring API base URL")]
    MissingUrl,
    #[error("NETAVAIL_TOKEN is not set; expected the API auth token")]
    MissingToken,
    #[error("invalid base URL {0:?}: expected http(s)://...")]
    InvalidUrl(String),
}

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Monitoring API base URL, e.g. "https://nms.example.com/api/v0"
    pub base_url: String,
    /// Static API token sent as the X-Auth-Token header
    pub token: String,
    /// Log file for warnings and errors (default: "netavail_errors.log")
    pub log_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: String::new(),
            log_path: "netavail_errors.log".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `NETAVAIL_URL`: monitoring API base URL (required)
    /// - `NETAVAIL_TOKEN`: API auth token (required)
    /// - `NETAVAIL_LOG`: log file path (default: "netavail_errors.log")
    pub fn load() -> Self {
        let mut cfg = Self::default();

        if let Ok(url) = env::var("NETAVAIL_URL") {
            cfg.base_url = url;
        }

        if let Ok(token) = env::var("NETAVAIL_TOKEN") {
            cfg.token = token;
        }

        if let Ok(log_path) = env::var("NETAVAIL_LOG") {
            cfg.log_path = log_path;
        }

        cfg
    }

    /// Validate the configuration, normalizing the base URL.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::MissingUrl);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(self.base_url.clone()));
        }
        if self.token.is_empty() {
            return Err(ConfigError::MissingToken);
        }

        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert!(cfg.base_url.is_empty());
        assert!(cfg.token.is_empty());
        assert_eq!(cfg.log_path, "netavail_errors.log");
    }

    #[test]
    fn test_validate_requires_url_and_token() {
        let mut cfg = Config::default();
        assert!(matches!(cfg.validate(), Err(ConfigError::MissingUrl)));

        cfg.base_url = "https://nms.example.com/api/v0".to_string();
        assert!(matches!(cfg.validate(), Err(ConfigError::MissingToken)));

        cfg.token = "sekrit".to_string();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let mut cfg = Config {
            base_url: "nms.example.com".to_string(),
            token: "sekrit".to_string(),
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_validate_trims_trailing_slashes() {
        let mut cfg = Config {
            base_url: "https://nms.example.com/api/v0//".to_string(),
            token: "sekrit".to_string(),
            ..Config::default()
        };
        cfg.validate().unwrap();
        assert_eq!(cfg.base_url, "https://nms.example.com/api/v0");
    }
}
