#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, OrderingPolicy};
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://universities.hipolabs.com";

/// Settings after merging the config file and command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
    pub ordering: OrderingPolicy,
    pub log_file: Option<String>,
    pub log_format: LogFormat,
    pub verbose: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: None,
            ordering: OrderingPolicy::default(),
            log_file: None,
            log_format: LogFormat::default(),
            verbose: false,
        }
    }
}

impl ConfigProvider for SearchConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    fn ordering(&self) -> OrderingPolicy {
        self.ordering
    }
}

impl Validate for SearchConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;

        if let Some(timeout) = self.timeout_seconds {
            validate_range("timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(log_file) = &self.log_file {
            validate_path("log_file", log_file)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url(), "http://universities.hipolabs.com");
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.ordering(), OrderingPolicy::LatestIssued);
    }

    #[test]
    fn test_timeout_out_of_range_is_rejected() {
        let config = SearchConfig {
            timeout_seconds: Some(0),
            ..SearchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_request_timeout_converts_seconds() {
        let config = SearchConfig {
            timeout_seconds: Some(15),
            ..SearchConfig::default()
        };
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
    }
}
