use crate::config::SearchConfig;
use crate::core::OrderingPolicy;
use crate::utils::error::{Result, SearchError};
use crate::utils::logger::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub search: Option<SearchSection>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSection {
    pub ordering: Option<OrderingPolicy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub format: Option<LogFormat>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SearchError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SearchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown names are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SearchError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Overlay the values present in the file onto `config`.
    pub fn apply_to(&self, config: &mut SearchConfig) {
        if let Some(base_url) = &self.source.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout) = self.source.timeout_seconds {
            config.timeout_seconds = Some(timeout);
        }
        if let Some(ordering) = self.search.as_ref().and_then(|s| s.ordering) {
            config.ordering = ordering;
        }
        if let Some(logging) = &self.logging {
            if let Some(file) = &logging.file {
                config.log_file = Some(file.clone());
            }
            if let Some(format) = logging.format {
                config.log_format = format;
            }
            if let Some(verbose) = logging.verbose {
                config.verbose = verbose;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[source]
base_url = "https://universities.example.com"
timeout_seconds = 10

[search]
ordering = "last-arrived"

[logging]
file = "./unisearch.log"
format = "json"
verbose = true
"#;

        let parsed = TomlConfig::from_toml_str(toml_content).unwrap();
        let mut config = SearchConfig::default();
        parsed.apply_to(&mut config);

        assert_eq!(config.base_url, "https://universities.example.com");
        assert_eq!(config.timeout_seconds, Some(10));
        assert_eq!(config.ordering, OrderingPolicy::LastArrived);
        assert_eq!(config.log_file.as_deref(), Some("./unisearch.log"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.verbose);
    }

    #[test]
    fn test_missing_sections_keep_defaults() {
        let parsed = TomlConfig::from_toml_str("[source]\n").unwrap();
        let mut config = SearchConfig::default();
        parsed.apply_to(&mut config);

        assert_eq!(config, SearchConfig::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("UNISEARCH_TEST_BASE_URL", "https://test.api.com");

        let toml_content = r#"
[source]
base_url = "${UNISEARCH_TEST_BASE_URL}"
"#;

        let parsed = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            parsed.source.base_url.as_deref(),
            Some("https://test.api.com")
        );

        std::env::remove_var("UNISEARCH_TEST_BASE_URL");
    }

    #[test]
    fn test_invalid_ordering_is_a_parse_error() {
        let toml_content = r#"
[source]

[search]
ordering = "random"
"#;
        assert!(matches!(
            TomlConfig::from_toml_str(toml_content),
            Err(SearchError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_validation_after_merge() {
        let parsed = TomlConfig::from_toml_str("[source]\nbase_url = \"invalid-url\"\n").unwrap();
        let mut config = SearchConfig::default();
        parsed.apply_to(&mut config);

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[source]\nbase_url = \"http://localhost:9000\"\n")
            .unwrap();

        let parsed = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            parsed.source.base_url.as_deref(),
            Some("http://localhost:9000")
        );
    }
}
