use crate::config::toml_config::TomlConfig;
use crate::config::SearchConfig;
use crate::core::OrderingPolicy;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "unisearch")]
#[command(version)]
#[command(about = "Search the university directory by name")]
pub struct CliConfig {
    /// Base URL of the directory service (the client appends `/search`)
    #[arg(long)]
    pub base_url: Option<String>,

    /// TOML file with [source], [search] and [logging] sections
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Which completed search may replace the displayed results
    #[arg(long, value_enum)]
    pub ordering: Option<OrderingPolicy>,

    /// Request timeout; no timeout unless set
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<String>,

    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Run one search, print the rows and exit instead of opening the screen
    #[arg(long, value_name = "QUERY", allow_hyphen_values = true)]
    pub print: Option<String>,
}

impl CliConfig {
    /// Defaults, then the config file, then explicit flags.
    pub fn resolve(&self) -> Result<SearchConfig> {
        let mut config = SearchConfig::default();

        if let Some(path) = &self.config {
            TomlConfig::from_file(path)?.apply_to(&mut config);
        }

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(ordering) = self.ordering {
            config.ordering = ordering;
        }
        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = Some(timeout);
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = Some(log_file.clone());
        }
        if let Some(log_format) = self.log_format {
            config.log_format = log_format;
        }
        if self.verbose {
            config.verbose = true;
        }

        Ok(config)
    }
}
