pub mod config;
pub mod core;
pub mod domain;
#[cfg(feature = "cli")]
pub mod tui;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::SearchConfig;

pub use core::client::HttpSearchClient;
pub use core::controller::{ScreenState, SearchController};
pub use domain::model::University;
pub use utils::error::{Result, SearchError};
