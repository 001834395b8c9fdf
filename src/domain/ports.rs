use crate::domain::model::University;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
    fn ordering(&self) -> OrderingPolicy;
}

/// Which completed search is allowed to replace the displayed results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum OrderingPolicy {
    /// Only the response to the most recently issued request is applied.
    #[default]
    LatestIssued,
    /// Every response is applied in arrival order; the last one wins.
    LastArrived,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<University>>;
}

pub trait LinkOpener {
    fn open(&self, url: &Url) -> Result<()>;
}
