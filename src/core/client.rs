use crate::core::{decode_universities, ConfigProvider, SearchProvider, University};
use crate::utils::error::{Result, SearchError};
use reqwest::Client;
use url::Url;

const SEARCH_PATH: &str = "search";

pub struct HttpSearchClient {
    base_url: Url,
    client: Client,
}

impl HttpSearchClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let base_url = parse_base_url(config.base_url())?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { base_url, client })
    }

    /// `{base}/search`, plus a percent-encoded `name` pair when `query` is not empty.
    pub fn search_url(&self, query: &str) -> Result<Url> {
        let mut url = self
            .base_url
            .join(SEARCH_PATH)
            .map_err(|e| SearchError::MalformedUrlError {
                value: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        if !query.is_empty() {
            url.query_pairs_mut().append_pair("name", query);
        }

        Ok(url)
    }
}

#[async_trait::async_trait]
impl SearchProvider for HttpSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<University>> {
        let url = self.search_url(query)?;

        tracing::debug!("Making search request to: {}", url);
        let response = self.client.get(url).send().await?;

        tracing::debug!("Search response status: {}", response.status());
        let response = response.error_for_status()?;

        let body = response.bytes().await?;
        let universities = decode_universities(&body)?;

        tracing::debug!(
            "Decoded {} universities for query {:?}",
            universities.len(),
            query
        );
        Ok(universities)
    }
}

/// A trailing slash keeps `join` from replacing the last path segment.
fn parse_base_url(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };

    let url = Url::parse(&normalized).map_err(|e| SearchError::MalformedUrlError {
        value: raw.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(SearchError::MalformedUrlError {
            value: raw.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }

    Ok(url)
}
