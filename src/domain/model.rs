use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// One entry of the university directory as returned by `/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct University {
    pub name: String,
    pub country: String,
    #[serde(rename = "state-province", default)]
    pub state_province: Option<String>,
    pub alpha_two_code: String,
    pub domains: Vec<String>,
    pub web_pages: Vec<String>,
}

/// Decode a `/search` response body. The whole payload fails when any
/// element does not match the schema; no partial list is produced.
pub fn decode_universities(body: &[u8]) -> Result<Vec<University>> {
    let universities: Vec<University> = serde_json::from_slice(body)?;
    Ok(universities)
}
