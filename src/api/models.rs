use serde::Deserialize;
use std::time::Duration;

use crate::domain::DownloadEntry;

/// Body served by every source URL.
///
/// Entries stay untyped here so one unreadable entry does not sink the
/// rest of the document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceDocument {
    #[serde(default)]
    pub downloads: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDownload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "fileSize", default)]
    pub file_size: Option<String>,
    #[serde(default)]
    pub uris: Option<Vec<Option<String>>>,
}

impl From<RawDownload> for DownloadEntry {
    fn from(raw: RawDownload) -> Self {
        Self {
            title: raw.title,
            file_size: raw.file_size,
            uris: raw.uris.into_iter().flatten().flatten().collect(),
        }
    }
}

/// Response from `/search/autocomplete/{term}`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<SearchHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// Response from `/grids/game/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct GridsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<Grid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Grid {
    pub url: String,
}

/// Configuration for the API clients
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub timeout: Duration,
    pub steamgrid_base_url: String,
    pub steamgrid_api_key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            steamgrid_base_url: "https://www.steamgriddb.com/api/v2".to_string(),
            steamgrid_api_key: None,
        }
    }
}
