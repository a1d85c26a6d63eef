use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

use super::models::{ApiConfig, RawDownload, SourceDocument};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Status code: {0}")]
    Status(u16),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("No results found on SteamGridDB")]
    NoSearchResults,

    #[error("No cover art found for this game")]
    NoCoverArt,

    #[error("Image could not be decoded: {0}")]
    ImageDecode(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Fetches `downloads` documents from the configured source URLs.
#[derive(Clone)]
pub struct SourceClient {
    http: Client,
}

impl SourceClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http })
    }

    /// GET one source and return its `downloads` array.
    ///
    /// Only a plain 200 counts as success; the body must be a JSON object,
    /// a missing `downloads` key yields an empty list. Entries that cannot
    /// be read are skipped, the rest of the document is kept.
    pub async fn fetch_downloads(&self, url: &str) -> Result<Vec<RawDownload>> {
        debug!(%url, "fetching source");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let document: SourceDocument = serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("JSON decode error: {}", e)))?;

        let downloads: Vec<RawDownload> = document
            .downloads
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(raw) => Some(raw),
                Err(e) => {
                    warn!(%url, index, error = %e, "skipping unreadable entry");
                    None
                }
            })
            .collect();

        debug!(%url, count = downloads.len(), "source parsed");
        Ok(downloads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DownloadEntry;

    fn client() -> SourceClient {
        SourceClient::new(&ApiConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_downloads() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/games.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"name":"src","downloads":[
                    {"title":"Celeste [GOG]","fileSize":"1.2 GB","uris":["magnet:?xt=urn:btih:aaa"]},
                    {"title":"Hades","fileSize":"9 GB","uris":[]}
                ]}"#,
            )
            .create_async()
            .await;

        let downloads = client()
            .fetch_downloads(&format!("{}/games.json", server.url()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(downloads.len(), 2);
        assert_eq!(downloads[0].title.as_deref(), Some("Celeste [GOG]"));
        assert_eq!(downloads[0].file_size.as_deref(), Some("1.2 GB"));
        assert_eq!(downloads[1].uris, Some(vec![]));
    }

    #[tokio::test]
    async fn test_unreadable_entries_do_not_sink_the_source() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/mixed.json")
            .with_status(200)
            .with_body(
                r#"{"downloads":[
                    {"title":"Good","uris":["magnet:?g"]},
                    {"title":"Bad","uris":[null]},
                    {"title":42,"fileSize":"1 GB"},
                    {"title":"Last","fileSize":"2 GB","uris":["magnet:?l"]}
                ]}"#,
            )
            .create_async()
            .await;

        let downloads = client()
            .fetch_downloads(&format!("{}/mixed.json", server.url()))
            .await
            .unwrap();

        let titles: Vec<_> = downloads.iter().map(|d| d.title.as_deref()).collect();
        assert_eq!(titles, vec![Some("Good"), Some("Bad"), Some("Last")]);

        let bad = DownloadEntry::from(downloads[1].clone());
        assert_eq!(bad.magnet_link(), None);
    }

    #[tokio::test]
    async fn test_non_200_is_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/gone.json")
            .with_status(404)
            .create_async()
            .await;

        let err = client()
            .fetch_downloads(&format!("{}/gone.json", server.url()))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Status(404)));
    }

    #[tokio::test]
    async fn test_malformed_json_is_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/broken.json")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let err = client()
            .fetch_downloads(&format!("{}/broken.json", server.url()))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }
}
