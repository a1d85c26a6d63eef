use reqwest::{header, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::client::{ApiError, Result};
use super::models::{ApiConfig, GridsResponse, SearchResponse};
use crate::domain::CoverArt;
use crate::utils::absolutize_url;

const API_USER_AGENT: &str = "Feather Game Downloader/1.0";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Looks up cover art on SteamGridDB.
#[derive(Clone)]
pub struct CoverArtClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl CoverArtClient {
    /// Returns `None` when no API key is configured.
    pub fn new(config: &ApiConfig) -> Result<Option<Self>> {
        let Some(api_key) = config.steamgrid_api_key.clone().filter(|k| !k.is_empty()) else {
            return Ok(None);
        };
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Some(Self {
            http,
            base_url: config.steamgrid_base_url.clone(),
            api_key,
        }))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, url: Url) -> RequestBuilder {
        self.http
            .get(url)
            .bearer_auth(&self.api_key)
            .header(header::USER_AGENT, API_USER_AGENT)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.authorized(url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("JSON decode error: {}", e)))
    }

    /// Step 1: resolve a title to the first matching game id
    pub async fn search_game_id(&self, title: &str) -> Result<u64> {
        let url = self.endpoint(&["search", "autocomplete", title])?;
        let search: SearchResponse = self.get_json(url).await?;

        match search.data.first() {
            Some(hit) if search.success => {
                debug!(%title, id = hit.id, name = %hit.name, "steamgrid match");
                Ok(hit.id)
            }
            _ => Err(ApiError::NoSearchResults),
        }
    }

    /// Step 2: first grid image URL for a game id
    pub async fn first_grid_url(&self, game_id: u64) -> Result<String> {
        let url = self.endpoint(&["grids", "game", &game_id.to_string()])?;
        let grids: GridsResponse = self.get_json(url).await?;

        match grids.data.first() {
            Some(grid) if grids.success => Ok(absolutize_url(&grid.url)),
            _ => Err(ApiError::NoCoverArt),
        }
    }

    /// Step 3: download the image and make sure it decodes
    pub async fn download_image(&self, title: &str, image_url: &str) -> Result<CoverArt> {
        let response = self
            .http
            .get(image_url)
            .header(header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            return Err(ApiError::Status(response.status().as_u16()));
        }

        let bytes = response.bytes().await?;
        let decoded =
            image::load_from_memory(&bytes).map_err(|e| ApiError::ImageDecode(e.to_string()))?;

        Ok(CoverArt {
            title: title.to_string(),
            url: image_url.to_string(),
            width: decoded.width(),
            height: decoded.height(),
            bytes,
        })
    }

    /// Full lookup for an already-cleaned title.
    pub async fn fetch_cover(&self, title: &str) -> Result<CoverArt> {
        let game_id = self.search_game_id(title).await?;
        let image_url = self.first_grid_url(game_id).await?;
        self.download_image(title, &image_url).await
    }
}
