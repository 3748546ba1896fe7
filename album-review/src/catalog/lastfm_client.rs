//! Last.fm API client
//!
//! Wraps the `album.search` and `album.getinfo` methods of the Last.fm web
//! service. The API key and base URL are supplied by the caller; nothing is
//! read from the environment here.

use serde_json::Value;
use std::time::Duration;

use super::models::{
    check_service_error, normalize_album_info, normalize_search, AlbumDetail, AlbumSummary,
};
use super::{AlbumCatalog, CatalogError};

const USER_AGENT: &str = concat!("album-review/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Last.fm API client
pub struct LastFmClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl LastFmClient {
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| CatalogError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Base URL requests are sent to (without trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call one web service method and return the raw JSON body
    async fn call(&self, method: &str, params: &[(&str, &str)]) -> Result<Value, CatalogError> {
        let url = format!("{}/", self.base_url);

        let mut query: Vec<(&str, &str)> = vec![("method", method)];
        query.extend_from_slice(params);
        query.push(("api_key", self.api_key.as_str()));
        query.push(("format", "json"));

        tracing::debug!(method = %method, url = %url, "Querying Last.fm API");

        let response = self
            .http_client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| CatalogError::NetworkError(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CatalogError::NetworkError(e.to_string()))?;

        // Last.fm reports failures as JSON error payloads, with or without an
        // error status, so inspect the body before the status code.
        match serde_json::from_str::<Value>(&text) {
            Ok(body) => {
                check_service_error(&body)?;
                if status.is_success() {
                    Ok(body)
                } else {
                    Err(CatalogError::ApiError(status.as_u16(), text))
                }
            }
            Err(_) if !status.is_success() => Err(CatalogError::ApiError(status.as_u16(), text)),
            Err(e) => Err(CatalogError::ParseError(e.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl AlbumCatalog for LastFmClient {
    async fn search_albums(&self, query: &str) -> Result<Vec<AlbumSummary>, CatalogError> {
        let body = self.call("album.search", &[("album", query)]).await?;
        let albums = normalize_search(body)?;

        tracing::debug!(query = %query, matches = albums.len(), "Last.fm album search complete");

        Ok(albums)
    }

    async fn album_info(&self, artist: &str, album: &str) -> Result<AlbumDetail, CatalogError> {
        let body = self
            .call("album.getinfo", &[("artist", artist), ("album", album)])
            .await?;
        let detail = normalize_album_info(body)?;

        tracing::info!(
            artist = %detail.artist,
            album = %detail.name,
            genres = detail.genres.len(),
            "Retrieved album from Last.fm"
        );

        Ok(detail)
    }
}
