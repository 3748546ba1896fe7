//! Catalog proxy endpoints
//!
//! Lets the editor front end query Last.fm through the service, so the API
//! key never leaves the server.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use crate::catalog::{AlbumCatalog, AlbumDetail, AlbumSummary};
use crate::{ApiError, ApiResult, AppState};

/// Query parameters for album search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Query parameters for album detail
#[derive(Debug, Deserialize)]
pub struct InfoParams {
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
}

fn require_catalog(state: &AppState) -> ApiResult<Arc<dyn AlbumCatalog>> {
    state.catalog.clone().ok_or_else(|| {
        ApiError::Unavailable("Last.fm API key not configured; album chooser disabled".to_string())
    })
}

/// GET /api/albums/search?q=...
///
/// Upstream failures yield an empty list, the same as the in-editor chooser.
pub async fn search_albums(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<AlbumSummary>>> {
    let catalog = require_catalog(&state)?;

    if params.q.trim().is_empty() {
        return Ok(Json(Vec::new()));
    }

    match catalog.search_albums(&params.q).await {
        Ok(albums) => Ok(Json(albums)),
        Err(e) => {
            warn!(query = %params.q, error = %e, "Album search failed");
            state.record_error(format!("album search: {}", e)).await;
            Ok(Json(Vec::new()))
        }
    }
}

/// GET /api/albums/info?artist=...&album=...
pub async fn album_info(
    State(state): State<AppState>,
    Query(params): Query<InfoParams>,
) -> ApiResult<Json<AlbumDetail>> {
    let catalog = require_catalog(&state)?;

    if params.artist.trim().is_empty() || params.album.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "artist and album are both required".to_string(),
        ));
    }

    match catalog.album_info(&params.artist, &params.album).await {
        Ok(detail) => Ok(Json(detail)),
        Err(e) => {
            warn!(artist = %params.artist, album = %params.album, error = %e, "Album lookup failed");
            state.record_error(format!("album info: {}", e)).await;
            Err(e.into())
        }
    }
}

/// Build catalog proxy routes
pub fn album_routes() -> Router<AppState> {
    Router::new()
        .route("/api/albums/search", get(search_albums))
        .route("/api/albums/info", get(album_info))
}
