//! Remote album catalog
//!
//! The editor only needs two lookups from the catalog service: a free-text
//! album search and a detail lookup for one (artist, album) pair.
//! [`AlbumCatalog`] is the seam the search widget and HTTP handlers depend
//! on; [`LastFmClient`] is the production implementation.

pub mod lastfm_client;
pub mod models;

pub use lastfm_client::LastFmClient;
pub use models::{AlbumDetail, AlbumSummary};

use thiserror::Error;

/// Catalog client errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Catalog service error {code}: {message}")]
    Service { code: i64, message: String },

    #[error("Album not found: {0}")]
    NotFound(String),
}

/// Read-only album catalog
#[async_trait::async_trait]
pub trait AlbumCatalog: Send + Sync {
    /// Free-text album search
    ///
    /// # Errors
    /// Any transport, status or payload problem. Callers in the editor treat
    /// every variant the same way (an empty result list).
    async fn search_albums(&self, query: &str) -> Result<Vec<AlbumSummary>, CatalogError>;

    /// Detail lookup for one album
    async fn album_info(&self, artist: &str, album: &str) -> Result<AlbumDetail, CatalogError>;
}
