//! album-review library interface
//!
//! Album review block support: Last.fm album lookup, the debounced album
//! chooser, block attributes and the server-side card render.

pub mod api;
pub mod attributes;
pub mod catalog;
pub mod editor;
pub mod error;
pub mod logging;
pub mod render;
pub mod widget;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::catalog::AlbumCatalog;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog client; `None` when no API key is configured
    pub catalog: Option<Arc<dyn AlbumCatalog>>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last upstream error for diagnostic purposes
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(catalog: Option<Arc<dyn AlbumCatalog>>) -> Self {
        Self {
            catalog,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Remember an upstream failure for `/health`
    pub async fn record_error(&self, message: impl Into<String>) {
        *self.last_error.write().await = Some(message.into());
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::album_routes())
        .merge(api::preview_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
