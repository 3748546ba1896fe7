//! Server-side render endpoints
//!
//! The editor's live preview posts the block attributes and shows the
//! returned fragment; the published page uses the same render.

use album_review_common::rating::{Glyph, StarCounts, STAR_SLOTS};
use axum::{
    response::Html,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::attributes::AlbumAttributes;
use crate::render::render_album_review;
use crate::AppState;

/// POST /api/render
///
/// **Request:** block attributes (`{"albumTitle": ..., "albumRating": 4, ...}`)
/// **Response:** `text/html` album card fragment
pub async fn render_block(Json(attributes): Json<AlbumAttributes>) -> Html<String> {
    Html(render_album_review(&attributes))
}

/// Request payload for glyph calculation
#[derive(Debug, Deserialize)]
pub struct GlyphRequest {
    pub rating: f64,
}

/// Glyph counts plus the ordered glyph tokens
#[derive(Debug, Serialize)]
pub struct GlyphResponse {
    pub full: u8,
    pub half: u8,
    pub empty: u8,
    pub glyphs: [Glyph; STAR_SLOTS as usize],
}

/// POST /api/rating/glyphs
pub async fn rating_glyphs(Json(request): Json<GlyphRequest>) -> Json<GlyphResponse> {
    let counts = StarCounts::from_rating(request.rating);

    Json(GlyphResponse {
        full: counts.full(),
        half: counts.half(),
        empty: counts.empty(),
        glyphs: counts.glyphs(),
    })
}

/// Build render routes
pub fn preview_routes() -> Router<AppState> {
    Router::new()
        .route("/api/render", post(render_block))
        .route("/api/rating/glyphs", post(rating_glyphs))
}
