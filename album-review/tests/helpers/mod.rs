//! Test Helper Utilities
//!
//! Shared doubles for album-review tests: an in-process catalog with
//! scripted responses and a local HTTP stand-in for the Last.fm web service.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use album_review::catalog::{AlbumCatalog, AlbumDetail, AlbumSummary, CatalogError};
use axum::{extract::Query, routing::get, Json, Router};
use serde_json::{json, Value};

/// Scripted in-process catalog
#[derive(Default)]
pub struct StubCatalog {
    search_calls: Mutex<Vec<String>>,
    info_calls: Mutex<Vec<(String, String)>>,
    search_delays: Mutex<HashMap<String, Duration>>,
    fail_search: Mutex<bool>,
    detail: Mutex<Option<AlbumDetail>>,
}

impl StubCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Delay the response for one query (virtual time under `start_paused`)
    pub fn delay_search(&self, query: &str, delay: Duration) {
        self.search_delays
            .lock()
            .unwrap()
            .insert(query.to_string(), delay);
    }

    pub fn fail_searches(&self) {
        *self.fail_search.lock().unwrap() = true;
    }

    pub fn set_detail(&self, detail: AlbumDetail) {
        *self.detail.lock().unwrap() = Some(detail);
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn info_calls(&self) -> Vec<(String, String)> {
        self.info_calls.lock().unwrap().clone()
    }
}

/// Three results derived from the query text
pub fn summaries_for(query: &str) -> Vec<AlbumSummary> {
    (1..=3)
        .map(|i| AlbumSummary {
            name: format!("{query} {i}"),
            artist: format!("Artist {i}"),
            thumbnail_uri: format!("https://img/{query}-{i}.png"),
        })
        .collect()
}

pub fn sample_detail() -> AlbumDetail {
    AlbumDetail {
        name: "OK Computer".to_string(),
        artist: "Radiohead".to_string(),
        cover_art_uri: "https://img/okc-large.png".to_string(),
        genres: vec!["alternative".to_string(), "rock".to_string()],
        release_date: "12 May".to_string(),
    }
}

#[async_trait::async_trait]
impl AlbumCatalog for StubCatalog {
    async fn search_albums(&self, query: &str) -> Result<Vec<AlbumSummary>, CatalogError> {
        self.search_calls.lock().unwrap().push(query.to_string());

        let delay = self.search_delays.lock().unwrap().get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if *self.fail_search.lock().unwrap() {
            return Err(CatalogError::NetworkError("connection refused".to_string()));
        }

        Ok(summaries_for(query))
    }

    async fn album_info(&self, artist: &str, album: &str) -> Result<AlbumDetail, CatalogError> {
        self.info_calls
            .lock()
            .unwrap()
            .push((artist.to_string(), album.to_string()));

        let detail = self.detail.lock().unwrap().clone();
        detail.ok_or_else(|| CatalogError::ParseError("missing album".to_string()))
    }
}

fn images(prefix: &str) -> Value {
    json!([
        {"#text": format!("{prefix}-s.png"), "size": "small"},
        {"#text": format!("{prefix}-m.png"), "size": "medium"},
        {"#text": format!("{prefix}-l.png"), "size": "large"},
        {"#text": format!("{prefix}-xl.png"), "size": "extralarge"}
    ])
}

/// Last.fm stand-in
///
/// - `album.search`: two matches; album text `"broken"` returns non-JSON and
///   `"odd error"` an error payload without an integer code
/// - `album.getinfo`: album `"Missing"` yields error 6; otherwise detail
///   with `wiki.published` only when album is `"With Wiki"`
/// - any other api_key than `"test-key"` yields error 10
async fn lastfm_stub(Query(params): Query<HashMap<String, String>>) -> axum::response::Response {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    if params.get("api_key").map(String::as_str) != Some("test-key") {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"error": 10, "message": "Invalid API key"})),
        )
            .into_response();
    }
    if params.get("format").map(String::as_str) != Some("json") {
        return (StatusCode::BAD_REQUEST, "format=json required").into_response();
    }

    let album = params.get("album").cloned().unwrap_or_default();

    match params.get("method").map(String::as_str) {
        Some("album.search") if album == "broken" => {
            (StatusCode::OK, "<html>oops</html>").into_response()
        }
        Some("album.search") if album == "odd error" => {
            Json(json!({"error": "n/a", "message": "Temporarily unavailable"})).into_response()
        }
        Some("album.search") => Json(json!({
            "results": {
                "opensearch:totalResults": "2",
                "albummatches": {"album": [
                    {"name": format!("{album} Deluxe"), "artist": "First Artist", "image": images("first")},
                    {"name": album.clone(), "artist": "Second Artist", "image": images("second")}
                ]}
            }
        }))
        .into_response(),
        Some("album.getinfo") if album == "Missing" => {
            Json(json!({"error": 6, "message": "Album not found"})).into_response()
        }
        Some("album.getinfo") => {
            let artist = params.get("artist").cloned().unwrap_or_default();
            let mut body = json!({
                "album": {
                    "name": album.clone(),
                    "artist": artist,
                    "image": images("detail"),
                    "tags": {"tag": [{"name": "electronic"}, {"name": "ambient"}]}
                }
            });
            if album == "With Wiki" {
                body["album"]["wiki"] = json!({"published": "12 May, 2005, 00:00"});
            }
            Json(body).into_response()
        }
        _ => (StatusCode::BAD_REQUEST, "unknown method").into_response(),
    }
}

/// Serve the Last.fm stand-in on an ephemeral port; returns its base URL
pub async fn spawn_lastfm_stub() -> String {
    let app = Router::new().route("/2.0/", get(lastfm_stub));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/2.0", addr)
}
