//! Album search-and-select widget
//!
//! Turns free-text input into a selected album's [`AlbumDetail`]:
//!
//! ```text
//! Idle → Typing → (debounce elapsed) → Searching → Listing → Idle | Selecting
//! ```
//!
//! Every input change replaces the query and re-arms a single debounce timer
//! (last write wins). When the timer fires, one search request is dispatched
//! as its own task, so a later keystroke aborts only the timer and never an
//! in-flight request.
//!
//! Catalog failures are never surfaced: a failed search leaves an empty list,
//! a failed selection clears the list without invoking the completion.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::catalog::{AlbumCatalog, AlbumDetail, AlbumSummary};

/// Quiet interval before a search is dispatched
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Widget tuning
#[derive(Debug, Clone)]
pub struct WidgetOptions {
    /// Quiet interval after the last input change before searching
    pub debounce: Duration,

    /// Drop search responses that arrive after a newer search was dispatched
    ///
    /// Off by default: overlapping searches are not sequenced and the last
    /// response to arrive wins, even when it belongs to an older query.
    pub discard_stale_results: bool,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            discard_stale_results: false,
        }
    }
}

/// Observable widget phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetPhase {
    /// No pending work, list empty or dismissed
    Idle,
    /// Debounce timer armed
    Typing,
    /// Search request in flight
    Searching,
    /// Results displayed
    Listing,
    /// Detail request in flight for a chosen album
    Selecting,
}

struct WidgetState {
    query: String,
    phase: WidgetPhase,
    pending_timer: Option<JoinHandle<()>>,
    /// Id of the most recently dispatched search
    latest_search: u64,
}

struct WidgetInner {
    catalog: Arc<dyn AlbumCatalog>,
    options: WidgetOptions,
    state: Mutex<WidgetState>,
    albums: watch::Sender<Vec<AlbumSummary>>,
}

/// Debounced album search widget
///
/// Cheap to clone; clones share the same query, timer and list.
#[derive(Clone)]
pub struct AlbumSearchWidget {
    inner: Arc<WidgetInner>,
}

impl AlbumSearchWidget {
    pub fn new(catalog: Arc<dyn AlbumCatalog>, options: WidgetOptions) -> Self {
        let (albums, _) = watch::channel(Vec::new());

        Self {
            inner: Arc::new(WidgetInner {
                catalog,
                options,
                state: Mutex::new(WidgetState {
                    query: String::new(),
                    phase: WidgetPhase::Idle,
                    pending_timer: None,
                    latest_search: 0,
                }),
                albums,
            }),
        }
    }

    /// Replace the search text and re-arm the debounce timer
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn set_query(&self, text: impl Into<String>) {
        let mut state = self.inner.state.lock().await;

        state.query = text.into();
        state.phase = WidgetPhase::Typing;

        if let Some(timer) = state.pending_timer.take() {
            timer.abort();
        }

        let inner = Arc::clone(&self.inner);
        state.pending_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(inner.options.debounce).await;
            WidgetInner::dispatch_search(&inner).await;
        }));
    }

    /// Fetch detail for a listed album and hand it to `on_select`
    ///
    /// The list is cleared whether or not the lookup succeeds. On failure
    /// `on_select` is not called. Returns whether `on_select` ran.
    pub async fn select<F>(&self, album: &AlbumSummary, on_select: F) -> bool
    where
        F: FnOnce(AlbumDetail),
    {
        {
            // An armed debounce timer keeps the widget in Typing; it will
            // publish a fresh list when it fires.
            let mut state = self.inner.state.lock().await;
            if matches!(state.phase, WidgetPhase::Idle | WidgetPhase::Listing) {
                state.phase = WidgetPhase::Selecting;
            }
        }

        let selected = match self.inner.catalog.album_info(&album.artist, &album.name).await {
            Ok(detail) => {
                on_select(detail);
                true
            }
            Err(e) => {
                warn!(
                    artist = %album.artist,
                    album = %album.name,
                    error = %e,
                    "Album detail lookup failed; selection dropped"
                );
                false
            }
        };

        self.inner.albums.send_replace(Vec::new());

        let mut state = self.inner.state.lock().await;
        if state.phase == WidgetPhase::Selecting {
            state.phase = WidgetPhase::Idle;
        }

        selected
    }

    /// Select the album at `index` in the current list
    ///
    /// Returns `false` without any request when the index is out of range.
    pub async fn select_index<F>(&self, index: usize, on_select: F) -> bool
    where
        F: FnOnce(AlbumDetail),
    {
        let album = self.inner.albums.borrow().get(index).cloned();

        match album {
            Some(album) => self.select(&album, on_select).await,
            None => false,
        }
    }

    /// Snapshot of the displayed list
    pub fn albums(&self) -> Vec<AlbumSummary> {
        self.inner.albums.borrow().clone()
    }

    /// Subscribe to list replacements
    ///
    /// Every completed search and every selection publishes a new list,
    /// including empty ones.
    pub fn subscribe(&self) -> watch::Receiver<Vec<AlbumSummary>> {
        self.inner.albums.subscribe()
    }

    pub async fn query(&self) -> String {
        self.inner.state.lock().await.query.clone()
    }

    pub async fn phase(&self) -> WidgetPhase {
        self.inner.state.lock().await.phase
    }
}

impl WidgetInner {
    /// Timer fired: start one search for the current query
    async fn dispatch_search(inner: &Arc<Self>) {
        let mut state = inner.state.lock().await;
        state.pending_timer = None;

        if state.query.trim().is_empty() {
            state.phase = WidgetPhase::Idle;
            drop(state);
            inner.albums.send_replace(Vec::new());
            return;
        }

        state.latest_search += 1;
        state.phase = WidgetPhase::Searching;
        let search_id = state.latest_search;
        let query = state.query.clone();
        drop(state);

        debug!(query = %query, search_id, "Dispatching album search");

        let inner = Arc::clone(inner);
        tokio::spawn(async move {
            inner.run_search(search_id, query).await;
        });
    }

    async fn run_search(&self, search_id: u64, query: String) {
        let result = self.catalog.search_albums(&query).await;

        let mut state = self.state.lock().await;

        if self.options.discard_stale_results && search_id != state.latest_search {
            debug!(query = %query, search_id, "Discarding stale search results");
            return;
        }

        let albums = result.unwrap_or_else(|e| {
            warn!(query = %query, error = %e, "Album search failed; showing no results");
            Vec::new()
        });

        if state.phase == WidgetPhase::Searching {
            state.phase = if albums.is_empty() {
                WidgetPhase::Idle
            } else {
                WidgetPhase::Listing
            };
        }
        drop(state);

        self.albums.send_replace(albums);
    }
}
