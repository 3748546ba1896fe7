//! Editing session for one album review block
//!
//! Pairs the block's [`AlbumAttributes`] with the album chooser. The chooser
//! is only offered when a Last.fm API key is configured; otherwise the
//! author gets a notice and edits every field by hand.

use std::sync::Arc;

use tracing::info;

use crate::attributes::AlbumAttributes;
use crate::catalog::{AlbumCatalog, AlbumSummary, CatalogError, LastFmClient};
use crate::render::render_album_review;
use crate::widget::{AlbumSearchWidget, WidgetOptions};

/// Shown in place of the chooser when no API key is configured
pub const MISSING_API_KEY_NOTICE: &str =
    "Add your Last.FM API Key to use the Album Chooser. Go to Settings > Album Review Settings";

/// Album chooser availability
pub enum AlbumChooser {
    Available(AlbumSearchWidget),
    Unavailable { notice: &'static str },
}

impl AlbumChooser {
    /// Build the chooser from an explicitly passed API key
    pub fn from_api_key(
        api_key: Option<&str>,
        base_url: &str,
        options: WidgetOptions,
    ) -> Result<Self, CatalogError> {
        match api_key.filter(|key| album_review_common::config::is_valid_key(key)) {
            Some(key) => {
                let client = LastFmClient::new(key, base_url)?;
                Ok(Self::with_catalog(Arc::new(client), options))
            }
            None => Ok(Self::Unavailable {
                notice: MISSING_API_KEY_NOTICE,
            }),
        }
    }

    pub fn with_catalog(catalog: Arc<dyn AlbumCatalog>, options: WidgetOptions) -> Self {
        Self::Available(AlbumSearchWidget::new(catalog, options))
    }

    pub fn widget(&self) -> Option<&AlbumSearchWidget> {
        match self {
            Self::Available(widget) => Some(widget),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.widget().is_some()
    }
}

/// One block being edited
pub struct AlbumEditor {
    pub attributes: AlbumAttributes,
    chooser: AlbumChooser,
}

impl AlbumEditor {
    pub fn new(attributes: AlbumAttributes, chooser: AlbumChooser) -> Self {
        Self { attributes, chooser }
    }

    pub fn chooser(&self) -> &AlbumChooser {
        &self.chooser
    }

    /// Pick an album from the chooser's list and copy its detail into the
    /// attributes
    ///
    /// Returns `false` when the chooser is unavailable or the lookup failed;
    /// the attributes are untouched in that case.
    pub async fn choose(&mut self, album: &AlbumSummary) -> bool {
        let Some(widget) = self.chooser.widget() else {
            return false;
        };

        let attributes = &mut self.attributes;
        widget
            .select(album, |detail| {
                info!(artist = %detail.artist, album = %detail.name, "Album chosen");
                attributes.apply_detail(&detail);
            })
            .await
    }

    /// Front-end preview of the block
    pub fn preview_html(&self) -> String {
        render_album_review(&self.attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chooser_unavailable_without_key() {
        let chooser = AlbumChooser::from_api_key(None, "http://localhost", WidgetOptions::default()).unwrap();
        assert!(!chooser.is_available());
        assert!(matches!(
            chooser,
            AlbumChooser::Unavailable { notice } if notice.contains("Last.FM API Key")
        ));
    }

    #[test]
    fn test_chooser_unavailable_with_blank_key() {
        let chooser =
            AlbumChooser::from_api_key(Some("  "), "http://localhost", WidgetOptions::default()).unwrap();
        assert!(!chooser.is_available());
    }

    #[test]
    fn test_chooser_available_with_key() {
        let chooser =
            AlbumChooser::from_api_key(Some("key"), "http://localhost", WidgetOptions::default()).unwrap();
        assert!(chooser.is_available());
    }

    #[tokio::test]
    async fn test_choose_without_chooser_is_noop() {
        let chooser = AlbumChooser::from_api_key(None, "http://localhost", WidgetOptions::default()).unwrap();
        let mut editor = AlbumEditor::new(AlbumAttributes::default(), chooser);

        let album = AlbumSummary {
            name: "A".to_string(),
            artist: "B".to_string(),
            thumbnail_uri: String::new(),
        };

        assert!(!editor.choose(&album).await);
        assert_eq!(editor.attributes, AlbumAttributes::default());
        assert!(editor.preview_html().contains("Lorem Ipsum"));
    }
}
