//! Album review block attributes
//!
//! [`AlbumAttributes`] is the record the host editor persists for one review
//! block. It round-trips through JSON with the host's attribute names
//! (`albumTitle`, `albumArtist`, ...). The host may omit any attribute or send
//! `null`; both mean "use the default". A missing rating defaults to 3.

use album_review_common::rating::MAX_RATING;
use album_review_common::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::AlbumDetail;

/// Rating given to a new review block
pub const DEFAULT_RATING: f64 = 3.0;

/// Persisted attributes of one album review block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumAttributes {
    #[serde(rename = "albumTitle", default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(rename = "albumArtist", default, deserialize_with = "null_as_default")]
    pub artist: String,

    #[serde(rename = "albumGenre", default, deserialize_with = "genre_list")]
    pub genres: Vec<String>,

    #[serde(rename = "albumRating", default = "default_rating", deserialize_with = "rating_or_default")]
    pub rating: f64,

    #[serde(rename = "albumCoverArtUri", default, deserialize_with = "null_as_default")]
    pub cover_art_uri: String,

    #[serde(rename = "albumReleaseDate", default, deserialize_with = "null_as_default")]
    pub release_date: String,
}

fn default_rating() -> f64 {
    DEFAULT_RATING
}

impl Default for AlbumAttributes {
    fn default() -> Self {
        Self {
            title: String::new(),
            artist: String::new(),
            genres: Vec::new(),
            rating: DEFAULT_RATING,
            cover_art_uri: String::new(),
            release_date: String::new(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn rating_or_default<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(DEFAULT_RATING))
}

/// The genre field is free text in the editor, so older blocks may hold a
/// comma separated string instead of a list
fn genre_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum GenreField {
        List(Vec<String>),
        Text(String),
    }

    Ok(match Option::<GenreField>::deserialize(deserializer)? {
        Some(GenreField::List(genres)) => genres,
        Some(GenreField::Text(text)) => split_genres(&text),
        None => Vec::new(),
    })
}

/// Split comma separated genre text, trimming and dropping blanks
pub fn split_genres(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|genre| !genre.is_empty())
        .map(str::to_string)
        .collect()
}

impl AlbumAttributes {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_artist(&mut self, artist: impl Into<String>) {
        self.artist = artist.into();
    }

    /// Replace genres from the comma separated form field
    pub fn set_genre_text(&mut self, text: &str) {
        self.genres = split_genres(text);
    }

    /// Set the rating, clamped to `[0, 5]`
    ///
    /// # Errors
    /// Non-finite values are rejected and leave the rating unchanged.
    pub fn set_rating(&mut self, rating: f64) -> Result<()> {
        if !rating.is_finite() {
            return Err(Error::InvalidInput(format!(
                "rating must be a finite number, got {}",
                rating
            )));
        }
        self.rating = rating.clamp(0.0, MAX_RATING);
        Ok(())
    }

    pub fn set_cover_art_uri(&mut self, uri: impl Into<String>) {
        self.cover_art_uri = uri.into();
    }

    pub fn set_release_date(&mut self, date: impl Into<String>) {
        self.release_date = date.into();
    }

    /// Bulk update from a catalog selection; the rating is left as is
    pub fn apply_detail(&mut self, detail: &AlbumDetail) {
        self.cover_art_uri = detail.cover_art_uri.clone();
        self.artist = detail.artist.clone();
        self.title = detail.name.clone();
        self.genres = detail.genres.clone();
        self.release_date = detail.release_date.clone();
    }
}
