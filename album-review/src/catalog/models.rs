//! Catalog response shapes and normalization
//!
//! Raw Last.fm payloads are deserialized into private `Raw*` structs and then
//! normalized into the two shapes the editor works with: [`AlbumSummary`]
//! (dropdown entries) and [`AlbumDetail`] (a selected album).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::CatalogError;

/// Position of the mid-resolution thumbnail in Last.fm's image size list
/// (small, medium, large, extralarge)
pub const THUMBNAIL_IMAGE_INDEX: usize = 2;

/// Last.fm error code for an unknown album/artist pair
const LASTFM_INVALID_PARAMETERS: i64 = 6;

/// One dropdown entry from an album search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumSummary {
    pub name: String,
    pub artist: String,
    pub thumbnail_uri: String,
}

/// Normalized detail of a selected album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumDetail {
    pub name: String,
    pub artist: String,
    pub cover_art_uri: String,
    /// Tag names in the order the service returned them
    pub genres: Vec<String>,
    /// Day and month of publication (`"12 May"`), empty when unknown
    pub release_date: String,
}

#[derive(Debug, Deserialize)]
struct RawSearchResponse {
    results: RawSearchResults,
}

#[derive(Debug, Deserialize)]
struct RawSearchResults {
    albummatches: RawAlbumMatches,
}

#[derive(Debug, Deserialize)]
struct RawAlbumMatches {
    #[serde(default, deserialize_with = "one_or_many")]
    album: Vec<RawAlbumMatch>,
}

#[derive(Debug, Deserialize)]
struct RawAlbumMatch {
    name: String,
    artist: String,
    #[serde(default, deserialize_with = "one_or_many")]
    image: Vec<RawImage>,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    #[serde(rename = "#text", default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct RawInfoResponse {
    album: RawAlbumInfo,
}

#[derive(Debug, Deserialize)]
struct RawAlbumInfo {
    name: String,
    artist: String,
    #[serde(default, deserialize_with = "one_or_many")]
    image: Vec<RawImage>,
    #[serde(default, deserialize_with = "lenient_tags")]
    tags: Vec<RawTag>,
    #[serde(default)]
    wiki: Option<RawWiki>,
}

#[derive(Debug, Deserialize)]
struct RawTagList {
    #[serde(default, deserialize_with = "one_or_many")]
    tag: Vec<RawTag>,
}

#[derive(Debug, Deserialize)]
struct RawTag {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawWiki {
    #[serde(default)]
    published: Option<String>,
}

/// Last.fm collapses single-element arrays into a bare object
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
        Null(()),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(items) => items,
        OneOrMany::One(item) => vec![item],
        OneOrMany::Null(()) => Vec::new(),
    })
}

/// Untagged albums come back with `"tags": ""` instead of an object
fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<RawTag>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TagsField {
        List(RawTagList),
        Other(Value),
    }

    Ok(match TagsField::deserialize(deserializer)? {
        TagsField::List(list) => list.tag,
        TagsField::Other(_) => Vec::new(),
    })
}

fn thumbnail(images: &[RawImage]) -> String {
    images
        .get(THUMBNAIL_IMAGE_INDEX)
        .map(|image| image.text.clone())
        .unwrap_or_default()
}

/// Release date shown on the card: everything before the first comma of the
/// wiki `published` field (`"12 May 2005, 00:00"` → `"12 May 2005"`)
pub fn release_date_from_published(published: &str) -> String {
    published.split(',').next().unwrap_or_default().to_string()
}

/// Reject Last.fm `{"error": code, "message": ...}` payloads
///
/// Any `error` key counts; a code that is not an integer is reported as 0.
pub(crate) fn check_service_error(body: &Value) -> Result<(), CatalogError> {
    let Some(error) = body.get("error") else {
        return Ok(());
    };
    let code = error
        .as_i64()
        .or_else(|| error.as_str().and_then(|text| text.trim().parse().ok()))
        .unwrap_or(0);

    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    if code == LASTFM_INVALID_PARAMETERS {
        return Err(CatalogError::NotFound(message));
    }

    Err(CatalogError::Service { code, message })
}

/// Normalize an `album.search` response into dropdown entries
pub fn normalize_search(body: Value) -> Result<Vec<AlbumSummary>, CatalogError> {
    let response: RawSearchResponse =
        serde_json::from_value(body).map_err(|e| CatalogError::ParseError(e.to_string()))?;

    Ok(response
        .results
        .albummatches
        .album
        .into_iter()
        .map(|raw| AlbumSummary {
            thumbnail_uri: thumbnail(&raw.image),
            name: raw.name,
            artist: raw.artist,
        })
        .collect())
}

/// Normalize an `album.getinfo` response into an [`AlbumDetail`]
pub fn normalize_album_info(body: Value) -> Result<AlbumDetail, CatalogError> {
    let response: RawInfoResponse =
        serde_json::from_value(body).map_err(|e| CatalogError::ParseError(e.to_string()))?;
    let album = response.album;

    let release_date = album
        .wiki
        .and_then(|wiki| wiki.published)
        .map(|published| release_date_from_published(&published))
        .unwrap_or_default();

    Ok(AlbumDetail {
        cover_art_uri: thumbnail(&album.image),
        genres: album.tags.into_iter().map(|tag| tag.name).collect(),
        name: album.name,
        artist: album.artist,
        release_date,
    })
}
