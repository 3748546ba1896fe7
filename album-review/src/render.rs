//! Album review card HTML
//!
//! Deterministic render of [`AlbumAttributes`] into the front-end fragment.
//! The rating is the only input to the star row.

use album_review_common::rating::{Glyph, StarCounts};

use crate::attributes::AlbumAttributes;

/// Cover shown until an image URI is set
pub const PLACEHOLDER_COVER_URI: &str = "https://picsum.photos/174/174";

/// Title shown until one is set
pub const PLACEHOLDER_TITLE: &str = "Lorem Ipsum";

const FULL_STAR_SVG: &str = r#"<svg aria-hidden="true" data-prefix="fas" data-icon="star" class="svg-inline--fa fa-star fa-w-18" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 576 512"><path fill="currentColor" d="M259.3 17.8L194 150.2 47.9 171.5c-26.2 3.8-36.7 36.1-17.7 54.6l105.7 103-25 145.5c-4.5 26.3 23.2 46 46.4 33.7L288 439.6l130.7 68.7c23.2 12.2 50.9-7.4 46.4-33.7l-25-145.5 105.7-103c19-18.5 8.5-50.8-17.7-54.6L382 150.2 316.7 17.8c-11.7-23.6-45.6-23.9-57.4 0z"/></svg>"#;

const HALF_STAR_SVG: &str = r#"<svg aria-hidden="true" data-prefix="fas" data-icon="star-half-alt" class="svg-inline--fa fa-star-half-alt fa-w-17" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 536 512"><path fill="currentColor" d="M508.55 171.51L362.18 150.2 296.77 17.81C290.89 5.98 279.42 0 267.95 0c-11.4 0-22.79 5.9-28.69 17.81l-65.43 132.38-146.38 21.29c-26.25 3.8-36.77 36.09-17.74 54.59l105.89 103-25.06 145.48C86.98 495.33 103.57 512 122.15 512c4.93 0 10-1.17 14.87-3.75l130.95-68.68 130.94 68.7c4.86 2.55 9.92 3.71 14.83 3.71 18.6 0 35.22-16.61 31.66-37.4l-25.03-145.49 105.91-102.98c19.04-18.5 8.52-50.8-17.73-54.6zm-121.74 123.2l-18.12 17.62 4.28 24.88 19.52 113.45-102.13-53.59-22.38-11.74.03-317.19 51.03 103.29 11.18 22.63 25.01 3.64 114.23 16.63-82.65 80.38z"/></svg>"#;

const EMPTY_STAR_SVG: &str = r#"<svg aria-hidden="true" data-prefix="far" data-icon="star" class="svg-inline--fa fa-star fa-w-18" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 576 512"><path fill="currentColor" d="M528.1 171.5L382 150.2 316.7 17.8c-11.7-23.6-45.6-23.9-57.4 0L194 150.2 47.9 171.5c-26.2 3.8-36.7 36.1-17.7 54.6l105.7 103-25 145.5c-4.5 26.3 23.2 46 46.4 33.7L288 439.6l130.7 68.7c23.2 12.2 50.9-7.4 46.4-33.7l-25-145.5 105.7-103c19-18.5 8.5-50.8-17.7-54.6zM388.6 312.3l23.7 138.4L288 385.4l-124.3 65.3 23.7-138.4-100.6-98 139-20.2 62.2-126 62.2 126 139 20.2-100.6 98z"/></svg>"#;

/// Inline SVG for one glyph
pub fn glyph_svg(glyph: Glyph) -> &'static str {
    match glyph {
        Glyph::Full => FULL_STAR_SVG,
        Glyph::Half => HALF_STAR_SVG,
        Glyph::Empty => EMPTY_STAR_SVG,
    }
}

/// Escape text for HTML element content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Star row for a rating: always five SVGs
pub fn render_star_rating(rating: f64) -> String {
    let mut html = String::from(r#"<div class="star-rating">"#);
    for glyph in StarCounts::from_rating(rating).glyphs() {
        html.push_str(glyph_svg(glyph));
    }
    html.push_str("</div>");
    html
}

/// Render the album review card
pub fn render_album_review(attrs: &AlbumAttributes) -> String {
    let cover = if attrs.cover_art_uri.is_empty() {
        PLACEHOLDER_COVER_URI
    } else {
        attrs.cover_art_uri.as_str()
    };
    let title = if attrs.title.is_empty() {
        PLACEHOLDER_TITLE
    } else {
        attrs.title.as_str()
    };

    let mut html = format!(
        r#"<div class="album-review"><div class="album-cover-cont"><img src="{}"></div><div class="album-details"><h3 class="album-name-author"><strong>{}</strong>"#,
        escape_html(cover),
        escape_html(title)
    );

    if !attrs.artist.is_empty() {
        html.push_str(" by ");
        html.push_str(&escape_html(&attrs.artist));
    }
    html.push_str("</h3>");

    if !attrs.release_date.is_empty() {
        html.push_str(&format!(
            r#"<p class="album-release-date">Released: {}</p>"#,
            escape_html(&attrs.release_date)
        ));
    }

    if !attrs.genres.is_empty() {
        html.push_str(&format!(
            r#"<p class="album-genre">{}</p>"#,
            escape_html(&attrs.genres.join(", "))
        ));
    }

    html.push_str(r#"<div class="album-rating">"#);
    html.push_str(&render_star_rating(attrs.rating));
    html.push_str("</div></div></div>");

    html
}
