//! Star rating glyph calculation
//!
//! Maps a stored album rating onto a fixed budget of five star glyphs.
//!
//! The rating is clamped to `[0.0, 5.0]` and rounded to the nearest half star
//! (halves round up, so `2.25` becomes `2.5`). Non-finite ratings never fail:
//! `NaN` and `-inf` render as five empty stars, `+inf` as five full stars.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of glyph slots in every rendered rating
pub const STAR_SLOTS: u8 = 5;

/// Highest rating the renderer distinguishes
pub const MAX_RATING: f64 = STAR_SLOTS as f64;

/// One star icon token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Glyph {
    Full,
    Half,
    Empty,
}

impl Glyph {
    /// Text symbol used for terminal output
    pub fn symbol(self) -> char {
        match self {
            Glyph::Full => '★',
            Glyph::Half => '⯪',
            Glyph::Empty => '☆',
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Full/half/empty split of the five glyph slots
///
/// `full + half + empty` is always [`STAR_SLOTS`] and `half` is at most 1.
/// Only [`StarCounts::from_rating`] constructs one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StarCounts {
    full: u8,
    half: u8,
    empty: u8,
}

impl StarCounts {
    /// Compute glyph counts for a rating
    pub fn from_rating(rating: f64) -> Self {
        let half_steps = round_to_half(clamp_rating(rating));
        let whole = half_steps.floor();

        let full = whole as u8;
        let half = u8::from(half_steps - whole == 0.5);

        Self {
            full,
            half,
            empty: STAR_SLOTS - full - half,
        }
    }

    pub fn full(&self) -> u8 {
        self.full
    }

    pub fn half(&self) -> u8 {
        self.half
    }

    pub fn empty(&self) -> u8 {
        self.empty
    }

    /// Glyphs in display order: full stars, then the half star, then empties
    pub fn glyphs(&self) -> [Glyph; STAR_SLOTS as usize] {
        let mut glyphs = [Glyph::Empty; STAR_SLOTS as usize];
        let full = usize::from(self.full).min(glyphs.len());

        for slot in glyphs.iter_mut().take(full) {
            *slot = Glyph::Full;
        }
        if self.half > 0 {
            if let Some(slot) = glyphs.get_mut(full) {
                *slot = Glyph::Half;
            }
        }

        glyphs
    }
}

impl fmt::Display for StarCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for glyph in self.glyphs() {
            write!(f, "{}", glyph)?;
        }
        Ok(())
    }
}

/// Render a rating into exactly five glyphs
pub fn render_glyphs(rating: f64) -> [Glyph; STAR_SLOTS as usize] {
    StarCounts::from_rating(rating).glyphs()
}

fn clamp_rating(rating: f64) -> f64 {
    if rating.is_nan() {
        return 0.0;
    }
    rating.clamp(0.0, MAX_RATING)
}

/// Round to the nearest 0.5; exact quarter points round up
fn round_to_half(rating: f64) -> f64 {
    // f64::round rounds half away from zero, which is half-up for rating >= 0
    (rating * 2.0).round() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(rating: f64) -> (u8, u8, u8) {
        let c = StarCounts::from_rating(rating);
        (c.full, c.half, c.empty)
    }

    #[test]
    fn test_counts_always_sum_to_five() {
        for step in 0..=50 {
            let rating = step as f64 / 10.0;
            let c = StarCounts::from_rating(rating);
            assert_eq!(
                c.full + c.half + c.empty,
                STAR_SLOTS,
                "rating {} produced {:?}",
                rating,
                c
            );
            assert!(c.half <= 1);
        }
    }

    #[test]
    fn test_whole_and_half_ratings() {
        assert_eq!(counts(0.0), (0, 0, 5));
        assert_eq!(counts(3.0), (3, 0, 2));
        assert_eq!(counts(3.5), (3, 1, 1));
        assert_eq!(counts(4.5), (4, 1, 0));
        assert_eq!(counts(5.0), (5, 0, 0));
    }

    #[test]
    fn test_rounds_to_nearest_half() {
        assert_eq!(counts(3.24), (3, 0, 2));
        assert_eq!(counts(3.26), (3, 1, 1));
        assert_eq!(counts(3.76), (4, 0, 1));
        assert_eq!(counts(0.2), (0, 0, 5));
    }

    #[test]
    fn test_quarter_points_round_up() {
        assert_eq!(counts(2.25), (2, 1, 2));
        assert_eq!(counts(2.75), (3, 0, 2));
        assert_eq!(counts(4.75), (5, 0, 0));
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(counts(-1.0), (0, 0, 5));
        assert_eq!(counts(7.5), (5, 0, 0));
    }

    #[test]
    fn test_non_finite_ratings() {
        assert_eq!(counts(f64::NAN), (0, 0, 5));
        assert_eq!(counts(f64::INFINITY), (5, 0, 0));
        assert_eq!(counts(f64::NEG_INFINITY), (0, 0, 5));
    }

    #[test]
    fn test_glyph_order() {
        assert_eq!(
            render_glyphs(2.5),
            [Glyph::Full, Glyph::Full, Glyph::Half, Glyph::Empty, Glyph::Empty]
        );
        assert_eq!(render_glyphs(5.0), [Glyph::Full; 5]);
        assert_eq!(render_glyphs(0.0), [Glyph::Empty; 5]);
    }

    #[test]
    fn test_glyphs_stay_within_slots() {
        for rating in [4.5, 4.75, 5.0, 5.25, f64::INFINITY] {
            let c = StarCounts::from_rating(rating);
            assert!(c.full() + c.half() <= STAR_SLOTS, "rating {}", rating);
            assert_eq!(c.glyphs().len(), STAR_SLOTS as usize);
        }

        let saturated = StarCounts {
            full: 5,
            half: 1,
            empty: 0,
        };
        assert_eq!(saturated.glyphs(), [Glyph::Full; 5]);
    }

    #[test]
    fn test_counts_serialize_with_field_names() {
        let json = serde_json::to_value(StarCounts::from_rating(2.25)).unwrap();
        assert_eq!(json, serde_json::json!({"full": 2, "half": 1, "empty": 2}));
    }

    #[test]
    fn test_display() {
        assert_eq!(StarCounts::from_rating(3.5).to_string(), "★★★⯪☆");
        assert_eq!(StarCounts::from_rating(0.0).to_string(), "☆☆☆☆☆");
    }

    #[test]
    fn test_glyph_serializes_lowercase() {
        let json = serde_json::to_string(&render_glyphs(1.5)).unwrap();
        assert_eq!(json, r#"["full","half","empty","empty","empty"]"#);
    }
}
