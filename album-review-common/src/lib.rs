//! # Album Review Common Library
//!
//! Shared code for the album review service and tools including:
//! - Error types
//! - Bootstrap configuration loading and API key resolution
//! - Star rating glyph calculation

pub mod config;
pub mod error;
pub mod rating;

pub use error::{Error, Result};
pub use rating::{Glyph, StarCounts};
