//! HTTP API handlers for album-review

pub mod albums;
pub mod health;
pub mod preview;

pub use albums::album_routes;
pub use health::health_routes;
pub use preview::preview_routes;
