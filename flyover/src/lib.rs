//! Flyover - map tile proxy and GPX track ingestion for 3D flyover viewers
//!
//! The library backs a small HTTP service with two jobs:
//!
//! - Serve slippy-map tiles from a set of named upstream providers through a
//!   persistent disk cache ([`tile::TileProxy`]), falling back to the cached
//!   copy when the provider is unreachable.
//! - Turn an uploaded GPX file into a normalized track with bounds and a
//!   center point ([`track::parse_track`]).
//!
//! The [`server`] module wires both into an axum router.

pub mod cache;
pub mod config;
pub mod logging;
pub mod provider;
pub mod server;
pub mod tile;
pub mod track;

/// Crate version, reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
