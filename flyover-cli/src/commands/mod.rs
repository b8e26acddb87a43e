//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`fetch`] - Fetch a single tile through the cache
//! - [`serve`] - Run the HTTP server
//! - [`track`] - Parse a GPX file and print the track as JSON

pub mod fetch;
pub mod serve;
pub mod track;
