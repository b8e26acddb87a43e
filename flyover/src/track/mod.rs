//! GPX track ingestion.
//!
//! Turns an uploaded GPX file into a [`TrackRecord`]: every point in file
//! order, the bounding box over latitude, longitude and elevation, and the
//! center of that box. Records are built per request and never stored.

mod error;
mod parser;
mod types;

pub use error::TrackError;
pub use parser::parse_track;
pub use types::{Center, TrackBounds, TrackPoint, TrackRecord, UNNAMED_TRACK};
