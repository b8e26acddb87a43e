//! Track command - parse a GPX file and print the normalized track.
//!
//! Prints the same JSON document `POST /upload` returns, so the output can be
//! fed straight to a viewer.

use std::path::{Path, PathBuf};

use flyover::track::{parse_track, TrackRecord};

use crate::error::CliError;

/// Arguments for the track command.
pub struct TrackArgs {
    pub file: PathBuf,
    /// Print only name, point count, bounds and center
    pub summary: bool,
}

/// Run the track command.
pub fn run(args: TrackArgs) -> Result<(), CliError> {
    let record = load_track(&args.file)?;

    if args.summary {
        print_summary(&record);
    } else {
        let json = serde_json::to_string_pretty(&record).map_err(CliError::Output)?;
        println!("{}", json);
    }
    Ok(())
}

fn load_track(path: &Path) -> Result<TrackRecord, CliError> {
    let raw = std::fs::read(path).map_err(|e| CliError::FileRead {
        path: path.display().to_string(),
        error: e,
    })?;
    Ok(parse_track(&raw)?)
}

fn print_summary(record: &TrackRecord) {
    let b = &record.bounds;
    println!("Track: {}", record.name);
    println!("  Points:    {}", record.points.len());
    println!("  Latitude:  {:.6} .. {:.6}", b.min_lat, b.max_lat);
    println!("  Longitude: {:.6} .. {:.6}", b.min_lon, b.max_lon);
    println!("  Elevation: {:.1} m .. {:.1} m", b.min_ele, b.max_ele);
    println!(
        "  Center:    {:.6}, {:.6}",
        record.center.lat, record.center.lon
    );
}
