//! Normalized track types.

use serde::Serialize;

/// Name used when the first track has none.
pub const UNNAMED_TRACK: &str = "Unnamed Track";

/// One GPS fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Elevation in meters, 0 when the file omits it.
    pub ele: f64,
}

impl TrackPoint {
    pub fn new(lat: f64, lon: f64, ele: f64) -> Self {
        Self { lat, lon, ele }
    }
}

/// Running min/max over every point of a track.
///
/// Starts at (+∞, −∞) in each dimension, so bounds are only meaningful once
/// at least one point has been folded in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_ele: f64,
    pub max_ele: f64,
}

impl TrackBounds {
    /// Empty bounds, ready to fold.
    pub fn empty() -> Self {
        Self {
            min_lat: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
            min_lon: f64::INFINITY,
            max_lon: f64::NEG_INFINITY,
            min_ele: f64::INFINITY,
            max_ele: f64::NEG_INFINITY,
        }
    }

    /// Widen the bounds to include `point`.
    pub fn fold(&mut self, point: &TrackPoint) {
        self.min_lat = self.min_lat.min(point.lat);
        self.max_lat = self.max_lat.max(point.lat);
        self.min_lon = self.min_lon.min(point.lon);
        self.max_lon = self.max_lon.max(point.lon);
        self.min_ele = self.min_ele.min(point.ele);
        self.max_ele = self.max_ele.max(point.ele);
    }

    /// Midpoint of the lat/lon box. Not a weighted centroid.
    pub fn center(&self) -> Center {
        Center {
            lat: (self.min_lat + self.max_lat) / 2.0,
            lon: (self.min_lon + self.max_lon) / 2.0,
        }
    }
}

/// Center of a track's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

/// A parsed, normalized track, ready to hand to the 3D view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRecord {
    pub name: String,
    /// Points of every segment of every track, in file order.
    pub points: Vec<TrackPoint>,
    pub bounds: TrackBounds,
    pub center: Center,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bounds() {
        let bounds = TrackBounds::empty();
        assert_eq!(bounds.min_lat, f64::INFINITY);
        assert_eq!(bounds.max_ele, f64::NEG_INFINITY);
    }

    #[test]
    fn test_fold_single_point() {
        let mut bounds = TrackBounds::empty();
        bounds.fold(&TrackPoint::new(46.5, 7.9, 1200.0));

        assert_eq!(bounds.min_lat, 46.5);
        assert_eq!(bounds.max_lat, 46.5);
        assert_eq!(bounds.min_ele, 1200.0);
        assert_eq!(bounds.max_ele, 1200.0);
    }

    #[test]
    fn test_center_is_box_midpoint() {
        let mut bounds = TrackBounds::empty();
        // Many points near one corner do not pull the center
        for _ in 0..10 {
            bounds.fold(&TrackPoint::new(0.0, 0.0, 0.0));
        }
        bounds.fold(&TrackPoint::new(10.0, -20.0, 0.0));

        assert_eq!(bounds.center(), Center { lat: 5.0, lon: -10.0 });
    }

    #[test]
    fn test_bounds_serialize_camel_case() {
        let mut bounds = TrackBounds::empty();
        bounds.fold(&TrackPoint::new(1.0, 2.0, 3.0));
        let json = serde_json::to_value(bounds).unwrap();

        assert_eq!(json["minLat"], 1.0);
        assert_eq!(json["maxLon"], 2.0);
        assert_eq!(json["minEle"], 3.0);
    }
}
