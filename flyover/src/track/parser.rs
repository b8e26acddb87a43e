//! GPX → [`TrackRecord`] conversion.

use tracing::debug;

use super::error::TrackError;
use super::types::{TrackBounds, TrackPoint, TrackRecord, UNNAMED_TRACK};

/// Parse a GPX upload into a normalized track.
///
/// Walks every point of every segment of every track in document order,
/// collecting points and folding them into the bounding box in one pass. A
/// point without elevation counts as elevation 0, both in the point list and
/// in the bounds.
///
/// The whole document is parsed before anything is returned; there are no
/// partial results. The output depends only on `raw`.
///
/// # Errors
///
/// - [`TrackError::Malformed`] if `raw` is not UTF-8 or not valid GPX
/// - [`TrackError::Empty`] if the file holds no track points
pub fn parse_track(raw: &[u8]) -> Result<TrackRecord, TrackError> {
    let text = std::str::from_utf8(raw).map_err(|e| TrackError::Malformed(e.to_string()))?;
    let gpx = gpx::read(text.as_bytes()).map_err(|e| TrackError::Malformed(e.to_string()))?;

    let name = gpx
        .tracks
        .first()
        .and_then(|track| track.name.as_deref())
        .filter(|name| !name.is_empty())
        .unwrap_or(UNNAMED_TRACK)
        .to_string();

    let mut points = Vec::new();
    let mut bounds = TrackBounds::empty();

    for track in &gpx.tracks {
        for segment in &track.segments {
            for waypoint in &segment.points {
                let geo = waypoint.point();
                let point = TrackPoint::new(geo.y(), geo.x(), waypoint.elevation.unwrap_or(0.0));
                bounds.fold(&point);
                points.push(point);
            }
        }
    }

    if points.is_empty() {
        return Err(TrackError::Empty);
    }

    debug!(name = %name, points = points.len(), "Parsed GPX track");

    Ok(TrackRecord {
        name,
        center: bounds.center(),
        points,
        bounds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::Center;

    fn gpx_document(tracks: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="flyover-tests" xmlns="http://www.topografix.com/GPX/1/1">
{}
</gpx>"#,
            tracks
        )
    }

    fn three_point_track() -> String {
        gpx_document(
            r#"<trk>
  <name>Morning Ride</name>
  <trkseg>
    <trkpt lat="10" lon="10"><ele>100</ele></trkpt>
    <trkpt lat="20" lon="20"><ele>200</ele></trkpt>
    <trkpt lat="30" lon="30"><ele>300</ele></trkpt>
  </trkseg>
</trk>"#,
        )
    }

    #[test]
    fn test_three_point_track() {
        let record = parse_track(three_point_track().as_bytes()).unwrap();

        assert_eq!(record.name, "Morning Ride");
        assert_eq!(
            record.points,
            vec![
                TrackPoint::new(10.0, 10.0, 100.0),
                TrackPoint::new(20.0, 20.0, 200.0),
                TrackPoint::new(30.0, 30.0, 300.0),
            ]
        );
        assert_eq!(
            record.bounds,
            TrackBounds {
                min_lat: 10.0,
                max_lat: 30.0,
                min_lon: 10.0,
                max_lon: 30.0,
                min_ele: 100.0,
                max_ele: 300.0,
            }
        );
        assert_eq!(record.center, Center { lat: 20.0, lon: 20.0 });
    }

    #[test]
    fn test_lat_lon_not_swapped() {
        let doc = gpx_document(
            r#"<trk><trkseg><trkpt lat="46.5" lon="7.9"><ele>1</ele></trkpt></trkseg></trk>"#,
        );
        let record = parse_track(doc.as_bytes()).unwrap();
        assert_eq!(record.points[0].lat, 46.5);
        assert_eq!(record.points[0].lon, 7.9);
    }

    #[test]
    fn test_empty_track_fails() {
        let doc = gpx_document("<trk><name>Nothing</name><trkseg></trkseg></trk>");
        assert_eq!(parse_track(doc.as_bytes()), Err(TrackError::Empty));
    }

    #[test]
    fn test_no_tracks_fails() {
        let doc = gpx_document("");
        assert_eq!(parse_track(doc.as_bytes()), Err(TrackError::Empty));
    }

    #[test]
    fn test_missing_elevation_is_zero_and_extremum() {
        let doc = gpx_document(
            r#"<trk><trkseg>
    <trkpt lat="1" lon="1"><ele>50</ele></trkpt>
    <trkpt lat="2" lon="2"></trkpt>
    <trkpt lat="3" lon="3"><ele>80</ele></trkpt>
</trkseg></trk>"#,
        );
        let record = parse_track(doc.as_bytes()).unwrap();

        assert_eq!(record.points[1].ele, 0.0);
        assert_eq!(record.bounds.min_ele, 0.0);
        assert_eq!(record.bounds.max_ele, 80.0);
    }

    #[test]
    fn test_missing_elevation_can_be_max() {
        let doc = gpx_document(
            r#"<trk><trkseg>
    <trkpt lat="1" lon="1"><ele>-20</ele></trkpt>
    <trkpt lat="2" lon="2"/>
</trkseg></trk>"#,
        );
        let record = parse_track(doc.as_bytes()).unwrap();
        assert_eq!(record.bounds.min_ele, -20.0);
        assert_eq!(record.bounds.max_ele, 0.0);
    }

    #[test]
    fn test_unnamed_track_placeholder() {
        let doc = gpx_document(
            r#"<trk><trkseg><trkpt lat="1" lon="1"/></trkseg></trk>"#,
        );
        let record = parse_track(doc.as_bytes()).unwrap();
        assert_eq!(record.name, UNNAMED_TRACK);
    }

    #[test]
    fn test_all_tracks_and_segments_in_order() {
        let doc = gpx_document(
            r#"<trk>
  <name>First</name>
  <trkseg><trkpt lat="1" lon="1"/><trkpt lat="2" lon="2"/></trkseg>
  <trkseg><trkpt lat="3" lon="3"/></trkseg>
</trk>
<trk>
  <name>Second</name>
  <trkseg><trkpt lat="4" lon="4"/></trkseg>
</trk>"#,
        );
        let record = parse_track(doc.as_bytes()).unwrap();

        assert_eq!(record.name, "First");
        let lats: Vec<f64> = record.points.iter().map(|p| p.lat).collect();
        assert_eq!(lats, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(record.bounds.max_lat, 4.0);
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let bytes = [0x3C, 0x67, 0x70, 0x78, 0xFF, 0xFE];
        assert!(matches!(parse_track(&bytes), Err(TrackError::Malformed(_))));
    }

    #[test]
    fn test_invalid_xml_is_malformed() {
        let result = parse_track(b"<gpx version=\"1.1\"><trk><trkseg>");
        assert!(matches!(result, Err(TrackError::Malformed(_))));
    }

    #[test]
    fn test_not_gpx_is_malformed() {
        assert!(matches!(
            parse_track(b"lat,lon\n1,2\n"),
            Err(TrackError::Malformed(_))
        ));
    }

    #[test]
    fn test_parsing_is_pure() {
        let doc = three_point_track();
        let first = parse_track(doc.as_bytes()).unwrap();
        let second = parse_track(doc.as_bytes()).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_record_json_shape() {
        let record = parse_track(three_point_track().as_bytes()).unwrap();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["name"], "Morning Ride");
        assert_eq!(json["points"].as_array().unwrap().len(), 3);
        assert_eq!(json["points"][0]["ele"], 100.0);
        assert_eq!(json["bounds"]["maxEle"], 300.0);
        assert_eq!(json["center"]["lat"], 20.0);
        assert_eq!(json["center"]["lon"], 20.0);
    }
}
