//! Loading and saving segment drawings. The on-disk format is a JSON array
//! of segments, each an array of `[x, y]` pairs.

use crate::segments::{Point2D, Segment};
use serde_json::{json, Value};
use std::fs;
use std::io;
use std::path::Path;

/// Reports failures while loading or saving persisted segment drawings.
#[derive(Debug)]
pub enum PersistenceError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    /// The document root is not an array of segments.
    NotAnArray,
    /// The segment at this index is not an array of points.
    SegmentNotAnArray(usize),
    /// The segment at this index holds no points.
    EmptySegment(usize),
    /// A point is not a two-element array of numbers.
    MalformedPoint { segment: usize, point: usize },
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            PersistenceError::IoError(ref err) =>
                write!(f, "IO Error: {}", err),
            PersistenceError::JsonError(ref err) =>
                write!(f, "JSON Error: {}", err),
            PersistenceError::NotAnArray =>
                write!(f, "Document root is not an array of segments"),
            PersistenceError::SegmentNotAnArray(segment) =>
                write!(f, "Segment {} is not an array of points", segment),
            PersistenceError::EmptySegment(segment) =>
                write!(f, "Segment {} holds no points", segment),
            PersistenceError::MalformedPoint { segment, point } =>
                write!(f, "Point {} of segment {} is not an [x, y] number pair", point, segment),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<io::Error> for PersistenceError {
    fn from(err: io::Error) -> Self {
        PersistenceError::IoError(err)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        PersistenceError::JsonError(err)
    }
}

/// Renders the segments into the persisted JSON form.
pub fn segments_to_json(segments: &[Segment]) -> String {
    let value = Value::Array(
        segments
            .iter()
            .map(|segment| {
                Value::Array(segment.iter().map(|p| json!([p.x, p.y])).collect())
            })
            .collect(),
    );
    value.to_string()
}

/// Parses the persisted JSON form, validating the structure. Point order
/// within each segment is preserved. Malformed entries fail the whole
/// load; the error names the offending segment and point.
pub fn parse_segments(text: &str) -> Result<Vec<Segment>, PersistenceError> {
    let document: Value = serde_json::from_str(text)?;
    let Value::Array(raw_segments) = document else {
        return Err(PersistenceError::NotAnArray);
    };

    let mut segments = Vec::with_capacity(raw_segments.len());
    for (segment_index, raw_segment) in raw_segments.iter().enumerate() {
        let Value::Array(raw_points) = raw_segment else {
            return Err(PersistenceError::SegmentNotAnArray(segment_index));
        };
        if raw_points.is_empty() {
            return Err(PersistenceError::EmptySegment(segment_index));
        }

        let mut points = Vec::with_capacity(raw_points.len());
        for (point_index, raw_point) in raw_points.iter().enumerate() {
            let malformed = PersistenceError::MalformedPoint {
                segment: segment_index,
                point: point_index,
            };
            let Value::Array(pair) = raw_point else {
                return Err(malformed);
            };
            if pair.len() != 2 {
                return Err(malformed);
            }
            match (pair[0].as_f64(), pair[1].as_f64()) {
                (Some(x), Some(y)) => points.push(Point2D::new(x, y)),
                _ => return Err(malformed),
            }
        }
        segments.push(Segment::new(points));
    }
    Ok(segments)
}

/// Saves the segments to a JSON file.
pub fn save_segments(segments: &[Segment], path: &Path) -> Result<(), PersistenceError> {
    fs::write(path, segments_to_json(segments))?;
    Ok(())
}

/// Loads a segment drawing from a JSON file.
pub fn load_segments(path: &Path) -> Result<Vec<Segment>, PersistenceError> {
    parse_segments(&fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let segments = vec![
            Segment::new(vec![Point2D::new(0.0, 0.5), Point2D::new(1.0, -2.0)]),
            Segment::new(vec![
                Point2D::new(3.0, 3.0),
                Point2D::new(4.0, 4.0),
                Point2D::new(5.0, 3.0),
            ]),
        ];
        let parsed = parse_segments(&segments_to_json(&segments)).expect("Valid document");
        assert_eq!(parsed, segments);
    }

    #[test]
    fn test_point_order_preserved() {
        let parsed = parse_segments("[[[2.0, 0.0], [1.0, 0.0], [0.0, 0.0]]]").expect("Valid");
        let xs: Vec<f64> = parsed[0].iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_rejects_non_array_root() {
        assert!(matches!(
            parse_segments("{\"segments\": []}"),
            Err(PersistenceError::NotAnArray)
        ));
    }

    #[test]
    fn test_rejects_non_array_segment() {
        assert!(matches!(
            parse_segments("[42]"),
            Err(PersistenceError::SegmentNotAnArray(0))
        ));
    }

    #[test]
    fn test_rejects_wrong_arity() {
        assert!(matches!(
            parse_segments("[[[1.0, 2.0, 3.0]]]"),
            Err(PersistenceError::MalformedPoint { segment: 0, point: 0 })
        ));
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert!(matches!(
            parse_segments("[[[1.0, \"two\"]]]"),
            Err(PersistenceError::MalformedPoint { segment: 0, point: 0 })
        ));
    }

    #[test]
    fn test_rejects_empty_segment() {
        assert!(matches!(
            parse_segments("[[[0.0, 0.0]], []]"),
            Err(PersistenceError::EmptySegment(1))
        ));
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(matches!(
            parse_segments("[[[0.0, "),
            Err(PersistenceError::JsonError(_))
        ));
    }

    #[test]
    fn test_empty_document_is_valid() {
        assert!(parse_segments("[]").expect("Valid").is_empty());
    }
}
