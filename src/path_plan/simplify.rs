//! Ramer-Douglas-Peucker polyline simplification.

use crate::segments::{Point2D, Segment};

/// Perpendicular distance of `p` to the line through `start` and `end`.
/// Coincident endpoints (a closed chain) degrade to the point distance.
fn perpendicular_distance(p: &Point2D, start: &Point2D, end: &Point2D) -> f64 {
    let norm = start.distance(end);
    if norm == 0.0 {
        return p.distance(start);
    }
    let cross = (end.x - start.x) * (start.y - p.y) - (end.y - start.y) * (start.x - p.x);
    cross.abs() / norm
}

fn rdp(points: &[Point2D], eps: f64) -> Vec<Point2D> {
    let start = points[0];
    let end = points[points.len() - 1];

    let mut dmax = 0.0;
    let mut index = 0;
    for (i, point) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let d = perpendicular_distance(point, &start, &end);
        if d > dmax {
            dmax = d;
            index = i;
        }
    }

    if dmax > eps {
        let mut left = rdp(&points[..=index], eps);
        let right = rdp(&points[index..], eps);
        // The split point is the last of the left half and the first of the
        // right half; keep it once.
        left.pop();
        left.extend(right);
        left
    } else {
        vec![start, end]
    }
}

/// Simplifies one segment. Returns None when the result is not a drawable
/// stroke: fewer than two input points, or a two-point result whose
/// endpoints are closer than `eps` (noise).
pub fn simplify_segment(segment: &Segment, eps: f64) -> Option<Segment> {
    if segment.len() < 2 {
        return None;
    }
    let simplified = rdp(segment.points(), eps);
    if simplified.len() == 2 && simplified[0].distance(&simplified[1]) < eps {
        return None;
    }
    Some(Segment::new(simplified))
}

/// Simplifies a whole list of segments, discarding the degenerate ones.
pub fn simplify_segments(segments: &[Segment], eps: f64) -> Vec<Segment> {
    segments
        .iter()
        .filter_map(|segment| simplify_segment(segment, eps))
        .collect()
}
