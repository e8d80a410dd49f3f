//! Fits a drawing into a target rectangle of the work envelope, preserving
//! the aspect ratio.

use crate::segments::{Point2D, Segment};

fn bounds(segments: &[Segment]) -> Option<(Point2D, Point2D)> {
    let mut min = Point2D::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point2D::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    let mut any = false;
    for segment in segments {
        for p in segment.iter() {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            any = true;
        }
    }
    if any { Some((min, max)) } else { None }
}

fn transform(segments: &[Segment], scale: f64, min: Point2D, offset: Point2D) -> Vec<Segment> {
    segments
        .iter()
        .map(|segment| {
            Segment::new(
                segment
                    .iter()
                    .map(|p| {
                        Point2D::new(
                            (p.x - min.x) * scale + offset.x,
                            (p.y - min.y) * scale + offset.y,
                        )
                    })
                    .collect(),
            )
        })
        .collect()
}

/// Moves the drawing into the given rectangle. The drawing is scaled
/// uniformly to the largest size that still fits and centered along the
/// slack dimension. A zero-extent drawing lands on the rectangle origin.
pub fn fit_to_rect(
    segments: &[Segment],
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) -> Vec<Segment> {
    let Some((min, max)) = bounds(segments) else {
        return Vec::new();
    };

    let width = max.x - min.x;
    let height = max.y - min.y;
    let dest_width = x_max - x_min;
    let dest_height = y_max - y_min;

    if width == 0.0 && height == 0.0 {
        return transform(segments, 0.0, min, Point2D::new(x_min, y_min));
    }

    let orig_ratio = if height != 0.0 { width / height } else { f64::INFINITY };
    let dest_ratio = if dest_height != 0.0 {
        dest_width / dest_height
    } else {
        f64::INFINITY
    };

    // The wider shape binds on width, otherwise on height; the remaining
    // slack centers the drawing along the other axis.
    let (scale, offset) = if orig_ratio > dest_ratio {
        let scale = dest_width / width;
        (
            scale,
            Point2D::new(x_min, y_min + (dest_height - height * scale) / 2.0),
        )
    } else {
        let scale = dest_height / height;
        (
            scale,
            Point2D::new(x_min + (dest_width - width * scale) / 2.0, y_min),
        )
    };

    transform(segments, scale, min, offset)
}

/// Normalizes the drawing into the unit square, keeping the aspect ratio:
/// the larger dimension spans [0, 1].
pub fn normalize_unit(segments: &[Segment]) -> Vec<Segment> {
    let Some((min, max)) = bounds(segments) else {
        return Vec::new();
    };
    let extent = (max.x - min.x).max(max.y - min.y);
    if extent == 0.0 {
        return transform(segments, 0.0, min, Point2D::new(0.0, 0.0));
    }
    transform(segments, 1.0 / extent, min, Point2D::new(0.0, 0.0))
}
