//! Chains an unordered cloud of border points into ordered polylines.
//!
//! Each cluster of points closer than the distance threshold becomes one
//! segment. The segment grows greedily from a seed point in two passes,
//! reversing direction between them, always appending the nearest unvisited
//! neighbour within the threshold.

use crate::segments::{Point2D, Segment};
use kdtree::distance::squared_euclidean;
use kdtree::KdTree;
use std::cmp::Ordering;
use tracing::debug;

/// Deterministic tie-break for equidistant neighbours: smaller x first,
/// then smaller y. The original behaviour here depended on set iteration
/// order; the lexicographic order makes runs reproducible.
fn lexicographic(a: &Point2D, b: &Point2D) -> Ordering {
    a.x.partial_cmp(&b.x)
        .unwrap_or(Ordering::Equal)
        .then(a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
}

/// Groups the points into ordered polylines. The input is only read; the
/// chainer works on its own visited mask, so callers never observe a
/// partially consumed point set. Points must have finite coordinates.
///
/// Empty input produces an empty result, not an error.
pub fn chain_points(points: &[Point2D], distance_threshold: f64) -> Vec<Segment> {
    if points.is_empty() {
        return Vec::new();
    }

    let mut tree = KdTree::new(2);
    for (index, point) in points.iter().enumerate() {
        tree.add([point.x, point.y], index).unwrap();
    }

    // The kd-tree is queried with the squared metric, so the radius is the
    // squared threshold.
    let radius = distance_threshold * distance_threshold;

    let mut visited = vec![false; points.len()];
    let mut segments = Vec::new();

    for seed in 0..points.len() {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        let mut chain = vec![seed];

        // Grow from the seed, then reverse and grow the other way.
        for _ in 0..2 {
            chain.reverse();
            loop {
                let end = points[*chain.last().unwrap()];
                let neighbours = tree
                    .within(&[end.x, end.y], radius, &squared_euclidean)
                    .unwrap();

                let mut next: Option<(f64, usize)> = None;
                for (distance, &index) in neighbours {
                    if visited[index] {
                        continue;
                    }
                    let better = match next {
                        None => true,
                        Some((best_distance, best_index)) => {
                            distance < best_distance
                                || (distance == best_distance
                                    && lexicographic(&points[index], &points[best_index])
                                        == Ordering::Less)
                        }
                    };
                    if better {
                        next = Some((distance, index));
                    }
                }

                match next {
                    Some((_, index)) => {
                        visited[index] = true;
                        chain.push(index);
                    }
                    None => break,
                }
            }
        }

        debug!("Chained a segment of {} points", chain.len());
        segments.push(Segment::new(
            chain.into_iter().map(|index| points[index]).collect(),
        ));
    }

    segments
}
