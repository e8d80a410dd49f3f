//! Scenario tests for the planning pipeline: border points in, ordered
//! draw plan out.

use crate::chaining::chain_points;
use crate::routing::{greedy_route, plan_route, weight_matrix};
use crate::segments::{Point2D, Segment};
use crate::simplify::simplify_segments;
use std::collections::HashMap;

fn line(from: (f64, f64), to: (f64, f64), steps: usize) -> Vec<Point2D> {
    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            Point2D::new(
                from.0 + (to.0 - from.0) * t,
                from.1 + (to.1 - from.1) * t,
            )
        })
        .collect()
}

#[test]
fn test_two_strokes_end_to_end() {
    // Two dense straight strokes far apart, plus one isolated noise point.
    let mut points = line((0.0, 0.0), (10.0, 0.0), 50);
    points.extend(line((0.0, 20.0), (0.0, 30.0), 50));
    points.push(Point2D::new(100.0, 100.0));

    let segments = chain_points(&points, 0.5);
    assert_eq!(segments.len(), 3);

    // Dense straight lines collapse to their endpoints; the lone point is
    // dropped as noise.
    let simplified = simplify_segments(&segments, 0.05);
    assert_eq!(simplified.len(), 2);
    for segment in &simplified {
        assert_eq!(segment.len(), 2);
    }

    let plan = plan_route(simplified, 0);
    assert_eq!(plan.len(), 2);
}

#[test]
fn test_no_point_lost_before_simplification() {
    let mut points = line((0.0, 0.0), (5.0, 5.0), 40);
    points.extend(line((50.0, 0.0), (55.0, -5.0), 30));

    let segments = chain_points(&points, 0.5);
    let mut input_counts: HashMap<(u64, u64), usize> = HashMap::new();
    for p in &points {
        *input_counts.entry((p.x.to_bits(), p.y.to_bits())).or_insert(0) += 1;
    }
    let mut output_counts: HashMap<(u64, u64), usize> = HashMap::new();
    for p in segments.iter().flat_map(|s| s.iter()) {
        *output_counts.entry((p.x.to_bits(), p.y.to_bits())).or_insert(0) += 1;
    }
    assert_eq!(input_counts, output_counts);
}

#[test]
fn test_greedy_order_example() {
    // Segment 0 ends at (0, 0), segment 1 starts at (1, 1) and ends back at
    // (0, 0), segment 2 is degenerate and far away. Starting at 0, greedy
    // must take 1 next (travel 2) and leave the far segment for last.
    let segments = vec![
        Segment::new(vec![Point2D::new(-2.0, 0.0), Point2D::new(0.0, 0.0)]),
        Segment::new(vec![Point2D::new(1.0, 1.0), Point2D::new(0.0, 0.0)]),
        Segment::new(vec![Point2D::new(40.0, 40.0), Point2D::new(40.0, 40.0)]),
    ];
    let weights = weight_matrix(&segments);
    assert_eq!(weights[0][1], 2.0);
    assert_eq!(weights[1][2], 3200.0);

    let route = greedy_route(&weights, 0);
    assert_eq!(route, vec![0, 1, 2]);

    // The same input always produces the same order.
    for _ in 0..10 {
        assert_eq!(greedy_route(&weight_matrix(&segments), 0), route);
    }
}

#[test]
fn test_route_length_matches_for_all_sizes() {
    for n in 0..8 {
        let segments: Vec<Segment> = (0..n)
            .map(|i| {
                Segment::new(vec![
                    Point2D::new(i as f64 * 7.0, 1.0),
                    Point2D::new(i as f64 * 7.0, 2.0),
                ])
            })
            .collect();
        let weights = weight_matrix(&segments);
        let route = if n == 0 {
            greedy_route(&weights, 0)
        } else {
            greedy_route(&weights, n - 1)
        };
        assert_eq!(route.len(), n);
    }
}

#[test]
fn test_closed_outline_chains_into_one_segment() {
    // A square outline of border points, the way an edge detector would
    // produce them for a filled rectangle.
    let mut points = Vec::new();
    points.extend(line((0.0, 0.0), (10.0, 0.0), 20));
    points.extend(line((10.0, 0.5), (10.0, 9.5), 18));
    points.extend(line((10.0, 10.0), (0.0, 10.0), 20));
    points.extend(line((0.0, 9.5), (0.0, 0.5), 18));

    let segments = chain_points(&points, 0.75);
    assert_eq!(segments.len(), 1);
    assert_eq!(
        segments[0].len(),
        points.len(),
        "Every border point belongs to the outline"
    );

    let simplified = simplify_segments(&segments, 0.1);
    assert_eq!(simplified.len(), 1);
    // The outline reduces to essentially the four corners.
    assert!(simplified[0].len() <= 6);
}
