//! Orders segments to reduce pen travel between strokes.
//!
//! The travel weights and the ordering heuristic are decoupled: an
//! alternative sequencing strategy can reuse the same weight model
//! unchanged.

use crate::segments::{DrawPlan, Segment};

/// Square matrix of travel costs: `w[i][j]` is the squared distance from
/// the last point of segment `i` to the first point of segment `j`. The
/// diagonal is zero and never consulted for routing decisions.
pub fn weight_matrix(segments: &[Segment]) -> Vec<Vec<f64>> {
    let n = segments.len();
    let mut weights = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..n {
            if i != j {
                weights[i][j] = segments[i]
                    .last()
                    .distance_squared(&segments[j].first());
            }
        }
    }
    weights
}

/// Greedy nearest-neighbour tour over the weight matrix, starting at the
/// given index. This is an approximation, not an optimal tour. Ties break
/// on the first minimum encountered in a linear scan, so the result is
/// deterministic for fixed matrix contents.
///
/// Returns a permutation of `0..n`; empty input yields an empty route.
pub fn greedy_route(weights: &[Vec<f64>], start: usize) -> Vec<usize> {
    let n = weights.len();
    if n == 0 {
        return Vec::new();
    }
    assert!(start < n, "Start index {} out of {} segments", start, n);

    let mut visited = vec![false; n];
    visited[start] = true;
    let mut route = vec![start];

    for _ in 1..n {
        let current = route[route.len() - 1];
        let mut best: Option<usize> = None;
        for candidate in 0..n {
            if visited[candidate] {
                continue;
            }
            if best.map_or(true, |b| weights[current][candidate] < weights[current][b]) {
                best = Some(candidate);
            }
        }
        // At least one unvisited index remains on every iteration.
        let best = best.unwrap();
        visited[best] = true;
        route.push(best);
    }

    route
}

/// Builds the draw plan: weight matrix, greedy tour, segments reordered
/// accordingly.
pub fn plan_route(segments: Vec<Segment>, start: usize) -> DrawPlan {
    let route = greedy_route(&weight_matrix(&segments), start);
    let mut slots: Vec<Option<Segment>> = segments.into_iter().map(Some).collect();
    route
        .into_iter()
        .map(|index| slots[index].take().expect("Route visits each index once"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::Point2D;

    fn segment(points: &[(f64, f64)]) -> Segment {
        Segment::new(points.iter().map(|&(x, y)| Point2D::new(x, y)).collect())
    }

    #[test]
    fn test_empty_input() {
        assert!(weight_matrix(&[]).is_empty());
        assert!(greedy_route(&[], 0).is_empty());
        assert!(plan_route(Vec::new(), 0).is_empty());
    }

    #[test]
    fn test_weight_matrix() {
        let segments = vec![
            segment(&[(0.0, 0.0), (1.0, 0.0)]),
            segment(&[(4.0, 4.0), (5.0, 5.0)]),
        ];
        let weights = weight_matrix(&segments);
        assert_eq!(weights[0][0], 0.0);
        assert_eq!(weights[1][1], 0.0);
        // last of 0 = (1, 0), first of 1 = (4, 4).
        assert_eq!(weights[0][1], 25.0);
        // last of 1 = (5, 5), first of 0 = (0, 0).
        assert_eq!(weights[1][0], 50.0);
    }

    #[test]
    fn test_route_is_permutation() {
        for n in 0usize..6 {
            let segments: Vec<Segment> = (0..n)
                .map(|i| segment(&[(i as f64 * 3.0, 0.0), (i as f64 * 3.0 + 1.0, 0.0)]))
                .collect();
            let route = greedy_route(&weight_matrix(&segments), 0.min(n.saturating_sub(1)));
            assert_eq!(route.len(), n);
            let mut sorted = route.clone();
            sorted.sort_unstable();
            let expected: Vec<usize> = (0..n).collect();
            assert_eq!(sorted, expected);
        }
    }

    #[test]
    fn test_greedy_picks_nearest() {
        // Segment 0 ends at (0, 0); segment 1 starts at (1, 1); segment 2
        // is far away. Greedy from 0 must pick 1, then 2.
        let segments = vec![
            segment(&[(-1.0, 0.0), (0.0, 0.0)]),
            segment(&[(1.0, 1.0), (0.0, 0.0)]),
            segment(&[(100.0, 100.0), (101.0, 100.0)]),
        ];
        let route = greedy_route(&weight_matrix(&segments), 0);
        assert_eq!(route, vec![0, 1, 2]);
    }

    #[test]
    fn test_deterministic_under_ties() {
        // Both candidates at the same travel cost: the first index found by
        // the linear scan wins.
        let segments = vec![
            segment(&[(0.0, 0.0), (0.0, 0.0)]),
            segment(&[(1.0, 0.0), (2.0, 0.0)]),
            segment(&[(1.0, 0.0), (3.0, 0.0)]),
        ];
        let route = greedy_route(&weight_matrix(&segments), 0);
        assert_eq!(route, vec![0, 1, 2]);
    }

    #[test]
    fn test_plan_route_reorders() {
        let a = segment(&[(0.0, 0.0), (0.0, 1.0)]);
        let b = segment(&[(50.0, 0.0), (51.0, 0.0)]);
        let c = segment(&[(0.0, 1.1), (0.0, 2.0)]);
        let plan = plan_route(vec![a.clone(), b.clone(), c.clone()], 0);
        assert_eq!(plan, vec![a, c, b]);
    }

    #[test]
    fn test_start_index_respected() {
        let segments = vec![
            segment(&[(0.0, 0.0), (1.0, 0.0)]),
            segment(&[(10.0, 0.0), (11.0, 0.0)]),
        ];
        let route = greedy_route(&weight_matrix(&segments), 1);
        assert_eq!(route, vec![1, 0]);
    }
}
