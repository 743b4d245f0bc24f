//! Nearest-neighbor constructive heuristic.
//!
//! Builds a tour greedily from every possible start point: from the current
//! point, always move to the nearest unvisited one. The best start wins.
//!
//! # Algorithm
//!
//! Each start is walked in parallel while only accumulating the closed-tour
//! length, so no candidate tour is materialized. A reduction picks the
//! cheapest start (lowest start index on ties), which is then replayed
//! once to build the tour. Ranking uses true Euclidean length; the
//! nearest-point choice inside a walk compares squared distances, which
//! selects the same point.
//!
//! # Complexity
//!
//! O(n²) per start, O(n³) total across `n` parallel starts.
//!
//! # Reference
//!
//! Rosenkrantz, D.J., Stearns, R.E. & Lewis, P.M. (1977). "An analysis of
//! several heuristics for the traveling salesman problem", *SIAM Journal on
//! Computing* 6(3), 563-581.

use rayon::prelude::*;

use crate::models::{Point, Tour};

/// Builds a nearest-neighbor tour over the points of `tour`, trying every
/// start point.
///
/// Returns the new tour if it is strictly cheaper than `tour`, otherwise a
/// copy of `tour`.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{Point, Tour};
/// use u_tsp::constructive::nearest_neighbor;
///
/// let tour = Tour::new("line", vec![
///     Point::new(0.0, 0.0),
///     Point::new(2.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(3.0, 0.0),
/// ]);
/// let built = nearest_neighbor(&tour);
/// assert!((built.cost() - 6.0).abs() < 1e-10);
/// assert!(built.cost() < tour.cost());
/// ```
pub fn nearest_neighbor(tour: &Tour) -> Tour {
    let points = tour.points();
    let n = points.len();
    if n < 4 {
        return tour.clone();
    }

    let best = (0..n)
        .into_par_iter()
        .map(|start| (greedy_walk(points, start, |_| {}), start))
        .reduce_with(|a, b| {
            if b.0 < a.0 || (b.0 == a.0 && b.1 < a.1) {
                b
            } else {
                a
            }
        });
    let Some((cost, start)) = best else {
        return tour.clone();
    };

    let mut order = Vec::with_capacity(n);
    greedy_walk(points, start, |i| order.push(points[i]));
    let candidate = tour.with_points(order);
    log::debug!(
        "nearest neighbor: n={n} best_start={start} cost={cost:.4} input={:.4}",
        tour.cost()
    );

    if candidate.cost() < tour.cost() {
        candidate
    } else {
        tour.clone()
    }
}

/// Builds the nearest-neighbor tour from a single start position.
///
/// Always returns the constructed tour, even if it is worse than `tour`.
///
/// # Panics
///
/// Panics if `start` is out of bounds.
pub fn nearest_neighbor_from(tour: &Tour, start: usize) -> Tour {
    let points = tour.points();
    let mut order = Vec::with_capacity(points.len());
    greedy_walk(points, start, |i| order.push(points[i]));
    tour.with_points(order)
}

/// Walks the greedy tour from `start`, calling `visit` with each index in
/// visiting order. Returns the closed-tour length.
fn greedy_walk(points: &[Point], start: usize, mut visit: impl FnMut(usize)) -> f64 {
    let n = points.len();
    let mut visited = vec![false; n];
    visited[start] = true;
    visit(start);

    let mut current = start;
    let mut length = 0.0;
    for _ in 1..n {
        let here = points[current];
        let mut next: Option<(usize, f64)> = None;
        for (j, p) in points.iter().enumerate() {
            if visited[j] {
                continue;
            }
            let d = here.distance_squared_to(p);
            if next.is_none_or(|(_, best)| d < best) {
                next = Some((j, d));
            }
        }
        let Some((j, _)) = next else {
            break;
        };
        visited[j] = true;
        visit(j);
        length += here.distance_to(&points[j]);
        current = j;
    }
    length + points[current].distance_to(&points[start])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plus() -> Vec<Point> {
        vec![
            Point::new(0.0, 1.0),
            Point::new(0.0, -1.0),
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(-1.0, 0.0),
        ]
    }

    #[test]
    fn test_nn_small_tours_unchanged() {
        let t = Tour::new(
            "tri",
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(0.0, 1.0),
            ],
        );
        let out = nearest_neighbor(&t);
        assert_eq!(out.points(), t.points());
    }

    #[test]
    fn test_nn_chooses_nearest() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(11.0, 0.0),
        ];
        let t = Tour::new("t", pts);
        let built = nearest_neighbor_from(&t, 0);
        assert_eq!(
            built.points(),
            &[
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(11.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_nn_tie_breaks_by_scan_order() {
        // From the centre, all four arms are at distance 1; the first in
        // input order is taken.
        let t = Tour::new("plus", plus());
        let built = nearest_neighbor_from(&t, 2);
        assert_eq!(built.get(0), Point::new(0.0, 0.0));
        assert_eq!(built.get(1), Point::new(0.0, 1.0));
    }

    #[test]
    fn test_walk_cost_matches_materialized_tour() {
        let t = Tour::new("plus", plus());
        for start in 0..t.len() {
            let walked = greedy_walk(t.points(), start, |_| {});
            let built = nearest_neighbor_from(&t, start);
            assert!((walked - built.cost()).abs() < 1e-10);
        }
    }

    #[test]
    fn test_nn_preserves_points_and_never_worsens() {
        let pts = vec![
            Point::new(5.0, 5.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 0.0),
        ];
        let t = Tour::new("t", pts);
        let out = nearest_neighbor(&t);
        assert!(out.same_points(&t));
        assert!(out.cost() <= t.cost());
    }

    #[test]
    fn test_nn_returns_input_when_already_better() {
        // The optimal square is already in place; nearest neighbor can only tie.
        let t = Tour::new(
            "square",
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ],
        );
        let out = nearest_neighbor(&t);
        assert_eq!(out.points(), t.points());
    }
}
