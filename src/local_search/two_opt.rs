//! 2-opt edge reversal.
//!
//! # Algorithm
//!
//! For each pair of non-adjacent edges (i, i+1) and (j, j+1) of the closed
//! tour, compute the change in length from reversing the segment between
//! them:
//!
//! ```text
//! delta = d(t[i], t[j]) + d(t[i+1], t[j+1]) - d(t[i], t[i+1]) - d(t[j], t[j+1])
//! ```
//!
//! If delta < -1e-10, reverse positions [i+1..=j]. Pairs with `j == i + 1`
//! and the pair (0, n-1) share a point and are skipped.
//!
//! Two strategies are available (see [`TwoOptMode`]):
//!
//! - best improvement: every pass evaluates all pairs in parallel and
//!   applies the single best reversal.
//! - first improvement: a sequential scan applies the first improving
//!   reversal and resumes from the same `i`, wrapping around; it stops
//!   after a full cycle of `i` without an improvement.
//!
//! Both stop at a 2-opt local optimum.
//!
//! # Complexity
//!
//! O(n²) per pass, O(n³) worst case for convergence.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use rayon::prelude::*;

use super::candidate::{best_for_row, Move, IMPROVEMENT_EPSILON};
use crate::config::{TwoOptConfig, TwoOptMode};
use crate::models::{Point, Tour};

/// Applies 2-opt until no reversal shortens the tour.
///
/// Tours with fewer than four points are returned unchanged. Returns the
/// improved tour if it is strictly cheaper, otherwise a copy of `tour`.
///
/// # Examples
///
/// ```
/// use u_tsp::config::TwoOptConfig;
/// use u_tsp::models::{Point, Tour};
/// use u_tsp::local_search::two_opt_improve;
///
/// // The two diagonals cross; reversing one segment uncrosses them.
/// let tour = Tour::new("bowtie", vec![
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
///     Point::new(0.0, 1.0),
/// ]);
/// let improved = two_opt_improve(&tour, &TwoOptConfig::default());
/// assert!((improved.cost() - 4.0).abs() < 1e-10);
/// ```
pub fn two_opt_improve(tour: &Tour, config: &TwoOptConfig) -> Tour {
    let n = tour.len();
    if n < 4 {
        return tour.clone();
    }

    let mut current = tour.clone();
    let moves = match config.mode {
        TwoOptMode::BestImprovement => best_improvement(&mut current),
        TwoOptMode::FirstImprovement => first_improvement(&mut current),
    };
    log::debug!(
        "2-opt ({:?}): n={n} reversals={moves} cost {:.4} -> {:.4}",
        config.mode,
        tour.cost(),
        current.cost()
    );

    if current.cost() < tour.cost() {
        current
    } else {
        tour.clone()
    }
}

fn best_improvement(tour: &mut Tour) -> usize {
    let mut moves = 0;
    while let Some(mv) = best_reversal(tour.points()) {
        tour.reverse_range(mv.a + 1, mv.b);
        moves += 1;
    }
    moves
}

fn best_reversal(points: &[Point]) -> Option<Move> {
    let n = points.len();
    (0..n - 2)
        .into_par_iter()
        .filter_map(|i| best_for_row(i, partners(i, n), |i, j| two_opt_delta(points, i, j)))
        .reduce_with(Move::better)
}

fn first_improvement(tour: &mut Tour) -> usize {
    let n = tour.len();
    let rows = n - 2;
    let mut moves = 0;
    let mut i = 0;
    let mut stale = 0;
    while stale < rows {
        let points = tour.points();
        let found = partners(i, n).find(|&j| two_opt_delta(points, i, j) < -IMPROVEMENT_EPSILON);
        match found {
            Some(j) => {
                tour.reverse_range(i + 1, j);
                moves += 1;
                stale = 0;
            }
            None => {
                stale += 1;
                i = (i + 1) % rows;
            }
        }
    }
    moves
}

/// Valid second edges `j` for first edge `i`.
fn partners(i: usize, n: usize) -> impl Iterator<Item = usize> {
    (i + 2..n).filter(move |&j| !(i == 0 && j == n - 1))
}

/// Change in closed-tour length from reversing positions `i+1..=j`.
pub(crate) fn two_opt_delta(points: &[Point], i: usize, j: usize) -> f64 {
    let n = points.len();
    let a = &points[i];
    let b = &points[i + 1];
    let c = &points[j];
    let d = &points[(j + 1) % n];
    a.distance_to(c) + b.distance_to(d) - a.distance_to(b) - c.distance_to(d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::nearest_neighbor_from;
    use crate::models::random_points;

    fn plus() -> Tour {
        Tour::new(
            "plus",
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(-1.0, 0.0),
                Point::new(0.0, 1.0),
                Point::new(0.0, -1.0),
            ],
        )
    }

    fn assert_two_opt_optimal(tour: &Tour) {
        let n = tour.len();
        for i in 0..n - 2 {
            for j in partners(i, n) {
                let mut reversed = tour.clone();
                reversed.reverse_range(i + 1, j);
                assert!(
                    reversed.cost() >= tour.cost() - 1e-9,
                    "reversal ({i}, {j}) still improves"
                );
            }
        }
    }

    #[test]
    fn test_delta_matches_recomputation() {
        let tour = Tour::new("random", random_points(10, 100.0, 100.0, 11));
        let n = tour.len();
        for i in 0..n - 2 {
            for j in partners(i, n) {
                let mut reversed = tour.clone();
                reversed.reverse_range(i + 1, j);
                let expected = reversed.cost() - tour.cost();
                assert!((two_opt_delta(tour.points(), i, j) - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_plus_after_nearest_neighbor_reaches_optimum() {
        let start = nearest_neighbor_from(&plus(), 0);
        let improved = two_opt_improve(&start, &TwoOptConfig::default());
        let optimum = 2.0 + 3.0 * 2f64.sqrt();
        assert!((improved.cost() - optimum).abs() < 1e-9);
        assert!(improved.same_points(&start));
    }

    #[test]
    fn test_plus_crossed_order_uncrossed() {
        let crossed = plus().with_points(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(-1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(0.0, -1.0),
        ]);
        let improved = two_opt_improve(&crossed, &TwoOptConfig::default());
        assert!(improved.cost() < crossed.cost());
        assert!((improved.cost() - (2.0 + 3.0 * 2f64.sqrt())).abs() < 1e-9);
    }

    #[test]
    fn test_best_improvement_local_optimum() {
        let tour = Tour::new("random", random_points(40, 100.0, 100.0, 5));
        let improved = two_opt_improve(&tour, &TwoOptConfig::default());
        assert!(improved.cost() < tour.cost());
        assert!(improved.same_points(&tour));
        assert_two_opt_optimal(&improved);
    }

    #[test]
    fn test_first_improvement_local_optimum() {
        let tour = Tour::new("random", random_points(40, 100.0, 100.0, 5));
        let config = TwoOptConfig::default().with_mode(TwoOptMode::FirstImprovement);
        let improved = two_opt_improve(&tour, &config);
        assert!(improved.cost() < tour.cost());
        assert!(improved.same_points(&tour));
        assert_two_opt_optimal(&improved);
    }

    #[test]
    fn test_best_improvement_deterministic() {
        let tour = Tour::new("random", random_points(60, 100.0, 100.0, 9));
        let a = two_opt_improve(&tour, &TwoOptConfig::default());
        let b = two_opt_improve(&tour, &TwoOptConfig::default());
        assert_eq!(a.points(), b.points());
    }

    #[test]
    fn test_small_tours_unchanged() {
        let tour = Tour::new(
            "triangle",
            vec![
                Point::new(0.0, 0.0),
                Point::new(4.0, 0.0),
                Point::new(0.0, 3.0),
            ],
        );
        let out = two_opt_improve(&tour, &TwoOptConfig::default());
        assert_eq!(out.points(), tour.points());
    }

    #[test]
    fn test_optimal_tour_returned_as_is() {
        let tour = Tour::new(
            "square",
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ],
        );
        let out = two_opt_improve(&tour, &TwoOptConfig::default());
        assert_eq!(out.points(), tour.points());
    }
}
