//! Pairwise point exchange.
//!
//! # Algorithm
//!
//! For every pair of positions `a < b`, compute the change in closed-tour
//! length from exchanging the points at those positions. Only the edges
//! touching `a` and `b` change, so each delta is O(1):
//!
//! ```text
//! general:        d(pa,b) + d(b,na) + d(pb,a) + d(a,nb) - d(pa,a) - d(a,na) - d(pb,b) - d(b,nb)
//! b == a + 1:     d(pa,b) + d(a,nb) - d(pa,a) - d(b,nb)
//! a = 0, b = n-1: d(pb,a) + d(b,na) - d(pb,b) - d(a,na)
//! ```
//!
//! where `pX`/`nX` are the circular predecessor and successor of position
//! `X`. Each pass applies the single best exchange (best improvement); the
//! search stops when no exchange decreases the length by more than 1e-10.
//!
//! # Complexity
//!
//! O(n²) per pass, rows evaluated in parallel.

use rayon::prelude::*;

use super::candidate::{best_for_row, Move};
use crate::models::{Point, Tour};

/// Repeatedly applies the best pairwise exchange until none improves.
///
/// Tours with fewer than four points are returned unchanged. Returns the
/// improved tour if it is strictly cheaper, otherwise a copy of `tour`.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{Point, Tour};
/// use u_tsp::local_search::swap_improve;
///
/// let tour = Tour::new("crossed", vec![
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
///     Point::new(0.0, 1.0),
/// ]);
/// let improved = swap_improve(&tour);
/// assert!((improved.cost() - 4.0).abs() < 1e-10);
/// ```
pub fn swap_improve(tour: &Tour) -> Tour {
    if tour.len() < 4 {
        return tour.clone();
    }

    let mut current = tour.clone();
    let mut passes = 0usize;
    while let Some(mv) = best_swap(current.points()) {
        current.swap(mv.a, mv.b);
        passes += 1;
    }
    log::debug!(
        "swap: n={} passes={passes} cost {:.4} -> {:.4}",
        tour.len(),
        tour.cost(),
        current.cost()
    );

    if current.cost() < tour.cost() {
        current
    } else {
        tour.clone()
    }
}

fn best_swap(points: &[Point]) -> Option<Move> {
    let n = points.len();
    (0..n - 1)
        .into_par_iter()
        .filter_map(|a| best_for_row(a, a + 1..n, |a, b| swap_delta(points, a, b)))
        .reduce_with(Move::better)
}

/// Change in closed-tour length from exchanging positions `a < b`.
pub(crate) fn swap_delta(points: &[Point], a: usize, b: usize) -> f64 {
    let n = points.len();
    let d = |i: usize, j: usize| points[i].distance_to(&points[j]);
    let pa = (a + n - 1) % n;
    let na = (a + 1) % n;
    let pb = (b + n - 1) % n;
    let nb = (b + 1) % n;

    if b == a + 1 {
        d(pa, b) + d(a, nb) - d(pa, a) - d(b, nb)
    } else if a == 0 && b == n - 1 {
        d(pb, a) + d(b, na) - d(pb, b) - d(a, na)
    } else {
        d(pa, b) + d(b, na) + d(pb, a) + d(a, nb) - d(pa, a) - d(a, na) - d(pb, b) - d(b, nb)
    }
}
