//! Farthest-edge insertion heuristic.
//!
//! # Algorithm
//!
//! 1. Seed the partial tour with the two points farthest apart.
//! 2. Find the longest edge of the partial (closed) tour.
//! 3. Insert between its endpoints the unvisited point `p` minimizing
//!    `d(a, p) + d(p, b)`.
//! 4. Repeat from 2 until every point is placed.
//!
//! All scans keep the first candidate found on ties.
//!
//! # Complexity
//!
//! O(n²) for the seed pair, then O(n) per insertion round: O(n²) overall.

use crate::models::Tour;

/// Builds a tour by repeatedly breaking the longest edge with the cheapest
/// unvisited point.
///
/// Returns the new tour if it is strictly cheaper than `tour`, otherwise a
/// copy of `tour`.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{Point, Tour};
/// use u_tsp::constructive::insertion_build;
///
/// let tour = Tour::new("square", vec![
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
///     Point::new(0.0, 1.0),
/// ]);
/// let built = insertion_build(&tour);
/// assert!((built.cost() - 4.0).abs() < 1e-10);
/// ```
pub fn insertion_build(tour: &Tour) -> Tour {
    let points = tour.points();
    let n = points.len();
    if n < 4 {
        return tour.clone();
    }

    let (a, b) = farthest_pair(tour);
    let mut visited = vec![false; n];
    visited[a] = true;
    visited[b] = true;
    let mut partial = Vec::with_capacity(n);
    partial.push(a);
    partial.push(b);

    while partial.len() < n {
        let m = partial.len();
        let mut insert_at = 1;
        let mut ends = (partial[0], partial[1]);
        let mut longest = f64::NEG_INFINITY;
        for i in 0..m {
            let (u, v) = (partial[i], partial[(i + 1) % m]);
            let d = points[u].distance_to(&points[v]);
            if d > longest {
                longest = d;
                ends = (u, v);
                insert_at = i + 1;
            }
        }

        let (u, v) = (points[ends.0], points[ends.1]);
        let mut cheapest: Option<(usize, f64)> = None;
        for (j, p) in points.iter().enumerate() {
            if visited[j] {
                continue;
            }
            let detour = u.distance_to(p) + p.distance_to(&v);
            if cheapest.is_none_or(|(_, best)| detour < best) {
                cheapest = Some((j, detour));
            }
        }
        let Some((j, _)) = cheapest else {
            break;
        };
        visited[j] = true;
        partial.insert(insert_at, j);
    }

    let candidate = tour.with_points(partial.into_iter().map(|i| points[i]));
    log::debug!(
        "insertion build: n={n} cost={:.4} input={:.4}",
        candidate.cost(),
        tour.cost()
    );
    if candidate.cost() < tour.cost() {
        candidate
    } else {
        tour.clone()
    }
}

/// Index pair `(i, j)`, `i < j`, of the two points farthest apart.
fn farthest_pair(tour: &Tour) -> (usize, usize) {
    let points = tour.points();
    let mut best = (0, 1);
    let mut best_d = f64::NEG_INFINITY;
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let d = points[i].distance_squared_to(&points[j]);
            if d > best_d {
                best_d = d;
                best = (i, j);
            }
        }
    }
    best
}
