//! Tour length functions.
//!
//! Every heuristic in the crate scores tours with these functions; they are
//! the only objective.

use crate::models::Point;

/// Closed-tour Euclidean length: `d(p0, p1) + … + d(p[n-1], p0)`.
///
/// Sequences with fewer than two points have length 0.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
/// use u_tsp::distance::{path_length, tour_cost};
///
/// let pts = [Point::new(0.0, 0.0), Point::new(3.0, 0.0), Point::new(3.0, 4.0)];
/// assert!((tour_cost(&pts) - 12.0).abs() < 1e-10);
/// assert!((path_length(&pts) - 7.0).abs() < 1e-10);
/// ```
pub fn tour_cost(points: &[Point]) -> f64 {
    closed_sum(points, Point::distance_to)
}

/// Closed-tour sum of squared edge lengths.
///
/// Useful where only the relative ordering of candidates matters.
pub fn tour_cost_squared(points: &[Point]) -> f64 {
    closed_sum(points, Point::distance_squared_to)
}

/// Open-path Euclidean length: `n - 1` edges, no wrap-around edge.
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

fn closed_sum(points: &[Point], edge: impl Fn(&Point, &Point) -> f64) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    let mut total = 0.0;
    for i in 0..n {
        total += edge(&points[i], &points[(i + 1) % n]);
    }
    total
}
