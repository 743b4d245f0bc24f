//! Random instance generation.

use rand::Rng;

use super::Point;

/// Generates `n` points uniformly distributed over `[0, width] × [0, height]`.
///
/// The same seed always yields the same instance. A zero width or height
/// gives collinear points.
///
/// # Panics
///
/// Panics if `width` or `height` is negative or not finite.
///
/// # Examples
///
/// ```
/// use u_tsp::models::random_points;
///
/// let a = random_points(50, 100.0, 100.0, 7);
/// let b = random_points(50, 100.0, 100.0, 7);
/// assert_eq!(a, b);
/// assert!(a.iter().all(|p| p.x() >= 0.0 && p.x() <= 100.0));
/// ```
pub fn random_points(n: usize, width: f64, height: f64, seed: u64) -> Vec<Point> {
    assert!(
        valid_extent(width) && valid_extent(height),
        "instance extent must be finite and non-negative, got {width} x {height}"
    );
    let mut rng = u_numflow::random::create_rng(seed);
    let mut points = Vec::with_capacity(n);
    for _ in 0..n {
        let x = rng.random_range(0.0..=width);
        let y = rng.random_range(0.0..=height);
        points.push(Point::new(x, y));
    }
    points
}

fn valid_extent(size: f64) -> bool {
    size.is_finite() && size >= 0.0
}
