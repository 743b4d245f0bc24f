//! Bounded-window brute-force reordering.
//!
//! # Algorithm
//!
//! Slide a window of `w` consecutive positions across the tour. For the
//! window starting at `i`, the neighbors `pre = t[i-1]` and `post = t[i+w]`
//! (both circular) stay fixed, and every one of the `w!` orderings of the
//! window is scored as
//!
//! ```text
//! d(pre, first) + path(window) + d(last, post)
//! ```
//!
//! The cheapest ordering that beats the current one by more than 1e-10
//! replaces the window (lowest permutation index on ties). In recursive
//! mode whole sweeps repeat until one changes nothing.
//!
//! Window starts run over `0..n-w`, so the last window covers positions
//! `n-w-1..n-2`. Position `n-1` is never inside a window: the final point
//! keeps its place and only serves as `pre` of the first window and `post`
//! of the last one.
//!
//! # Complexity
//!
//! O(n · w · w!) per sweep. Scoring stops early once a partial path is
//! already no better than the best ordering found so far.

use super::candidate::IMPROVEMENT_EPSILON;
use crate::config::SliceWindowConfig;
use crate::distance::path_length;
use crate::error::Result;
use crate::models::{Point, Tour};
use crate::permutation::{PermutationProvider, PermutationSet};

/// Runs window brute force with permutations from `config.permutations`.
///
/// The effective window length is `min(window_length, len - 1)`. Tours
/// with fewer than three points are returned unchanged. Returns the
/// improved tour if it is strictly cheaper, otherwise a copy of `tour`.
///
/// # Errors
///
/// [`Error::InvalidConfig`](crate::Error::InvalidConfig) if the window
/// length is out of range, or any error from the permutation lookup chain.
///
/// # Examples
///
/// ```
/// use u_tsp::config::SliceWindowConfig;
/// use u_tsp::models::{Point, Tour};
/// use u_tsp::local_search::slice_window_improve;
///
/// let tour = Tour::new("line", vec![
///     Point::new(0.0, 0.0),
///     Point::new(2.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(3.0, 0.0),
///     Point::new(4.0, 0.0),
/// ]);
/// let config = SliceWindowConfig::default().with_window_length(3);
/// let improved = slice_window_improve(&tour, &config).unwrap();
/// assert!((improved.cost() - 8.0).abs() < 1e-10);
/// ```
pub fn slice_window_improve(tour: &Tour, config: &SliceWindowConfig) -> Result<Tour> {
    config.validate()?;
    let n = tour.len();
    if n < 3 {
        return Ok(tour.clone());
    }
    let width = config.window_length.min(n - 1);
    let permutations = PermutationProvider::new(&config.permutations).get(width)?;
    Ok(slice_window_with(tour, &permutations, config.recursive))
}

/// Runs window brute force with a caller-supplied permutation table.
///
/// The window length is `permutations.length()`; if it is not in
/// `2..len` the tour is returned unchanged.
pub fn slice_window_with(tour: &Tour, permutations: &PermutationSet, recursive: bool) -> Tour {
    let n = tour.len();
    let width = permutations.length();
    if n < 3 || width < 2 || width >= n {
        return tour.clone();
    }

    let mut current = tour.clone();
    let mut sweeps = 0usize;
    let mut replaced = 0usize;
    loop {
        let changed = sweep(&mut current, permutations);
        sweeps += 1;
        replaced += changed;
        if changed == 0 || !recursive {
            break;
        }
    }
    log::debug!(
        "slice window: n={n} w={width} sweeps={sweeps} replaced={replaced} cost {:.4} -> {:.4}",
        tour.cost(),
        current.cost()
    );

    if current.cost() < tour.cost() {
        current
    } else {
        tour.clone()
    }
}

/// One pass over every window start; returns the number of windows replaced.
fn sweep(tour: &mut Tour, permutations: &PermutationSet) -> usize {
    let n = tour.len();
    let width = permutations.length();
    let mut replaced = 0;
    let mut window: Vec<Point> = Vec::with_capacity(width);

    for start in 0..n - width {
        let pre = tour.get(start + n - 1);
        let post = tour.get(start + width);
        window.clear();
        window.extend_from_slice(&tour.points()[start..start + width]);

        if let Some(order) = best_ordering(pre, &window, post, permutations) {
            tour.reorder_range(start, order);
            replaced += 1;
        }
    }
    replaced
}

/// Returns the cheapest ordering of `window` between `pre` and `post`, if
/// it beats the current ordering.
fn best_ordering<'a>(
    pre: Point,
    window: &[Point],
    post: Point,
    permutations: &'a PermutationSet,
) -> Option<&'a [u8]> {
    let current = bridged_length(pre, window, post);
    let mut best_cost = current - IMPROVEMENT_EPSILON;
    let mut best = None;

    for order in permutations.iter() {
        if let Some(cost) = bounded_length(pre, window, order, post, best_cost) {
            best_cost = cost;
            best = Some(order);
        }
    }
    best
}

/// Length of `pre → window… → post`; `window` is non-empty.
fn bridged_length(pre: Point, window: &[Point], post: Point) -> f64 {
    let first = window[0];
    let last = window[window.len() - 1];
    pre.distance_to(&first) + path_length(window) + last.distance_to(&post)
}

/// Length of `pre → window[order]… → post` if strictly below `limit`.
fn bounded_length(
    pre: Point,
    window: &[Point],
    order: &[u8],
    post: Point,
    limit: f64,
) -> Option<f64> {
    let mut last = pre;
    let mut total = 0.0;
    for &k in order {
        let p = window[k as usize];
        total += last.distance_to(&p);
        if total >= limit {
            return None;
        }
        last = p;
    }
    total += last.distance_to(&post);
    (total < limit).then_some(total)
}
