//! One-tree lower bound.
//!
//! # Algorithm
//!
//! A one-tree for vertex `v` is the minimum spanning tree over every point
//! except `v`, plus the two cheapest edges connecting `v` back to it. Every
//! tour is a one-tree for any of its vertices, so each one-tree weight is a
//! lower bound on the optimal tour. The estimator builds all `n` one-trees
//! in parallel and reports the heaviest, the tightest bound available this
//! way.
//!
//! # Complexity
//!
//! O(n³) total work, split over `n` independent O(n²) tasks.
//!
//! # Reference
//!
//! Held, M. & Karp, R.M. (1970). "The traveling-salesman problem and
//! minimum spanning trees", *Operations Research* 18(6), 1138-1162.

use rayon::prelude::*;

use super::spanning_tree::{edges_without, weight_without, Edge};
use crate::models::Point;

/// A spanning tree over all points but one, plus two edges to the excluded point.
#[derive(Debug, Clone)]
pub struct OneTree {
    excluded: usize,
    edges: Vec<Edge>,
    weight: f64,
}

impl OneTree {
    /// Builds the one-tree that excludes `points[excluded]`.
    ///
    /// # Panics
    ///
    /// Panics if `excluded` is out of bounds.
    pub fn build(points: &[Point], excluded: usize) -> Self {
        let mut edges = edges_without(points, excluded);
        let v = points[excluded];
        if let Some((first, second)) = two_nearest(points, excluded) {
            edges.push(Edge::new(points[first], v));
            edges.push(Edge::new(v, points[second]));
        }
        let weight = edges.iter().map(Edge::weight).sum();
        Self {
            excluded,
            edges,
            weight,
        }
    }

    /// Index of the excluded vertex.
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    /// Spanning edges followed by the two edges incident to the excluded vertex.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Total edge weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Weight of the one-tree excluding `points[excluded]`, without building edges.
pub(crate) fn one_tree_weight(points: &[Point], excluded: usize) -> f64 {
    let v = points[excluded];
    let mut weight = weight_without(points, excluded);
    if let Some((first, second)) = two_nearest(points, excluded) {
        weight += v.distance_to(&points[first]) + v.distance_to(&points[second]);
    }
    weight
}

/// The two points closest to `points[v]`, first found on ties.
///
/// With a single other point it is returned twice: the only tour over two
/// points uses that edge in both directions.
fn two_nearest(points: &[Point], v: usize) -> Option<(usize, usize)> {
    let origin = points[v];
    let mut first: Option<(usize, f64)> = None;
    let mut second: Option<(usize, f64)> = None;
    for (j, p) in points.iter().enumerate() {
        if j == v {
            continue;
        }
        let d = origin.distance_to(p);
        if first.is_none_or(|(_, fd)| d < fd) {
            second = first;
            first = Some((j, d));
        } else if second.is_none_or(|(_, sd)| d < sd) {
            second = Some((j, d));
        }
    }
    let (a, _) = first?;
    let b = second.map_or(a, |(b, _)| b);
    Some((a, b))
}

/// Lower bound on the optimal tour length via the one-tree construction.
///
/// Reconstruct the estimator for an independent point set; each
/// [`generate`](LowerBoundEstimator::generate) call rebuilds everything.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
/// use u_tsp::bound::LowerBoundEstimator;
///
/// let square = [
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(1.0, 1.0),
///     Point::new(0.0, 1.0),
/// ];
/// let bound = LowerBoundEstimator::compute(&square);
/// assert!((bound - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct LowerBoundEstimator {
    points: Vec<Point>,
    tree: Option<OneTree>,
}

impl LowerBoundEstimator {
    /// Creates an estimator over the given points.
    pub fn new(points: &[Point]) -> Self {
        Self {
            points: points.to_vec(),
            tree: None,
        }
    }

    /// One-shot bound computation.
    pub fn compute(points: &[Point]) -> f64 {
        Self::new(points).generate()
    }

    /// Builds every one-tree and keeps the heaviest. Returns its weight.
    ///
    /// Ties between exclusions go to the lowest vertex index. An empty
    /// point set has bound 0.
    pub fn generate(&mut self) -> f64 {
        let points = &self.points;
        let best = (0..points.len())
            .into_par_iter()
            .map(|v| (one_tree_weight(points, v), v))
            .reduce_with(|a, b| {
                if b.0 > a.0 || (b.0 == a.0 && b.1 < a.1) {
                    b
                } else {
                    a
                }
            });

        self.tree = best.map(|(_, v)| OneTree::build(points, v));
        let bound = self.bound();
        log::debug!("one-tree bound: n={} bound={bound:.4}", points.len());
        bound
    }

    /// The heaviest one-tree found by the last [`generate`](Self::generate).
    pub fn one_tree(&self) -> Option<&OneTree> {
        self.tree.as_ref()
    }

    /// The bound from the last [`generate`](Self::generate), 0 if none.
    pub fn bound(&self) -> f64 {
        self.tree.as_ref().map_or(0.0, OneTree::weight)
    }
}
