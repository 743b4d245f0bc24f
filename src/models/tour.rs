//! Tour type.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use super::Point;
use crate::distance::{tour_cost, tour_cost_squared};

/// A named, closed visiting sequence over a set of points.
///
/// Indexing is circular: position `len()` is position `0`. The total length
/// is computed on first read and cached until the next mutation. Every
/// mutating method takes `&mut self`, bumps [`version`](Tour::version) and
/// drops the cached cost in the same call, so the ordering and the cached
/// value never disagree.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{Point, Tour};
///
/// let mut tour = Tour::new("square", vec![
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
///     Point::new(0.0, 1.0),
/// ]);
/// let crossed = tour.cost();
/// tour.swap(1, 2);
/// assert!(tour.cost() < crossed);
/// assert!((tour.cost() - 4.0).abs() < 1e-10);
/// assert_eq!(tour.get(5), tour.get(1));
/// ```
#[derive(Debug, Clone)]
pub struct Tour {
    name: String,
    points: Vec<Point>,
    version: u64,
    cost: OnceLock<f64>,
    cost_squared: OnceLock<f64>,
}

impl Tour {
    /// Creates a tour visiting `points` in the given order.
    pub fn new(name: impl Into<String>, points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            name: name.into(),
            points: points.into_iter().collect(),
            version: 0,
            cost: OnceLock::new(),
            cost_squared: OnceLock::new(),
        }
    }

    /// Creates a tour with the same name as this one over a different ordering.
    pub fn with_points(&self, points: impl IntoIterator<Item = Point>) -> Self {
        Self::new(self.name.clone(), points)
    }

    /// Tour name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the tour has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The points in visiting order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consumes the tour, returning its points in visiting order.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Structural version; incremented by every mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns the point at position `index % len()`.
    ///
    /// # Panics
    ///
    /// Panics if the tour is empty.
    pub fn get(&self, index: usize) -> Point {
        self.points[index % self.points.len()]
    }

    /// Replaces the point at position `index % len()`.
    ///
    /// # Panics
    ///
    /// Panics if the tour is empty.
    pub fn set(&mut self, index: usize, point: Point) {
        let n = self.points.len();
        self.points[index % n] = point;
        self.touch();
    }

    /// Exchanges the points at two positions (both taken modulo `len()`).
    pub fn swap(&mut self, a: usize, b: usize) {
        let n = self.points.len();
        self.points.swap(a % n, b % n);
        self.touch();
    }

    /// Appends a point at the end of the sequence.
    pub fn append(&mut self, point: Point) {
        self.points.push(point);
        self.touch();
    }

    /// Inserts a point before position `index` (`index == len()` appends).
    pub fn insert(&mut self, index: usize, point: Point) {
        self.points.insert(index, point);
        self.touch();
    }

    /// Reverses the whole visiting order.
    pub fn reverse(&mut self) {
        self.points.reverse();
        self.touch();
    }

    /// Reverses the non-wrapping sub-range `from..=to`.
    ///
    /// # Panics
    ///
    /// Panics if `from > to` or `to >= len()`.
    pub fn reverse_range(&mut self, from: usize, to: usize) {
        self.points[from..=to].reverse();
        self.touch();
    }

    /// Reorders the window starting at `start`: afterwards position
    /// `start + k` holds what was at `start + order[k]`.
    ///
    /// # Panics
    ///
    /// Panics if the window runs past the end of the tour or `order` is not
    /// a permutation of `0..order.len()`.
    pub fn reorder_range(&mut self, start: usize, order: &[u8]) {
        let snapshot: Vec<Point> = self.points[start..start + order.len()].to_vec();
        for (k, &src) in order.iter().enumerate() {
            self.points[start + k] = snapshot[src as usize];
        }
        self.touch();
    }

    /// Total closed-tour Euclidean length, cached until the next mutation.
    pub fn cost(&self) -> f64 {
        *self.cost.get_or_init(|| tour_cost(&self.points))
    }

    /// Total closed-tour squared length, cached until the next mutation.
    pub fn cost_squared(&self) -> f64 {
        *self
            .cost_squared
            .get_or_init(|| tour_cost_squared(&self.points))
    }

    /// Hash of the canonical rotation of the visiting order.
    ///
    /// The canonical rotation starts at the first point with the smallest
    /// squared norm, so two tours that are rotations of each other share a
    /// fingerprint.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        let n = self.points.len();
        n.hash(&mut hasher);
        if n > 0 {
            let start = canonical_start(&self.points);
            for k in 0..n {
                self.points[(start + k) % n].hash(&mut hasher);
            }
        }
        hasher.finish()
    }

    /// Returns `true` if both tours contain exactly the same point multiset.
    pub fn same_points(&self, other: &Tour) -> bool {
        membership_difference(&self.points, &other.points).is_none()
    }

    fn touch(&mut self) {
        self.version += 1;
        self.cost = OnceLock::new();
        self.cost_squared = OnceLock::new();
    }
}

fn canonical_start(points: &[Point]) -> usize {
    let mut start = 0;
    let mut best = f64::INFINITY;
    for (i, p) in points.iter().enumerate() {
        let norm = p.norm_squared();
        if norm < best {
            best = norm;
            start = i;
        }
    }
    start
}

/// Describes how `candidate` differs from `reference` as a point multiset,
/// or `None` if they match.
pub(crate) fn membership_difference(reference: &[Point], candidate: &[Point]) -> Option<String> {
    if reference.len() != candidate.len() {
        return Some(format!(
            "expected {} points, found {}",
            reference.len(),
            candidate.len()
        ));
    }
    let mut counts: HashMap<Point, isize> = HashMap::with_capacity(reference.len());
    for p in reference {
        *counts.entry(*p).or_insert(0) += 1;
    }
    for p in candidate {
        match counts.get_mut(p) {
            Some(c) if *c > 0 => *c -= 1,
            Some(_) => return Some(format!("point {p} duplicated")),
            None => return Some(format!("point {p} not in input")),
        }
    }
    counts
        .iter()
        .find(|(_, c)| **c > 0)
        .map(|(p, _)| format!("point {p} missing"))
}
