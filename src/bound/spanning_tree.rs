//! Minimum spanning tree (Prim).
//!
//! # Algorithm
//!
//! Grows a tree from a root vertex. Every non-tree vertex remembers its
//! cheapest connection to the tree; each step attaches the vertex whose
//! connection is globally cheapest (first in index order on ties) and
//! relaxes the remaining connections through it.
//!
//! # Complexity
//!
//! O(n²) time, O(n) memory. No distance matrix is materialized.
//!
//! # Reference
//!
//! Prim, R.C. (1957). "Shortest connection networks and some
//! generalizations", *Bell System Technical Journal* 36(6), 1389-1401.

use crate::models::Point;

/// An edge between two points, weighted by Euclidean distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Tree-side endpoint.
    pub from: Point,
    /// Endpoint attached by this edge.
    pub to: Point,
}

impl Edge {
    /// Creates a new edge.
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// Euclidean length of the edge.
    pub fn weight(&self) -> f64 {
        self.from.distance_to(&self.to)
    }
}

/// A minimum spanning tree over a point set.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
/// use u_tsp::bound::SpanningTree;
///
/// let pts = [
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(1.0, 1.0),
///     Point::new(0.0, 1.0),
/// ];
/// let mst = SpanningTree::prim(&pts);
/// assert_eq!(mst.edges().len(), 3);
/// assert!((mst.weight() - 3.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SpanningTree {
    edges: Vec<Edge>,
    weight: f64,
}

impl SpanningTree {
    /// Builds the minimum spanning tree rooted at `points[0]`.
    pub fn prim(points: &[Point]) -> Self {
        let mut edges = Vec::with_capacity(points.len().saturating_sub(1));
        let mut weight = 0.0;
        grow(points, None, |from, to, w| {
            edges.push(Edge::new(points[from], points[to]));
            weight += w;
        });
        Self { edges, weight }
    }

    /// Tree edges in attachment order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Total edge weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Weight of the minimum spanning tree over `points` with `excluded` removed.
pub(crate) fn weight_without(points: &[Point], excluded: usize) -> f64 {
    let mut weight = 0.0;
    grow(points, Some(excluded), |_, _, w| weight += w);
    weight
}

/// Edges of the minimum spanning tree over `points` with `excluded` removed.
pub(crate) fn edges_without(points: &[Point], excluded: usize) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(points.len().saturating_sub(2));
    grow(points, Some(excluded), |from, to, _| {
        edges.push(Edge::new(points[from], points[to]))
    });
    edges
}

/// Runs Prim over `points`, skipping `excluded`, reporting each attached
/// edge as `(tree vertex, new vertex, weight)`.
fn grow(points: &[Point], excluded: Option<usize>, mut on_edge: impl FnMut(usize, usize, f64)) {
    let n = points.len();
    let mut in_tree = vec![false; n];
    if let Some(x) = excluded.filter(|&x| x < n) {
        in_tree[x] = true;
    }
    let Some(root) = (0..n).find(|&i| !in_tree[i]) else {
        return;
    };
    in_tree[root] = true;

    let mut best = vec![f64::INFINITY; n];
    let mut parent = vec![root; n];
    for j in 0..n {
        if !in_tree[j] {
            best[j] = points[root].distance_to(&points[j]);
        }
    }

    loop {
        let mut next: Option<usize> = None;
        for j in 0..n {
            if in_tree[j] {
                continue;
            }
            if next.is_none_or(|k| best[j] < best[k]) {
                next = Some(j);
            }
        }
        let Some(v) = next else {
            break;
        };

        in_tree[v] = true;
        on_edge(parent[v], v, best[v]);

        for j in 0..n {
            if in_tree[j] {
                continue;
            }
            let d = points[v].distance_to(&points[j]);
            if d < best[j] {
                best[j] = d;
                parent[j] = v;
            }
        }
    }
}
