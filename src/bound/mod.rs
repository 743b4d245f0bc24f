//! Lower-bound estimation.
//!
//! - [`SpanningTree`] — Prim minimum spanning tree, O(n²)
//! - [`LowerBoundEstimator`] — One-tree bound, maximum over all vertex exclusions

mod one_tree;
mod spanning_tree;

pub use one_tree::{LowerBoundEstimator, OneTree};
pub use spanning_tree::{Edge, SpanningTree};
