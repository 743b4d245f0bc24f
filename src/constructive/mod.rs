//! Constructive heuristics for building an initial tour.
//!
//! - [`nearest_neighbor`] — Greedy nearest neighbor from every start, O(n³) parallel
//! - [`insertion_build`] — Farthest-edge / cheapest-point insertion, O(n²)

mod insertion_build;
mod nearest_neighbor;

pub use insertion_build::insertion_build;
pub use nearest_neighbor::{nearest_neighbor, nearest_neighbor_from};
