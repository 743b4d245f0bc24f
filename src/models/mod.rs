//! Domain model types for Euclidean TSP.
//!
//! Provides points in the plane, the circular [`Tour`] with its cached
//! cost, and seeded random instance generation.

mod instance;
mod point;
mod tour;

pub use instance::random_points;
pub use point::Point;
pub use tour::Tour;

pub(crate) use tour::membership_difference;
