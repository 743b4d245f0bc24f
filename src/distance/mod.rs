//! Cost model.
//!
//! Pure functions computing closed-tour length, squared length and
//! open-path length over any point sequence.

mod cost;

pub use cost::{path_length, tour_cost, tour_cost_squared};
