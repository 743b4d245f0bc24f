//! Local search operators for improving tours.
//!
//! - [`swap_improve`] — Best pairwise point exchange
//! - [`two_opt_improve`] — 2-opt segment reversal, best or first improvement
//! - [`slice_window_improve`] — Brute-force reordering of a sliding window

mod candidate;
mod slice_window;
mod swap;
mod two_opt;

pub use slice_window::{slice_window_improve, slice_window_with};
pub use swap::swap_improve;
pub use two_opt::two_opt_improve;
