//! Tour file formats.
//!
//! - [`parse_tsp`] / [`format_tsp`] — Plain-text `NODE_COORD_SECTION` coordinate files
//! - [`TourReport`] — JSON report with name, dimension, lower bound, cost and indexed points

mod report;
mod tsplib;

pub use report::{IndexedPoint, TourReport};
pub use tsplib::{format_tsp, parse_tsp, read_tsp_file, write_tsp_file};
