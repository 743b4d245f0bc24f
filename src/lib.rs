//! # u-tsp
//!
//! Euclidean travelling-salesman heuristics: constructive builders, local
//! search improvers, a one-tree lower bound, and a pipeline that chains
//! them while reporting progress.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Point, Tour with cached cost, random instances)
//! - [`distance`] — Closed-tour, squared and open-path length
//! - [`bound`] — Prim spanning tree and one-tree lower bound
//! - [`permutation`] — Window permutation tables with memory and directory caches
//! - [`constructive`] — Constructive heuristics (Nearest Neighbor, Insertion Build)
//! - [`local_search`] — Local search operators (Swap, 2-opt, Slice Window)
//! - [`algorithm`] — Closed algorithm enum and sequential pipeline
//! - [`config`] — Serde-backed solver settings
//! - [`io`] — Coordinate files and JSON reports
//! - [`error`] — Error type
//!
//! ## Example
//!
//! ```
//! use u_tsp::algorithm::Pipeline;
//! use u_tsp::config::SolverConfig;
//! use u_tsp::models::{random_points, Tour};
//!
//! let tour = Tour::new("demo", random_points(40, 100.0, 100.0, 1));
//! let report = Pipeline::from_config(tour.clone(), &SolverConfig::default())
//!     .run()
//!     .unwrap();
//! assert!(report.cost() < tour.cost());
//! assert!(report.tour.same_points(&tour));
//! ```

pub mod algorithm;
pub mod bound;
pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod io;
pub mod local_search;
pub mod models;
pub mod permutation;

pub use error::{Error, Result};
