//! Uniform driver over all heuristics.
//!
//! - [`Algorithm`] — Closed enum of runnable heuristics with a membership-checked `run`
//! - [`Pipeline`] — Runs a sequence of algorithms and reports per-step results

mod heuristic;
mod pipeline;

pub use heuristic::Algorithm;
pub use pipeline::{Pipeline, PipelineReport, StepReport};
