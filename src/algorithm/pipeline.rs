//! Sequential heuristic driver.
//!
//! Runs a sequence of [`Algorithm`]s, each against the best tour so far,
//! recording cost, improvement and runtime per step. The one-tree lower
//! bound, when enabled, is computed once up front and used to score each
//! step as `cost / lower_bound` (1.0 would be provably optimal).

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::Algorithm;
use crate::bound::LowerBoundEstimator;
use crate::config::SolverConfig;
use crate::error::Result;
use crate::models::Tour;

/// Outcome of one pipeline step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    /// Algorithm identifier.
    pub algorithm: String,
    /// Best cost before the step.
    pub cost_before: f64,
    /// Best cost after the step.
    pub cost_after: f64,
    /// Relative decrease, `1 - after / before` (0 when `before` is 0).
    pub improvement: f64,
    /// Wall-clock time spent in the heuristic.
    pub elapsed: Duration,
    /// `cost_after / lower_bound`, if a positive bound is known.
    pub score: Option<f64>,
}

/// Outcome of a full pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Best tour found.
    pub tour: Tour,
    /// One-tree lower bound, if computed.
    pub lower_bound: Option<f64>,
    /// Cost of the input tour.
    pub initial_cost: f64,
    /// One entry per algorithm, in run order.
    pub steps: Vec<StepReport>,
}

impl PipelineReport {
    /// Cost of the best tour.
    pub fn cost(&self) -> f64 {
        self.tour.cost()
    }

    /// `cost / lower_bound`, if a positive bound is known.
    pub fn score(&self) -> Option<f64> {
        score(self.cost(), self.lower_bound)
    }

    /// Total wall-clock time across steps.
    pub fn elapsed(&self) -> Duration {
        self.steps.iter().map(|s| s.elapsed).sum()
    }
}

/// Runs heuristics in order, keeping the best tour.
///
/// # Examples
///
/// ```
/// use u_tsp::algorithm::{Algorithm, Pipeline};
/// use u_tsp::config::TwoOptConfig;
/// use u_tsp::models::{random_points, Tour};
///
/// let tour = Tour::new("random", random_points(50, 100.0, 100.0, 42));
/// let report = Pipeline::new(tour.clone())
///     .with_algorithm(Algorithm::NearestNeighbor)
///     .with_algorithm(Algorithm::TwoOpt(TwoOptConfig::default()))
///     .run()
///     .unwrap();
///
/// assert_eq!(report.steps.len(), 2);
/// assert!(report.cost() < tour.cost());
/// assert!(report.lower_bound.unwrap() <= report.cost());
/// assert!(report.score().unwrap() >= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    tour: Tour,
    sequence: Vec<Algorithm>,
    compute_lower_bound: bool,
}

impl Pipeline {
    /// Creates an empty pipeline over `tour` with the lower bound enabled.
    pub fn new(tour: Tour) -> Self {
        Self {
            tour,
            sequence: Vec::new(),
            compute_lower_bound: true,
        }
    }

    /// Creates a pipeline from a solver config.
    pub fn from_config(tour: Tour, config: &SolverConfig) -> Self {
        Self {
            tour,
            sequence: config.sequence.clone(),
            compute_lower_bound: config.compute_lower_bound,
        }
    }

    /// Appends an algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.sequence.push(algorithm);
        self
    }

    /// Skips the lower-bound computation.
    pub fn without_lower_bound(mut self) -> Self {
        self.compute_lower_bound = false;
        self
    }

    /// Algorithms in run order.
    pub fn sequence(&self) -> &[Algorithm] {
        &self.sequence
    }

    /// Runs every algorithm in order.
    ///
    /// All settings are validated before anything runs. The first failing
    /// step aborts the run.
    pub fn run(self) -> Result<PipelineReport> {
        for algorithm in &self.sequence {
            algorithm.validate()?;
        }

        let lower_bound = self.compute_lower_bound.then(|| {
            let started = Instant::now();
            let bound = LowerBoundEstimator::compute(self.tour.points());
            log::info!(
                "{}: n={} lower bound {bound:.4} ({:?})",
                self.tour.name(),
                self.tour.len(),
                started.elapsed()
            );
            bound
        });

        let initial_cost = self.tour.cost();
        let mut best = self.tour;
        let mut steps = Vec::with_capacity(self.sequence.len());

        for algorithm in &self.sequence {
            let cost_before = best.cost();
            let started = Instant::now();
            best = algorithm.run(&best)?;
            let elapsed = started.elapsed();
            let cost_after = best.cost();

            let step = StepReport {
                algorithm: algorithm.name().to_string(),
                cost_before,
                cost_after,
                improvement: improvement(cost_before, cost_after),
                elapsed,
                score: score(cost_after, lower_bound),
            };
            log::info!(
                "{}: {} cost {:.4} -> {:.4} ({:.2}%) in {:?}{}",
                best.name(),
                step.algorithm,
                step.cost_before,
                step.cost_after,
                step.improvement * 100.0,
                step.elapsed,
                step.score
                    .map(|s| format!(", score {s:.4}"))
                    .unwrap_or_default()
            );
            steps.push(step);
        }

        Ok(PipelineReport {
            tour: best,
            lower_bound,
            initial_cost,
            steps,
        })
    }
}

fn improvement(before: f64, after: f64) -> f64 {
    if before > 0.0 {
        1.0 - after / before
    } else {
        0.0
    }
}

fn score(cost: f64, lower_bound: Option<f64>) -> Option<f64> {
    lower_bound.filter(|&b| b > 0.0).map(|b| cost / b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SliceWindowConfig, TwoOptConfig};
    use crate::error::Error;
    use crate::models::{random_points, Point};

    #[test]
    fn test_default_config_never_worsens() {
        let tour = Tour::new("random", random_points(40, 100.0, 100.0, 3));
        let report = Pipeline::from_config(tour.clone(), &SolverConfig::default())
            .run()
            .expect("run");
        assert_eq!(report.steps.len(), 3);
        assert!(report.tour.same_points(&tour));
        assert!((report.initial_cost - tour.cost()).abs() < 1e-12);
        for step in &report.steps {
            assert!(step.cost_after <= step.cost_before);
            assert!(step.improvement >= 0.0);
        }
        let last = report.steps.last().expect("steps");
        assert_eq!(last.cost_after, report.cost());
    }

    #[test]
    fn test_builder_sequence_in_run_order() {
        let tour = Tour::new("random", random_points(10, 10.0, 10.0, 1));
        let pipeline = Pipeline::new(tour.clone())
            .with_algorithm(Algorithm::NearestNeighbor)
            .with_algorithm(Algorithm::Swap);
        assert_eq!(
            pipeline.sequence(),
            &[Algorithm::NearestNeighbor, Algorithm::Swap]
        );

        let config = SolverConfig::default();
        let from_config = Pipeline::from_config(tour, &config);
        assert_eq!(from_config.sequence(), config.sequence.as_slice());
    }

    #[test]
    fn test_steps_chain_costs() {
        let tour = Tour::new("random", random_points(30, 100.0, 100.0, 12));
        let report = Pipeline::new(tour)
            .with_algorithm(Algorithm::InsertionBuild)
            .with_algorithm(Algorithm::Swap)
            .with_algorithm(Algorithm::SliceWindowBruteForce(
                SliceWindowConfig::default().with_window_length(4),
            ))
            .run()
            .expect("run");
        for pair in report.steps.windows(2) {
            assert_eq!(pair[0].cost_after, pair[1].cost_before);
        }
    }

    #[test]
    fn test_unit_square_scores_one() {
        let tour = Tour::new(
            "square",
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(1.0, 0.0),
                Point::new(0.0, 1.0),
            ],
        );
        let report = Pipeline::new(tour)
            .with_algorithm(Algorithm::TwoOpt(TwoOptConfig::default()))
            .run()
            .expect("run");
        assert!((report.lower_bound.expect("bound") - 4.0).abs() < 1e-10);
        assert!((report.score().expect("score") - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_without_lower_bound() {
        let tour = Tour::new("random", random_points(10, 10.0, 10.0, 1));
        let report = Pipeline::new(tour)
            .without_lower_bound()
            .with_algorithm(Algorithm::Swap)
            .run()
            .expect("run");
        assert!(report.lower_bound.is_none());
        assert!(report.steps[0].score.is_none());
    }

    #[test]
    fn test_invalid_step_fails_before_running() {
        let tour = Tour::new("random", random_points(10, 10.0, 10.0, 1));
        let err = Pipeline::new(tour)
            .with_algorithm(Algorithm::Swap)
            .with_algorithm(Algorithm::SliceWindowBruteForce(
                SliceWindowConfig::default().with_window_length(12),
            ))
            .run()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_pipeline_returns_input() {
        let tour = Tour::new("random", random_points(10, 10.0, 10.0, 1));
        let report = Pipeline::new(tour.clone()).run().expect("run");
        assert!(report.steps.is_empty());
        assert_eq!(report.tour.points(), tour.points());
    }

    #[test]
    fn test_improvement_ratio() {
        assert!((improvement(10.0, 8.0) - 0.2).abs() < 1e-12);
        assert_eq!(improvement(0.0, 0.0), 0.0);
        assert_eq!(score(5.0, Some(0.0)), None);
    }
}
