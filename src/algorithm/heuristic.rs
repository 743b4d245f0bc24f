//! Closed set of runnable heuristics.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{SliceWindowConfig, TwoOptConfig};
use crate::constructive::{insertion_build, nearest_neighbor};
use crate::error::{Error, Result};
use crate::local_search::{slice_window_improve, swap_improve, two_opt_improve};
use crate::models::{membership_difference, Tour};

/// A heuristic that can be run against a tour.
///
/// Serialized with an `"algorithm"` tag, settings inline:
/// `{ "algorithm": "two_opt", "mode": "first_improvement" }`.
///
/// # Examples
///
/// ```
/// use u_tsp::algorithm::Algorithm;
/// use u_tsp::models::{Point, Tour};
///
/// let tour = Tour::new("square", vec![
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
///     Point::new(0.0, 1.0),
/// ]);
/// let improved = Algorithm::Swap.run(&tour).unwrap();
/// assert!(improved.cost() < tour.cost());
/// assert!(improved.same_points(&tour));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum Algorithm {
    /// Greedy nearest-neighbor construction from every start.
    NearestNeighbor,
    /// Farthest-edge cheapest-insertion construction.
    InsertionBuild,
    /// 2-opt segment reversal.
    TwoOpt(TwoOptConfig),
    /// Best pairwise exchange.
    Swap,
    /// Brute-force reordering of a sliding window.
    #[serde(rename = "slice_window")]
    SliceWindowBruteForce(SliceWindowConfig),
}

impl Algorithm {
    /// Short identifier, matching the serialized tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NearestNeighbor => "nearest_neighbor",
            Self::InsertionBuild => "insertion_build",
            Self::TwoOpt(_) => "two_opt",
            Self::Swap => "swap",
            Self::SliceWindowBruteForce(_) => "slice_window",
        }
    }

    /// Checks the variant's settings.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::SliceWindowBruteForce(config) => config.validate(),
            _ => Ok(()),
        }
    }

    /// Runs the heuristic on a copy of `tour`.
    ///
    /// The result holds exactly the input's points and is never more
    /// expensive: if the heuristic finds nothing strictly better, a copy of
    /// `tour` is returned.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfig`] for out-of-range settings
    /// - [`Error::InvalidTour`] if the heuristic lost, duplicated or
    ///   invented a point
    /// - permutation lookup errors from slice window
    pub fn run(&self, tour: &Tour) -> Result<Tour> {
        self.validate()?;
        let candidate = match self {
            Self::NearestNeighbor => nearest_neighbor(tour),
            Self::InsertionBuild => insertion_build(tour),
            Self::TwoOpt(config) => two_opt_improve(tour, config),
            Self::Swap => swap_improve(tour),
            Self::SliceWindowBruteForce(config) => slice_window_improve(tour, config)?,
        };
        accept(self.name(), tour, candidate)
    }
}

/// Membership check followed by strict-improvement acceptance.
pub(crate) fn accept(algorithm: &str, input: &Tour, candidate: Tour) -> Result<Tour> {
    if let Some(reason) = membership_difference(input.points(), candidate.points()) {
        return Err(Error::invalid_tour(algorithm, reason));
    }
    if candidate.cost() < input.cost() {
        Ok(candidate)
    } else {
        Ok(input.clone())
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TwoOptMode;
    use crate::models::{random_points, Point};

    fn all() -> Vec<Algorithm> {
        vec![
            Algorithm::NearestNeighbor,
            Algorithm::InsertionBuild,
            Algorithm::TwoOpt(TwoOptConfig::default()),
            Algorithm::TwoOpt(TwoOptConfig::default().with_mode(TwoOptMode::FirstImprovement)),
            Algorithm::Swap,
            Algorithm::SliceWindowBruteForce(SliceWindowConfig::default().with_window_length(5)),
        ]
    }

    #[test]
    fn test_every_algorithm_preserves_membership() {
        let tour = Tour::new("random", random_points(30, 100.0, 100.0, 17));
        for algorithm in all() {
            let out = algorithm.run(&tour).expect("run");
            assert!(out.same_points(&tour), "{algorithm}");
            assert!(out.cost() <= tour.cost(), "{algorithm}");
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        for n in 0..4 {
            let tour = Tour::new("tiny", random_points(n, 10.0, 10.0, 1));
            for algorithm in all() {
                let out = algorithm.run(&tour).expect("run");
                assert_eq!(out.len(), n, "{algorithm}");
            }
        }
    }

    #[test]
    fn test_accept_rejects_lost_point() {
        let tour = Tour::new("t", random_points(5, 10.0, 10.0, 8));
        let mut broken = tour.clone();
        broken.set(0, Point::new(-1.0, -1.0));
        let err = accept("swap", &tour, broken).unwrap_err();
        match err {
            Error::InvalidTour { algorithm, .. } => assert_eq!(algorithm, "swap"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_accept_keeps_input_when_not_better() {
        let square = Tour::new(
            "square",
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ],
        );
        let mut crossed = square.clone();
        crossed.swap(1, 2);
        let out = accept("two_opt", &square, crossed).expect("valid");
        assert_eq!(out.points(), square.points());
    }

    #[test]
    fn test_invalid_window_rejected_before_running() {
        let algorithm =
            Algorithm::SliceWindowBruteForce(SliceWindowConfig::default().with_window_length(0));
        let tour = Tour::new("t", random_points(8, 10.0, 10.0, 2));
        assert!(matches!(algorithm.run(&tour), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&Algorithm::SliceWindowBruteForce(
            SliceWindowConfig::default(),
        ))
        .expect("serialize");
        assert!(json.contains(r#""algorithm":"slice_window""#));

        let parsed: Algorithm =
            serde_json::from_str(r#"{ "algorithm": "two_opt" }"#).expect("parse");
        assert_eq!(parsed, Algorithm::TwoOpt(TwoOptConfig::default()));
        assert_eq!(parsed.to_string(), "two_opt");
    }
}
