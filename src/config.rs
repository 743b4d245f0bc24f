//! Solver configuration.
//!
//! Every config type implements [`Default`] and deserializes with serde, so
//! a partial JSON document only overrides the fields it names.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::permutation::MAX_PERMUTATION_LENGTH;

/// Default window length for slice-window brute force.
pub const DEFAULT_WINDOW_LENGTH: usize = 8;

/// Permutation lookup chain settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermutationConfig {
    /// Keep generated tables in the process-wide memory cache.
    pub use_memory_cache: bool,
    /// Directory holding `<k>.perm` / `<k>.csv` tables.
    pub cache_dir: Option<PathBuf>,
    /// Write newly generated tables to `cache_dir`.
    pub persist: bool,
}

impl Default for PermutationConfig {
    fn default() -> Self {
        Self {
            use_memory_cache: true,
            cache_dir: None,
            persist: false,
        }
    }
}

impl PermutationConfig {
    /// Sets the table directory.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Enables writing generated tables to the table directory.
    pub fn with_persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    /// Enables or disables the memory tier.
    pub fn with_memory_cache(mut self, enabled: bool) -> Self {
        self.use_memory_cache = enabled;
        self
    }
}

/// Slice-window brute force settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceWindowConfig {
    /// Number of consecutive tour positions reordered at once.
    pub window_length: usize,
    /// Repeat sweeps until a sweep finds no improvement.
    pub recursive: bool,
    /// Where the window permutations come from.
    pub permutations: PermutationConfig,
}

impl Default for SliceWindowConfig {
    fn default() -> Self {
        Self {
            window_length: DEFAULT_WINDOW_LENGTH,
            recursive: false,
            permutations: PermutationConfig::default(),
        }
    }
}

impl SliceWindowConfig {
    /// Sets the window length.
    pub fn with_window_length(mut self, window_length: usize) -> Self {
        self.window_length = window_length;
        self
    }

    /// Enables sweeping to a fixed point.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Sets the permutation lookup chain.
    pub fn with_permutations(mut self, permutations: PermutationConfig) -> Self {
        self.permutations = permutations;
        self
    }

    /// Checks that the window length is in `2..=MAX_PERMUTATION_LENGTH`.
    pub fn validate(&self) -> Result<()> {
        if !(2..=MAX_PERMUTATION_LENGTH).contains(&self.window_length) {
            return Err(Error::invalid_config(format!(
                "window_length must be in 2..={MAX_PERMUTATION_LENGTH}, got {}",
                self.window_length
            )));
        }
        Ok(())
    }
}

/// Move acceptance strategy for 2-opt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwoOptMode {
    /// Evaluate every reversal in parallel, apply the best one per pass.
    #[default]
    BestImprovement,
    /// Apply the first improving reversal, resuming the scan where it left off.
    FirstImprovement,
}

/// 2-opt settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwoOptConfig {
    /// Move acceptance strategy.
    pub mode: TwoOptMode,
}

impl TwoOptConfig {
    /// Sets the acceptance strategy.
    pub fn with_mode(mut self, mode: TwoOptMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Configuration for a [`Pipeline`](crate::algorithm::Pipeline) run.
///
/// # Examples
///
/// ```
/// use u_tsp::config::SolverConfig;
/// use u_tsp::algorithm::Algorithm;
///
/// let config = SolverConfig::from_json_str(r#"{
///     "sequence": [
///         { "algorithm": "insertion_build" },
///         { "algorithm": "two_opt", "mode": "first_improvement" },
///         { "algorithm": "slice_window", "window_length": 6, "recursive": true }
///     ]
/// }"#).unwrap();
/// assert_eq!(config.sequence.len(), 3);
/// assert!(config.compute_lower_bound);
/// assert_eq!(config.sequence[0], Algorithm::InsertionBuild);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Heuristics to run, in order.
    pub sequence: Vec<Algorithm>,
    /// Compute the one-tree bound before running the sequence.
    pub compute_lower_bound: bool,
}

impl Default for SolverConfig {
    /// Nearest neighbor, then 2-opt, then swap.
    fn default() -> Self {
        Self {
            sequence: vec![
                Algorithm::NearestNeighbor,
                Algorithm::TwoOpt(TwoOptConfig::default()),
                Algorithm::Swap,
            ],
            compute_lower_bound: true,
        }
    }
}

impl SolverConfig {
    /// Replaces the algorithm sequence.
    pub fn with_sequence(mut self, sequence: Vec<Algorithm>) -> Self {
        self.sequence = sequence;
        self
    }

    /// Appends an algorithm to the sequence.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.sequence.push(algorithm);
        self
    }

    /// Skips the lower-bound computation.
    pub fn without_lower_bound(mut self) -> Self {
        self.compute_lower_bound = false;
        self
    }

    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every algorithm's settings.
    pub fn validate(&self) -> Result<()> {
        for algorithm in &self.sequence {
            algorithm.validate()?;
        }
        Ok(())
    }
}
