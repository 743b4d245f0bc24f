//! Error types.

use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Errors produced by the solver.
///
/// "No improvement found" is never an error: heuristics return the input
/// tour unchanged in that case.
#[derive(Debug, ThisError)]
pub enum Error {
    /// A heuristic returned a tour whose point multiset differs from its input.
    #[error("{algorithm} produced an invalid tour: {reason}")]
    InvalidTour {
        /// Name of the offending algorithm.
        algorithm: String,
        /// What was wrong with the output.
        reason: String,
    },
    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// A cached permutation file for the requested length has an unknown type.
    #[error("cannot load permutation file with type: {}", path.display())]
    UnsupportedPermutationFile {
        /// Offending file.
        path: PathBuf,
    },
    /// A cached permutation file could not be decoded.
    #[error("malformed permutation file {}: {reason}", path.display())]
    MalformedPermutationFile {
        /// Offending file.
        path: PathBuf,
        /// Decoding failure.
        reason: String,
    },
    /// A tour file could not be parsed.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Description of the problem.
        message: String,
    },
    /// A tour report is internally inconsistent.
    #[error("invalid tour report: {0}")]
    InvalidReport(String),
    /// The in-memory permutation cache lock was poisoned by a panicking thread.
    #[error("permutation cache lock poisoned")]
    CachePoisoned,
    /// Reading or writing a tour, report or table file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A config or report document is not valid JSON for its type.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Why a byte buffer is not a complete permutation table.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum PermutationSetError {
    /// Positions are stored as single bytes.
    #[error("length {length} does not fit the byte encoding")]
    LengthTooLarge {
        /// Requested permutation length.
        length: usize,
    },
    /// Length 0 has only the empty permutation, which has no bytes.
    #[error("zero-length permutations carry no data")]
    DataForZeroLength,
    /// The buffer ends partway through a permutation.
    #[error("{bytes} bytes is not a multiple of the permutation length {length}")]
    Truncated {
        /// Buffer size.
        bytes: usize,
        /// Permutation length.
        length: usize,
    },
    /// The buffer does not hold `length!` permutations.
    #[error("expected {expected} permutations, found {found}")]
    WrongCount {
        /// `length!`.
        expected: usize,
        /// Permutations in the buffer.
        found: usize,
    },
    /// An entry repeats or skips a position.
    #[error("entry {entry} is not a permutation of 0..{length}")]
    NotAPermutation {
        /// 0-based entry index.
        entry: usize,
        /// Permutation length.
        length: usize,
    },
    /// An entry equals one stored before it.
    #[error("entry {entry} repeats an earlier permutation")]
    Duplicate {
        /// 0-based entry index.
        entry: usize,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Builds [`Error::InvalidConfig`].
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Builds [`Error::InvalidTour`] for the named algorithm.
    pub fn invalid_tour(algorithm: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTour {
            algorithm: algorithm.into(),
            reason: reason.into(),
        }
    }

    /// Builds [`Error::Parse`] at a 1-based line.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Builds [`Error::MalformedPermutationFile`] for the file at `path`.
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedPermutationFile {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
