//! Exhaustive index permutations for window brute force.
//!
//! - [`generate_permutations`] — Iterative-extension generator
//! - [`PermutationSet`] — Dense byte storage of a full table
//! - [`PermutationCache`] — Cache tier trait ([`MemoryCache`], [`DirectoryCache`])
//! - [`PermutationProvider`] — Memory → storage → compute lookup chain

mod cache;
mod generator;
mod provider;
mod set;

pub use cache::{DirectoryCache, MemoryCache, PermutationCache};
pub use generator::generate_permutations;
pub use provider::PermutationProvider;
pub use set::{factorial, PermutationSet};

/// Shorter tables are always generated directly; caches are not consulted.
pub const MIN_CACHED_LENGTH: usize = 6;

/// Longest supported table (10! permutations, about 36 MB).
pub const MAX_PERMUTATION_LENGTH: usize = 10;
