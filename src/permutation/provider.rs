//! Permutation lookup chain.
//!
//! [`PermutationProvider::get`] resolves a request through an explicit
//! decision table:
//!
//! | condition                        | source   | side effects                         |
//! |----------------------------------|----------|--------------------------------------|
//! | `k < MIN_CACHED_LENGTH`          | compute  | none                                 |
//! | memory tier hit                  | memory   | none                                 |
//! | storage tier hit                 | storage  | populate memory tier                 |
//! | otherwise                        | compute  | persist (if enabled), populate memory |

use std::sync::Arc;

use super::{
    generate_permutations, DirectoryCache, MemoryCache, PermutationCache, PermutationSet,
    MAX_PERMUTATION_LENGTH, MIN_CACHED_LENGTH,
};
use crate::config::PermutationConfig;
use crate::error::{Error, Result};

/// Where a request is served from.
#[derive(Debug)]
enum Source {
    /// Small enough to generate on the spot; caches are bypassed.
    Direct,
    Memory(Arc<PermutationSet>),
    Storage(Arc<PermutationSet>),
    /// No tier has it; generate and fill the tiers.
    Missing,
}

/// Supplies all `k!` permutations of `{0..k-1}` for window brute force.
///
/// # Examples
///
/// ```
/// use u_tsp::config::PermutationConfig;
/// use u_tsp::permutation::PermutationProvider;
///
/// let provider = PermutationProvider::new(&PermutationConfig::default());
/// let set = provider.get(4).unwrap();
/// assert_eq!(set.len(), 24);
/// ```
pub struct PermutationProvider {
    memory: Option<Arc<dyn PermutationCache>>,
    storage: Option<Arc<dyn PermutationCache>>,
    persist: bool,
}

impl PermutationProvider {
    /// Builds the lookup chain described by `config`.
    ///
    /// The memory tier is the process-wide [`MemoryCache::global`].
    pub fn new(config: &PermutationConfig) -> Self {
        let memory: Option<Arc<dyn PermutationCache>> = if config.use_memory_cache {
            Some(MemoryCache::global())
        } else {
            None
        };
        let storage: Option<Arc<dyn PermutationCache>> = config
            .cache_dir
            .as_ref()
            .map(|dir| Arc::new(DirectoryCache::new(dir)) as Arc<dyn PermutationCache>);
        Self {
            memory,
            storage,
            persist: config.persist,
        }
    }

    /// A provider with no cache tiers: every request is generated.
    pub fn uncached() -> Self {
        Self {
            memory: None,
            storage: None,
            persist: false,
        }
    }

    /// Replaces the memory tier.
    pub fn with_memory(mut self, cache: Arc<dyn PermutationCache>) -> Self {
        self.memory = Some(cache);
        self
    }

    /// Replaces the storage tier.
    pub fn with_storage(mut self, cache: Arc<dyn PermutationCache>, persist: bool) -> Self {
        self.storage = Some(cache);
        self.persist = persist;
        self
    }

    /// Returns all permutations of `{0..k-1}`.
    ///
    /// Fails for `k > MAX_PERMUTATION_LENGTH`, or when a stored table for
    /// `k` is unreadable.
    pub fn get(&self, k: usize) -> Result<Arc<PermutationSet>> {
        if k > MAX_PERMUTATION_LENGTH {
            return Err(Error::invalid_config(format!(
                "permutation length {k} exceeds maximum {MAX_PERMUTATION_LENGTH}"
            )));
        }

        let set = match self.locate(k)? {
            Source::Direct => Arc::new(generate_permutations(k)),
            Source::Memory(set) => set,
            Source::Storage(set) => {
                self.populate_memory(&set)?;
                set
            }
            Source::Missing => {
                let set = Arc::new(generate_permutations(k));
                if self.persist {
                    if let Some(storage) = &self.storage {
                        storage.persist(&set)?;
                    }
                }
                self.populate_memory(&set)?;
                set
            }
        };
        Ok(set)
    }

    fn locate(&self, k: usize) -> Result<Source> {
        if k < MIN_CACHED_LENGTH {
            return Ok(Source::Direct);
        }
        if let Some(set) = lookup(self.memory.as_deref(), k)? {
            return Ok(Source::Memory(set));
        }
        if let Some(set) = lookup(self.storage.as_deref(), k)? {
            log::debug!("loaded permutations of length {k} from storage");
            return Ok(Source::Storage(set));
        }
        Ok(Source::Missing)
    }

    fn populate_memory(&self, set: &Arc<PermutationSet>) -> Result<()> {
        match &self.memory {
            Some(memory) => memory.populate(set.clone()),
            None => Ok(()),
        }
    }
}

fn lookup(tier: Option<&dyn PermutationCache>, k: usize) -> Result<Option<Arc<PermutationSet>>> {
    match tier {
        Some(cache) => cache.lookup(k),
        None => Ok(None),
    }
}
