//! Permutation table caches.
//!
//! Two tiers implement [`PermutationCache`]: a process-wide in-memory map
//! and a directory of pre-generated tables. Files are named after the
//! permutation length:
//!
//! - `<k>.perm` — dense bytes, one byte per position, `k` bytes per permutation
//! - `<k>.csv` — one permutation per line, positions separated by `;`

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};

use super::PermutationSet;
use crate::error::{Error, Result};

/// A tier of the permutation lookup chain.
pub trait PermutationCache: Send + Sync {
    /// Returns the cached table for `length`, if this tier has one.
    fn lookup(&self, length: usize) -> Result<Option<Arc<PermutationSet>>>;

    /// Keeps `set` for fast future lookups. Tiers without fast storage ignore it.
    fn populate(&self, set: Arc<PermutationSet>) -> Result<()> {
        let _ = set;
        Ok(())
    }

    /// Writes `set` to backing storage. Tiers without backing storage ignore it.
    fn persist(&self, set: &PermutationSet) -> Result<()> {
        let _ = set;
        Ok(())
    }
}

/// In-memory tier keyed by permutation length.
#[derive(Debug, Default)]
pub struct MemoryCache {
    sets: RwLock<HashMap<usize, Arc<PermutationSet>>>,
}

static GLOBAL_MEMORY_CACHE: OnceLock<Arc<MemoryCache>> = OnceLock::new();

impl MemoryCache {
    /// Creates an empty private cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache, created on first use.
    pub fn global() -> Arc<MemoryCache> {
        GLOBAL_MEMORY_CACHE
            .get_or_init(|| Arc::new(MemoryCache::new()))
            .clone()
    }

    /// Returns `true` if a table for `length` is cached.
    pub fn contains(&self, length: usize) -> Result<bool> {
        let sets = self.sets.read().map_err(|_| Error::CachePoisoned)?;
        Ok(sets.contains_key(&length))
    }

    /// Drops every cached table.
    pub fn clear(&self) -> Result<()> {
        let mut sets = self.sets.write().map_err(|_| Error::CachePoisoned)?;
        sets.clear();
        Ok(())
    }
}

impl PermutationCache for MemoryCache {
    fn lookup(&self, length: usize) -> Result<Option<Arc<PermutationSet>>> {
        let sets = self.sets.read().map_err(|_| Error::CachePoisoned)?;
        Ok(sets.get(&length).cloned())
    }

    fn populate(&self, set: Arc<PermutationSet>) -> Result<()> {
        let mut sets = self.sets.write().map_err(|_| Error::CachePoisoned)?;
        sets.entry(set.length()).or_insert(set);
        Ok(())
    }
}

/// Directory tier holding `.perm` and `.csv` tables.
#[derive(Debug, Clone)]
pub struct DirectoryCache {
    dir: PathBuf,
}

impl DirectoryCache {
    /// Uses `dir` as the table directory. It is created on first persist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The table directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the binary table for `length`.
    pub fn perm_path(&self, length: usize) -> PathBuf {
        self.dir.join(format!("{length}.perm"))
    }

    /// Path of the CSV table for `length`.
    pub fn csv_path(&self, length: usize) -> PathBuf {
        self.dir.join(format!("{length}.csv"))
    }

    /// Writes `set` as a CSV table.
    pub fn write_csv(&self, set: &PermutationSet) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let mut out = String::with_capacity(set.len() * (set.length() * 2 + 1));
        for perm in set.iter() {
            let line: Vec<String> = perm.iter().map(u8::to_string).collect();
            out.push_str(&line.join(";"));
            out.push('\n');
        }
        let path = self.csv_path(set.length());
        fs::write(&path, out)?;
        Ok(path)
    }

    /// Files in the directory whose stem is `length`.
    fn candidates(&self, length: usize) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let stem = length.to_string();
        let mut found = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let stem_matches = path.file_stem().and_then(|s| s.to_str()) == Some(stem.as_str());
            if stem_matches && path.is_file() {
                found.push(path);
            }
        }
        found.sort();
        Ok(found)
    }
}

impl PermutationCache for DirectoryCache {
    fn lookup(&self, length: usize) -> Result<Option<Arc<PermutationSet>>> {
        let candidates = self.candidates(length)?;
        let by_ext = |ext: &str| {
            candidates
                .iter()
                .find(|p| extension_of(p).as_deref() == Some(ext))
        };

        let set = if let Some(path) = by_ext("perm") {
            decode_perm(path, length)?
        } else if let Some(path) = by_ext("csv") {
            decode_csv(path, length)?
        } else if let Some(path) = candidates.first() {
            return Err(Error::UnsupportedPermutationFile { path: path.clone() });
        } else {
            return Ok(None);
        };
        Ok(Some(Arc::new(set)))
    }

    fn persist(&self, set: &PermutationSet) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.perm_path(set.length()), set.as_bytes())?;
        log::debug!(
            "persisted {} permutations of length {} to {}",
            set.len(),
            set.length(),
            self.dir.display()
        );
        Ok(())
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

fn decode_perm(path: &Path, length: usize) -> Result<PermutationSet> {
    let bytes = fs::read(path)?;
    checked_set(path, length, bytes)
}

fn decode_csv(path: &Path, length: usize) -> Result<PermutationSet> {
    let text = fs::read_to_string(path)?;
    let mut bytes = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(';').collect();
        let line_no = i + 1;
        if fields.len() != length {
            let found = fields.len();
            let reason = format!("line {line_no} has {found} fields, expected {length}");
            return Err(Error::malformed(path, reason));
        }
        for field in fields {
            let Ok(v) = field.trim().parse::<u8>() else {
                let reason = format!("line {line_no}: invalid index {field:?}");
                return Err(Error::malformed(path, reason));
            };
            bytes.push(v);
        }
    }
    checked_set(path, length, bytes)
}

fn checked_set(path: &Path, length: usize, bytes: Vec<u8>) -> Result<PermutationSet> {
    PermutationSet::from_bytes(length, bytes).map_err(|e| {
        log::warn!("rejecting permutation file {}: {e}", path.display());
        Error::malformed(path, e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permutation::generate_permutations;

    #[test]
    fn test_memory_cache_roundtrip() {
        let cache = MemoryCache::new();
        assert!(cache.lookup(4).expect("lookup").is_none());
        cache
            .populate(Arc::new(generate_permutations(4)))
            .expect("populate");
        assert!(cache.contains(4).expect("contains"));
        assert_eq!(cache.lookup(4).expect("lookup").expect("hit").len(), 24);
        cache.clear().expect("clear");
        assert!(!cache.contains(4).expect("contains"));
    }

    #[test]
    fn test_memory_cache_reports_poisoned_lock() {
        let cache = Arc::new(MemoryCache::new());
        let poisoner = Arc::clone(&cache);
        let joined = std::thread::spawn(move || {
            let _guard = poisoner.sets.write().expect("lock");
            panic!("poison the cache lock");
        })
        .join();
        assert!(joined.is_err());
        assert!(matches!(cache.contains(4), Err(Error::CachePoisoned)));
        assert!(matches!(cache.lookup(4), Err(Error::CachePoisoned)));
        assert!(matches!(cache.clear(), Err(Error::CachePoisoned)));
    }

    #[test]
    fn test_memory_cache_keeps_first_entry() {
        let cache = MemoryCache::new();
        let first = Arc::new(generate_permutations(3));
        cache.populate(first.clone()).expect("populate");
        cache
            .populate(Arc::new(generate_permutations(3)))
            .expect("populate");
        let hit = cache.lookup(3).expect("lookup").expect("hit");
        assert!(Arc::ptr_eq(&hit, &first));
    }

    #[test]
    fn test_global_cache_is_shared() {
        assert!(Arc::ptr_eq(&MemoryCache::global(), &MemoryCache::global()));
    }

    #[test]
    fn test_directory_missing_dir_is_miss() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let cache = DirectoryCache::new(tmp.path().join("nope"));
        assert!(cache.lookup(6).expect("lookup").is_none());
    }

    #[test]
    fn test_directory_perm_roundtrip() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let cache = DirectoryCache::new(tmp.path());
        let set = generate_permutations(6);
        cache.persist(&set).expect("persist");
        assert_eq!(
            fs::metadata(cache.perm_path(6)).expect("written").len(),
            720 * 6
        );
        let loaded = cache.lookup(6).expect("lookup").expect("hit");
        assert_eq!(*loaded, set);
    }

    #[test]
    fn test_directory_csv_roundtrip() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let cache = DirectoryCache::new(tmp.path());
        let set = generate_permutations(3);
        let path = cache.write_csv(&set).expect("csv");
        let text = fs::read_to_string(path).expect("read");
        assert_eq!(text.lines().next(), Some("0;1;2"));
        let loaded = cache.lookup(3).expect("lookup").expect("hit");
        assert_eq!(*loaded, set);
    }

    #[test]
    fn test_directory_unknown_extension_is_fatal() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("7.bin"), [0u8; 7]).expect("write");
        let cache = DirectoryCache::new(tmp.path());
        let err = cache.lookup(7).unwrap_err();
        assert!(matches!(err, Error::UnsupportedPermutationFile { .. }));
    }

    #[test]
    fn test_directory_truncated_perm_is_malformed() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("6.perm"), [0u8, 1, 2, 3, 4, 5, 0]).expect("write");
        let cache = DirectoryCache::new(tmp.path());
        let err = cache.lookup(6).unwrap_err();
        assert!(matches!(err, Error::MalformedPermutationFile { .. }));
        assert!(err.to_string().contains("not a multiple"));
    }

    #[test]
    fn test_directory_bad_csv_is_malformed() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("2.csv"), "0;1\n1;x\n").expect("write");
        let cache = DirectoryCache::new(tmp.path());
        assert!(matches!(
            cache.lookup(2).unwrap_err(),
            Error::MalformedPermutationFile { .. }
        ));
    }

    #[test]
    fn test_directory_ignores_other_lengths() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let cache = DirectoryCache::new(tmp.path());
        cache.persist(&generate_permutations(3)).expect("persist");
        assert!(cache.lookup(4).expect("lookup").is_none());
    }
}
