//! In-memory report cache and small file helpers.
//!
//! Reports are pure functions of their input rows, so entries are keyed on
//! the fixture id together with a fingerprint of every source row set. Any
//! edit to any source produces a different key.

use std::{
    collections::hash_map::DefaultHasher,
    fs,
    hash::{Hash, Hasher},
    io::{Read, Write},
    num::NonZeroUsize,
    path::Path,
    sync::{Arc, Mutex},
};

use lru::LruCache;

use super::row::Row;

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file, creating parent directories as needed
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Fingerprint of several row sets. Set boundaries are part of the hash, so
/// moving a row from one source to another changes the result.
pub fn source_hash(sources: &[&[Row]]) -> u64 {
    let mut hasher = DefaultHasher::new();
    sources.len().hash(&mut hasher);
    for rows in sources {
        rows.len().hash(&mut hasher);
        for row in rows.iter() {
            row.hash(&mut hasher);
        }
    }
    hasher.finish()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportCacheKey {
    pub fixture_id: String,
    pub source_hash: u64,
}

impl ReportCacheKey {
    pub fn new(fixture_id: impl Into<String>, sources: &[&[Row]]) -> Self {
        Self {
            fixture_id: fixture_id.into(),
            source_hash: source_hash(sources),
        }
    }
}

/// Thread-safe LRU cache shared by the batch workers.
pub struct ReportCache<V: Clone> {
    entries: Arc<Mutex<LruCache<ReportCacheKey, V>>>,
    capacity: usize,
}

impl<V: Clone> ReportCache<V> {
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Arc::new(Mutex::new(LruCache::new(cap))),
            capacity: cap.get(),
        }
    }

    pub fn get(&self, key: &ReportCacheKey) -> Option<V> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    pub fn put(&self, key: ReportCacheKey, value: V) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.put(key, value);
    }

    /// Return the cached value or compute, store and return it.
    pub fn get_or_insert_with<F>(&self, key: ReportCacheKey, compute: F) -> (V, bool)
    where
        F: FnOnce() -> V,
    {
        if let Some(v) = self.get(&key) {
            return (v, true);
        }
        let v = compute();
        self.put(key, v.clone());
        (v, false)
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// `(entries, capacity)`
    pub fn stats(&self) -> (usize, usize) {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        (entries.len(), self.capacity)
    }
}

impl<V: Clone> Clone for ReportCache<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            capacity: self.capacity,
        }
    }
}
