//! Bounded LRU memo of enumerated paths, keyed by raw input text.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use tracing::trace;

use crate::paths::SuggestionPath;

/// Shared, immutable path list as stored in the cache.
pub type CachedPaths = Arc<[SuggestionPath]>;

/// Thread-safe LRU cache of unfiltered suggestion paths.
///
/// Every read, promotion, insertion and eviction happens under one lock.
/// Values are reference-counted so callers filter them after the lock is
/// released.
pub struct PathCache {
    inner: Mutex<LruCache<String, CachedPaths>>,
}

impl PathCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    // Every operation leaves the map consistent, so a panic elsewhere while
    // the lock was held does not invalidate it.
    fn lock(&self) -> MutexGuard<'_, LruCache<String, CachedPaths>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch the paths for `text`, marking it most recently used.
    pub fn get(&self, text: &str) -> Option<CachedPaths> {
        self.lock().get(text).cloned()
    }

    /// Presence check that leaves recency untouched.
    pub fn contains(&self, text: &str) -> bool {
        self.lock().contains(text)
    }

    /// Store the paths for `text`, evicting the least recently used entry
    /// when full.
    pub fn insert(&self, text: &str, paths: CachedPaths) {
        if let Some((evicted, _)) = self.lock().push(text.to_string(), paths) {
            if evicted != text {
                trace!(evicted = %evicted, "path cache eviction");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}
