//! Time-bounded read-through cache
//!
//! Holds one loaded value for a revalidation window so repeated queries
//! within that window do not rescan the posts directory. Reads share a
//! read lock; when the entry is missing or stale a single caller reloads
//! while concurrent callers wait and then reuse its result. A load that
//! overlaps an `invalidate()` is handed to its caller but not kept.

use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

struct Entry<T> {
    value: Arc<T>,
    loaded_at: Instant,
}

/// A single memoized value with optional expiry
pub struct TimedCache<T> {
    /// `None` disables memoization entirely
    window: Option<Duration>,
    entry: RwLock<Option<Entry<T>>>,
    reload: Mutex<()>,
    /// Bumped by every `invalidate()`
    generation: AtomicU64,
}

impl<T> TimedCache<T> {
    /// Create a cache whose entries live for `window`
    pub fn new(window: Option<Duration>) -> Self {
        Self {
            window,
            entry: RwLock::new(None),
            reload: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// Return the cached value, or run `load` and cache its result.
    /// Errors are returned to the caller and never cached.
    pub fn get_or_try_load<E, F>(&self, load: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let Some(window) = self.window else {
            return load().map(Arc::new);
        };

        if let Some(value) = self.fresh(window) {
            return Ok(value);
        }

        let _reloading = self.reload.lock();
        // Another caller may have reloaded while we waited
        if let Some(value) = self.fresh(window) {
            return Ok(value);
        }

        let started = self.generation.load(Ordering::Acquire);
        let value = Arc::new(load()?);

        let mut entry = self.entry.write();
        if self.generation.load(Ordering::Acquire) == started {
            *entry = Some(Entry {
                value: Arc::clone(&value),
                loaded_at: Instant::now(),
            });
        } else {
            tracing::debug!("Cache invalidated during load; result not kept");
        }
        Ok(value)
    }

    /// Drop the cached value so the next read reloads
    pub fn invalidate(&self) {
        let mut entry = self.entry.write();
        self.generation.fetch_add(1, Ordering::AcqRel);
        *entry = None;
    }

    /// Whether a non-expired value is held
    pub fn is_fresh(&self) -> bool {
        self.window.is_some_and(|w| self.fresh(w).is_some())
    }

    fn fresh(&self, window: Duration) -> Option<Arc<T>> {
        let guard = self.entry.read();
        guard
            .as_ref()
            .filter(|e| e.loaded_at.elapsed() < window)
            .map(|e| Arc::clone(&e.value))
    }
}

impl<T> std::fmt::Debug for TimedCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedCache")
            .field("window", &self.window)
            .field("fresh", &self.is_fresh())
            .finish()
    }
}
