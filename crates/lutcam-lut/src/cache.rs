//! Explicit, caller-owned LUT cache.
//!
//! Loading a LUT is cheap next to transforming a frame, but a camera that
//! grades every capture with the same look can keep the cube around. The
//! engine never caches on its own; holding a [`LutCache`] is the opt-in.
//!
//! Entries are keyed by path and revalidated against the file's
//! modification time, so editing the LUT on the card takes effect on the
//! next lookup.
//!
//! # Example
//!
//! ```ignore
//! use lutcam_lut::LutCache;
//!
//! let cache = LutCache::new();
//! let lut = cache.get_or_load("/sdcard/luts/mono.cube")?;
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Instant, SystemTime};

use tracing::debug;

use crate::{cube, Lut3D, LutError, LutResult};

/// Cache hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served from memory.
    pub hits: u64,
    /// Lookups that (re)loaded the file.
    pub misses: u64,
}

struct CacheEntry {
    lut: Arc<Lut3D>,
    modified: Option<SystemTime>,
    loaded_at: Instant,
}

/// Thread-safe cache of loaded cubes.
#[derive(Default)]
pub struct LutCache {
    entries: RwLock<HashMap<PathBuf, CacheEntry>>,
    stats: RwLock<CacheStats>,
}

impl LutCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cube for `path`, loading it if absent or stale.
    ///
    /// A file that disappeared is evicted and reported as
    /// [`LutError::SourceUnavailable`].
    pub fn get_or_load<P: AsRef<Path>>(&self, path: P) -> LutResult<Arc<Lut3D>> {
        let path = path.as_ref();
        let modified = match std::fs::metadata(path) {
            Ok(meta) => meta.modified().ok(),
            Err(source) => {
                self.invalidate(path);
                return Err(LutError::SourceUnavailable {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = entries.get(path) {
                if entry.modified == modified {
                    self.bump(|s| s.hits += 1);
                    debug!(
                        path = %path.display(),
                        age_ms = entry.loaded_at.elapsed().as_millis(),
                        "LUT cache hit"
                    );
                    return Ok(Arc::clone(&entry.lut));
                }
            }
        }

        let lut = Arc::new(cube::load(path)?);
        self.bump(|s| s.misses += 1);

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            path.to_path_buf(),
            CacheEntry {
                lut: Arc::clone(&lut),
                modified,
                loaded_at: Instant::now(),
            },
        );
        Ok(lut)
    }

    /// Drops the entry for `path`, if any.
    pub fn invalidate<P: AsRef<Path>>(&self, path: P) -> bool {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path.as_ref())
            .is_some()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of cached cubes.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hit/miss counters since creation.
    pub fn stats(&self) -> CacheStats {
        *self.stats.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump(&self, f: impl FnOnce(&mut CacheStats)) {
        let mut stats = self.stats.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut *stats);
    }
}
