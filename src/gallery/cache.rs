use std::num::NonZeroUsize;

use lru::LruCache;
use serde::{Deserialize, Serialize};

/// Memory a gallery may spend on cached thumbnails (64 MiB).
pub const DEFAULT_MEMORY_BYTES: usize = 64 * 1024 * 1024;

/// Worst-case bytes per pixel of a cached item.
pub const MAX_PIXEL_BYTES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheBudget {
    pub memory_bytes: usize,
    pub max_pixel_bytes: usize,
}

impl Default for CacheBudget {
    fn default() -> Self {
        Self {
            memory_bytes: DEFAULT_MEMORY_BYTES,
            max_pixel_bytes: MAX_PIXEL_BYTES,
        }
    }
}

impl CacheBudget {
    /// Number of `width` x `height` items that fit the budget, at least one.
    pub fn capacity_for(&self, width: u32, height: u32) -> usize {
        let item_bytes = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(self.max_pixel_bytes)
            .max(1);
        (self.memory_bytes / item_bytes).max(1)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// Bounded key to item map. Least recently used entries leave first.
pub struct ItemCache<V> {
    entries: LruCache<String, V>,
    stats: CacheStats,
}

impl<V> ItemCache<V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LruCache::new(non_zero(capacity)),
            stats: CacheStats::default(),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    pub fn get(&mut self, key: &str) -> Option<&V> {
        self.get_mut(key).map(|value| &*value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let value = self.entries.get_mut(key);
        if value.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
        value
    }

    /// Access without touching recency or statistics.
    pub fn peek_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries.peek_mut(key)
    }

    pub fn put(&mut self, key: String, value: V) {
        if let Some((evicted, _)) = self.entries.push(key.clone(), value) {
            if evicted != key {
                self.stats.evictions += 1;
            }
        }
    }

    /// Changes the capacity; shrinking drops the least recently used items.
    pub fn resize(&mut self, capacity: usize) {
        let capacity = non_zero(capacity);
        let dropped = self.entries.len().saturating_sub(capacity.get());
        self.entries.resize(capacity);
        self.stats.evictions += dropped as u64;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

fn non_zero(capacity: usize) -> NonZeroUsize {
    NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)
}
