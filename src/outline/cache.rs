//! Sharded LRU cache of extracted glyph outlines.
//!
//! The teacher's own caches (`bidi/cache.rs`, `measurement/types/cache_impl.rs`)
//! are built on a `goldylox` multi-tier cache that doesn't exist as a
//! resolvable crate (see DESIGN.md); this keeps the teacher's hit/miss
//! atomic-counter texture (`BIDI_CACHE_HITS`/`BIDI_CACHE_MISSES` in
//! `bidi/cache.rs`) but backs storage with `lru` + `parking_lot::Mutex`
//! instead, sharded the way `measurement/monitor` shards its ring
//! buffers.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;

use crate::glyph::GlyphId;

use super::GlyphOutline;

const SHARD_COUNT: usize = 16;

/// Identifies one cached outline: a font, a glyph within it, and a
/// quantized size. Sizes are bucketed to quarter-pixel steps so
/// near-identical sizes produced by e.g. a scroll or zoom animation
/// share a cache slot instead of each minting a fresh entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutlineCacheKey {
    pub font_id: u64,
    pub gid: GlyphId,
    pub size_bucket: u32,
}

impl OutlineCacheKey {
    pub fn new(font_id: u64, gid: GlyphId, size_px: f64) -> Self {
        Self {
            font_id,
            gid,
            size_bucket: (size_px * 4.0).round().max(0.0) as u32,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GlyphCacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl GlyphCacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct Shard {
    lru: Mutex<LruCache<OutlineCacheKey, Arc<GlyphOutline>>>,
}

/// A 16-shard LRU cache of extracted glyph outlines. Sharding keeps
/// lock contention down when multiple runs are shaped concurrently.
pub struct GlyphCache {
    shards: Vec<Shard>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl GlyphCache {
    pub fn new(capacity_per_shard: usize) -> Self {
        let cap = NonZeroUsize::new(capacity_per_shard.max(1)).unwrap();
        let shards = (0..SHARD_COUNT)
            .map(|_| Shard {
                lru: Mutex::new(LruCache::new(cap)),
            })
            .collect();
        Self {
            shards,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn shard_for(&self, key: &OutlineCacheKey) -> &Shard {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        &self.shards[(hasher.finish() as usize) % SHARD_COUNT]
    }

    /// Return the cached outline for `(font_id, gid, size_px)`, or run
    /// `create` and cache its result. `create` returning `None` (an
    /// extraction failure) is not cached, so the next call retries it.
    pub fn get_or_create<F>(&self, font_id: u64, gid: GlyphId, size_px: f64, create: F) -> Option<Arc<GlyphOutline>>
    where
        F: FnOnce() -> Option<GlyphOutline>,
    {
        let key = OutlineCacheKey::new(font_id, gid, size_px);
        let shard = self.shard_for(&key);
        {
            let mut lru = shard.lru.lock();
            if let Some(cached) = lru.get(&key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(cached.clone());
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let outline = Arc::new(create()?);
        shard.lru.lock().put(key, outline.clone());
        Some(outline)
    }

    pub fn stats(&self) -> GlyphCacheStats {
        GlyphCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    pub fn clear(&self) {
        for shard in &self.shards {
            shard.lru.lock().clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_lookup_is_a_hit() {
        let cache = GlyphCache::new(8);
        let calls = std::sync::atomic::AtomicU64::new(0);
        let make = || {
            calls.fetch_add(1, Ordering::Relaxed);
            Some(GlyphOutline::default())
        };
        cache.get_or_create(1, 5, 16.0, make);
        cache.get_or_create(1, 5, 16.0, make);
        assert_eq!(calls.load(Ordering::Relaxed), 1);
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn distinct_keys_do_not_collide() {
        let cache = GlyphCache::new(8);
        cache.get_or_create(1, 5, 16.0, || Some(GlyphOutline::default()));
        cache.get_or_create(1, 6, 16.0, || Some(GlyphOutline::default()));
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn failed_extraction_is_not_cached() {
        let cache = GlyphCache::new(8);
        assert!(cache.get_or_create(1, 5, 16.0, || None).is_none());
        assert!(cache.get_or_create(1, 5, 16.0, || None).is_none());
        assert_eq!(cache.stats().hits, 0);
    }
}
