//! A sharded [`AtlasManager`] set, to spread lock contention across
//! independent atlas groups the way [`crate::outline::GlyphCache`]
//! shards its LRU storage.

use std::sync::Arc;

use super::{AtlasConfig, AtlasManager, AtlasManagerStats, GlyphKey, MsdfGenerator, Region};
use crate::error::AtlasError;
use crate::outline::GlyphOutline;

/// Routes glyphs to one of a power-of-two number of independent
/// [`AtlasManager`]s by font id, so concurrent shaping of different
/// fonts doesn't contend on one atlas set's lock.
pub struct ConcurrentAtlasManager {
    shards: Vec<AtlasManager>,
    mask: usize,
}

impl ConcurrentAtlasManager {
    pub fn new(config: AtlasConfig, generator: Arc<dyn MsdfGenerator>, shard_count: usize) -> Result<Self, AtlasError> {
        let shard_count = shard_count.max(1).next_power_of_two();
        let shards = (0..shard_count).map(|_| AtlasManager::new(config, generator.clone())).collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            shards,
            mask: shard_count - 1,
        })
    }

    fn shard_for(&self, key: &GlyphKey) -> &AtlasManager {
        &self.shards[shard_index(key.font_id, self.mask)]
    }

    pub fn get(&self, key: GlyphKey, outline: &GlyphOutline) -> Result<Region, AtlasError> {
        self.shard_for(&key).get(key, outline)
    }

    pub fn get_batch(&self, keys: &[GlyphKey], outlines: &[GlyphOutline]) -> Result<Vec<Region>, AtlasError> {
        if keys.len() != outlines.len() {
            return Err(AtlasError::LengthMismatch {
                keys: keys.len(),
                outlines: outlines.len(),
            });
        }
        keys.iter().zip(outlines.iter()).map(|(k, o)| self.get(*k, o)).collect()
    }

    pub fn remove(&self, key: GlyphKey) -> bool {
        self.shard_for(&key).remove(key)
    }

    pub fn clear(&self) {
        for shard in &self.shards {
            shard.clear();
        }
    }

    pub fn compact(&self) -> usize {
        self.shards.iter().map(|s| s.compact()).sum()
    }

    pub fn stats(&self) -> AtlasManagerStats {
        self.shards.iter().map(|s| s.stats()).fold(AtlasManagerStats::default(), |acc, s| AtlasManagerStats {
            hits: acc.hits + s.hits,
            misses: acc.misses + s.misses,
            atlases: acc.atlases + s.atlases,
            glyphs_resident: acc.glyphs_resident + s.glyphs_resident,
        })
    }
}

/// Power-of-two hash spread: xor-shift/multiply-xor-shift (Murmur3
/// finalizer-style) so font ids that differ only in low bits still
/// land on different shards.
fn shard_index(font_id: u64, mask: usize) -> usize {
    let mut h = font_id;
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^= h >> 33;
    (h as usize) & mask
}
