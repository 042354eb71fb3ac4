//! MSDF atlas management (spec.md §4.7-§4.8): packing generated glyph
//! bitmaps into fixed-size textures and tracking which regions hold
//! which glyph, so a renderer can batch-draw from one texture binding.
//!
//! Grounded in the teacher's `gpu/text_atlas` module (`AtlasStats`
//! atomic-counter bookkeeping in `statistics.rs`, dirty/growth tracking
//! in `core.rs`/`memory_management.rs`), adapted from glyphon's
//! GPU-owned atlas to a plain CPU-side byte buffer since this crate
//! has no rendering backend of its own.

mod allocator;
mod msdf;
mod sharded;

pub use allocator::GridAllocator;
pub use msdf::{Msdf, MsdfGenerator};
pub use sharded::ConcurrentAtlasManager;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::error::{AtlasError, ConfigError};
use crate::glyph::GlyphId;
use crate::outline::GlyphOutline;

/// Validated configuration for a set of same-shaped atlas textures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasConfig {
    pub atlas_width: u32,
    pub atlas_height: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    /// Upper bound on how many atlas textures `AtlasManager` will
    /// create before `insert` starts failing with `AtlasFull`.
    pub max_atlases: usize,
}

impl AtlasConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(ConfigError::ConfigInvalid {
                field: "cell_width/cell_height",
                reason: "cell dimensions must be nonzero".into(),
            });
        }
        if self.atlas_width < self.cell_width || self.atlas_height < self.cell_height {
            return Err(ConfigError::ConfigInvalid {
                field: "atlas_width/atlas_height",
                reason: "atlas must be at least one cell in size".into(),
            });
        }
        if self.atlas_width % self.cell_width != 0 || self.atlas_height % self.cell_height != 0 {
            return Err(ConfigError::ConfigInvalid {
                field: "atlas_width/atlas_height",
                reason: "atlas dimensions must be a multiple of cell dimensions".into(),
            });
        }
        if self.max_atlases == 0 {
            return Err(ConfigError::ConfigInvalid {
                field: "max_atlases",
                reason: "must be nonzero".into(),
            });
        }
        Ok(())
    }

    pub fn cols(&self) -> u32 {
        self.atlas_width / self.cell_width
    }

    pub fn rows(&self) -> u32 {
        self.atlas_height / self.cell_height
    }

    pub fn cells_per_atlas(&self) -> u32 {
        self.cols() * self.rows()
    }
}

/// Identifies a cached atlas entry: a font, a glyph within it, and a
/// quantized size bucket (same quarter-pixel quantization as
/// [`crate::outline::OutlineCacheKey`], kept independent since the
/// atlas and the outline cache can be used without each other).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlyphKey {
    pub font_id: u64,
    pub gid: GlyphId,
    pub size_bucket: u32,
}

impl GlyphKey {
    pub fn new(font_id: u64, gid: GlyphId, size_px: f64) -> Self {
        Self {
            font_id,
            gid,
            size_bucket: (size_px * 4.0).round().max(0.0) as u32,
        }
    }
}

/// Where one glyph's bitmap lives: which atlas texture, and the pixel
/// rectangle within it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub atlas_index: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// Normalized `(u0, v0, u1, v1)` texture coordinates within an
    /// atlas of `atlas_width x atlas_height`.
    pub fn uv(&self, atlas_width: u32, atlas_height: u32) -> (f32, f32, f32, f32) {
        let u0 = self.x as f32 / atlas_width as f32;
        let v0 = self.y as f32 / atlas_height as f32;
        let u1 = (self.x + self.width) as f32 / atlas_width as f32;
        let v1 = (self.y + self.height) as f32 / atlas_height as f32;
        (u0, v0, u1, v1)
    }
}

struct Atlas {
    allocator: GridAllocator,
    regions: AHashMap<GlyphKey, Region>,
    pixels: Vec<u8>,
    dirty: bool,
}

impl Atlas {
    fn new(config: &AtlasConfig) -> Self {
        Self {
            allocator: GridAllocator::new(config.cols(), config.rows(), config.cell_width, config.cell_height),
            regions: AHashMap::new(),
            pixels: vec![0u8; config.atlas_width as usize * config.atlas_height as usize * 3],
            dirty: false,
        }
    }

    /// Nearest-neighbor resample `bitmap` from its own dimensions into
    /// the `cell_width x cell_height` cell at `(x, y)` (spec.md §4.7
    /// step 6), writing RGB bytes at the atlas's `atlas_width * 3` row
    /// stride.
    fn copy_msdf(&mut self, atlas_width: u32, x: u32, y: u32, cell_width: u32, cell_height: u32, bitmap: &Msdf) {
        for row in 0..cell_height {
            let src_row = if bitmap.height == 0 { 0 } else { row * bitmap.height / cell_height };
            for col in 0..cell_width {
                let src_col = if bitmap.width == 0 { 0 } else { col * bitmap.width / cell_width };
                let src_start = ((src_row * bitmap.width + src_col) * 3) as usize;
                let Some(src_px) = bitmap.pixels.get(src_start..src_start + 3) else {
                    continue;
                };
                let dst_start = (((y + row) * atlas_width + (x + col)) * 3) as usize;
                self.pixels[dst_start..dst_start + 3].copy_from_slice(src_px);
            }
        }
        self.dirty = true;
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AtlasManagerStats {
    pub hits: u64,
    pub misses: u64,
    pub atlases: usize,
    pub glyphs_resident: usize,
}

impl AtlasManagerStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Owns a growable set of same-shaped atlas textures, the
/// glyph-to-region mapping across all of them, and the generator used
/// to turn a missing glyph's outline into an MSDF tile on demand.
pub struct AtlasManager {
    config: AtlasConfig,
    generator: Arc<dyn MsdfGenerator>,
    atlases: RwLock<Vec<Atlas>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl AtlasManager {
    pub fn new(config: AtlasConfig, generator: Arc<dyn MsdfGenerator>) -> Result<Self, AtlasError> {
        config.validate()?;
        Ok(Self {
            config,
            generator,
            atlases: RwLock::new(vec![Atlas::new(&config)]),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// `key`'s region: a read-locked hit on a cache slot already
    /// holding it, or a write-locked miss that generates `outline`'s
    /// MSDF tile, packs it into an atlas, and caches the result
    /// (spec.md §4.7 `get`).
    pub fn get(&self, key: GlyphKey, outline: &GlyphOutline) -> Result<Region, AtlasError> {
        {
            let atlases = self.atlases.read();
            if let Some(region) = atlases.iter().find_map(|a| a.regions.get(&key).copied()) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(region);
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let mut atlases = self.atlases.write();
        Self::insert_locked(&mut atlases, &self.config, self.generator.as_ref(), key, outline)
    }

    /// Shared by [`get`](Self::get) and [`get_batch`](Self::get_batch):
    /// assumes the write lock is already held and `key` was not found
    /// on a first, read-locked pass.
    fn insert_locked(atlases: &mut Vec<Atlas>, config: &AtlasConfig, generator: &dyn MsdfGenerator, key: GlyphKey, outline: &GlyphOutline) -> Result<Region, AtlasError> {
        // Recheck: another writer may have inserted `key` between our
        // read-locked miss and acquiring the write lock.
        if let Some(region) = atlases.iter().find_map(|a| a.regions.get(&key).copied()) {
            return Ok(region);
        }

        let msdf = generator
            .generate(outline, config.cell_width, config.cell_height)
            .ok_or_else(|| AtlasError::GenerationError("generator returned no bitmap".into()))?;

        if let Some(index) = atlases.iter().position(|a| !a.allocator.is_full()) {
            return Self::allocate_into(&mut atlases[index], index, config, key, &msdf);
        }

        if atlases.len() >= config.max_atlases {
            return Err(AtlasError::AtlasFull { max_atlases: config.max_atlases });
        }
        let mut atlas = Atlas::new(config);
        let index = atlases.len();
        let region = Self::allocate_into(&mut atlas, index, config, key, &msdf)?;
        atlases.push(atlas);
        Ok(region)
    }

    fn allocate_into(atlas: &mut Atlas, index: usize, config: &AtlasConfig, key: GlyphKey, msdf: &Msdf) -> Result<Region, AtlasError> {
        let (x, y, w, h) = atlas.allocator.allocate().ok_or(AtlasError::AllocationFailed { atlas_index: index })?;
        atlas.copy_msdf(config.atlas_width, x, y, config.cell_width, config.cell_height, msdf);
        let region = Region {
            atlas_index: index,
            x,
            y,
            width: w,
            height: h,
        };
        atlas.regions.insert(key, region);
        Ok(region)
    }

    /// Look up each key in `keys`, generating an MSDF tile (from the
    /// matching entry in `outlines`) for any that are missing.
    /// `keys` and `outlines` must be the same length. Misses are
    /// coalesced under a single write lock rather than one lock
    /// acquisition per miss.
    pub fn get_batch(&self, keys: &[GlyphKey], outlines: &[GlyphOutline]) -> Result<Vec<Region>, AtlasError> {
        if keys.len() != outlines.len() {
            return Err(AtlasError::LengthMismatch {
                keys: keys.len(),
                outlines: outlines.len(),
            });
        }

        let mut results: Vec<Option<Region>> = {
            let atlases = self.atlases.read();
            keys.iter()
                .map(|key| {
                    let found = atlases.iter().find_map(|a| a.regions.get(key).copied());
                    if found.is_some() {
                        self.hits.fetch_add(1, Ordering::Relaxed);
                    } else {
                        self.misses.fetch_add(1, Ordering::Relaxed);
                    }
                    found
                })
                .collect()
        };

        if results.iter().all(Option::is_some) {
            return Ok(results.into_iter().map(|r| r.expect("checked above")).collect());
        }

        let mut atlases = self.atlases.write();
        for (i, key) in keys.iter().enumerate() {
            if results[i].is_some() {
                continue;
            }
            results[i] = Some(Self::insert_locked(&mut atlases, &self.config, self.generator.as_ref(), *key, &outlines[i])?);
        }
        Ok(results.into_iter().map(|r| r.expect("filled above")).collect())
    }

    /// Drop `key`'s region mapping. The backing cell is not reclaimed
    /// (the allocator has no free list) — the space comes back only
    /// when its atlas is cleared.
    pub fn remove(&self, key: GlyphKey) -> bool {
        let mut atlases = self.atlases.write();
        for atlas in atlases.iter_mut() {
            if atlas.regions.remove(&key).is_some() {
                atlas.dirty = true;
                return true;
            }
        }
        false
    }

    /// Reset to a single empty atlas, discarding every region and
    /// all pixel data.
    pub fn clear(&self) {
        let mut atlases = self.atlases.write();
        *atlases = vec![Atlas::new(&self.config)];
    }

    /// Drop any atlas (other than the first) holding no live glyphs,
    /// shrinking the atlas set. Returns how many were dropped.
    pub fn compact(&self) -> usize {
        let mut atlases = self.atlases.write();
        let before = atlases.len();
        let mut kept = Vec::with_capacity(before);
        for (i, atlas) in atlases.drain(..).enumerate() {
            if i == 0 || !atlas.regions.is_empty() {
                kept.push(atlas);
            }
        }
        let dropped = before - kept.len();
        *atlases = kept;
        dropped
    }

    pub fn dirty_atlases(&self) -> Vec<usize> {
        self.atlases.read().iter().enumerate().filter(|(_, a)| a.dirty).map(|(i, _)| i).collect()
    }

    pub fn mark_clean(&self, index: usize) {
        if let Some(atlas) = self.atlases.write().get_mut(index) {
            atlas.dirty = false;
        }
    }

    pub fn mark_all_clean(&self) {
        for atlas in self.atlases.write().iter_mut() {
            atlas.dirty = false;
        }
    }

    pub fn stats(&self) -> AtlasManagerStats {
        let atlases = self.atlases.read();
        AtlasManagerStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            atlases: atlases.len(),
            glyphs_resident: atlases.iter().map(|a| a.regions.len()).sum(),
        }
    }

    /// Copy of atlas `index`'s raw pixel buffer, for a renderer to
    /// upload to a texture.
    pub fn pixels(&self, index: usize) -> Option<Vec<u8>> {
        self.atlases.read().get(index).map(|a| a.pixels.clone())
    }

    pub fn config(&self) -> AtlasConfig {
        self.config
    }
}
