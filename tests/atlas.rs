use std::sync::Arc;

use glyph_pipeline::{AtlasConfig, AtlasError, AtlasManager, GlyphKey, GlyphOutline, Msdf, MsdfGenerator};

fn config() -> AtlasConfig {
    AtlasConfig {
        atlas_width: 32,
        atlas_height: 32,
        cell_width: 8,
        cell_height: 8,
        max_atlases: 4,
    }
}

struct SolidGenerator(u8);
impl MsdfGenerator for SolidGenerator {
    fn generate(&self, _outline: &GlyphOutline, width: u32, height: u32) -> Option<Msdf> {
        Some(Msdf {
            width,
            height,
            pixels: vec![self.0; width as usize * height as usize * 3],
        })
    }
}

fn manager() -> AtlasManager {
    AtlasManager::new(config(), Arc::new(SolidGenerator(1))).unwrap()
}

#[test]
fn uv_rectangle_matches_the_allocated_region() {
    let manager = manager();
    let region = manager.get(GlyphKey::new(1, 1, 16.0), &GlyphOutline::default()).unwrap();
    let (u0, v0, u1, v1) = region.uv(32, 32);
    assert!((u1 - u0 - (region.width as f32 / 32.0)).abs() < 1e-6);
    assert!((v1 - v0 - (region.height as f32 / 32.0)).abs() < 1e-6);
    assert!(u0 >= 0.0 && u1 <= 1.0);
    assert!(v0 >= 0.0 && v1 <= 1.0);
}

#[test]
fn hit_and_miss_counts_are_tracked() {
    let manager = manager();
    let key = GlyphKey::new(7, 3, 16.0);
    manager.get(key, &GlyphOutline::default()).unwrap();
    manager.get(key, &GlyphOutline::default()).unwrap();
    let stats = manager.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
}

#[test]
fn same_font_glyph_size_produces_equal_keys() {
    let a = GlyphKey::new(42, 9, 16.0);
    let b = GlyphKey::new(42, 9, 16.0);
    assert_eq!(a, b);
    let c = GlyphKey::new(42, 9, 17.0);
    assert_ne!(a, c);
}

#[test]
fn batch_and_individual_insertion_produce_equal_regions() {
    let individually = manager();
    let in_batch = manager();

    let keys: Vec<GlyphKey> = (0..6u16).map(|i| GlyphKey::new(1, i, 16.0)).collect();
    let outlines: Vec<GlyphOutline> = (0..6).map(|_| GlyphOutline::default()).collect();

    let individual_regions: Vec<_> = keys.iter().zip(outlines.iter()).map(|(k, o)| individually.get(*k, o).unwrap()).collect();
    let batch_regions = in_batch.get_batch(&keys, &outlines).unwrap();

    assert_eq!(individual_regions, batch_regions);
}

#[test]
fn mismatched_batch_lengths_are_rejected() {
    let manager = manager();
    let keys = vec![GlyphKey::new(1, 1, 16.0), GlyphKey::new(1, 2, 16.0)];
    let outlines = vec![GlyphOutline::default()];
    assert!(matches!(manager.get_batch(&keys, &outlines), Err(AtlasError::LengthMismatch { keys: 2, outlines: 1 })));
}

#[test]
fn generator_failure_surfaces_as_generation_error() {
    struct FailingGenerator;
    impl MsdfGenerator for FailingGenerator {
        fn generate(&self, _outline: &GlyphOutline, _width: u32, _height: u32) -> Option<Msdf> {
            None
        }
    }
    let manager = AtlasManager::new(config(), Arc::new(FailingGenerator)).unwrap();
    assert!(matches!(
        manager.get(GlyphKey::new(1, 1, 16.0), &GlyphOutline::default()),
        Err(AtlasError::GenerationError(_))
    ));
}

#[test]
fn removing_a_glyph_drops_it_from_future_lookups() {
    let manager = manager();
    let key = GlyphKey::new(1, 1, 16.0);
    manager.get(key, &GlyphOutline::default()).unwrap();
    assert!(manager.remove(key));
    manager.get(key, &GlyphOutline::default()).unwrap();
    assert_eq!(manager.stats().misses, 2);
}

#[test]
fn clear_drops_all_atlases_back_to_one_empty_atlas() {
    let manager = manager();
    for i in 0..20u16 {
        manager.get(GlyphKey::new(1, i, 16.0), &GlyphOutline::default()).unwrap();
    }
    assert!(manager.stats().atlases > 1);
    manager.clear();
    let stats = manager.stats();
    assert_eq!(stats.atlases, 1);
    assert_eq!(stats.glyphs_resident, 0);
}
