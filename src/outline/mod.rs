//! Glyph outline extraction and positioning (spec.md §4.5): turning a
//! shaped glyph into a cached vector outline composed with the affine
//! transform that places it on screen.
//!
//! Grounded in the teacher's `measurement/enhanced/glyph_extraction.rs`
//! and `measurement/glyph_processing.rs` (outline extraction as an
//! external collaborator behind a trait, consumed per-glyph while
//! walking shaped runs).

mod builder;
mod cache;

pub use builder::{with_glyph_run_builder, GlyphRunBuilder};
pub use cache::{GlyphCache, GlyphCacheStats, OutlineCacheKey};

use std::sync::Arc;

use crate::affine::{AffineTransform, Point};
use crate::face::Face;
use crate::glyph::GlyphId;
use crate::layout::Layout;
use crate::shaper::ShapedRun;

/// One drawing command in font-unit, Y-up space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { control: Point, to: Point },
    CubicTo { control1: Point, control2: Point, to: Point },
    Close,
}

/// A single closed (or open) path within a glyph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    pub segments: Vec<PathSegment>,
}

/// A glyph's full vector outline: zero or more contours.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphOutline {
    pub contours: Vec<Contour>,
}

impl GlyphOutline {
    pub fn is_empty(&self) -> bool {
        self.contours.iter().all(|c| c.segments.is_empty())
    }
}

/// External collaborator: something that can produce a glyph's vector
/// outline at a given size. Font parsing and hinting are out of scope
/// for this crate (spec.md §1, §6) — callers plug in a backend.
pub trait OutlineExtractor: Send + Sync {
    fn extract(&self, font_id: u64, gid: GlyphId, size_px: f64) -> Option<GlyphOutline>;
}

/// A glyph outline composed with the transform that places it at its
/// shaped position, Y-flipped into screen space.
pub struct PositionedOutline {
    pub outline: Arc<GlyphOutline>,
    pub transform: AffineTransform,
}

/// Caller-supplied parameters threaded through outline rendering
/// (spec.md §4.5 step 4): an optional transform left-multiplied onto
/// each glyph's own placement, so a caller can zoom/pan/rotate
/// rendered output without reaching into `PositionedOutline` after the
/// fact.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderParams {
    pub transform: Option<AffineTransform>,
}

impl RenderParams {
    pub const IDENTITY: RenderParams = RenderParams { transform: None };

    fn compose(&self, rhs: &AffineTransform) -> AffineTransform {
        match self.transform {
            Some(user) => user.compose(rhs),
            None => *rhs,
        }
    }
}

/// Stable per-font identifier derived via FNV-1a over the source's
/// name, full name, glyph count, and units-per-em, used to key the
/// outline cache across calls without the caller having to track font
/// handles itself. Collisions between distinct fonts sharing all four
/// are theoretically possible but practically negligible.
pub fn font_id(face: &dyn Face) -> u64 {
    let Some(source) = face.source() else {
        return 0;
    };
    let mut bytes = Vec::new();
    bytes.extend_from_slice(source.name().as_bytes());
    bytes.extend_from_slice(source.full_name().as_bytes());
    bytes.extend_from_slice(&source.num_glyphs().to_le_bytes());
    bytes.extend_from_slice(&source.units_per_em().to_le_bytes());
    fnv1a(&bytes)
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// Render one glyph: look it up (or extract and cache it), then
/// compose its placement transform with `params.transform` (when
/// present, left-multiplied: `final = user * glyph`, spec.md §4.5 step
/// 4). Returns `None` for a missing outline or a `.notdef` glyph with
/// no drawable contours.
pub fn render_glyph(
    extractor: &dyn OutlineExtractor,
    cache: &GlyphCache,
    font_id: u64,
    gid: GlyphId,
    size_px: f64,
    origin: Point,
    params: &RenderParams,
) -> Option<PositionedOutline> {
    let outline = cache.get_or_create(font_id, gid, size_px, || extractor.extract(font_id, gid, size_px))?;
    if outline.is_empty() {
        return None;
    }
    let glyph_transform = AffineTransform::translation(origin.x, origin.y).compose(&AffineTransform::y_flip());
    let transform = params.compose(&glyph_transform);
    Some(PositionedOutline { outline, transform })
}

/// Render every non-missing glyph of a shaped run, positioned
/// relative to `origin`, with `params` composed onto each glyph.
pub fn render_run(extractor: &dyn OutlineExtractor, cache: &GlyphCache, run: &ShapedRun, origin: Point, params: &RenderParams) -> Vec<PositionedOutline> {
    let fid = font_id(run.face.as_ref());
    run.glyphs
        .iter()
        .filter(|g| !g.is_missing())
        .filter_map(|g| render_glyph(extractor, cache, fid, g.gid, run.size, Point::new(origin.x + g.x, origin.y + g.y), params))
        .collect()
}

/// Render a full laid-out block of text: every line, every run,
/// positioned by the line's baseline `y`. Per line, `params.transform`
/// is left-multiplied with `translate(0, line.y)` (identity-skipped
/// when `params.transform` is absent) before rendering its runs.
pub fn render_layout(extractor: &dyn OutlineExtractor, cache: &GlyphCache, layout: &Layout, params: &RenderParams) -> Vec<PositionedOutline> {
    layout
        .lines
        .iter()
        .flat_map(|line| {
            let line_params = RenderParams {
                transform: Some(params.compose(&AffineTransform::translation(0.0, line.y))),
            };
            line.runs
                .iter()
                .flat_map(move |run| render_run(extractor, cache, run, Point::new(0.0, 0.0), &line_params))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use crate::face::{FaceMetrics, FontSource, SingleFace};
    use crate::glyph::ShapedGlyph;

    struct StubFont;
    impl FontSource for StubFont {
        fn name(&self) -> &str {
            "stub"
        }
        fn full_name(&self) -> &str {
            "Stub"
        }
        fn num_glyphs(&self) -> u16 {
            2
        }
        fn units_per_em(&self) -> u16 {
            1000
        }
        fn glyph_index(&self, c: char) -> u16 {
            c as u16
        }
        fn glyph_advance(&self, _gid: u16, size_px: f64) -> f64 {
            size_px * 0.5
        }
    }

    struct SquareExtractor;
    impl OutlineExtractor for SquareExtractor {
        fn extract(&self, _font_id: u64, gid: GlyphId, _size_px: f64) -> Option<GlyphOutline> {
            if gid == 0 {
                return Some(GlyphOutline::default());
            }
            Some(GlyphOutline {
                contours: vec![Contour {
                    segments: vec![
                        PathSegment::MoveTo(Point::new(0.0, 0.0)),
                        PathSegment::LineTo(Point::new(1.0, 0.0)),
                        PathSegment::LineTo(Point::new(1.0, 1.0)),
                        PathSegment::Close,
                    ],
                }],
            })
        }
    }

    fn face() -> Arc<dyn Face> {
        Arc::new(SingleFace::new(
            Arc::new(StubFont),
            16.0,
            Direction::Ltr,
            FaceMetrics {
                ascent: 14.0,
                descent: 4.0,
                line_gap: 2.0,
            },
        ))
    }

    #[test]
    fn font_id_is_stable_for_same_face_name() {
        assert_eq!(font_id(face().as_ref()), font_id(face().as_ref()));
    }

    #[test]
    fn missing_glyph_is_skipped_by_render_run() {
        let run = crate::shaper::ShapedRun::new(
            vec![ShapedGlyph {
                gid: 0,
                cluster: 0,
                x: 0.0,
                y: 0.0,
                x_advance: 8.0,
                y_advance: 0.0,
            }],
            face(),
            Direction::Ltr,
        );
        let cache = GlyphCache::new(8);
        let out = render_run(&SquareExtractor, &cache, &run, Point::new(0.0, 0.0), &RenderParams::IDENTITY);
        assert!(out.is_empty());
    }

    #[test]
    fn render_run_caches_repeated_glyphs() {
        let run = crate::shaper::ShapedRun::new(
            vec![
                ShapedGlyph {
                    gid: 1,
                    cluster: 0,
                    x: 0.0,
                    y: 0.0,
                    x_advance: 8.0,
                    y_advance: 0.0,
                },
                ShapedGlyph {
                    gid: 1,
                    cluster: 1,
                    x: 8.0,
                    y: 0.0,
                    x_advance: 8.0,
                    y_advance: 0.0,
                },
            ],
            face(),
            Direction::Ltr,
        );
        let cache = GlyphCache::new(8);
        let out = render_run(&SquareExtractor, &cache, &run, Point::new(0.0, 0.0), &RenderParams::IDENTITY);
        assert_eq!(out.len(), 2);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn render_glyph_left_multiplies_caller_transform_onto_placement() {
        let cache = GlyphCache::new(8);
        let params = RenderParams {
            transform: Some(AffineTransform::translation(100.0, 0.0)),
        };
        let positioned = render_glyph(&SquareExtractor, &cache, font_id(face().as_ref()), 1, 16.0, Point::new(5.0, 0.0), &params).unwrap();
        let p = positioned.transform.apply(Point::new(0.0, 0.0));
        assert_eq!(p.x, 105.0);
    }

    #[test]
    fn render_layout_composes_line_baseline_into_the_caller_transform() {
        let run = crate::shaper::ShapedRun::new(
            vec![ShapedGlyph {
                gid: 1,
                cluster: 0,
                x: 0.0,
                y: 0.0,
                x_advance: 8.0,
                y_advance: 0.0,
            }],
            face(),
            Direction::Ltr,
        );
        let layout = Layout {
            lines: vec![crate::layout::Line {
                runs: vec![run],
                glyphs: Vec::new(),
                width: 8.0,
                ascent: 14.0,
                descent: 4.0,
                y: 20.0,
            }],
            width: 8.0,
            height: 38.0,
        };
        let cache = GlyphCache::new(8);
        let out = render_layout(&SquareExtractor, &cache, &layout, &RenderParams::IDENTITY);
        assert_eq!(out.len(), 1);
        let p = out[0].transform.apply(Point::new(0.0, 0.0));
        assert_eq!(p.y, 20.0);
    }
}
