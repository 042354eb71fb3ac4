//! Bidi-aware text segmentation, shaping, layout, and MSDF glyph atlas
//! management for GPU-rendered text.
//!
//! This crate provides:
//! - Unicode Bidirectional Algorithm + script-run segmentation
//! - A pluggable shaping backend with a one-glyph-per-codepoint default
//! - Greedy line wrapping, alignment, and baseline placement
//! - Affine transforms for positioning rendered glyphs
//! - Cached glyph outline extraction and MSDF atlas packing
//!
//! Font file parsing, hinting, and GPU upload are out of scope —
//! callers plug those in via the [`face::FontSource`],
//! [`outline::OutlineExtractor`], and [`atlas::MsdfGenerator`] traits.

pub mod affine;
pub mod atlas;
pub mod direction;
pub mod error;
pub mod face;
pub mod glyph;
pub mod layout;
pub mod outline;
pub mod script;
pub mod segment;
pub mod shaper;

pub use affine::{AffineTransform, Point};
pub use atlas::{AtlasConfig, AtlasManager, AtlasManagerStats, ConcurrentAtlasManager, GlyphKey, Msdf, MsdfGenerator, Region};
pub use direction::Direction;
pub use error::{AtlasError, ConfigError, FaceError};
pub use face::{Face, FaceMetrics, FilteredFace, FontSource, MultiFace, SingleFace};
pub use glyph::{GlyphId, ShapedGlyph};
pub use layout::{
    layout_text, layout_text_with_context, Alignment, CancellationFlag, CancellationToken, Layout, LayoutOptions, Line, WrapMode,
};
pub use outline::{
    font_id, render_glyph, render_layout, render_run, with_glyph_run_builder, Contour, GlyphCache, GlyphCacheStats, GlyphOutline, GlyphRunBuilder, OutlineCacheKey, OutlineExtractor, PathSegment,
    PositionedOutline, RenderParams,
};
pub use script::{detect_script, Script};
pub use segment::{Segment, Segmenter};
pub use shaper::{set_shaper, shape, BuiltinShaper, Shaper, ShapedRun};
