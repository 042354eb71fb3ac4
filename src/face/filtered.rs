use std::ops::RangeInclusive;
use std::sync::Arc;

use super::{Face, FaceMetrics, FontSource, Glyph};
use crate::direction::Direction;

/// A face that reports no glyphs outside a Unicode code-point range.
/// Transparent to every other [`Face`] method — used to carve a font
/// into a "only serve this block" fallback slot.
pub struct FilteredFace {
    inner: Arc<dyn Face>,
    range: RangeInclusive<u32>,
}

impl FilteredFace {
    pub fn new(inner: Arc<dyn Face>, range: RangeInclusive<char>) -> Self {
        Self {
            inner,
            range: (*range.start() as u32)..=(*range.end() as u32),
        }
    }

    fn in_range(&self, c: char) -> bool {
        self.range.contains(&(c as u32))
    }
}

impl Face for FilteredFace {
    fn metrics(&self) -> FaceMetrics {
        self.inner.metrics()
    }

    fn advance(&self, text: &str) -> f64 {
        self.inner.advance(text)
    }

    fn has_glyph(&self, c: char) -> bool {
        self.in_range(c) && self.inner.has_glyph(c)
    }

    fn glyphs(&self, text: &str) -> Vec<Glyph> {
        self.inner.glyphs(text)
    }

    fn direction(&self) -> Direction {
        self.inner.direction()
    }

    fn source(&self) -> Option<Arc<dyn FontSource>> {
        self.inner.source()
    }

    fn size(&self) -> f64 {
        self.inner.size()
    }
}
