use std::sync::Arc;

use super::{Face, FaceMetrics, FontSource, Glyph};
use crate::direction::Direction;

/// One font at one size — the leaf [`Face`] implementation.
pub struct SingleFace {
    source: Arc<dyn FontSource>,
    size: f64,
    direction: Direction,
    metrics: FaceMetrics,
}

impl SingleFace {
    /// `size` is in pixels (ppem). `ascent`/`descent`/`line_gap` are
    /// expected to already be scaled to `size` by the caller — this
    /// crate does not parse `units_per_em` itself.
    pub fn new(source: Arc<dyn FontSource>, size: f64, direction: Direction, metrics: FaceMetrics) -> Self {
        Self {
            source,
            size,
            direction,
            metrics,
        }
    }
}

impl Face for SingleFace {
    fn metrics(&self) -> FaceMetrics {
        self.metrics
    }

    fn advance(&self, text: &str) -> f64 {
        text.chars()
            .map(|c| {
                let gid = self.source.glyph_index(c);
                self.source.glyph_advance(gid, self.size)
            })
            .sum()
    }

    fn has_glyph(&self, c: char) -> bool {
        self.source.glyph_index(c) != 0
    }

    fn glyphs(&self, text: &str) -> Vec<Glyph> {
        text.char_indices()
            .map(|(cluster, c)| {
                let gid = self.source.glyph_index(c);
                let advance = self.source.glyph_advance(gid, self.size);
                Glyph {
                    gid,
                    cluster,
                    advance,
                }
            })
            .collect()
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn source(&self) -> Option<Arc<dyn FontSource>> {
        Some(self.source.clone())
    }

    fn size(&self) -> f64 {
        self.size
    }
}
