//! MSDF generation as an external interface (spec.md §6): this crate
//! composes multi-channel signed-distance-field bitmaps into atlases
//! but does not generate them — a real MSDF generator is heavy (it
//! needs the glyph outline's curve geometry and a font's hinting
//! instructions) and out of scope here, same as font parsing.

use crate::outline::GlyphOutline;

/// A generated multi-channel signed-distance-field bitmap: `width *
/// height` RGB pixels, 3 bytes each.
#[derive(Debug, Clone)]
pub struct Msdf {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Msdf {
    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

/// External collaborator: turns a glyph outline into an [`Msdf`]
/// bitmap sized to fit an atlas cell.
pub trait MsdfGenerator: Send + Sync {
    fn generate(&self, outline: &GlyphOutline, width: u32, height: u32) -> Option<Msdf>;
}
