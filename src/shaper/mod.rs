//! Shaping: turning a script-uniform segment into positioned glyphs.
//!
//! Grounded in the teacher's `shaper/core.rs` fast/complex split (an
//! ASCII/simple path plus a pluggable backend for everything else) and
//! its `ArcSwap`-guarded font system handle — here the thing guarded
//! is the pluggable complex-shaping backend itself, per spec.md §4.2
//! and §5 ("a process-wide slot with atomic read/write").

mod builtin;

pub use builtin::BuiltinShaper;

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use once_cell::sync::Lazy;

use crate::direction::Direction;
use crate::face::Face;
use crate::glyph::ShapedGlyph;
use crate::script::Script;

/// A pluggable shaping backend. Implementations must be safe for
/// concurrent calls — multiple `shape` calls can run while a writer
/// swaps the global slot.
pub trait Shaper: Send + Sync {
    fn shape(&self, text: &str, face: &dyn Face) -> Vec<ShapedGlyph>;
}

static GLOBAL_SHAPER: Lazy<ArcSwapOption<dyn Shaper>> = Lazy::new(|| ArcSwapOption::from(None));

/// Install a complex-shaping backend, or pass `None` to restore the
/// builtin shaper. Safe to call while other threads are mid-[`shape`];
/// readers see either the old or the new backend, never a torn value.
pub fn set_shaper(shaper: Option<Arc<dyn Shaper>>) {
    GLOBAL_SHAPER.store(shaper);
}

fn current_shaper() -> Option<Arc<dyn Shaper>> {
    GLOBAL_SHAPER.load_full()
}

/// Shape `text` against `face`, routing to the installed complex
/// shaper when `script` demands it and one is installed, otherwise to
/// the builtin one-glyph-per-codepoint shaper. Never errors: empty
/// input or a missing face both yield an empty result.
pub fn shape(text: &str, face: Option<&dyn Face>, script: Script) -> Vec<ShapedGlyph> {
    let Some(face) = face else {
        return Vec::new();
    };
    if text.is_empty() {
        return Vec::new();
    }
    if script.requires_complex_shaping() {
        if let Some(shaper) = current_shaper() {
            return shaper.shape(text, face);
        }
    }
    BuiltinShaper.shape(text, face)
}

/// A shaped segment: glyphs plus the run-level metrics the layout
/// engine composes into lines.
#[derive(Clone)]
pub struct ShapedRun {
    pub glyphs: Vec<ShapedGlyph>,
    pub advance: f64,
    pub ascent: f64,
    pub descent: f64,
    pub direction: Direction,
    pub face: Arc<dyn Face>,
    pub size: f64,
}

impl ShapedRun {
    pub fn new(glyphs: Vec<ShapedGlyph>, face: Arc<dyn Face>, direction: Direction) -> Self {
        let metrics = face.metrics();
        let size = face.size();
        let advance = run_advance(&glyphs, direction);
        Self {
            glyphs,
            advance,
            ascent: metrics.ascent,
            descent: metrics.descent,
            direction,
            face,
            size,
        }
    }

    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// `advance = last.x - first.x + last.x_advance` for horizontal runs;
/// the Y-axis equivalent for vertical runs. Empty runs advance zero.
fn run_advance(glyphs: &[ShapedGlyph], direction: Direction) -> f64 {
    let (Some(first), Some(last)) = (glyphs.first(), glyphs.last()) else {
        return 0.0;
    };
    if direction.is_horizontal() {
        last.x - first.x + last.x_advance
    } else {
        last.y - first.y + last.y_advance
    }
}
