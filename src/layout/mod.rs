//! The layout engine: paragraph splitting, segmentation, shaping,
//! line wrapping, alignment, and baseline placement (spec.md §4.4).
//!
//! Grounded in the teacher's `layout/engine.rs` paragraph-then-line
//! pipeline, generalized from its fixed LTR-only assumptions to the
//! bidi-aware segmentation this crate builds in [`crate::segment`].

mod align;
mod cancel;
mod types;
mod wrap;

pub use align::apply_alignment;
pub use cancel::{layout_text_with_context, CancellationFlag, CancellationToken};
pub use types::{Alignment, Layout, Line, LayoutOptions, WrapMode};
pub use wrap::wrap_paragraph;

use std::sync::Arc;

use crate::face::Face;
use crate::segment::Segmenter;
use crate::shaper::{shape, ShapedRun};

/// Lay out `text` against a single `face`, honoring `options`.
///
/// Text is split into paragraphs on `\n` (after normalizing `\r\n` and
/// lone `\r` to `\n`); each paragraph is segmented, shaped, wrapped,
/// and aligned independently, then stacked top-to-bottom with
/// baselines assigned across the whole result.
pub fn layout_text(text: &str, face: &Arc<dyn Face>, options: &LayoutOptions) -> Layout {
    if text.is_empty() {
        return Layout::empty();
    }
    let paragraphs = split_paragraphs(text);
    let mut lines = Vec::new();
    for paragraph in &paragraphs {
        lines.extend(layout_paragraph(paragraph, face, options));
    }
    layout_paragraphs(lines, face, options)
}

/// Normalize line endings and split on `\n`. A trailing newline yields
/// a trailing empty paragraph, matching how most text editors report
/// "one more empty line" after it.
fn split_paragraphs(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    normalized.split('\n').map(str::to_string).collect()
}

/// Segment, shape, and wrap one paragraph; returns lines with `width`
/// set but `y` left at zero — baseline placement happens once all
/// paragraphs are known, in [`layout_paragraphs`].
fn layout_paragraph(paragraph: &str, face: &Arc<dyn Face>, options: &LayoutOptions) -> Vec<Line> {
    if paragraph.is_empty() {
        let metrics = face.metrics();
        return vec![Line {
            runs: Vec::new(),
            glyphs: Vec::new(),
            width: 0.0,
            ascent: metrics.ascent,
            descent: metrics.descent,
            y: 0.0,
        }];
    }

    let segmenter = Segmenter::new(options.base_direction);
    let segments = segmenter.segment(paragraph);

    let runs: Vec<ShapedRun> = segments
        .iter()
        .map(|segment| {
            let glyphs = shape(&segment.text, Some(face.as_ref()), segment.script);
            // Rebase cluster offsets from segment-local to
            // paragraph-local so downstream wrap/hit-testing code can
            // index straight into `paragraph`.
            let glyphs = glyphs
                .into_iter()
                .map(|mut g| {
                    g.cluster += segment.start_byte;
                    g
                })
                .collect();
            ShapedRun::new(glyphs, face.clone(), segment.direction)
        })
        .collect();

    let effective_width = if options.max_width > 0.0 {
        options.max_width
    } else {
        f64::INFINITY
    };
    let mut lines = wrap_paragraph(paragraph, &runs, effective_width, options.wrap);

    // Per spec.md §4.4: `container_width = max_width` when positive,
    // else each line's own width — which makes unbounded alignment a
    // no-op (slack is always zero against a line's own width).
    for line in &mut lines {
        let container_width = if options.max_width > 0.0 { options.max_width } else { line.width };
        apply_alignment(line, container_width, options.align);
    }
    lines
}

/// Stack pre-wrapped, pre-aligned lines into a [`Layout`], assigning
/// baselines top to bottom: `line[0].y = line[0].ascent`, then each
/// subsequent baseline advances by the previous line's descent plus
/// `line_spacing * line_gap` plus the new line's ascent. `line_gap`
/// comes from `face` directly (every line in one `layout_text` call
/// shares it) rather than from each line's runs, which empty
/// paragraphs have none of.
fn layout_paragraphs(mut lines: Vec<Line>, face: &Arc<dyn Face>, options: &LayoutOptions) -> Layout {
    let line_spacing = if options.line_spacing > 0.0 { options.line_spacing } else { 1.0 };
    let line_gap = face.metrics().line_gap;

    let mut cursor_y = 0.0;
    let mut prev_descent = 0.0;
    for (i, line) in lines.iter_mut().enumerate() {
        if i > 0 {
            cursor_y += prev_descent + line_gap * line_spacing;
        }
        cursor_y += line.ascent;
        line.y = cursor_y;
        prev_descent = line.descent;
    }
    let height = if lines.is_empty() { 0.0 } else { cursor_y + prev_descent };
    let width = lines.iter().map(|l| l.width).fold(0.0, f64::max);

    Layout { lines, width, height }
}
