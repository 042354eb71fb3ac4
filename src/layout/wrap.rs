//! Greedy line wrapping — a simplified UAX #14 heuristic (spec.md
//! §4.4, §9: "tighter UAX #14 compliance is recommended but not
//! mandated").

use std::collections::HashSet;

use unicode_segmentation::UnicodeSegmentation;

use crate::shaper::ShapedRun;

use super::types::{Line, WrapMode};

/// One glyph flattened into paragraph-relative coordinates, annotated
/// with whether a line break may follow it.
struct FlatGlyph {
    run_idx: usize,
    glyph_idx: usize,
    left: f64,
    right: f64,
    breakable: bool,
}

/// Wrap a paragraph's already-shaped runs into lines no wider than
/// `max_width`, except where a single glyph is itself wider than
/// `max_width` (an unbreakable overflow).
pub fn wrap_paragraph(paragraph_text: &str, runs: &[ShapedRun], max_width: f64, wrap: WrapMode) -> Vec<Line> {
    let flat = flatten(paragraph_text, runs, wrap);
    if flat.is_empty() {
        return vec![empty_line_from_runs(runs)];
    }

    let mut lines = Vec::new();
    let mut line_start = 0usize;
    let mut last_break: Option<usize> = None;

    let mut i = 0usize;
    while i < flat.len() {
        let exceeds = flat[i].right > max_width;
        let has_content = i > line_start;

        if exceeds && has_content {
            let break_at = match last_break {
                Some(b) if b >= line_start => b + 1,
                _ => i,
            };
            lines.push(build_line(runs, &flat[line_start..break_at]));
            line_start = break_at;
            last_break = None;
            // Re-examine the same glyph against the new, empty line —
            // don't advance `i`.
            continue;
        }

        if flat[i].breakable {
            last_break = Some(i);
        }
        i += 1;
    }

    if line_start < flat.len() {
        lines.push(build_line(runs, &flat[line_start..]));
    }

    lines
}

fn flatten(paragraph_text: &str, runs: &[ShapedRun], wrap: WrapMode) -> Vec<FlatGlyph> {
    let boundaries = word_boundaries(paragraph_text);
    let mut flat = Vec::new();
    let mut run_offset = 0.0;
    for (run_idx, run) in runs.iter().enumerate() {
        for (glyph_idx, g) in run.glyphs.iter().enumerate() {
            let left = run_offset + g.x;
            let right = left + g.x_advance;
            let glyph_end = paragraph_text[g.cluster..]
                .chars()
                .next()
                .map(|c| g.cluster + c.len_utf8())
                .unwrap_or(g.cluster);
            let breakable = is_break_opportunity(&boundaries, glyph_end, wrap);
            flat.push(FlatGlyph {
                run_idx,
                glyph_idx,
                left,
                right,
                breakable,
            });
        }
        run_offset += run.advance;
    }
    flat
}

/// Byte offsets of every UAX #29 word-boundary start in `text`. Plain
/// whitespace and CJK ideographs each form their own single-character
/// "word" under UAX #29, so boundaries after them fall out of this for
/// free instead of needing a separate ideograph check.
fn word_boundaries(text: &str) -> HashSet<usize> {
    text.split_word_bound_indices().map(|(i, _)| i).collect()
}

fn is_break_opportunity(boundaries: &HashSet<usize>, glyph_end: usize, wrap: WrapMode) -> bool {
    match wrap {
        WrapMode::None => false,
        WrapMode::Anywhere | WrapMode::Char => true,
        WrapMode::Word | WrapMode::WordChar => boundaries.contains(&glyph_end),
    }
}

/// Build a [`Line`] from a contiguous slice of flattened glyphs,
/// rebuilding each contributing run with a fresh glyph subset shifted
/// so the first glyph of the line sits at X=0.
fn build_line(source_runs: &[ShapedRun], span: &[FlatGlyph]) -> Line {
    let line_start_x = span[0].left;

    let mut rebuilt_runs: Vec<ShapedRun> = Vec::new();
    let mut current_run_idx = usize::MAX;
    let mut current_glyphs = Vec::new();

    let mut flush = |run_idx: usize, glyphs: Vec<crate::glyph::ShapedGlyph>, rebuilt: &mut Vec<ShapedRun>| {
        if glyphs.is_empty() {
            return;
        }
        let src = &source_runs[run_idx];
        rebuilt.push(ShapedRun::new(glyphs, src.face.clone(), src.direction));
    };

    for fg in span {
        if fg.run_idx != current_run_idx {
            flush(current_run_idx, std::mem::take(&mut current_glyphs), &mut rebuilt_runs);
            current_run_idx = fg.run_idx;
        }
        let mut g = source_runs[fg.run_idx].glyphs[fg.glyph_idx];
        g.x -= line_start_x;
        current_glyphs.push(g);
    }
    flush(current_run_idx, current_glyphs, &mut rebuilt_runs);

    let glyphs: Vec<crate::glyph::ShapedGlyph> = rebuilt_runs.iter().flat_map(|r| r.glyphs.iter().copied()).collect();
    let width: f64 = rebuilt_runs.iter().map(|r| r.advance).sum();
    let ascent = rebuilt_runs.iter().map(|r| r.ascent).fold(0.0, f64::max);
    let descent = rebuilt_runs.iter().map(|r| r.descent).fold(0.0, f64::max);

    Line {
        runs: rebuilt_runs,
        glyphs,
        width,
        ascent,
        descent,
        y: 0.0,
    }
}

fn empty_line_from_runs(runs: &[ShapedRun]) -> Line {
    let (ascent, descent) = runs
        .first()
        .map(|r| (r.ascent, r.descent))
        .unwrap_or((0.0, 0.0));
    Line {
        runs: Vec::new(),
        glyphs: Vec::new(),
        width: 0.0,
        ascent,
        descent,
        y: 0.0,
    }
}
