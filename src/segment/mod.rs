//! Bidi/script segmentation: partitioning a string into directionally
//! and script-uniform runs.
//!
//! Grounded in the teacher's `bidi/processing/core.rs` (drive
//! `unicode_bidi::BidiInfo` off a caller-supplied base direction) and
//! `analysis/script_detection.rs` (run-length-encode a per-char
//! property into contiguous runs).

mod resolve;

use unicode_bidi::{BidiInfo, Level};

use crate::direction::Direction;
use crate::script::{detect_script, Script};

pub use resolve::resolve_scripts;

/// A maximal run of text with uniform bidi level and resolved script,
/// in reading (logical) order.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub start_byte: usize,
    pub end_byte: usize,
    pub direction: Direction,
    pub script: Script,
    pub bidi_level: u8,
}

/// Splits text into [`Segment`]s using the Unicode Bidirectional
/// Algorithm plus script-inheritance resolution.
pub struct Segmenter {
    base_direction: Direction,
}

impl Segmenter {
    pub fn new(base_direction: Direction) -> Self {
        Self { base_direction }
    }

    /// Partition `text` into segments covering it exactly, once, in
    /// reading order. See spec.md §3 and §4.1 for the invariants this
    /// must hold.
    pub fn segment(&self, text: &str) -> Vec<Segment> {
        if text.is_empty() {
            return Vec::new();
        }

        let base_level = if self.base_direction == Direction::Rtl {
            Level::rtl()
        } else {
            Level::ltr()
        };
        let bidi_info = BidiInfo::new(text, Some(base_level));

        let chars: Vec<(usize, char)> = text.char_indices().collect();
        log::trace!(
            "segmenting {} runes, base_direction={:?}",
            chars.len(),
            self.base_direction
        );

        let raw_scripts: Vec<Script> = chars.iter().map(|(_, c)| detect_script(*c)).collect();
        let resolved_scripts = resolve_scripts(&raw_scripts);
        let levels: Vec<u8> = chars
            .iter()
            .map(|(byte, _)| bidi_info.levels[*byte].number())
            .collect();

        let mut segments = Vec::new();
        let mut run_start_idx = 0usize;
        for i in 1..chars.len() {
            if levels[i] != levels[run_start_idx] || resolved_scripts[i] != resolved_scripts[run_start_idx] {
                segments.push(build_segment(text, &chars, run_start_idx, i, levels[run_start_idx], resolved_scripts[run_start_idx]));
                run_start_idx = i;
            }
        }
        segments.push(build_segment(
            text,
            &chars,
            run_start_idx,
            chars.len(),
            levels[run_start_idx],
            resolved_scripts[run_start_idx],
        ));

        segments
    }
}

fn build_segment(
    text: &str,
    chars: &[(usize, char)],
    start_idx: usize,
    end_idx: usize,
    level: u8,
    script: Script,
) -> Segment {
    let start_byte = chars[start_idx].0;
    let end_byte = if end_idx < chars.len() {
        chars[end_idx].0
    } else {
        text.len()
    };
    Segment {
        text: text[start_byte..end_byte].to_string(),
        start_byte,
        end_byte,
        direction: Direction::from_bidi_level(level),
        script,
        bidi_level: level,
    }
}
