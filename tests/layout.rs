use std::sync::Arc;

use glyph_pipeline::{layout_text, Alignment, Direction, Face, FaceMetrics, FontSource, LayoutOptions, SingleFace, WrapMode};

struct FixedWidthFont;

impl FontSource for FixedWidthFont {
    fn name(&self) -> &str {
        "fixed-test"
    }
    fn full_name(&self) -> &str {
        "Fixed Test"
    }
    fn num_glyphs(&self) -> u16 {
        256
    }
    fn units_per_em(&self) -> u16 {
        1000
    }
    fn glyph_index(&self, c: char) -> u16 {
        if c == ' ' {
            0
        } else {
            c as u16
        }
    }
    fn glyph_advance(&self, gid: u16, _size_px: f64) -> f64 {
        if gid == 0 {
            5.0
        } else {
            10.0
        }
    }
}

fn face() -> Arc<dyn Face> {
    Arc::new(SingleFace::new(
        Arc::new(FixedWidthFont),
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
fn wrapped_lines_fit_inside_max_width() {
    let options = LayoutOptions {
        max_width: 45.0,
        wrap: WrapMode::Word,
        ..Default::default()
    };
    let layout = layout_text("the quick brown fox jumps", &face(), &options);
    assert!(layout.lines.len() > 1);
    for line in &layout.lines {
        assert!(line.width <= 45.0 + 1e-6 || line.glyphs.len() <= 1);
    }
}

#[test]
fn measuring_the_same_text_twice_gives_the_same_layout() {
    let options = LayoutOptions::default();
    let a = layout_text("consistent measurement", &face(), &options);
    let b = layout_text("consistent measurement", &face(), &options);
    assert_eq!(a.width, b.width);
    assert_eq!(a.height, b.height);
    assert_eq!(a.lines.len(), b.lines.len());
}

#[test]
fn right_alignment_never_pushes_a_line_past_the_container() {
    let options = LayoutOptions {
        max_width: 200.0,
        align: Alignment::Right,
        ..Default::default()
    };
    let layout = layout_text("short", &face(), &options);
    for line in &layout.lines {
        for glyph in &line.glyphs {
            assert!(glyph.x + glyph.x_advance <= 200.0 + 1e-6);
        }
    }
}

#[test]
fn paragraph_breaks_produce_strictly_increasing_baselines() {
    let layout = layout_text("first\nsecond\nthird", &face(), &LayoutOptions::default());
    assert_eq!(layout.lines.len(), 3);
    for pair in layout.lines.windows(2) {
        assert!(pair[1].y > pair[0].y);
    }
}

#[test]
fn widening_the_container_never_increases_line_count() {
    let narrow = LayoutOptions {
        max_width: 40.0,
        wrap: WrapMode::Word,
        ..Default::default()
    };
    let wide = LayoutOptions {
        max_width: 400.0,
        wrap: WrapMode::Word,
        ..Default::default()
    };
    let text = "a sentence that should wrap under a narrow container";
    let narrow_layout = layout_text(text, &face(), &narrow);
    let wide_layout = layout_text(text, &face(), &wide);
    assert!(wide_layout.lines.len() <= narrow_layout.lines.len());
}
