//! A reusable, single-threaded accumulator for [`PositionedOutline`]s
//! plus a thread-local pool of them (spec.md §5: "GlyphRunBuilder: not
//! safe for concurrent use. A pool (`sync.Pool`-equivalent) recycles
//! builders for high-throughput producers. Builders are cleared on
//! return to the pool.").
//!
//! Grounded in the teacher's `measurement/thread_local.rs`
//! (`MEASUREMENT_BUFFERS: RefCell<Vec<Buffer>>` +
//! `with_measurement_buffer`): a thread-local `Vec` of recycled buffers,
//! popped on acquire and pushed back (cleared) on release.

use std::cell::RefCell;

use super::{render_layout, render_run, GlyphCache, OutlineExtractor, PositionedOutline, RenderParams};
use crate::affine::Point;
use crate::layout::Layout;
use crate::shaper::ShapedRun;

/// Accumulates [`PositionedOutline`]s across one or more runs/layouts
/// into a single reused `Vec`, avoiding a fresh allocation per call for
/// high-throughput producers. Not `Send`/`Sync`: callers needing
/// concurrent production use one builder per thread, drawn from
/// [`with_glyph_run_builder`].
#[derive(Default)]
pub struct GlyphRunBuilder {
    commands: Vec<PositionedOutline>,
}

impl GlyphRunBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any accumulated commands, retaining the buffer's capacity.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Render one shaped run, appending its commands to this builder's
    /// buffer, then return the buffer's full contents so far.
    pub fn push_run(&mut self, extractor: &dyn OutlineExtractor, cache: &GlyphCache, run: &ShapedRun, origin: Point, params: &RenderParams) -> &[PositionedOutline] {
        self.commands.extend(render_run(extractor, cache, run, origin, params));
        &self.commands
    }

    /// Render a full laid-out block, appending its commands to this
    /// builder's buffer, then return the buffer's full contents so far.
    pub fn push_layout(&mut self, extractor: &dyn OutlineExtractor, cache: &GlyphCache, layout: &Layout, params: &RenderParams) -> &[PositionedOutline] {
        self.commands.extend(render_layout(extractor, cache, layout, params));
        &self.commands
    }

    pub fn commands(&self) -> &[PositionedOutline] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<PositionedOutline> {
        self.commands
    }
}

thread_local! {
    static GLYPH_RUN_BUILDERS: RefCell<Vec<GlyphRunBuilder>> = RefCell::new(Vec::with_capacity(4));
}

/// Borrow a pooled [`GlyphRunBuilder`] for the duration of `f`, cleared
/// before use, and return it to the thread-local pool on return —
/// mirrors the teacher's `with_measurement_buffer`. Reuses an existing
/// builder (and its `Vec` capacity) when the pool is non-empty,
/// otherwise allocates a fresh one.
pub fn with_glyph_run_builder<F, R>(f: F) -> R
where
    F: FnOnce(&mut GlyphRunBuilder) -> R,
{
    GLYPH_RUN_BUILDERS.with(|pool| {
        let mut builder = pool.borrow_mut().pop().unwrap_or_default();
        builder.clear();
        let result = f(&mut builder);
        pool.borrow_mut().push(builder);
        result
    })
}
