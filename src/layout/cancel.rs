//! Cooperative cancellation for long layout runs — an ambient-stack
//! addition with no teacher counterpart (blitz-text never lays out
//! enough text at once to need it); modeled on the same atomic-flag
//! shape the teacher uses for its cache hit/miss counters
//! (`measurement/monitor/*`), just read instead of incremented.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::face::Face;

use super::types::{Layout, LayoutOptions};
use super::{layout_paragraph, layout_paragraphs, split_paragraphs};

/// Checked between paragraphs only, not between lines or glyphs —
/// cancelling mid-paragraph would leave wrapping half-applied.
pub trait CancellationToken: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

/// A [`CancellationToken`] backed by a shared flag, settable from
/// another thread.
#[derive(Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl CancellationToken for CancellationFlag {
    fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Like [`super::layout_text`], but returns `None` if `token` reports
/// cancellation before all paragraphs have been processed.
pub fn layout_text_with_context(
    text: &str,
    face: &Arc<dyn Face>,
    options: &LayoutOptions,
    token: &dyn CancellationToken,
) -> Option<Layout> {
    if text.is_empty() {
        return Some(Layout::empty());
    }
    let paragraphs = split_paragraphs(text);
    let mut lines = Vec::new();
    for paragraph in &paragraphs {
        if token.is_cancelled() {
            log::debug!("layout cancelled after {} lines", lines.len());
            return None;
        }
        lines.extend(layout_paragraph(paragraph, face, options));
    }
    Some(layout_paragraphs(lines, face, options))
}
