use std::sync::Arc;

use super::{empty_faces_error_if, Face, FaceMetrics, FontSource, Glyph};
use crate::direction::Direction;
use crate::error::FaceError;

/// An ordered fallback list of faces sharing one direction. Per-rune
/// lookup picks the first face reporting the glyph; `faces[0]` is the
/// primary face for anything direction/size/metrics agnostic.
pub struct MultiFace {
    faces: Vec<Arc<dyn Face>>,
}

impl MultiFace {
    pub fn new(faces: Vec<Arc<dyn Face>>) -> Result<Self, FaceError> {
        empty_faces_error_if(faces.is_empty())?;
        let direction = faces[0].direction();
        if faces.iter().any(|f| f.direction() != direction) {
            return Err(FaceError::MismatchedDirection);
        }
        Ok(Self { faces })
    }

    /// The face that would answer `has_glyph(c)` for this code point,
    /// falling back to `faces[0]` if none claim it.
    pub fn face_for_rune(&self, c: char) -> &Arc<dyn Face> {
        self.faces
            .iter()
            .find(|f| f.has_glyph(c))
            .unwrap_or(&self.faces[0])
    }
}

impl Face for MultiFace {
    fn metrics(&self) -> FaceMetrics {
        self.faces[0].metrics()
    }

    fn advance(&self, text: &str) -> f64 {
        text.chars()
            .map(|c| {
                let face = self.face_for_rune(c);
                face.advance(&c.to_string())
            })
            .sum()
    }

    fn has_glyph(&self, c: char) -> bool {
        self.faces.iter().any(|f| f.has_glyph(c))
    }

    fn glyphs(&self, text: &str) -> Vec<Glyph> {
        let mut out = Vec::with_capacity(text.len());
        for (cluster, c) in text.char_indices() {
            let face = self.face_for_rune(c);
            let mut buf = [0u8; 4];
            let sub = c.encode_utf8(&mut buf);
            if let Some(mut g) = face.glyphs(sub).into_iter().next() {
                // Rewrite the sub-face's local cluster (always 0, since
                // it only ever saw a single-char string) into this
                // composite text's byte frame.
                g.cluster = cluster;
                out.push(g);
            }
        }
        out
    }

    fn direction(&self) -> Direction {
        self.faces[0].direction()
    }

    fn source(&self) -> Option<Arc<dyn FontSource>> {
        None
    }

    fn size(&self) -> f64 {
        self.faces[0].size()
    }
}
