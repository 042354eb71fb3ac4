use super::Shaper;
use crate::face::Face;
use crate::glyph::ShapedGlyph;

/// The default shaper: one glyph per code point, advances taken
/// directly from the face, no kerning/ligatures/reordering. Installed
/// whenever no complex-shaping backend is plugged in, or the segment's
/// script doesn't need one.
pub struct BuiltinShaper;

impl Shaper for BuiltinShaper {
    fn shape(&self, text: &str, face: &dyn Face) -> Vec<ShapedGlyph> {
        let mut running_x = 0.0;
        face.glyphs(text)
            .into_iter()
            .map(|g| {
                let shaped = ShapedGlyph {
                    gid: g.gid,
                    cluster: g.cluster,
                    x: running_x,
                    y: 0.0,
                    x_advance: g.advance,
                    y_advance: 0.0,
                };
                running_x += g.advance;
                shaped
            })
            .collect()
    }
}
