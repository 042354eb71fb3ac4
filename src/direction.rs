//! Text direction and writing-mode helpers.

/// Reading/writing direction of a segment, run, or line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    Ltr,
    Rtl,
    Ttb,
    Btt,
}

impl Direction {
    /// `Ltr`/`Rtl` lay glyphs along the X axis.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Ltr | Direction::Rtl)
    }

    /// `Ttb`/`Btt` lay glyphs along the Y axis.
    pub const fn is_vertical(self) -> bool {
        !self.is_horizontal()
    }

    /// `Rtl`/`Btt` read in the "reverse" sense for their axis.
    pub const fn is_reversed(self) -> bool {
        matches!(self, Direction::Rtl | Direction::Btt)
    }

    /// Direction implied by an odd/even UBA embedding level, for a
    /// horizontal base direction. Even levels are LTR, odd levels RTL.
    pub const fn from_bidi_level(level: u8) -> Direction {
        if level % 2 == 0 {
            Direction::Ltr
        } else {
            Direction::Rtl
        }
    }
}
