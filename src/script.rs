//! Script classification.
//!
//! `Script` is a closed enum rather than a pass-through of
//! `unicode_script::Script` (which has dozens of variants we will never
//! special-case). `detect_script` still does its real work as a table
//! lookup — it delegates to `unicode_script`'s per-codepoint Script
//! property table and then folds the result down to our closed set,
//! the same "wrap the crate's answer in our own enum" move the teacher
//! uses for `SerializableScript` in `bidi/types.rs`.

use unicode_script::Script as UScript;

/// Closed set of scripts this pipeline reasons about directly.
///
/// Anything not in this list (Deseret, Ogham, Runic, ...) folds to
/// [`Script::Unknown`]; supplementary-plane code points whose Unicode
/// Script property is `Common` (most emoji) also fold to `Unknown` —
/// spec behavior, not strict UAX #24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Script {
    Common,
    Inherited,
    Latin,
    Cyrillic,
    Greek,
    Arabic,
    Hebrew,
    Han,
    Hiragana,
    Katakana,
    Hangul,
    Devanagari,
    Thai,
    Bengali,
    Gurmukhi,
    Gujarati,
    Oriya,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Sinhala,
    Lao,
    Tibetan,
    Myanmar,
    Georgian,
    Armenian,
    Ethiopic,
    Khmer,
    Unknown,
}

impl Script {
    /// Scripts whose native reading direction is right-to-left.
    pub const fn is_rtl(self) -> bool {
        matches!(self, Script::Arabic | Script::Hebrew)
    }

    /// Scripts that need a complex shaping backend (reordering,
    /// reshaping, conjunct formation) rather than the builtin
    /// one-glyph-per-codepoint shaper.
    pub const fn requires_complex_shaping(self) -> bool {
        matches!(
            self,
            Script::Arabic
                | Script::Hebrew
                | Script::Devanagari
                | Script::Bengali
                | Script::Gurmukhi
                | Script::Gujarati
                | Script::Oriya
                | Script::Tamil
                | Script::Telugu
                | Script::Kannada
                | Script::Malayalam
                | Script::Sinhala
                | Script::Thai
                | Script::Lao
                | Script::Tibetan
                | Script::Myanmar
                | Script::Khmer
        )
    }

    /// `true` for [`Script::Common`] and [`Script::Inherited`] — the
    /// two "no opinion" scripts that [`crate::segment`]'s resolution
    /// pass replaces with a concrete neighbor.
    pub const fn is_context_dependent(self) -> bool {
        matches!(self, Script::Common | Script::Inherited)
    }
}

impl From<UScript> for Script {
    fn from(script: UScript) -> Self {
        match script {
            UScript::Common => Script::Common,
            UScript::Inherited => Script::Inherited,
            UScript::Latin => Script::Latin,
            UScript::Cyrillic => Script::Cyrillic,
            UScript::Greek => Script::Greek,
            UScript::Arabic => Script::Arabic,
            UScript::Hebrew => Script::Hebrew,
            UScript::Han => Script::Han,
            UScript::Hiragana => Script::Hiragana,
            UScript::Katakana => Script::Katakana,
            UScript::Hangul => Script::Hangul,
            UScript::Devanagari => Script::Devanagari,
            UScript::Thai => Script::Thai,
            UScript::Bengali => Script::Bengali,
            UScript::Gurmukhi => Script::Gurmukhi,
            UScript::Gujarati => Script::Gujarati,
            UScript::Oriya => Script::Oriya,
            UScript::Tamil => Script::Tamil,
            UScript::Telugu => Script::Telugu,
            UScript::Kannada => Script::Kannada,
            UScript::Malayalam => Script::Malayalam,
            UScript::Sinhala => Script::Sinhala,
            UScript::Lao => Script::Lao,
            UScript::Tibetan => Script::Tibetan,
            UScript::Myanmar => Script::Myanmar,
            UScript::Georgian => Script::Georgian,
            UScript::Armenian => Script::Armenian,
            UScript::Ethiopic => Script::Ethiopic,
            UScript::Khmer => Script::Khmer,
            _ => Script::Unknown,
        }
    }
}

/// Classify a single code point.
///
/// ASCII letters resolve to [`Script::Latin`]; digits, punctuation,
/// symbols, and fullwidth/CJK punctuation forms resolve to
/// [`Script::Common`]; combining marks resolve to [`Script::Inherited`].
/// Supplementary-plane code points that `unicode_script` itself scores
/// as `Common` (the overwhelming majority of emoji) are reported as
/// [`Script::Unknown`] instead, per this pipeline's simplified model.
pub fn detect_script(c: char) -> Script {
    let mapped = Script::from(UScript::from(c));
    if mapped == Script::Common && (c as u32) >= 0x1_0000 {
        Script::Unknown
    } else {
        mapped
    }
}
