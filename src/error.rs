//! Error types for the glyph pipeline
//!
//! Mirrors the teacher's approach of one `thiserror` enum per subsystem
//! rather than a single unified crate error: construction-time failures
//! (`ConfigError`, `FaceError`) never need to be confused with the
//! runtime failures of a long-lived manager (`AtlasError`).

use thiserror::Error;

/// `AtlasConfig::validate` failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid atlas config field `{field}`: {reason}")]
    ConfigInvalid { field: &'static str, reason: String },
}

/// `MultiFace` construction failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FaceError {
    #[error("MultiFace requires at least one component face")]
    EmptyFaces,

    #[error("MultiFace component faces must share one direction")]
    MismatchedDirection,
}

/// Runtime failures of the MSDF atlas manager.
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("get_batch keys and outlines length mismatch: {keys} keys, {outlines} outlines")]
    LengthMismatch { keys: usize, outlines: usize },

    #[error("grid allocator refused allocation in a non-full atlas (index {atlas_index})")]
    AllocationFailed { atlas_index: usize },

    #[error("all {max_atlases} atlas(es) are full")]
    AtlasFull { max_atlases: usize },

    #[error("MSDF generation failed: {0}")]
    GenerationError(String),

    #[error("operation requires a parsed font, none was supplied")]
    UnsupportedFontType,
}
