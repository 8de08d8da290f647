//! Error types for the formation engine.

use kinetype_fonts::FontError;
use thiserror::Error;

use crate::SectionKind;

/// Errors raised while building formations or sequencing them.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Font(#[from] FontError),

    #[error("Malformed sign data: {0}")]
    MalformedSignData(String),

    #[error("Sequencer has no sections")]
    EmptySequencer,

    #[error("{0:?} section has no entries")]
    EmptySection(SectionKind),

    #[error("Invalid particle mass: {0} (must be finite and positive)")]
    InvalidMass(f32),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
