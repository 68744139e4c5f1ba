//! Error types for paraules-core.

use serde::Serialize;
use thiserror::Error;

/// Result type alias using VocabularyError.
pub type Result<T> = std::result::Result<T, VocabularyError>;

/// Errors that can occur while loading a vocabulary list.
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("missing word at line {line}")]
    MissingWord { line: usize },

    #[error("missing picture at line {line}")]
    MissingPictogram { line: usize },

    #[error("duplicate word {key} at line {line}")]
    DuplicateKey { key: String, line: usize },

    #[error("duplicate word {key} at item {index}")]
    DuplicateItem { key: String, index: usize },

    #[error("unexpected text at line {line}: {text}")]
    UnexpectedLine { line: usize, text: String },

    #[error("empty vocabulary")]
    Empty,
}

/// Content problems that are reported but never stop the game.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConfigurationWarning {
    #[error("round size {requested} exceeds vocabulary of {available} items, using {available}")]
    RoundSizeClamped { requested: usize, available: usize },

    #[error("round size must be at least 1, using 1")]
    RoundSizeRaised,

    #[error("round size {requested} is not one of the offered sizes {offered:?}")]
    RoundSizeNotOffered { requested: usize, offered: Vec<usize> },
}

/// Failures of the audio or speech capabilities.
///
/// These only ever degrade feedback; game state moves on regardless.
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("{0} capability unavailable")]
    CapabilityUnavailable(&'static str),

    #[error("backend error: {0}")]
    Backend(String),
}
