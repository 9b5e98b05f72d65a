//! Error types for segmentation and profile discovery

use thiserror::Error;

/// Errors that can occur while ingesting messages or building profiles.
///
/// Data-shape problems never surface here: an unparseable body produces an
/// unidentified record, not an error.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Failed to parse raw email structure
    #[error("failed to parse email structure: {0}")]
    Structure(String),

    /// A heading, cue, or terminator pattern failed to compile
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Profile discovery was given unusable options
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A corpus or profile file could not be read or written
    #[error("i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// Profile serialization or deserialization failed
    #[error("profile serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type for segmentation and discovery operations
pub type Result<T> = std::result::Result<T, ParseError>;
