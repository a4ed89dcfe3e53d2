//! Error types for the ARK registry core.

use thiserror::Error;

/// Core errors that can occur while building grammar or shape configuration.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid name shape: {0}")]
    InvalidShape(String),

    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Error parsing a NAAN from its decimal string form.
#[derive(Debug, Error)]
#[error("invalid NAAN {input:?}: {reason}")]
pub struct ParseNaanError {
    pub input: String,
    pub reason: String,
}
