//! Error types for cloudframe
//!
//! Only genuinely unusable input is fatal to the framing pipeline. Quality
//! signals (low axis confidence, sparse trimmed coverage, a visibility
//! correction) travel on the successful result, not through this enum.

use thiserror::Error;

/// Main error type for cloudframe operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for cloudframe operations
pub type Result<T> = std::result::Result<T, Error>;
