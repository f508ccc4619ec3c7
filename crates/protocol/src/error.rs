//! Protocol decode errors.

use thiserror::Error;

/// Errors that can occur while decoding service payloads.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid hex color {0:?}")]
    InvalidHex(String),

    #[error("canvas stream length mismatch: expected {expected} bytes, got {actual}")]
    CanvasLength { expected: usize, actual: usize },

    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}
