//! Client error taxonomy.

use protocol::DecodeError;
use thiserror::Error;

use crate::transport::TransportError;

/// Errors surfaced by client operations.
///
/// Throttling is never an error: the pipeline waits it out internally.
/// Everything here propagates to the caller on first occurrence; nothing
/// is retried or backed off.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Operation attempted outside an open session.
    #[error("client session is not open; call open first")]
    Session,

    /// HTTP 4xx from the service, with the raw body text.
    #[error("service rejected the request ({status}): {body}")]
    Protocol { status: u16, body: String },

    /// HTTP 5xx from the service. Not recoverable by waiting.
    #[error("service failure ({status})")]
    FatalService { status: u16 },

    /// Malformed payload: hex color, canvas stream, or JSON.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Connection-level transport failure.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
