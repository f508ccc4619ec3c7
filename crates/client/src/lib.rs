//! Async client for the pixels collaborative-canvas service.
//!
//! The interesting part is the request pipeline: every response's rate-limit
//! headers feed a per-endpoint state machine, and the pipeline sleeps out any
//! server-declared wait before resending. Callers only ever see final
//! results; throttling is handled internally and never surfaces as an error.

mod client;
mod endpoint;
mod error;
mod http;
mod limit;
mod transport;

pub use client::Client;
pub use endpoint::Endpoint;
pub use error::ClientError;
pub use http::HttpTransport;
pub use limit::{
    HEADER_COOLDOWN_RESET, HEADER_REQUESTS_LIMIT, HEADER_REQUESTS_REMAINING,
    HEADER_REQUESTS_RESET, LimitDecision, LimitStatus, Limiter, RateLimitState,
};
pub use transport::{Headers, Method, Request, Response, Transport, TransportError};
