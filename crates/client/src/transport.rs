//! The HTTP boundary.
//!
//! The pipeline talks to an abstract [`Transport`] so the concrete HTTP
//! stack stays swappable, and so tests can script responses without a
//! network. [`HttpTransport`](crate::HttpTransport) is the production
//! implementation.

use std::future::Future;

use bytes::Bytes;
use thiserror::Error;

/// HTTP method for a request. The service only ever needs these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One request as the pipeline hands it to the transport.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Path under the service base URL.
    pub path: &'static str,
    /// Query parameters.
    pub query: Vec<(&'static str, String)>,
    /// JSON body, already serialized.
    pub body: Option<Bytes>,
    /// Bearer credential to attach as the `Authorization` header.
    pub bearer: String,
}

/// A response as the pipeline consumes it: status, headers, raw body.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Headers,
    pub body: Bytes,
}

/// Response header map with case-insensitive lookup.
#[derive(Debug, Clone, Default)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Header value parsed as an integer, `None` when absent or malformed.
    pub(crate) fn get_u64(&self, name: &str) -> Option<u64> {
        self.get(name)?.trim().parse().ok()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        )
    }
}

/// Connection-level failure surfaced by a transport.
#[derive(Debug, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

/// Abstract HTTP client the pipeline sends through.
///
/// The future must be `Send`; operations are expected to run inside spawned
/// tasks.
pub trait Transport: Send + Sync {
    /// Perform one HTTP exchange.
    fn send(
        &self,
        request: &Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send;
}
