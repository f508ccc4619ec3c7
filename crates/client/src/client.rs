//! The pixels service client: session lifecycle, the rate-limit-aware
//! request pipeline, and the four public operations.

use std::time::Duration;

use bytes::Bytes;
use protocol::{Canvas, CanvasSize, DecodeError, Pixel};
use tracing::debug;

use crate::endpoint::Endpoint;
use crate::error::ClientError;
use crate::http::HttpTransport;
use crate::limit::Limiter;
use crate::transport::{Method, Request, Response, Transport};

/// Async client for the pixels canvas service.
///
/// Construction is inert; [`open`](Client::open) installs the transport and
/// [`close`](Client::close) releases it together with its pooled
/// connections. Operations on a closed client fail with
/// [`ClientError::Session`] before any network activity.
///
/// Operations take `&self` and may run concurrently on one open client;
/// each endpoint throttles independently.
pub struct Client<T: Transport = HttpTransport> {
    token: String,
    transport: Option<T>,
    limiter: Limiter,
}

impl Client<HttpTransport> {
    /// Open client for the service at `base_url`.
    pub fn connect(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let mut client = Client::new(token);
        client.open(HttpTransport::new(base_url));
        client
    }
}

impl<T: Transport> Client<T> {
    /// Closed client holding the bearer `token`. The credential is opaque
    /// to this layer; acquiring or refreshing it is the caller's problem.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            transport: None,
            limiter: Limiter::new(),
        }
    }

    /// Install `transport`, making the client ready for requests.
    ///
    /// The endpoint-to-URL mapping lives in the transport, so this is also
    /// where the service location is configured.
    pub fn open(&mut self, transport: T) {
        self.transport = Some(transport);
    }

    /// Drop the transport. Further operations fail with
    /// [`ClientError::Session`] until the client is reopened.
    pub fn close(&mut self) {
        self.transport = None;
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    /// Per-endpoint rate-limit state observed so far.
    pub fn limiter(&self) -> &Limiter {
        &self.limiter
    }

    /// Current canvas dimensions.
    pub async fn get_size(&self) -> Result<CanvasSize, ClientError> {
        let response = self
            .request(Endpoint::GetSize, Method::Get, Vec::new(), None)
            .await?;
        Ok(serde_json::from_slice(&response.body).map_err(DecodeError::from)?)
    }

    /// Fetch the full canvas. `size` comes from [`get_size`](Client::get_size).
    pub async fn get_pixels(&self, size: CanvasSize) -> Result<Canvas, ClientError> {
        let response = self
            .request(Endpoint::GetPixels, Method::Get, Vec::new(), None)
            .await?;
        Ok(Canvas::from_bytes(size, &response.body)?)
    }

    /// Read one pixel.
    pub async fn get_pixel(&self, x: u32, y: u32) -> Result<Pixel, ClientError> {
        let query = vec![("x", x.to_string()), ("y", y.to_string())];
        let response = self
            .request(Endpoint::GetPixel, Method::Get, query, None)
            .await?;
        Ok(serde_json::from_slice(&response.body).map_err(DecodeError::from)?)
    }

    /// Write one pixel. The service's reply is an opaque string-keyed map,
    /// passed through unmodified.
    pub async fn set_pixel(
        &self,
        pixel: Pixel,
    ) -> Result<serde_json::Map<String, serde_json::Value>, ClientError> {
        let body = serde_json::to_vec(&pixel).map_err(DecodeError::from)?;
        let response = self
            .request(
                Endpoint::SetPixel,
                Method::Post,
                Vec::new(),
                Some(Bytes::from(body)),
            )
            .await?;
        Ok(serde_json::from_slice(&response.body).map_err(DecodeError::from)?)
    }

    /// One logical call to one endpoint.
    ///
    /// Every response's headers feed the limiter first, failed responses
    /// included. Cooldown and low-resource verdicts sleep out the
    /// server-declared wait and resend the same request; only the response
    /// that clears the throttle gate is classified and decoded. The resend
    /// loop is deliberately unbounded: the server's wait is trusted.
    ///
    /// Dropping the returned future during a throttle sleep is safe; the
    /// limiter was updated before the sleep began.
    async fn request(
        &self,
        endpoint: Endpoint,
        method: Method,
        query: Vec<(&'static str, String)>,
        body: Option<Bytes>,
    ) -> Result<Response, ClientError> {
        let transport = self.transport.as_ref().ok_or(ClientError::Session)?;
        let request = Request {
            method,
            path: endpoint.path(),
            query,
            body,
            bearer: self.token.clone(),
        };

        loop {
            let response = transport.send(&request).await?;
            let decision = self.limiter.consume_headers(endpoint, &response.headers);
            if decision.must_wait() {
                debug!(
                    "{} throttled ({:?}), waiting {}s before resend",
                    endpoint.path(),
                    decision.status,
                    decision.wait_secs
                );
                tokio::time::sleep(Duration::from_secs(decision.wait_secs)).await;
                continue;
            }

            return match response.status {
                status if status >= 500 => Err(ClientError::FatalService { status }),
                status if status >= 400 => Err(ClientError::Protocol {
                    status,
                    body: String::from_utf8_lossy(&response.body).into_owned(),
                }),
                _ => Ok(response),
            };
        }
    }
}
