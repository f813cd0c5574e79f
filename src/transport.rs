//! Transport layer abstraction for HTTP communication.
//!
//! The default implementation uses reqwest; the trait exists so tests can
//! substitute a mock without a network. Connection pooling, TLS and
//! socket-level behavior all live below this seam, inside the HTTP client.

use async_trait::async_trait;
use reqwest::{Client, Request, Response};
use std::time::Duration;

use crate::error::{SesError, SesResult};

/// Trait for HTTP transport implementations.
///
/// Implementations must be safe for concurrent independent requests; the
/// client issues each `SendEmail` call as one `send` with no shared mutable
/// state of its own.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns [`SesError::Transport`] when the request cannot be sent —
    /// connection failures, DNS errors, timeouts.
    async fn send(&self, request: Request) -> SesResult<Response>;
}

/// Reqwest-based transport.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with the given timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`SesError::Transport`] when the underlying client cannot be
    /// constructed.
    pub fn new(timeout: Duration, connect_timeout: Duration) -> SesResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| SesError::Transport {
                message: format!("failed to create HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: Request) -> SesResult<Response> {
        self.client.execute(request).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_construction_succeeds() {
        let transport = ReqwestTransport::new(Duration::from_secs(30), Duration::from_secs(10));
        assert!(transport.is_ok());
    }

    #[test]
    fn transport_is_usable_as_a_trait_object() {
        let transport =
            ReqwestTransport::new(Duration::from_secs(30), Duration::from_secs(10)).unwrap();
        let _: &dyn Transport = &transport;
    }
}
