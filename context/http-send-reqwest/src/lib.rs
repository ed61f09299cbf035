//! Reqwest-based `HttpSend` for sharesign.
//!
//! ```no_run
//! use sharesign_core::Context;
//! use sharesign_http_send_reqwest::ReqwestHttpSend;
//! use std::time::Duration;
//!
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default().with_timeout(Duration::from_secs(10)));
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use reqwest::{Client, Request};
use sharesign_core::{Error, HttpSend, Result};
use std::time::Duration;

/// Transfer timeout applied when the caller doesn't pick one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// ReqwestHttpSend sends requests with a [`reqwest::Client`].
///
/// Every request gets a timeout so a stalled upload can't hang its worker forever.
#[derive(Debug, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
    timeout: Duration,
}

impl Default for ReqwestHttpSend {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the per request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let mut req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to build reqwest request").with_source(e))?;
        if req.timeout().is_none() {
            *req.timeout_mut() = Some(self.timeout);
        }
        debug!("sending {} {}", req.method(), req.url());

        let resp = self.client.execute(req).await.map_err(|e| {
            let message = if e.is_timeout() {
                "request timed out"
            } else {
                "connection error"
            };
            Error::unexpected(message).with_source(e)
        })?;
        let resp: http::Response<_> = resp.into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::unexpected("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
