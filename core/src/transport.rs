//! The network seam.
//!
//! `Transport` executes one `WireRequest` and reports either the raw HTTP
//! response or why none was obtained. `ReqwestTransport` is the production
//! implementation; tests substitute in-memory fakes.

use std::time::Duration;

use async_trait::async_trait;

use crate::http::{HttpMethod, RawResponse, WireRequest};

pub use crate::error::TransportError;

/// Executes a single HTTP exchange.
///
/// Any HTTP status, including 4xx and 5xx, is a successful exchange and
/// must be returned as `Ok`. Implementations never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &WireRequest) -> Result<RawResponse, TransportError>;
}

/// `Transport` backed by a shared `reqwest::Client`.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Transport with reqwest's default settings (no overall timeout).
    ///
    /// # Panics
    /// If the TLS backend cannot be initialised. Use `try_new` to get that
    /// as an error instead.
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Fallible form of `new`.
    pub fn try_new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Failed(e.to_string()))?;
        Ok(Self { client })
    }

    /// Transport whose every request gives up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Failed(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &WireRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(reqwest_method(request.method), request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(classify)?;
        Ok(RawResponse::new(status, body.to_vec()))
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_builder() {
        TransportError::Unsendable(err.to_string())
    } else {
        TransportError::Failed(err.to_string())
    }
}
