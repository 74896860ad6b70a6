//! Executes wire requests and classifies their outcome.
//!
//! # Design
//! `dispatch` never fails out of band. Whatever happens (transport error,
//! non-2xx status, undecodable body) ends up in a `DispatchResult` holding
//! the classified error, the HTTP status (0 when no response arrived), and
//! the raw body text. Callers decide what to do with each case.
//!
//! Dropping the returned future aborts the in-flight exchange.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::NetworkError;
use crate::http::WireRequest;
use crate::observer::{DispatchObserver, NoopObserver};
use crate::transport::Transport;

/// Body text substituted when a response body is not valid UTF-8.
pub const NON_UTF8_BODY: &str = "<response body is not valid UTF-8>";

/// Outcome of one dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult<T> {
    pub result: Result<T, NetworkError>,
    /// HTTP status code, or 0 if no response was received.
    pub status_code: u16,
    /// Response body as text; empty if no response was received.
    pub body: String,
}

impl<T> DispatchResult<T> {
    /// Failure that happened before any response existed.
    pub fn unsent(err: NetworkError) -> Self {
        Self {
            result: Err(err),
            status_code: 0,
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Whether a response arrived with a 2xx status, regardless of decoding.
    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn into_result(self) -> Result<T, NetworkError> {
        self.result
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DispatchResult<U> {
        DispatchResult {
            result: self.result.map(f),
            status_code: self.status_code,
            body: self.body,
        }
    }
}

/// Sends wire requests through a transport and decodes the responses.
pub struct Dispatcher<H: Transport> {
    transport: H,
    observer: Arc<dyn DispatchObserver>,
}

impl<H: Transport> Dispatcher<H> {
    pub fn new(transport: H) -> Self {
        Self {
            transport,
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_observer(transport: H, observer: Arc<dyn DispatchObserver>) -> Self {
        Self {
            transport,
            observer,
        }
    }

    pub fn transport(&self) -> &H {
        &self.transport
    }

    pub async fn dispatch<T: DeserializeOwned>(&self, request: &WireRequest) -> DispatchResult<T> {
        self.observer.request_sent(request.method, &request.url);

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("{} {} failed: {err}", request.method, request.url);
                return DispatchResult::unsent(err.into());
            }
        };

        self.observer.response_received(response.status, &request.url);

        let status_code = response.status;
        let body = std::str::from_utf8(&response.body)
            .map(str::to_owned)
            .unwrap_or_else(|_| NON_UTF8_BODY.to_string());

        // Session invalidation would hook in here; 401 wins over any body.
        if status_code == 401 {
            return DispatchResult {
                result: Err(NetworkError::Unauthorized),
                status_code,
                body,
            };
        }

        if !(200..=299).contains(&status_code) {
            return DispatchResult {
                result: Err(NetworkError::from_status(status_code)),
                status_code,
                body,
            };
        }

        let result = serde_json::from_slice::<T>(&response.body).map_err(|e| {
            tracing::warn!("decoding response from {} failed: {e}", request.url);
            NetworkError::Decoding(e.to_string())
        });
        DispatchResult {
            result,
            status_code,
            body,
        }
    }
}
