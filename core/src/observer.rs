//! Hooks called around each network exchange.
//!
//! The dispatcher reports every request it sends and every response it
//! receives to a `DispatchObserver`. Observers only watch; they cannot
//! change what the dispatcher returns.

use crate::http::HttpMethod;

pub trait DispatchObserver: Send + Sync {
    /// Called right before the request is handed to the transport.
    fn request_sent(&self, _method: HttpMethod, _url: &str) {}

    /// Called once an HTTP response (of any status) has been received.
    fn response_received(&self, _status: u16, _url: &str) {}
}

/// Observer that ignores everything. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl DispatchObserver for NoopObserver {}

/// Observer that logs each exchange at `debug` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DispatchObserver for TracingObserver {
    fn request_sent(&self, method: HttpMethod, url: &str) {
        tracing::debug!("[{method}] '{url}'");
    }

    fn response_received(&self, status: u16, url: &str) {
        tracing::debug!("[{status}] '{url}'");
    }
}
