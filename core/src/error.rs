//! Error types for the catalog client.
//!
//! # Design
//! `NetworkError` is the closed set of outcomes a failed dispatch can carry.
//! Status codes the backend uses with a specific meaning (400, 401, 403, 404,
//! 500) get dedicated variants; the rest of the 4xx and 5xx ranges keep their
//! numeric code. Failures that happen before a response exists (building the
//! request, the transport giving up) have their own variants so callers can
//! tell "the server said no" from "we never got an answer".
//!
//! `BuildError` and `TransportError` are the narrower errors of the builder
//! and the transport. Both fold into `NetworkError`.

use thiserror::Error;

/// Classified failure attached to a `DispatchResult`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    /// The request could not be built or could not be handed to the
    /// transport at all.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("bad request")]
    BadRequest,

    /// 401. Reserved hook for session invalidation.
    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("resource not found")]
    NotFound,

    /// 402 or 405..=499.
    #[error("client error (HTTP {0})")]
    Client(u16),

    #[error("internal server error")]
    ServerError,

    /// 501..=599.
    #[error("server error (HTTP {0})")]
    Server(u16),

    /// The body of a 2xx response did not match the expected type.
    #[error("decoding failed: {0}")]
    Decoding(String),

    #[error("transport failed: {0}")]
    Transport(#[source] TransportError),

    #[error("request timed out")]
    TimedOut,

    /// A status code outside every known range (1xx, 3xx, >599).
    #[error("unknown error")]
    Unknown,
}

impl NetworkError {
    /// Map a non-2xx HTTP status code to its error kind.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => NetworkError::BadRequest,
            401 => NetworkError::Unauthorized,
            403 => NetworkError::Forbidden,
            404 => NetworkError::NotFound,
            402 | 405..=499 => NetworkError::Client(status),
            500 => NetworkError::ServerError,
            501..=599 => NetworkError::Server(status),
            _ => NetworkError::Unknown,
        }
    }

    /// The HTTP status this error was derived from, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::BadRequest => Some(400),
            NetworkError::Unauthorized => Some(401),
            NetworkError::Forbidden => Some(403),
            NetworkError::NotFound => Some(404),
            NetworkError::ServerError => Some(500),
            NetworkError::Client(code) | NetworkError::Server(code) => Some(*code),
            _ => None,
        }
    }
}

impl From<TransportError> for NetworkError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => NetworkError::TimedOut,
            TransportError::Unsendable(reason) => NetworkError::InvalidRequest(reason),
            failed @ TransportError::Failed(_) => NetworkError::Transport(failed),
        }
    }
}

impl From<BuildError> for NetworkError {
    fn from(err: BuildError) -> Self {
        NetworkError::InvalidRequest(err.to_string())
    }
}

/// Failure to turn a request descriptor into a `WireRequest`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("invalid base origin `{origin}`: {reason}")]
    InvalidBase { origin: String, reason: String },

    /// Paths must be empty or start with `/`, and carry no query or fragment.
    #[error("invalid path `{0}`")]
    InvalidPath(String),

    #[error("invalid url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Failure reported by a `Transport` when no HTTP response was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("timed out")]
    Timeout,

    /// Connection, TLS, or body-read failure.
    #[error("{0}")]
    Failed(String),

    /// The transport refused the request before sending it (for example an
    /// invalid header name).
    #[error("request could not be sent: {0}")]
    Unsendable(String),
}
