//! Typed HTTP client core for the product catalog API.
//!
//! # Overview
//! A caller describes an endpoint call as a `Request<T>`: base server, path,
//! method, headers, query and body parameters, and the type `T` a successful
//! response decodes into. `ApiClient::dispatch` builds the wire request,
//! sends it through a `Transport`, and returns a `DispatchResult<T>` carrying
//! the decoded value or a classified `NetworkError`, the HTTP status, and the
//! raw body text.
//!
//! # Design
//! - `builder` is pure: descriptor in, `WireRequest` out. It owns the query
//!   escaping rules and the default headers.
//! - `Dispatcher` never fails out of band; transport errors, error statuses,
//!   and decoding failures all land in the `DispatchResult`.
//! - The network sits behind the `Transport` trait (`ReqwestTransport` in
//!   production) and request logging behind `DispatchObserver`, so both can
//!   be swapped in tests.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod builder;
pub mod catalog;
pub mod client;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod observer;
pub mod params;
pub mod request;
pub mod transport;
pub mod types;

pub use builder::build;
pub use catalog::{AddProductParams, ProductParams};
pub use client::ApiClient;
pub use dispatcher::{DispatchResult, Dispatcher};
pub use error::{BuildError, NetworkError, TransportError};
pub use http::{HttpMethod, RawResponse, WireRequest};
pub use observer::{DispatchObserver, NoopObserver, TracingObserver};
pub use params::{to_params, ParamValue, Params};
pub use request::{BaseServer, Request, API_BASE_URL};
pub use transport::{ReqwestTransport, Transport};
pub use types::{AddedProduct, Product, ProductsPage};
