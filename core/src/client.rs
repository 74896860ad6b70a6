//! Single entry point for calling the catalog backend.
//!
//! # Design
//! `ApiClient` builds a `WireRequest` from a descriptor and hands it to one
//! shared `Dispatcher`. Cloning the client shares the dispatcher and with it
//! the transport's connection pool, so callers construct one client and pass
//! it around instead of reaching for a global.
//!
//! A descriptor that cannot be built is reported as
//! `NetworkError::InvalidRequest` with status 0, like any other failure that
//! happens before the network is reached.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::builder;
use crate::catalog::{self, AddProductParams, ProductParams};
use crate::dispatcher::{DispatchResult, Dispatcher};
use crate::error::TransportError;
use crate::observer::DispatchObserver;
use crate::request::{BaseServer, Request};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{AddedProduct, ProductsPage};

/// Typed client for the catalog API.
pub struct ApiClient<H: Transport = ReqwestTransport> {
    dispatcher: Arc<Dispatcher<H>>,
    base: Option<BaseServer>,
}

impl ApiClient<ReqwestTransport> {
    /// Client using reqwest with default settings.
    ///
    /// # Panics
    /// If the TLS backend cannot be initialised; see `try_new`.
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::new())
    }

    /// Client using reqwest with default settings, reporting a transport
    /// that cannot be set up instead of panicking.
    pub fn try_new() -> Result<Self, TransportError> {
        Ok(Self::with_transport(ReqwestTransport::try_new()?))
    }
}

impl Default for ApiClient<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Transport> ApiClient<H> {
    pub fn with_transport(transport: H) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::new(transport)),
            base: None,
        }
    }

    pub fn with_observer(transport: H, observer: Arc<dyn DispatchObserver>) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::with_observer(transport, observer)),
            base: None,
        }
    }

    /// Point the catalog calls (`products`, `add_product`) at another
    /// server. Descriptors passed to `dispatch` keep their own base.
    pub fn catalog_base(mut self, base: BaseServer) -> Self {
        self.base = Some(base);
        self
    }

    pub fn dispatcher(&self) -> &Dispatcher<H> {
        &self.dispatcher
    }

    /// Build and send `request`, decoding a 2xx body into `T`.
    pub async fn dispatch<T: DeserializeOwned>(&self, request: &Request<T>) -> DispatchResult<T> {
        let wire = match builder::build(request) {
            Ok(wire) => wire,
            Err(err) => {
                tracing::error!(
                    "cannot build {} {}: {err}",
                    request.method(),
                    request.path()
                );
                return DispatchResult::unsent(err.into());
            }
        };
        self.dispatcher.dispatch(&wire).await
    }

    /// `GET /products` with the given paging.
    pub async fn products(&self, params: ProductParams) -> DispatchResult<ProductsPage> {
        let request = self.on_catalog_base(catalog::get_products(&params));
        self.dispatch(&request).await
    }

    /// `POST /products/add`.
    pub async fn add_product(&self, params: AddProductParams) -> DispatchResult<AddedProduct> {
        let request = self.on_catalog_base(catalog::add_product(&params));
        self.dispatch(&request).await
    }

    fn on_catalog_base<T>(&self, request: Request<T>) -> Request<T> {
        match &self.base {
            Some(base) => request.base(base.clone()),
            None => request,
        }
    }
}

impl<H: Transport> Clone for ApiClient<H> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
            base: self.base.clone(),
        }
    }
}
