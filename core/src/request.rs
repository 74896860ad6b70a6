//! Declarative request descriptors.
//!
//! # Design
//! A `Request<T>` names one endpoint call: where it goes, how, with which
//! parameters, and which type a successful response decodes into. It holds
//! no connection state and performs no I/O; `builder::build` turns it into a
//! `WireRequest`. Every verb uses the same type, so a GET with query
//! parameters and a POST with a JSON body differ only in their fields.
//!
//! Setters consume and return `self`. Once a descriptor is handed to the
//! client it is only read through the accessors below.

use std::fmt;
use std::marker::PhantomData;

use crate::http::HttpMethod;
use crate::params::{ParamValue, Params};

/// Origin of the catalog backend.
pub const API_BASE_URL: &str = "https://dummyjson.com";

/// Default content type for request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Known server roots a request can target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BaseServer {
    /// The catalog API at `API_BASE_URL`.
    #[default]
    Api,
    /// An explicit origin such as `http://127.0.0.1:3000`.
    Custom(String),
}

impl BaseServer {
    pub fn origin(&self) -> &str {
        match self {
            BaseServer::Api => API_BASE_URL,
            BaseServer::Custom(origin) => origin,
        }
    }
}

/// Description of one HTTP call whose success body decodes into `T`.
pub struct Request<T> {
    base: BaseServer,
    path: String,
    method: HttpMethod,
    content_type: String,
    headers: Option<Vec<(String, String)>>,
    query: Option<Params>,
    body: Option<Params>,
    raw_body: Option<Vec<u8>>,
    // fn() -> T keeps the descriptor Send + Sync regardless of T.
    _response: PhantomData<fn() -> T>,
}

impl<T> Request<T> {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            base: BaseServer::Api,
            path: path.into(),
            method,
            content_type: JSON_CONTENT_TYPE.to_string(),
            headers: None,
            query: None,
            body: None,
            raw_body: None,
            _response: PhantomData,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn base(mut self, base: BaseServer) -> Self {
        self.base = base;
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Add a header. Headers set here win over the builder's defaults.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, params: Params) -> Self {
        self.query = Some(params);
        self
    }

    /// Add a single query parameter.
    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.query
            .get_or_insert_with(Params::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, params: Params) -> Self {
        self.body = Some(params);
        self
    }

    /// Send these bytes as the body. Takes precedence over `body`.
    pub fn raw_body(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.raw_body = Some(bytes.into());
        self
    }

    pub fn base_server(&self) -> &BaseServer {
        &self.base
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn content_type_value(&self) -> &str {
        &self.content_type
    }

    pub fn headers(&self) -> Option<&[(String, String)]> {
        self.headers.as_deref()
    }

    pub fn query_params(&self) -> Option<&Params> {
        self.query.as_ref()
    }

    pub fn body_params(&self) -> Option<&Params> {
        self.body.as_ref()
    }

    pub fn raw_body_bytes(&self) -> Option<&[u8]> {
        self.raw_body.as_deref()
    }
}

// Manual impls: deriving would require `T: Clone` / `T: Debug`.
impl<T> Clone for Request<T> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            path: self.path.clone(),
            method: self.method,
            content_type: self.content_type.clone(),
            headers: self.headers.clone(),
            query: self.query.clone(),
            body: self.body.clone(),
            raw_body: self.raw_body.clone(),
            _response: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Request<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("base", &self.base)
            .field("path", &self.path)
            .field("method", &self.method)
            .field("content_type", &self.content_type)
            .field("headers", &self.headers)
            .field("query", &self.query)
            .field("body", &self.body)
            .field("raw_body_len", &self.raw_body.as_ref().map(Vec::len))
            .finish()
    }
}
