//! Descriptors for the catalog endpoints.

use serde::{Deserialize, Serialize};

use crate::params::to_params;
use crate::request::Request;
use crate::types::{AddedProduct, ProductsPage};

/// Paging for `GET /products`. Unset fields are left to the server.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ProductParams {
    pub fn page(skip: u32, limit: u32) -> Self {
        Self {
            skip: Some(skip),
            limit: Some(limit),
        }
    }
}

/// Payload for `POST /products/add`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddProductParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl AddProductParams {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }
}

pub fn get_products(params: &ProductParams) -> Request<ProductsPage> {
    Request::get("/products").query(to_params(params))
}

pub fn add_product(params: &AddProductParams) -> Request<AddedProduct> {
    Request::post("/products/add").body(to_params(params))
}
