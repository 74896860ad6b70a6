//! Catalog DTOs.
//!
//! # Design
//! Field names follow the backend's JSON (camelCase) through serde renames.
//! The mock-server crate defines its own copies; the integration tests catch
//! any drift between the two.

use serde::{Deserialize, Serialize};

/// A single catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub discount_percentage: f64,
    pub rating: f64,
    pub stock: i64,
    /// Missing for some products on the live backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub category: String,
    pub thumbnail: String,
    pub images: Vec<String>,
}

/// One page of `GET /products`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductsPage {
    pub products: Vec<Product>,
    pub total: i64,
    pub skip: i64,
    pub limit: i64,
}

/// Response of `POST /products/add`. Other echoed fields are ignored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddedProduct {
    pub id: i64,
}
