use std::{collections::BTreeMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, RawQuery, State},
    http::{HeaderMap, Method, StatusCode},
    routing::{any, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const DEFAULT_LIMIT: usize = 30;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub discount_percentage: f64,
    pub rating: f64,
    pub stock: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub category: String,
    pub thumbnail: String,
    pub images: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductsPage {
    pub products: Vec<Product>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
}

#[derive(Deserialize)]
pub struct Paging {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct NewProduct {
    pub title: Option<String>,
}

/// What `/echo` saw of the incoming request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub type Db = Arc<RwLock<Vec<Product>>>;

/// Products the server starts with.
pub fn seed() -> Vec<Product> {
    let item = |id: i64, title: &str, brand: Option<&str>, category: &str, price: f64| Product {
        id,
        title: title.to_string(),
        description: format!("{title} description"),
        price,
        discount_percentage: 5.0 + id as f64,
        rating: 4.0 + id as f64 / 10.0,
        stock: 10 * id,
        brand: brand.map(str::to_string),
        category: category.to_string(),
        thumbnail: format!("https://cdn.example.com/products/{id}/thumbnail.png"),
        images: vec![format!("https://cdn.example.com/products/{id}/1.png")],
    };
    vec![
        item(1, "Essence Mascara Lash Princess", Some("Essence"), "beauty", 9.99),
        item(2, "Eyeshadow Palette with Mirror", Some("Glamour Beauty"), "beauty", 19.99),
        item(3, "Powder Canister", Some("Velvet Touch"), "beauty", 14.99),
        item(4, "Red Lipstick", Some("Chic Cosmetics"), "beauty", 12.99),
        item(5, "Apple", None, "groceries", 1.99),
    ]
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(seed()));
    Router::new()
        .route("/products", get(list_products))
        .route("/products/add", post(add_product))
        .route("/products/{id}", get(get_product))
        .route("/status/{code}", get(status))
        .route("/slow/{millis}", get(slow))
        .route("/echo", any(echo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_products(State(db): State<Db>, Query(paging): Query<Paging>) -> Json<ProductsPage> {
    let products = db.read().await;
    let skip = paging.skip.unwrap_or(0);
    let limit = paging.limit.unwrap_or(DEFAULT_LIMIT);
    Json(ProductsPage {
        products: products.iter().skip(skip).take(limit).cloned().collect(),
        total: products.len(),
        skip,
        limit,
    })
}

async fn add_product(
    State(db): State<Db>,
    Json(input): Json<NewProduct>,
) -> (StatusCode, Json<Value>) {
    let mut products = db.write().await;
    let id = products.len() as i64 + 1;
    let title = input.title.unwrap_or_default();
    products.push(Product {
        id,
        title: title.clone(),
        description: String::new(),
        price: 0.0,
        discount_percentage: 0.0,
        rating: 0.0,
        stock: 0,
        brand: None,
        category: String::new(),
        thumbnail: String::new(),
        images: Vec::new(),
    });
    (StatusCode::CREATED, Json(json!({ "id": id, "title": title })))
}

async fn get_product(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, (StatusCode, Json<Value>)> {
    let products = db.read().await;
    products
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": format!("Product with id '{id}' not found") })),
            )
        })
}

/// Respond with the requested status and a JSON message.
async fn status(Path(code): Path<u16>) -> (StatusCode, Json<Value>) {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, Json(json!({ "message": format!("status {code}") }))),
        Err(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": format!("invalid status {code}") })),
        ),
    }
}

async fn slow(Path(millis): Path<u64>) -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(millis)).await;
    Json(json!({}))
}

async fn echo(method: Method, RawQuery(query): RawQuery, headers: HeaderMap, body: String) -> Json<Echo> {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    Json(Echo {
        method: method.to_string(),
        query,
        headers,
        body,
    })
}
