use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo, Product, ProductsPage};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_products_defaults() {
    let resp = app().oneshot(get("/products")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: ProductsPage = body_json(resp).await;
    assert_eq!(page.total, 5);
    assert_eq!(page.skip, 0);
    assert_eq!(page.limit, 30);
    assert_eq!(page.products.len(), 5);
}

#[tokio::test]
async fn list_products_pages() {
    let resp = app().oneshot(get("/products?skip=1&limit=2")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: ProductsPage = body_json(resp).await;
    assert_eq!(page.skip, 1);
    assert_eq!(page.limit, 2);
    let ids: Vec<i64> = page.products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[tokio::test]
async fn list_products_bad_paging_returns_400() {
    let resp = app().oneshot(get("/products?skip=abc")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- add ---

#[tokio::test]
async fn add_product_returns_201_with_next_id() {
    let resp = app()
        .oneshot(json_request("POST", "/products/add", r#"{"title":"X"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: serde_json::Value = body_json(resp).await;
    assert_eq!(created["id"], 6);
    assert_eq!(created["title"], "X");
}

#[tokio::test]
async fn add_product_malformed_json_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/products/add", "{not json"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- get ---

#[tokio::test]
async fn get_product_found() {
    let resp = app().oneshot(get("/products/3")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let product: Product = body_json(resp).await;
    assert_eq!(product.title, "Powder Canister");
}

#[tokio::test]
async fn get_product_not_found_has_message() {
    let resp = app().oneshot(get("/products/999")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "Product with id '999' not found");
}

// --- test helpers ---

#[tokio::test]
async fn status_route_echoes_code() {
    for code in [400u16, 401, 418, 503] {
        let resp = app().oneshot(get(&format!("/status/{code}"))).await.unwrap();
        assert_eq!(resp.status().as_u16(), code);
    }
}

#[tokio::test]
async fn status_route_rejects_invalid_code() {
    let resp = app().oneshot(get("/status/42")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn slow_route_answers_after_delay() {
    let resp = app().oneshot(get("/slow/10")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await.as_ref(), b"{}");
}

#[tokio::test]
async fn echo_reports_raw_query_headers_and_body() {
    let req = Request::builder()
        .method("PATCH")
        .uri("/echo?q=a%2Fb&x=1")
        .header("x-trace", "abc")
        .body("payload".to_string())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "PATCH");
    assert_eq!(echo.query.as_deref(), Some("q=a%2Fb&x=1"));
    assert_eq!(echo.headers.get("x-trace").map(String::as_str), Some("abc"));
    assert_eq!(echo.body, "payload");
}

// --- add then list ---

#[tokio::test]
async fn added_product_shows_up_in_list() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/products/add", r#"{"title":"Lamp"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/products?skip=5"))
        .await
        .unwrap();
    let page: ProductsPage = body_json(resp).await;
    assert_eq!(page.total, 6);
    assert_eq!(page.products.len(), 1);
    assert_eq!(page.products[0].title, "Lamp");
}
