//! Verify building and dispatching against JSON test vectors stored in
//! `test-vectors/`.
//!
//! Each vector file describes inputs, expected wire requests, simulated
//! responses, and expected results or error kinds. Bodies are compared as
//! parsed JSON (not raw strings) so field order does not matter.

use std::sync::Mutex;

use async_trait::async_trait;
use catalog_core::{
    build, builder::encode_query, AddProductParams, AddedProduct, ApiClient, HttpMethod,
    NetworkError, ParamValue, Params, ProductParams, ProductsPage, RawResponse, Transport,
    TransportError, WireRequest,
};

/// Replays one simulated response and remembers the request it was given.
struct ReplayTransport {
    response: RawResponse,
    sent: Mutex<Option<WireRequest>>,
}

impl ReplayTransport {
    fn new(sim: &serde_json::Value) -> Self {
        Self {
            response: RawResponse::new(
                sim["status"].as_u64().unwrap() as u16,
                sim["body"].as_str().unwrap(),
            ),
            sent: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Transport for ReplayTransport {
    async fn send(&self, request: &WireRequest) -> Result<RawResponse, TransportError> {
        *self.sent.lock().unwrap() = Some(request.clone());
        Ok(self.response.clone())
    }
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_headers(value: &serde_json::Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

fn check_request(name: &str, req: &WireRequest, expected: &serde_json::Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, expected["url"].as_str().unwrap(), "{name}: url");
    assert_eq!(req.headers, parse_headers(&expected["headers"]), "{name}: headers");
    match expected.get("body") {
        Some(body) => {
            let sent: serde_json::Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&sent, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn check_error(name: &str, err: &NetworkError, expected: &str) {
    let matched = match expected {
        "BadRequest" => matches!(err, NetworkError::BadRequest),
        "Unauthorized" => matches!(err, NetworkError::Unauthorized),
        "Forbidden" => matches!(err, NetworkError::Forbidden),
        "NotFound" => matches!(err, NetworkError::NotFound),
        "ServerError" => matches!(err, NetworkError::ServerError),
        "Decoding" => matches!(err, NetworkError::Decoding(_)),
        other => panic!("{name}: unknown expected_error: {other}"),
    };
    assert!(matched, "{name}: expected {expected}, got {err:?}");
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[tokio::test]
async fn products_test_vectors() {
    let raw = include_str!("../../test-vectors/products.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: ProductParams = serde_json::from_value(case["input"].clone()).unwrap();
        let sim = &case["simulated_response"];

        let client = ApiClient::with_transport(ReplayTransport::new(sim));
        let res = client.products(input).await;

        let sent = client.dispatcher().transport().sent.lock().unwrap().clone().unwrap();
        check_request(name, &sent, &case["expected_request"]);

        assert_eq!(res.status_code as u64, sim["status"].as_u64().unwrap(), "{name}: status");
        assert_eq!(res.body, sim["body"].as_str().unwrap(), "{name}: raw body");
        match case.get("expected_error") {
            Some(expected) => check_error(name, &res.result.unwrap_err(), expected.as_str().unwrap()),
            None => {
                let expected: ProductsPage =
                    serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(res.result.unwrap(), expected, "{name}: parsed result");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Add product
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_product_test_vectors() {
    let raw = include_str!("../../test-vectors/add_product.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: AddProductParams = serde_json::from_value(case["input"].clone()).unwrap();
        let sim = &case["simulated_response"];

        // Build alone must agree with what the client sends.
        let built = build(&catalog_core::catalog::add_product(&input)).unwrap();
        check_request(name, &built, &case["expected_request"]);

        let client = ApiClient::with_transport(ReplayTransport::new(sim));
        let res = client.add_product(input).await;

        let sent = client.dispatcher().transport().sent.lock().unwrap().clone().unwrap();
        assert_eq!(sent, built, "{name}: sent request");

        assert_eq!(res.status_code as u64, sim["status"].as_u64().unwrap(), "{name}: status");
        assert_eq!(res.body, sim["body"].as_str().unwrap(), "{name}: raw body");
        match case.get("expected_error") {
            Some(expected) => check_error(name, &res.result.unwrap_err(), expected.as_str().unwrap()),
            None => {
                let expected: AddedProduct =
                    serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(res.result.unwrap(), expected, "{name}: parsed result");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Query encoding
// ---------------------------------------------------------------------------

#[test]
fn query_encoding_test_vectors() {
    let raw = include_str!("../../test-vectors/query_encoding.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let params: Params = case["params"]
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), ParamValue::from_json(v.clone())))
            .collect();
        assert_eq!(
            encode_query(&params),
            case["expected_query"].as_str().unwrap(),
            "{name}"
        );
    }
}
