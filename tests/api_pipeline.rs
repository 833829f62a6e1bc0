//! Integration tests for the request lifecycle pipeline.
//!
//! Drives the assembled router end to end: auth middleware, decode,
//! validation, persistence and the response envelope.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt; // for oneshot

use shelfd::api::{ApiConfig, ApiServer};
use shelfd::store::MemoryStore;

const API_KEY: &str = "test-secret";

fn test_router() -> Router {
    let config = ApiConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        api_key: API_KEY.to_string(),
    };
    ApiServer::new(config, Arc::new(MemoryStore::new())).router()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

fn post_books(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/books")
        .header("X-API-KEY", API_KEY)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_books() -> Request<Body> {
    Request::builder()
        .uri("/books")
        .header("X-API-KEY", API_KEY)
        .body(Body::empty())
        .unwrap()
}

fn assert_error(body: &Value, code: &str) {
    assert_eq!(body["result"]["error_code"], code);
    assert!(body["result"]["error_message"].is_string());
    assert!(body["result"].get("payload").is_none());
    assert!(body["trn_id"].is_string());
    assert!(body["trn_time"].is_string());
}

// ==================
// Auth middleware
// ==================

#[tokio::test]
async fn missing_api_key_is_401() {
    let router = test_router();
    let request = Request::builder()
        .uri("/books")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, "AUTH-ERR-401-00");
}

#[tokio::test]
async fn empty_api_key_is_401() {
    let router = test_router();
    let request = Request::builder()
        .uri("/books")
        .header("X-API-KEY", "")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, "AUTH-ERR-401-00");
}

#[tokio::test]
async fn wrong_api_key_is_401() {
    let router = test_router();
    let request = Request::builder()
        .uri("/books")
        .header("X-API-KEY", "not-the-key")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, "AUTH-ERR-401-01");
}

// ==================
// POST /books
// ==================

#[tokio::test]
async fn create_book_returns_201_with_payload() {
    let router = test_router();

    let (status, body) =
        send(&router, post_books(r#"{"name":"Go 101","price":1500}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["result"]["payload"]["name"], "Go 101");
    assert_eq!(body["result"]["payload"]["price"], 1500);
    assert_eq!(body["result"]["payload"]["id"], "1");
    assert!(body["result"]["payload"]["created_at"].is_string());
    assert!(body["trn_id"].is_string());
}

#[tokio::test]
async fn malformed_body_is_400() {
    let router = test_router();
    let (status, body) = send(&router, post_books("not json at all")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VAL-ERR-400-07");
}

#[tokio::test]
async fn wrong_field_type_is_malformed_body() {
    let router = test_router();
    let (status, body) = send(&router, post_books(r#"{"name":"x","price":"abc"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VAL-ERR-400-07");
}

#[tokio::test]
async fn missing_name_is_400() {
    let router = test_router();
    let (status, body) = send(&router, post_books(r#"{"price":100}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VAL-ERR-400-00");
}

#[tokio::test]
async fn missing_price_is_400() {
    let router = test_router();
    let (status, body) = send(&router, post_books(r#"{"name":"x"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VAL-ERR-400-01");
}

#[tokio::test]
async fn validation_errors_map_to_taxonomy_codes() {
    let router = test_router();
    let cases = [
        (r#"{"name":"","price":100}"#, "VAL-ERR-400-02"),
        (r#"{"name":"x","price":0}"#, "VAL-ERR-400-03"),
        (r#"{"name":"x","price":-1}"#, "VAL-ERR-400-05"),
        (r#"{"name":"x","price":20001}"#, "VAL-ERR-400-06"),
    ];
    for (payload, code) in cases {
        let (status, body) = send(&router, post_books(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {}", payload);
        assert_error(&body, code);
    }

    let long_name = "x".repeat(51);
    let payload = format!(r#"{{"name":"{}","price":100}}"#, long_name);
    let (status, body) = send(&router, post_books(&payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VAL-ERR-400-04");
}

#[tokio::test]
async fn boundary_prices_are_accepted() {
    let router = test_router();
    let (status, _) = send(&router, post_books(r#"{"name":"x","price":20000}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&router, post_books(r#"{"name":"x","price":1}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
}

// ==================
// GET /books
// ==================

#[tokio::test]
async fn list_on_empty_store_is_404() {
    let router = test_router();
    let (status, body) = send(&router, get_books()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "DB-ERR-404-00");
}

#[tokio::test]
async fn list_after_create_returns_books() {
    let router = test_router();
    send(&router, post_books(r#"{"name":"Go 101","price":1500}"#)).await;
    send(&router, post_books(r#"{"name":"Rust 101","price":2000}"#)).await;

    let (status, body) = send(&router, get_books()).await;
    assert_eq!(status, StatusCode::OK);
    let books = body["result"]["payload"]["books"].as_array().unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0]["name"], "Go 101");
    assert_eq!(books[0]["price"], 1500);
    assert_eq!(books[1]["name"], "Rust 101");
    assert!(books[0]["created_at"].is_string());
    assert!(books[0]["id"].is_string());
}

// ==================
// Envelope & correlation
// ==================

#[tokio::test]
async fn every_response_is_an_envelope() {
    let router = test_router();

    // Success and failure alike carry trn_id/trn_time and a single result
    let (_, created) = send(&router, post_books(r#"{"name":"x","price":10}"#)).await;
    assert!(created["trn_id"].is_string());
    assert!(created["trn_time"].is_string());
    let result = created["result"].as_object().unwrap();
    assert_eq!(result.len(), 1);
    assert!(result.contains_key("payload"));

    let (_, failed) = send(&router, post_books(r#"{"name":"","price":10}"#)).await;
    let result = failed["result"].as_object().unwrap();
    assert_eq!(result.len(), 2);
    assert!(result.contains_key("error_code"));
    assert!(result.contains_key("error_message"));
}

#[tokio::test]
async fn correlation_ids_differ_between_requests() {
    let router = test_router();
    let (_, a) = send(&router, get_books()).await;
    let (_, b) = send(&router, get_books()).await;
    assert_ne!(a["trn_id"], b["trn_id"]);
}

#[tokio::test]
async fn concurrent_requests_get_distinct_correlation_ids() {
    let router = test_router();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let router = router.clone();
        handles.push(tokio::spawn(async move {
            let response = router.oneshot(get_books()).await.unwrap();
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            body["trn_id"].as_str().unwrap().to_string()
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8);
}

#[tokio::test]
async fn error_responses_do_not_leak_internals() {
    let router = test_router();
    let (_, body) = send(&router, post_books("{broken")).await;
    let message = body["result"]["error_message"].as_str().unwrap();
    // Fixed taxonomy text only, no serde detail
    assert_eq!(message, "Failed to decode the request body");
}
