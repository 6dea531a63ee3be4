//! HTTP API Tests
//!
//! Drives the full router (CORS + tracing layers included) with
//! `tower::ServiceExt::oneshot`, against both store implementations.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use strandb::http_server::{HttpServer, HttpServerConfig};
use strandb::store::{FileRecordStore, MemoryRecordStore, RecordStore};
use tempfile::TempDir;
use tower::ServiceExt;

// =============================================================================
// Test Utilities
// =============================================================================

fn make_app(store: Arc<dyn RecordStore>) -> Router {
    HttpServer::with_config(HttpServerConfig::default(), store).router()
}

fn memory_app() -> Router {
    make_app(Arc::new(MemoryRecordStore::new()))
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn post_value(app: &Router, body: &str) -> Response {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri("/strings")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn get(app: &Router, uri: &str) -> Response {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn delete(app: &Router, uri: &str) -> Response {
    send(
        app,
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn body_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn seed(app: &Router, values: &[&str]) {
    for v in values {
        let resp = post_value(app, &json!({ "value": v }).to_string()).await;
        assert_eq!(resp.status(), StatusCode::CREATED, "seeding {v:?}");
    }
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_returns_full_record() {
    let app = memory_app();
    let resp = post_value(&app, r#"{"value": "hello world"}"#).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let json = body_json(resp).await;
    let props = &json["properties"];
    assert_eq!(json["value"], "hello world");
    assert_eq!(json["id"], props["sha256_hash"]);
    assert_eq!(
        json["id"],
        "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
    );
    assert_eq!(props["length"], 11);
    assert_eq!(props["is_palindrome"], false);
    assert_eq!(props["unique_characters"], 8);
    assert_eq!(props["word_count"], 2);
    assert_eq!(props["character_frequency_map"]["l"], 3);
    assert_eq!(props["character_frequency_map"][" "], 1);
    assert!(json["created_at"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_create_validation_statuses() {
    let app = memory_app();

    let cases = [
        ("not json", StatusCode::BAD_REQUEST),
        ("{}", StatusCode::BAD_REQUEST),
        (r#"{"val": "x"}"#, StatusCode::BAD_REQUEST),
        (r#"{"value": 123}"#, StatusCode::UNPROCESSABLE_ENTITY),
        (r#"{"value": ["a"]}"#, StatusCode::UNPROCESSABLE_ENTITY),
    ];

    for (body, expected) in cases {
        let resp = post_value(&app, body).await;
        assert_eq!(resp.status(), expected, "body {body:?}");
        let json = body_json(resp).await;
        assert_eq!(json["code"], expected.as_u16());
        assert!(json["error"].is_string());
    }
}

#[tokio::test]
async fn test_duplicate_is_conflict() {
    let app = memory_app();
    seed(&app, &["only once"]).await;

    let resp = post_value(&app, r#"{"value": "only once"}"#).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(resp).await["error"],
        "String already exists in the system"
    );
}

// =============================================================================
// Lookup and Delete
// =============================================================================

#[tokio::test]
async fn test_lookup_decodes_path() {
    let app = memory_app();
    seed(&app, &["hello world"]).await;

    let resp = get(&app, "/strings/hello%20world").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["value"], "hello world");
}

#[tokio::test]
async fn test_delete_lifecycle() {
    let app = memory_app();
    seed(&app, &["ephemeral"]).await;

    let resp = delete(&app, "/strings/ephemeral").await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
    assert!(body.is_empty());

    assert_eq!(
        get(&app, "/strings/ephemeral").await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        delete(&app, "/strings/ephemeral").await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_values_with_slashes_are_addressable() {
    let app = memory_app();
    seed(&app, &["a/b", "/leading", "a"]).await;

    let resp = get(&app, "/strings/a/b").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["value"], "a/b");

    let resp = get(&app, "/strings/%2Fleading").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["value"], "/leading");

    assert_eq!(
        delete(&app, "/strings/a/b").await.status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(get(&app, "/strings/a/b").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/strings/a").await.status(), StatusCode::OK);
}

// =============================================================================
// Filtering
// =============================================================================

#[tokio::test]
async fn test_structured_filter() {
    let app = memory_app();
    seed(&app, &["racecar", "noon", "hello", "step on no pets"]).await;

    let resp = get(&app, "/strings?is_palindrome=true&min_length=5&word_count=1").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["value"], "racecar");
    assert_eq!(
        json["filters_applied"],
        json!({"is_palindrome": true, "min_length": 5, "word_count": 1})
    );
}

#[tokio::test]
async fn test_unfiltered_list_in_insertion_order() {
    let app = memory_app();
    seed(&app, &["zulu", "alpha", "mike"]).await;

    let json = body_json(get(&app, "/strings").await).await;
    assert_eq!(json["count"], 3);
    let values: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["value"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(values, vec!["zulu", "alpha", "mike"]);
    assert_eq!(json["filters_applied"], json!({}));
}

#[tokio::test]
async fn test_malformed_filter_params() {
    let app = memory_app();
    for uri in [
        "/strings?is_palindrome=maybe",
        "/strings?min_length=abc",
        "/strings?max_length=1.5",
        "/strings?word_count=",
        "/strings?contains_character=ab",
    ] {
        let resp = get(&app, uri).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn test_natural_language_filter() {
    let app = memory_app();
    seed(&app, &["a", "level", "racecar", "two words"]).await;

    let resp = get(
        &app,
        "/strings/filter-by-natural-language?query=palindromes%20longer%20than%205",
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["value"], "racecar");
    assert_eq!(
        json["interpreted_query"],
        json!({
            "original": "palindromes longer than 5",
            "parsed_filters": {"is_palindrome": true, "min_length": 6}
        })
    );
}

#[tokio::test]
async fn test_natural_language_errors_are_distinct() {
    let app = memory_app();

    let missing = get(&app, "/strings/filter-by-natural-language").await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    let missing = body_json(missing).await;

    let unparseable = get(&app, "/strings/filter-by-natural-language?query=banana%20bread").await;
    assert_eq!(unparseable.status(), StatusCode::BAD_REQUEST);
    let unparseable = body_json(unparseable).await;

    assert_eq!(unparseable["error"], "Unable to parse natural language query");
    assert_ne!(missing["error"], unparseable["error"]);

    let empty = get(&app, "/strings/filter-by-natural-language?query=shorter%20than%201").await;
    assert_eq!(empty.status(), StatusCode::OK);
    assert_eq!(body_json(empty).await["count"], 0);
}

// =============================================================================
// Durable Store Behind the Router
// =============================================================================

#[tokio::test]
async fn test_file_store_round_trip_across_routers() {
    let temp_dir = TempDir::new().unwrap();

    {
        let store: Arc<dyn RecordStore> =
            Arc::new(FileRecordStore::open(temp_dir.path()).unwrap());
        let app = make_app(Arc::clone(&store));
        seed(&app, &["persisted", "removed"]).await;
        assert_eq!(
            delete(&app, "/strings/removed").await.status(),
            StatusCode::NO_CONTENT
        );
        store.close().unwrap();

        let resp = get(&app, "/strings").await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    let store: Arc<dyn RecordStore> = Arc::new(FileRecordStore::open(temp_dir.path()).unwrap());
    let app = make_app(store);
    let json = body_json(get(&app, "/strings").await).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["value"], "persisted");
}

#[tokio::test]
async fn test_health() {
    let app = memory_app();
    let resp = get(&app, "/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}
