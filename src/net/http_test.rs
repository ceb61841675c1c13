use super::*;
use crate::net::test_backend::{self, Recorder};
use serde_json::{Value, json};

fn client_for(base: &str) -> HttpClient {
    HttpClient::new(&ApiConfig::new(base).unwrap()).unwrap()
}

// =============================================================
// Endpoint resolution
// =============================================================

#[test]
fn endpoint_joins_relative_and_absolute_paths() {
    let client = HttpClient::new(&ApiConfig::new("https://api.example.test/v1").unwrap()).unwrap();
    assert_eq!(client.endpoint("quiz/generate").unwrap().as_str(), "https://api.example.test/v1/quiz/generate");
    assert_eq!(client.endpoint("/pdfs/").unwrap().as_str(), "https://api.example.test/v1/pdfs/");
    assert_eq!(client.base_url().as_str(), "https://api.example.test/v1/");
}

#[test]
fn decode_body_treats_empty_as_null() {
    let value: Option<Value> = decode_body("http://x/", "  ").unwrap();
    assert!(value.is_none());
}

#[test]
fn decode_body_reports_url() {
    let err = decode_body::<Value>("http://x/garbage", "nope").unwrap_err();
    assert!(matches!(&err, ApiError::Decode { url, .. } if url == "http://x/garbage"));
    assert_eq!(err.error_code(), "E_API_DECODE");
    assert!(!err.retryable());
}

#[test]
fn status_errors_retry_only_transient_codes() {
    let status = |code| ApiError::Status { method: "GET".into(), url: "u".into(), status: code, body: String::new() };
    assert!(status(503).retryable());
    assert!(status(429).retryable());
    assert!(!status(404).retryable());
    assert!(!status(400).retryable());
}

// =============================================================
// Verbs against the in-process backend
// =============================================================

#[tokio::test]
async fn get_sends_json_content_type() {
    let recorder = Recorder::default();
    let base = test_backend::spawn(test_backend::router(recorder.clone())).await;
    let client = client_for(&base);

    let body: Value = client.get("health").await.unwrap();
    assert_eq!(body["status"], "healthy");

    let seen = recorder.requests();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn post_sends_json_body() {
    let recorder = Recorder::default();
    let base = test_backend::spawn(test_backend::router(recorder.clone())).await;
    let client = client_for(&base);

    let reply: Value = client
        .post("tutor/ask", &json!({ "question": "q", "chapterId": "ch1" }))
        .await
        .unwrap();
    assert!(reply["answer"].as_str().unwrap().starts_with("Work"));

    let seen = recorder.requests();
    assert_eq!(seen[0].path, "/tutor/ask");
    assert_eq!(seen[0].body, Some(json!({ "question": "q", "chapterId": "ch1" })));
    assert_eq!(seen[0].content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn put_round_trips_body() {
    let base = test_backend::spawn(test_backend::router(Recorder::default())).await;
    let client = client_for(&base);

    let reply: Value = client.put("echo", &json!({ "n": 3 })).await.unwrap();
    assert_eq!(reply, json!({ "n": 3 }));
}

#[tokio::test]
async fn delete_accepts_empty_reply() {
    let base = test_backend::spawn(test_backend::router(Recorder::default())).await;
    let client = client_for(&base);

    let reply: Option<Value> = client.delete("echo").await.unwrap();
    assert!(reply.is_none());
}

#[tokio::test]
async fn non_success_status_maps_to_status_error() {
    let base = test_backend::spawn(test_backend::router(Recorder::default())).await;
    let client = client_for(&base);

    let err = client.get::<Value>("unavailable").await.unwrap_err();
    match &err {
        ApiError::Status { method, status, body, .. } => {
            assert_eq!(method, "GET");
            assert_eq!(*status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert!(err.retryable());
}

#[tokio::test]
async fn unknown_route_is_not_retryable() {
    let base = test_backend::spawn(test_backend::router(Recorder::default())).await;
    let client = client_for(&base);

    let err = client.get::<Value>("missing").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));
    assert!(!err.retryable());
}

#[tokio::test]
async fn malformed_body_maps_to_decode_error() {
    let base = test_backend::spawn(test_backend::router(Recorder::default())).await;
    let client = client_for(&base);

    let err = client.get::<Value>("garbage").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn refused_connection_maps_to_network_error() {
    let base = test_backend::closed_base_url().await;
    let client = client_for(&base);

    let err = client.get::<Value>("health").await.unwrap_err();
    assert!(matches!(err, ApiError::Network { .. }));
    assert_eq!(err.error_code(), "E_API_NETWORK");
    assert!(err.retryable());
}
