//! In-process backend for HTTP client tests.
//!
//! Serves the StudyMate endpoints on an ephemeral localhost port and
//! records every request it sees so tests can assert on the wire shape.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RecordedRequest {
    pub path: &'static str,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
pub(crate) struct Recorder {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Recorder {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, path: &'static str, headers: &HeaderMap, body: Option<Value>) {
        let content_type = headers
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        self.requests
            .lock()
            .unwrap()
            .push(RecordedRequest { path, content_type, body });
    }
}

/// Bind the router on `127.0.0.1:0` and return its base URL.
pub(crate) async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/")
}

/// A base URL nothing listens on.
pub(crate) async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}

pub(crate) fn router(recorder: Recorder) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/pdfs/", get(chapters))
        .route("/progress/dashboard", get(progress))
        .route("/quiz/generate", post(generate_quiz))
        .route("/tutor/ask", post(ask_tutor))
        .route("/echo", put(echo).delete(remove))
        .route("/unavailable", get(unavailable))
        .route("/garbage", get(garbage))
        .with_state(recorder)
}

async fn health(State(rec): State<Recorder>, headers: HeaderMap) -> Json<Value> {
    rec.record("/health", &headers, None);
    Json(json!({ "status": "healthy", "timestamp": "2026-10-17T09:00:00" }))
}

async fn chapters(State(rec): State<Recorder>, headers: HeaderMap) -> Json<Value> {
    rec.record("/pdfs/", &headers, None);
    Json(json!({
        "pdfs": [
            { "id": "ch1", "title": "Units and Measurement", "pages": 25 },
            { "id": "ch2", "title": "Motion in Straight Line", "pages": 28 },
            { "id": "ch3", "title": "Work Energy Power", "pages": 32 }
        ]
    }))
}

async fn progress(State(rec): State<Recorder>, headers: HeaderMap) -> Json<Value> {
    rec.record("/progress/dashboard", &headers, None);
    Json(json!({
        "total_quizzes": 15,
        "average_score": 78.5,
        "recent_attempts": [{ "subject": "Physics - Units", "score": 85, "date": "2 hours ago" }]
    }))
}

async fn generate_quiz(State(rec): State<Recorder>, headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    rec.record("/quiz/generate", &headers, Some(body));
    Json(json!({
        "id": "quiz_123",
        "questions": [{
            "id": "q1",
            "question": "What is the SI unit of electric current?",
            "options": ["Coulomb", "Ampere", "Volt", "Ohm"],
            "correct_answer": 1
        }],
        "time_limit": 600
    }))
}

async fn ask_tutor(State(rec): State<Recorder>, headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    rec.record("/tutor/ask", &headers, Some(body));
    Json(json!({
        "answer": "Work is force times displacement along the force.",
        "citations": ["NCERT XI Physics, 5.2"]
    }))
}

async fn echo(State(rec): State<Recorder>, headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    rec.record("/echo", &headers, Some(body.clone()));
    Json(body)
}

async fn remove(State(rec): State<Recorder>, headers: HeaderMap) -> StatusCode {
    rec.record("/echo", &headers, None);
    StatusCode::NO_CONTENT
}

async fn unavailable() -> (StatusCode, &'static str) {
    (StatusCode::SERVICE_UNAVAILABLE, "maintenance")
}

async fn garbage() -> &'static str {
    "definitely not json"
}
