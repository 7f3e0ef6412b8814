/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - A fresh in-memory store per test (optionally seeded)
/// - Register/login helpers that return bearer tokens
/// - A request helper that returns status and JSON body

use askboard_api::app::{build_router, AppState};
use askboard_api::config::Config;
use askboard_shared::seed::seed_store;
use askboard_shared::store::InMemoryStore;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::Service as _;

/// Test context containing the router and its state
pub struct TestContext {
    pub app: axum::Router,
    pub state: AppState,
}

impl TestContext {
    /// Creates a context around an empty store
    pub fn new() -> Self {
        Self::with_store(InMemoryStore::new())
    }

    /// Creates a context around the mock forum data
    pub fn seeded() -> Self {
        let mut store = InMemoryStore::new();
        seed_store(&mut store).unwrap();
        Self::with_store(store)
    }

    fn with_store(store: InMemoryStore) -> Self {
        let mut config = Config::default();
        config.forum.seed_mock_data = false;

        let state = AppState::new(store, config);
        let app = build_router(state.clone());
        TestContext { app, state }
    }

    /// Sends a request, returning the status and parsed JSON body
    ///
    /// Empty bodies come back as `Value::Null`, plain-text bodies as a string.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        (status, json)
    }

    /// Registers a user and returns their token
    pub async fn register(&self, username: &str) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/v1/auth/register",
                None,
                Some(json!({ "username": username })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }

    /// Logs in an existing user and returns their token
    pub async fn login(&self, username: &str) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/v1/auth/login",
                None,
                Some(json!({ "username": username })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }

    /// Asks a question and returns its ID
    pub async fn ask(&self, token: &str, title: &str) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/v1/questions",
                Some(token),
                Some(json!({
                    "title": title,
                    "description": "Details of the problem",
                    "tags": ["rust", "axum"]
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "ask failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }

    /// Answers a question and returns the answer ID
    pub async fn answer(&self, token: &str, question_id: &str, content: &str) -> String {
        let (status, body) = self
            .send(
                "POST",
                &format!("/v1/questions/{}/answers", question_id),
                Some(token),
                Some(json!({ "content": content })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "answer failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }
}
