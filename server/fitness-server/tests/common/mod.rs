#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use fitness_server::{create_app, AppConfig, FitnessServer};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Router over a fresh in-memory store
pub struct TestApp {
    pub app: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let server = FitnessServer::in_memory(AppConfig::default());
        Self {
            app: create_app(server),
        }
    }

    /// Send a raw body and decode the JSON response
    pub async fn send_raw(&self, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(text) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(text)
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send_raw(method, uri, body.map(|b| b.to_string())).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    /// Create a member and return its id
    pub async fn create_member(&self, name: &str, age: i32) -> i64 {
        let (status, body) = self.post("/members", json!({"name": name, "age": age})).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap()
    }

    /// Create a workout session and return its session id
    pub async fn create_session(&self, member_id: i64, date: &str, activity: &str) -> i64 {
        let (status, body) = self
            .post(
                "/workout-sessions",
                json!({
                    "member_id": member_id,
                    "session_date": date,
                    "session_time": "07:30",
                    "activity": activity
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["session_id"].as_i64().unwrap()
    }
}
