// tests/common/mod.rs
//! Shared harness: mock upstreams and a router wired against them.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use notion_book_tracker::{router, AppState, ServiceConfig};
use serde_json::Value;
use std::collections::HashMap;
use tower::ServiceExt;
use wiremock::MockServer;

pub const TOKEN: &str = "secret_integration_token_0123456789";
pub const API_KEY: &str = "s3cret";
pub const BOOKS_DB: &str = "550e8400e29b41d4a716446655440000";
pub const BOOKS_DB_DASHED: &str = "550e8400-e29b-41d4-a716-446655440000";
pub const AUTHORS_DB: &str = "0123456789abcdef0123456789abcdef";
pub const AUTHORS_DB_DASHED: &str = "01234567-89ab-cdef-0123-456789abcdef";
pub const CATALOG_PATH: &str = "/books/v1/volumes";

/// Fake Notion and Google Books servers.
pub struct Upstreams {
    pub notion: MockServer,
    pub catalog: MockServer,
}

impl Upstreams {
    pub async fn start() -> Self {
        Self {
            notion: MockServer::start().await,
            catalog: MockServer::start().await,
        }
    }

    /// Environment pointing both clients at the mocks, without Notion credentials.
    pub fn base_vars(&self) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert("NOTION_API_BASE_URL".to_string(), self.notion.uri());
        vars.insert(
            "GOOGLE_BOOKS_API_URL".to_string(),
            format!("{}{}", self.catalog.uri(), CATALOG_PATH),
        );
        vars
    }

    /// `base_vars` plus a token and the books database.
    pub fn notion_vars(&self) -> HashMap<String, String> {
        let mut vars = self.base_vars();
        vars.insert("NOTION_TOKEN".to_string(), TOKEN.to_string());
        vars.insert("NOTION_DATABASE_ID".to_string(), BOOKS_DB.to_string());
        vars
    }
}

pub fn with(mut vars: HashMap<String, String>, pairs: &[(&str, &str)]) -> HashMap<String, String> {
    for (key, value) in pairs {
        vars.insert(key.to_string(), value.to_string());
    }
    vars
}

pub fn app(vars: &HashMap<String, String>) -> Router {
    let config = ServiceConfig::from_vars(vars).expect("test config should be valid");
    router(AppState::from_config(&config).expect("state should build"))
}

/// Sends one request and decodes the JSON body (`Null` when empty).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };
    (status, body)
}

pub fn get(uri: &str, key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(key) = key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(Body::empty()).expect("valid request")
}

pub fn post_json(uri: &str, key: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = key {
        builder = builder.header("x-api-key", key);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

/// JSON bodies of every request the mock received for `method` on `path`.
pub async fn bodies(server: &MockServer, method: &str, path: &str) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.method.as_str() == method && request.url.path() == path)
        .map(|request| serde_json::from_slice(&request.body).expect("request body should be JSON"))
        .collect()
}
