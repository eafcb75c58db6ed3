#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use replydesk_core::types::OwnerId;
use replydesk_db::store::{Backend, MemoryStore};
use tower::ServiceExt;
use uuid::Uuid;

use replydesk_api::auth::jwt::{generate_access_token, JwtConfig};
use replydesk_api::config::{ServerConfig, StoreBackend};
use replydesk_api::router::build_app_router;
use replydesk_api::state::AppState;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-that-is-long-enough";

const MULTIPART_BOUNDARY: &str = "replydesk-test-boundary";

/// Build a test `ServerConfig` with safe defaults and the memory backend.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 64 * 1024,
        store_backend: StoreBackend::Memory,
        database_url: None,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router around `store`.
///
/// Keep a clone of the store to seed or inspect entries directly.
pub fn build_test_app_with(store: MemoryStore) -> Router {
    let state = AppState {
        store: Backend::Memory(store),
        config: Arc::new(test_config()),
    };
    build_app_router(state)
}

pub fn build_test_app() -> Router {
    build_test_app_with(MemoryStore::new())
}

/// A fresh owner and a valid Bearer token for it.
pub fn new_owner() -> (OwnerId, String) {
    let owner = Uuid::new_v4();
    let token = generate_access_token(owner, &test_config().jwt).unwrap();
    (owner, token)
}

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let req = request(Method::GET, uri, token).body(Body::empty()).unwrap();
    app.oneshot(req).await.unwrap()
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let req = request(Method::POST, uri, token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(req).await.unwrap()
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let req = request(Method::PUT, uri, token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(req).await.unwrap()
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let req = request(Method::DELETE, uri, token)
        .body(Body::empty())
        .unwrap();
    app.oneshot(req).await.unwrap()
}

/// POST a single multipart part named `field`.
pub async fn post_file(
    app: Router,
    uri: &str,
    token: Option<&str>,
    field: &str,
    file_name: &str,
    content: &[u8],
) -> Response<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    let req = request(Method::POST, uri, token)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(req).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}
