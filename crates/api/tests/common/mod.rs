#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use duebook_api::auth::jwt::JwtConfig;
use duebook_api::config::ServerConfig;
use duebook_api::router::build_app_router;
use duebook_api::state::AppState;
use duebook_db::Store;

pub const TEST_PASSWORD: &str = "segredo123";

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        due_soon_days: 5,
        database_url: None,
        database_max_connections: 1,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router over `store`.
///
/// Clone the store (or the returned router) to send several requests against
/// the same data.
pub fn build_test_app(store: Store) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A router over a fresh in-memory store.
pub fn fresh_app() -> Router {
    build_test_app(Store::memory())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Sign up `email` with [`TEST_PASSWORD`], log in, and return the access token.
pub async fn signup_and_login(app: &Router, email: &str) -> String {
    let signup = post_json(
        app.clone(),
        "/api/v1/auth/signup",
        json!({ "name": "Ana", "email": email, "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(signup.status(), 201, "signup should succeed");

    let login = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "email": email, "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(login.status(), 200, "login should succeed");
    body_json(login).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Create an expense through the API and return its JSON representation.
pub async fn create_expense(app: &Router, token: &str, body: Value) -> Value {
    let response = post_json_auth(app.clone(), "/api/v1/expenses", body, token).await;
    assert_eq!(response.status(), 201, "expense creation should succeed");
    body_json(response).await
}
