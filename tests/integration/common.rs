//! Shared helpers for the HTTP integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use supportbot::{ApiState, Config, SupportServer};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Default configuration with a known JWT secret.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.jwt.secret = TEST_SECRET.to_string();
    config.auth.password_cost = 4;
    config
}

/// Build the application router and its shared state.
pub async fn app_with(config: Config) -> (Router, Arc<ApiState>) {
    let server = SupportServer::new(config).await.unwrap();
    (server.router(), server.state())
}

pub async fn app() -> (Router, Arc<ApiState>) {
    app_with(test_config()).await
}

/// Response status, headers and JSON body (`Null` when the body is not JSON).
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    request(Method::GET, uri, token, None)
}

pub fn post(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    request(Method::POST, uri, token, Some(body))
}

/// Log in and return the bearer token.
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let response = send(
        app,
        post(
            "/api/auth/login",
            None,
            serde_json::json!({ "email": email, "password": password }),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
    response.body["token"].as_str().unwrap().to_string()
}

pub async fn demo_token(app: &Router) -> String {
    login(app, "demo@example.com", "demo").await
}
