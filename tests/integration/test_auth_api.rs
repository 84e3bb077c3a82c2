//! Registration, login and token handling over HTTP.

use axum::http::StatusCode;
use serde_json::json;

use crate::common::*;
use supportbot::Authenticator;

#[tokio::test]
async fn test_register_login_me_round_trip() {
    let (app, _) = app().await;

    let response = send(
        &app,
        post(
            "/api/auth/register",
            None,
            json!({ "email": "Jane@Example.com", "password": "hunter22", "name": "Jane" }),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["user"]["email"], "jane@example.com");
    assert!(response.body["user"].get("passwordHash").is_none());
    assert!(response.body["token"].is_string());
    let user_id = response.body["user"]["id"].as_str().unwrap().to_string();

    let token = login(&app, "jane@example.com", "hunter22").await;

    let response = send(&app, get("/api/auth/me", Some(&token))).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], user_id.as_str());
    assert_eq!(response.body["name"], "Jane");
    assert!(response.body["createdAt"].is_string());
}

#[tokio::test]
async fn test_duplicate_register_is_conflict() {
    let (app, _) = app().await;
    let body = json!({ "email": "demo@example.com", "password": "another1", "name": "Someone" });

    let response = send(&app, post("/api/auth/register", None, body)).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "Conflict");
}

#[tokio::test]
async fn test_register_validation() {
    let (app, _) = app().await;

    for body in [
        json!({ "email": "nope", "password": "secret1", "name": "Al" }),
        json!({ "email": "al@example.com", "password": "123", "name": "Al" }),
        json!({ "email": "al@example.com", "password": "secret1", "name": "A" }),
        json!({ "email": "al@example.com" }),
    ] {
        let response = send(&app, post("/api/auth/register", None, body)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], "Validation failed");
    }
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let (app, state) = app().await;

    let response = send(
        &app,
        post(
            "/api/auth/login",
            None,
            json!({ "email": "demo@example.com", "password": "wrong" }),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid email or password");
    assert_eq!(state.metrics.auth_failures_total.get(), 1);
}

#[tokio::test]
async fn test_me_requires_token() {
    let (app, _) = app().await;

    let response = send(&app, get("/api/auth/me", None)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Access denied");
    assert_eq!(response.body["message"], "No token provided");

    let response = send(&app, get("/api/auth/me", Some("garbage"))).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Invalid token");
}

#[tokio::test]
async fn test_expired_token() {
    let (app, _) = app().await;
    let authenticator = Authenticator::new(test_config().auth);
    let token = authenticator
        .issue_token_at(
            "demo1",
            "demo@example.com",
            chrono::Utc::now() - chrono::Duration::days(3),
        )
        .unwrap();

    let response = send(&app, get("/api/auth/me", Some(&token))).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Token expired");
}

#[tokio::test]
async fn test_auth_disabled_uses_demo_identity() {
    let mut config = test_config();
    config.auth.enabled = false;
    let (app, _) = app_with(config).await;

    let response = send(&app, get("/api/auth/me", None)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], "demo1");
}

#[tokio::test]
async fn test_public_endpoints() {
    let (app, _) = app().await;

    let response = send(&app, get("/", None)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "supportbot");

    let response = send(&app, get("/health", None)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");

    let response = send(&app, get("/metrics", None)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_rate_limit_on_api_routes() {
    let mut config = test_config();
    config.rate_limit.max_requests = 3;
    let (app, state) = app_with(config).await;

    let body = json!({ "email": "demo@example.com", "password": "wrong" });
    for _ in 0..3 {
        let response = send(&app, post("/api/auth/login", None, body.clone())).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    let response = send(&app, post("/api/auth/login", None, body)).await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.body["error"], "Too many requests");
    assert!(response.headers.contains_key("retry-after"));
    assert_eq!(state.metrics.rate_limited_total.get(), 1);

    // Health checks are outside /api and never limited.
    let response = send(&app, get("/health", None)).await;
    assert_eq!(response.status, StatusCode::OK);
}
