//! Chat, history and intent listing over HTTP.

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::*;
use supportbot::RulesetKind;

#[tokio::test]
async fn test_chat_requires_token() {
    let (app, _) = app().await;

    let response = send(&app, post("/api/chat", None, json!({ "message": "hello" }))).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_chat_classifies_message() {
    let (app, state) = app().await;
    let token = demo_token(&app).await;

    let response = send(
        &app,
        post(
            "/api/chat",
            Some(&token),
            json!({ "message": "I want a refund for order #12345", "sessionId": "s-42" }),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["sessionId"], "s-42");
    assert_eq!(response.body["intent"], "order_status");
    assert!(response.body["message"].is_string());
    assert!(response.body["suggestions"].as_array().is_some_and(|s| !s.is_empty()));
    assert!(response.body["timestamp"].is_string());

    assert_eq!(state.metrics.chat_messages_total.get(), 1);
    assert_eq!(
        state
            .metrics
            .intents_total
            .with_label_values(&["order_status"])
            .get(),
        1
    );
}

#[tokio::test]
async fn test_chat_generates_session_id() {
    let (app, _) = app().await;
    let token = demo_token(&app).await;

    let response = send(&app, post("/api/chat", Some(&token), json!({ "message": "hey" }))).await;
    assert_eq!(response.status, StatusCode::OK);
    let session = response.body["sessionId"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(session).is_ok());
    assert_eq!(response.body["intent"], "greeting");
}

#[tokio::test]
async fn test_chat_message_validation() {
    let (app, _) = app().await;
    let token = demo_token(&app).await;

    for body in [
        json!({ "message": "" }),
        json!({ "message": "x".repeat(1001) }),
        json!({ "text": "hello" }),
    ] {
        let response = send(&app, post("/api/chat", Some(&token), body)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    let response = send(
        &app,
        post("/api/chat", Some(&token), json!({ "message": "x".repeat(1000) })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["intent"], "unknown");
}

#[tokio::test]
async fn test_blank_message_falls_back() {
    let (app, _) = app().await;
    let token = demo_token(&app).await;

    let response = send(&app, post("/api/chat", Some(&token), json!({ "message": "  \t " }))).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["intent"], "unknown");
}

#[tokio::test]
async fn test_history_and_clear() {
    let (app, _) = app().await;
    let token = demo_token(&app).await;

    for (message, session) in [("hello", "a"), ("track my package", "a"), ("help", "b")] {
        let response = send(
            &app,
            post(
                "/api/chat",
                Some(&token),
                json!({ "message": message, "sessionId": session }),
            ),
        )
        .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = send(&app, get("/api/chat/history", Some(&token))).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["userId"], "demo1");
    assert_eq!(response.body["total"], 3);
    assert_eq!(response.body["exchanges"][1]["intent"], "shipping_info");
    assert_eq!(response.body["exchanges"][1]["userMessage"], "track my package");

    let response = send(&app, get("/api/chat/history?sessionId=b", Some(&token))).await;
    assert_eq!(response.body["total"], 1);
    assert_eq!(response.body["exchanges"][0]["intent"], "help");

    // Another user sees none of it.
    let other = login(&app, "demo@istqb.com", "demo123").await;
    let response = send(&app, get("/api/chat/history", Some(&other))).await;
    assert_eq!(response.body["total"], 0);

    let response = send(
        &app,
        request(Method::DELETE, "/api/chat/history", Some(&token), None),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["removed"], 3);

    let response = send(&app, get("/api/chat/history", Some(&token))).await;
    assert_eq!(response.body["total"], 0);
}

#[tokio::test]
async fn test_intents_listing() {
    let (app, _) = app().await;
    let token = demo_token(&app).await;

    let response = send(&app, get("/api/chat/intents", Some(&token))).await;
    assert_eq!(response.status, StatusCode::OK);
    let ids: Vec<&str> = response.body["rules"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![
            "order_status",
            "order_details",
            "shipping_info",
            "return_request",
            "greeting",
            "help"
        ]
    );
    assert_eq!(response.body["fallback"], "unknown");
}

#[tokio::test]
async fn test_certification_ruleset_over_http() {
    let mut config = test_config();
    config.classifier.ruleset = RulesetKind::Certifications;
    let (app, _) = app_with(config).await;
    let token = login(&app, "demo@istqb.com", "demo123").await;

    let response = send(
        &app,
        post(
            "/api/chat",
            Some(&token),
            json!({ "message": "Which certification should I start with?" }),
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["intent"], "certification_recommendation");
}
