//! Order lookup over HTTP.

use axum::http::StatusCode;
use std::io::Write;

use crate::common::*;

#[tokio::test]
async fn test_list_own_orders() {
    let (app, _) = app().await;
    let token = demo_token(&app).await;

    let response = send(&app, get("/api/orders", Some(&token))).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total"], 3);
    assert_eq!(response.body["orders"][0]["id"], "ORD-1003");
    assert_eq!(response.body["orders"][0]["userId"], "demo1");
}

#[tokio::test]
async fn test_get_order_owner_only() {
    let (app, _) = app().await;
    let token = demo_token(&app).await;

    let response = send(&app, get("/api/orders/ORD-1002", Some(&token))).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "shipped");
    assert_eq!(response.body["shipping"]["carrier"], "FedEx");

    let response = send(&app, get("/api/orders/ORD-2001", Some(&token))).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Not found");

    let response = send(&app, get("/api/orders/ORD-2001", None)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_orders_file_loaded_at_startup() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{
            "id": "EXT-1",
            "userId": "demo2",
            "status": "returned",
            "items": [],
            "total": 0.0,
            "currency": "EUR",
            "createdAt": "2030-01-01T00:00:00Z"
        }}]"#
    )
    .unwrap();

    let mut config = test_config();
    config.data.orders_file = Some(file.path().to_string_lossy().to_string());
    let (app, _) = app_with(config).await;
    let token = login(&app, "demo@istqb.com", "demo123").await;

    let response = send(&app, get("/api/orders", Some(&token))).await;
    assert_eq!(response.body["total"], 2);
    assert_eq!(response.body["orders"][0]["id"], "EXT-1");
    assert_eq!(response.body["orders"][0]["currency"], "EUR");
}
