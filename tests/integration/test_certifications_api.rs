//! Certification catalog, recommendations and training providers over HTTP.

use axum::http::StatusCode;
use serde_json::Value;

use crate::common::*;

fn ids(body: &Value, field: &str) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|entry| entry.pointer(field).unwrap().as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_certification_routes_require_token() {
    let (app, _) = app().await;
    for uri in [
        "/api/certifications",
        "/api/certifications/recommendations",
        "/api/certifications/training-providers",
    ] {
        let response = send(&app, get(uri, None)).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{}", uri);
    }
}

#[tokio::test]
async fn test_list_certifications() {
    let (app, _) = app().await;
    let token = demo_token(&app).await;

    let response = send(&app, get("/api/certifications", Some(&token))).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        ids(&response.body, "/id"),
        vec!["CTFL", "CTAL-TA", "CTAL-TM", "CTAL-TAE", "CT-MAT", "CT-AI", "CT-AuT"]
    );
    assert_eq!(response.body[0]["level"], "Foundation");
    assert_eq!(response.body[0]["type"], "Core");
    assert_eq!(response.body[4]["type"], "Specialist");
    assert_eq!(
        response.body[1]["prerequisites"],
        "CTFL certification required"
    );
}

#[tokio::test]
async fn test_recommendations_by_experience() {
    let (app, _) = app().await;
    let token = demo_token(&app).await;

    for (experience, expected) in [("0", "CTFL"), ("2", "CTFL"), ("4", "CTAL-TA"), ("8", "CTAL-TAE")] {
        let uri = format!("/api/certifications/recommendations?experience={}", experience);
        let response = send(&app, get(&uri, Some(&token))).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(ids(&response.body, "/certification/id"), vec![expected], "{}", experience);
        assert_eq!(response.body[0]["priority"], "High");
    }
}

#[tokio::test]
async fn test_recommendations_by_role() {
    let (app, _) = app().await;
    let token = demo_token(&app).await;

    let response = send(
        &app,
        get("/api/certifications/recommendations?role=QA%20Manager", Some(&token)),
    )
    .await;
    assert_eq!(ids(&response.body, "/certification/id"), vec!["CTAL-TM"]);

    let response = send(
        &app,
        get(
            "/api/certifications/recommendations?experience=1&role=devops%20lead",
            Some(&token),
        ),
    )
    .await;
    assert_eq!(
        ids(&response.body, "/certification/id"),
        vec!["CTFL", "CTAL-TM", "CTAL-TAE"]
    );
    assert_eq!(
        response.body[0]["certification"]["examFormat"]["duration"],
        "65 minutes"
    );
}

#[tokio::test]
async fn test_recommendations_default_and_invalid() {
    let (app, _) = app().await;
    let token = demo_token(&app).await;

    for uri in [
        "/api/certifications/recommendations",
        "/api/certifications/recommendations?experience=&role=",
        "/api/certifications/recommendations?role=developer",
    ] {
        let response = send(&app, get(uri, Some(&token))).await;
        assert_eq!(response.status, StatusCode::OK, "{}", uri);
        assert_eq!(ids(&response.body, "/certification/id"), vec!["CTFL"], "{}", uri);
    }

    let response = send(
        &app,
        get("/api/certifications/recommendations?experience=lots", Some(&token)),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Validation failed");
}

#[tokio::test]
async fn test_training_providers_filters() {
    let (app, _) = app().await;
    let token = demo_token(&app).await;

    let response = send(&app, get("/api/certifications/training-providers", Some(&token))).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        ids(&response.body, "/id"),
        vec!["astqb", "istqb-official", "udemy", "coursera", "pluralsight"]
    );
    assert!(response.body[0]["priceRange"].is_null());

    let response = send(
        &app,
        get("/api/certifications/training-providers?certification=ctal-tm", Some(&token)),
    )
    .await;
    assert_eq!(ids(&response.body, "/id"), vec!["astqb", "istqb-official", "udemy"]);

    let response = send(
        &app,
        get("/api/certifications/training-providers?format=instructor-led", Some(&token)),
    )
    .await;
    assert_eq!(ids(&response.body, "/id"), vec!["istqb-official"]);

    // Global providers serve every region.
    let response = send(
        &app,
        get("/api/certifications/training-providers?region=Europe", Some(&token)),
    )
    .await;
    assert_eq!(
        ids(&response.body, "/id"),
        vec!["istqb-official", "udemy", "coursera", "pluralsight"]
    );

    let response = send(
        &app,
        get(
            "/api/certifications/training-providers?certification=CT-AI&region=North%20America",
            Some(&token),
        ),
    )
    .await;
    assert_eq!(ids(&response.body, "/id"), vec!["astqb", "istqb-official"]);
}

#[tokio::test]
async fn test_training_providers_unknown_certification() {
    let (app, _) = app().await;
    let token = demo_token(&app).await;

    let response = send(
        &app,
        get("/api/certifications/training-providers?certification=CSM", Some(&token)),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Validation failed");
}
