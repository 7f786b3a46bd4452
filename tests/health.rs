//! Integration tests for the unauthenticated info endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, build_test_app, send};

#[tokio::test]
async fn root_returns_api_information() {
    let (app, _state) = build_test_app().await;

    let response = send(&app, Method::GET, "/", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;

    assert_eq!(json["endpoints"]["planets"], "/planets");
    assert_eq!(json["endpoints"]["auth"], "/auth");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn health_reports_database_status() {
    let (app, _state) = build_test_app().await;

    let response = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;

    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let (app, _state) = build_test_app().await;

    let response = send(&app, Method::GET, "/asteroids", None, None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
