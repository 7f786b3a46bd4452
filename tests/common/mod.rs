//! Shared helpers for the HTTP-level integration tests.
//!
//! Requests are sent straight to the router through `tower::ServiceExt`, no
//! TCP listener involved. Each test gets its own in-memory SQLite database
//! with migrations applied, so the suite needs no external services.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode, header};
use chrono::Duration;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use planetarium::core::state::AppState;
use planetarium::routes::router;

pub const USERNAME: &str = "testuser";
pub const PASSWORD: &str = "testpass123";
pub const SECRET: &str = "integration-test-secret";

pub async fn build_test_app() -> (Router, AppState) {
    // A second connection would see a different in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    let state = AppState::new(pool, SECRET, Duration::minutes(30));

    (router::routes(state.clone()), state)
}

pub async fn seed_user(state: &AppState) {
    state
        .user_controller
        .create_user(USERNAME, "testuser@example.com", PASSWORD)
        .await
        .expect("seed user");
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

/// Logs the seeded user in through the API and returns the bearer token.
pub async fn login(app: &Router) -> String {
    let response = send(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": USERNAME, "password": PASSWORD })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;

    json["access_token"].as_str().unwrap().to_string()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    serde_json::from_slice(&bytes).unwrap()
}

/// A correctly signed token whose expiry is well in the past.
pub fn stale_token(subject: &str) -> String {
    let issued = chrono::Utc::now() - Duration::minutes(40);
    let claims = planetarium::types::Claims {
        exp: (issued + Duration::minutes(30)).timestamp() as usize,
        iat: issued.timestamp() as usize,
        sub: subject.to_string(),
    };

    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}
