use axum::{
    Json, Router,
    extract::{MatchedPath, Request, State},
    http::Method,
    middleware,
    routing::{get, post, put},
};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::{
    cors::{self, CorsLayer},
    trace::TraceLayer,
};
use tracing::info_span;

use crate::core::state::AppState;
use crate::routes::{auth, planets};
use crate::utils;

pub fn routes(state: AppState) -> Router {
    // /auth/...
    let auth_router = Router::new().route("/login", post(auth::login)).merge(
        Router::new()
            .route("/me", get(auth::me))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                utils::auth::authorize,
            )),
    );

    // Reads are public, writes sit behind the guard.
    let protected_planet_routes = Router::new()
        .route("/", post(planets::post))
        .route("/{id}", put(planets::put).delete(planets::delete))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            utils::auth::authorize,
        ));

    // /planets/...
    let planet_router = Router::new()
        .route("/", get(planets::get_all))
        .route("/{id}", get(planets::get))
        .merge(protected_planet_routes);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/auth", auth_router)
        .nest("/planets", planet_router)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                        let matched_path = request
                            .extensions()
                            .get::<MatchedPath>()
                            .map(MatchedPath::as_str);

                        info_span!(
                            "request",
                            method = ?request.method(),
                            matched_path,
                        )
                    }),
                )
                .layer(
                    CorsLayer::new()
                        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                        .allow_headers(cors::Any)
                        .allow_origin(cors::Any),
                ),
        )
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Planets API!",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "planets": "/planets",
            "auth": "/auth"
        }
    }))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let database = match sqlx::query("SELECT 1;").execute(&state.pool).await {
        Ok(_) => "healthy",
        Err(_) => "unavailable",
    };

    Json(json!({
        "status": database,
        "message": "Planets API is running",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
