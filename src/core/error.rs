use axum::Json;
use axum::http::StatusCode;
use axum::http::header::{HeaderValue, WWW_AUTHENTICATE};
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database migration error: {0}")]
    DatabaseMigration(#[from] sqlx::migrate::MigrateError),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("Blocking task error: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("No credentials provided")]
    NoCredentials,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Expired token")]
    ExpiredToken,
    #[error("Incorrect username or password")]
    LoginFailed,
    #[error("User already exists")]
    UserExists,
    #[error("Planet not found")]
    PlanetNotFound,
    #[error("Planet already exists")]
    PlanetExists,
    #[error("Validation error: {0}")]
    Validation(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("{:?}", self);

        let (status, detail): (StatusCode, String) = match self {
            Error::Sql(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SQL error".into()),
            Error::Jwt(_) => (StatusCode::INTERNAL_SERVER_ERROR, "JWT error".into()),
            Error::Bcrypt(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Bcrypt error".into()),
            Error::Task(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".into(),
            ),
            Error::NoCredentials => (StatusCode::FORBIDDEN, "Not authenticated".into()),
            // Invalid and expired tokens are deliberately indistinguishable
            // to the caller.
            Error::InvalidToken | Error::ExpiredToken => (
                StatusCode::UNAUTHORIZED,
                "Could not validate credentials".into(),
            ),
            Error::LoginFailed => (
                StatusCode::UNAUTHORIZED,
                "Incorrect username or password".into(),
            ),
            Error::UserExists => (StatusCode::CONFLICT, "User already exists".into()),
            Error::PlanetNotFound => (StatusCode::NOT_FOUND, "Planet not found".into()),
            Error::PlanetExists => (
                StatusCode::BAD_REQUEST,
                "Planet with this name already exists".into(),
            ),
            Error::Validation(detail) => (StatusCode::UNPROCESSABLE_ENTITY, detail),
        };

        let mut response = (status, Json(json!({ "detail": detail }))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}
