use axum::extract::State;
use axum::{body::Body, extract::Request, http::Response, http::header, middleware::Next};

use crate::core::error::Error;
use crate::core::state::AppState;

/// Request guard for protected routes. Resolves the bearer token to a stored
/// user and injects it into the request extensions, or rejects the request.
///
/// An absent or malformed `Authorization` header (including a non-Bearer
/// scheme) is "no credential presented"; a well-formed header carrying a bad,
/// expired, or unknown-subject token is "credential rejected". The two
/// surface as different status codes.
pub async fn authorize(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response<Body>, Error> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(Error::NoCredentials)?;

    let token = parse_bearer(auth_header.to_str().map_err(|_| Error::NoCredentials)?)?;

    let token_data = state.user_controller.decode_jwt(token)?;

    let user = state
        .user_controller
        .get_user_by_username(&token_data.claims.sub)
        .await?
        .ok_or(Error::InvalidToken)?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Accepts exactly `Bearer <token>`, scheme matched case-insensitively.
fn parse_bearer(value: &str) -> Result<&str, Error> {
    let mut parts = value.split_whitespace();

    let scheme = parts.next().ok_or(Error::NoCredentials)?;
    let token = parts.next().ok_or(Error::NoCredentials)?;

    if !scheme.eq_ignore_ascii_case("bearer") || parts.next().is_some() {
        return Err(Error::NoCredentials);
    }

    Ok(token)
}
