use axum::Json;
use axum::extract::{Extension, State};
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::User;
use crate::types::request;
use crate::types::response;

#[instrument(skip(state, credentials))]
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<request::LoginData>,
) -> Result<Json<response::Login>, Error> {
    let user = state
        .user_controller
        .authenticate(&credentials.username, &credentials.password)
        .await?
        .ok_or(Error::LoginFailed)?;

    let token = state.user_controller.encode_jwt(&user)?;

    Ok(Json(response::Login::new(&token)))
}

#[instrument(skip_all)]
pub async fn me(Extension(user): Extension<User>) -> Result<Json<response::User>, Error> {
    Ok(Json(user.into()))
}
