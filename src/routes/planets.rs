use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::request::{NewPlanet, PlanetPatch};
use crate::types::response::Planet;

#[instrument(skip(state))]
pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<Planet>>, Error> {
    let planets = state.planet_controller.get_planets().await?;

    Ok(Json(planets))
}

#[instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Planet>, Error> {
    let planet = state.planet_controller.get_planet(id).await?;

    Ok(Json(planet))
}

#[instrument(skip(state, params))]
pub async fn post(
    State(state): State<AppState>,
    Json(params): Json<NewPlanet>,
) -> Result<(StatusCode, Json<Planet>), Error> {
    let planet = state.planet_controller.create_planet(params).await?;

    Ok((StatusCode::CREATED, Json(planet)))
}

#[instrument(skip(state, params))]
pub async fn put(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(params): Json<PlanetPatch>,
) -> Result<Json<Planet>, Error> {
    let planet = state.planet_controller.update_planet(id, params).await?;

    Ok(Json(planet))
}

#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode, Error> {
    state.planet_controller.delete_planet(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
