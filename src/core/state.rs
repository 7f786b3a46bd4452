use chrono::Duration;
use sqlx::sqlite::SqlitePool;

use crate::controllers::planet::PlanetController;
use crate::controllers::user::UserController;

#[derive(Clone, Debug)]
pub struct AppState {
    pub pool: SqlitePool,
    pub user_controller: UserController,
    pub planet_controller: PlanetController,
}

impl AppState {
    pub fn new(pool: SqlitePool, secret: &str, token_ttl: Duration) -> Self {
        AppState {
            pool: pool.clone(),
            user_controller: UserController::new(pool.clone(), secret, token_ttl),
            planet_controller: PlanetController::new(pool),
        }
    }
}
