pub mod controllers;
pub mod core;
pub mod routes;
pub mod types;
pub mod utils;

use chrono::Duration;
use config::Config;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::core::config::Args;
use crate::core::error::ConfigError as Error;
use crate::core::state::AppState;

pub async fn run() -> Result<(), Error> {
    let config = Config::builder()
        .set_default("database_url", "sqlite://planets.db?mode=rwc")
        .map_err(Error::Config)?
        .set_default("port", 8000)
        .map_err(Error::Config)?
        .set_default("log_level", "info")
        .map_err(Error::Config)?
        // non-production fallback only; override with PLANETARIUM_SECRET
        .set_default("secret", "insecure-dev-secret-change-me")
        .map_err(Error::Config)?
        .set_default("token_ttl_minutes", 30)
        .map_err(Error::Config)?
        .add_source(config::Environment::with_prefix("PLANETARIUM"))
        .build()
        .map_err(Error::Config)?;

    let config = config.try_deserialize::<Args>().map_err(Error::Config)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_new(&config.log_level).unwrap_or_default())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .map_err(Error::Sql)?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(Error::DatabaseMigration)?;

    let state = AppState::new(
        pool,
        &config.secret,
        Duration::minutes(config.token_ttl_minutes),
    );

    let app = routes::router::routes(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .map_err(Error::IO)?;

    tracing::debug!("listening on port {}", config.port);

    axum::serve(listener, app).await.map_err(Error::IO)?;

    Ok(())
}
