use serde::Deserialize;

/// Environment-provided settings, prefixed with `PLANETARIUM_`. The defaults
/// set in `run()` are only acceptable outside production.
#[derive(Debug, Deserialize, Clone)]
pub struct Args {
    pub database_url: String,
    pub port: u16,
    pub log_level: String,
    pub secret: String,
    pub token_ttl_minutes: i64,
}
