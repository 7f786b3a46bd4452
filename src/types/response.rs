use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::user;

#[derive(Serialize)]
pub struct Login {
    pub access_token: String,
    pub token_type: String,
}

impl Login {
    pub fn new(token: &str) -> Self {
        Self {
            access_token: token.to_string(),
            token_type: "bearer".to_string(),
        }
    }
}

/// Principal fields exposed over the API. The password hash never leaves the
/// server.
#[derive(Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<user::User> for User {
    fn from(user: user::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Planet {
    pub id: i64,
    pub name: String,
    pub planet_type: String,
    pub distance_from_sun: f64,
    pub radius: f64,
    pub description: Option<String>,
    pub mass: Option<f64>,
    pub orbital_period: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
