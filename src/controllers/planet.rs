use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqliteRow};

use crate::core::error::Error;
use crate::types::request::{NewPlanet, PlanetPatch};
use crate::types::response::Planet;

const PLANET_COLUMNS: &str = "id,
                name,
                planet_type,
                distance_from_sun,
                radius,
                description,
                mass,
                orbital_period,
                created_at,
                updated_at";

#[derive(Clone, Debug)]
pub struct PlanetController {
    pool: SqlitePool,
}

impl PlanetController {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_planets(&self) -> Result<Vec<Planet>, Error> {
        let planets = sqlx::query(&format!(
            "SELECT {PLANET_COLUMNS} FROM planets ORDER BY id;"
        ))
        .map(map_planet)
        .fetch_all(&self.pool)
        .await?;

        Ok(planets)
    }

    pub async fn get_planet(&self, id: i64) -> Result<Planet, Error> {
        match sqlx::query(&format!(
            "SELECT {PLANET_COLUMNS} FROM planets WHERE id = $1;"
        ))
        .bind(id)
        .map(map_planet)
        .fetch_one(&self.pool)
        .await
        {
            Ok(planet) => Ok(planet),
            Err(sqlx::Error::RowNotFound) => Err(Error::PlanetNotFound),
            Err(e) => Err(Error::Sql(e)),
        }
    }

    pub async fn create_planet(&self, params: NewPlanet) -> Result<Planet, Error> {
        validate(&params)?;

        let now = Utc::now();

        match sqlx::query(&format!(
            "INSERT INTO planets
                (name, planet_type, distance_from_sun, radius, description, mass, orbital_period, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PLANET_COLUMNS};"
        ))
        .bind(&params.name)
        .bind(&params.planet_type)
        .bind(params.distance_from_sun)
        .bind(params.radius)
        .bind(&params.description)
        .bind(params.mass)
        .bind(params.orbital_period)
        .bind(now)
        .bind(now)
        .map(map_planet)
        .fetch_one(&self.pool)
        .await
        {
            Ok(planet) => Ok(planet),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(Error::PlanetExists)
            }
            Err(e) => Err(Error::Sql(e)),
        }
    }

    /// Applies a patch field-by-field over the stored record, then validates
    /// and writes back the merged result.
    pub async fn update_planet(&self, id: i64, patch: PlanetPatch) -> Result<Planet, Error> {
        let current = self.get_planet(id).await?;

        let merged = NewPlanet {
            name: patch.name.unwrap_or(current.name),
            planet_type: patch.planet_type.unwrap_or(current.planet_type),
            distance_from_sun: patch.distance_from_sun.unwrap_or(current.distance_from_sun),
            radius: patch.radius.unwrap_or(current.radius),
            description: patch.description.or(current.description),
            mass: patch.mass.or(current.mass),
            orbital_period: patch.orbital_period.or(current.orbital_period),
        };

        validate(&merged)?;

        match sqlx::query(&format!(
            "UPDATE planets SET
                name = $1,
                planet_type = $2,
                distance_from_sun = $3,
                radius = $4,
                description = $5,
                mass = $6,
                orbital_period = $7,
                updated_at = $8
            WHERE id = $9
            RETURNING {PLANET_COLUMNS};"
        ))
        .bind(&merged.name)
        .bind(&merged.planet_type)
        .bind(merged.distance_from_sun)
        .bind(merged.radius)
        .bind(&merged.description)
        .bind(merged.mass)
        .bind(merged.orbital_period)
        .bind(Utc::now())
        .bind(id)
        .map(map_planet)
        .fetch_one(&self.pool)
        .await
        {
            Ok(planet) => Ok(planet),
            Err(sqlx::Error::RowNotFound) => Err(Error::PlanetNotFound),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(Error::PlanetExists)
            }
            Err(e) => Err(Error::Sql(e)),
        }
    }

    pub async fn delete_planet(&self, id: i64) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM planets WHERE id = $1;")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::PlanetNotFound);
        }

        Ok(())
    }
}

fn validate(planet: &NewPlanet) -> Result<(), Error> {
    if planet.name.is_empty() || planet.name.len() > 100 {
        return Err(Error::Validation(
            "name must be between 1 and 100 characters".to_string(),
        ));
    }

    if planet.planet_type.is_empty() || planet.planet_type.len() > 50 {
        return Err(Error::Validation(
            "planet_type must be between 1 and 50 characters".to_string(),
        ));
    }

    if planet.distance_from_sun <= 0.0 {
        return Err(Error::Validation(
            "distance_from_sun must be greater than 0".to_string(),
        ));
    }

    if planet.radius <= 0.0 {
        return Err(Error::Validation(
            "radius must be greater than 0".to_string(),
        ));
    }

    if let Some(description) = &planet.description {
        if description.len() > 1000 {
            return Err(Error::Validation(
                "description must be at most 1000 characters".to_string(),
            ));
        }
    }

    if let Some(mass) = planet.mass {
        if mass <= 0.0 {
            return Err(Error::Validation("mass must be greater than 0".to_string()));
        }
    }

    if let Some(orbital_period) = planet.orbital_period {
        if orbital_period <= 0.0 {
            return Err(Error::Validation(
                "orbital_period must be greater than 0".to_string(),
            ));
        }
    }

    Ok(())
}

fn map_planet(row: SqliteRow) -> Planet {
    Planet {
        id: row.get("id"),
        name: row.get("name"),
        planet_type: row.get("planet_type"),
        distance_from_sun: row.get("distance_from_sun"),
        radius: row.get("radius"),
        description: row.get("description"),
        mass: row.get("mass"),
        orbital_period: row.get("orbital_period"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
