use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginData {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewPlanet {
    pub name: String,
    pub planet_type: String,
    pub distance_from_sun: f64,
    pub radius: f64,
    pub description: Option<String>,
    pub mass: Option<f64>,
    pub orbital_period: Option<f64>,
}

/// Partial update, one optional field per mutable attribute. Absent fields
/// leave the stored value untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PlanetPatch {
    pub name: Option<String>,
    pub planet_type: Option<String>,
    pub distance_from_sun: Option<f64>,
    pub radius: Option<f64>,
    pub description: Option<String>,
    pub mass: Option<f64>,
    pub orbital_period: Option<f64>,
}
