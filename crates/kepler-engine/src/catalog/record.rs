use serde::{Deserialize, Serialize};

/// One planet row as delivered by the catalog fetch.
///
/// Field names on the wire follow the NASA Exoplanet Archive columns. Every
/// numeric column may be missing or `null`; that means "unknown", never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanetRecord {
    #[serde(rename = "hostname", default)]
    pub host: String,
    #[serde(rename = "pl_name", default)]
    pub name: String,
    /// Earth radii.
    #[serde(rename = "pl_rade", default)]
    pub radius: Option<f64>,
    /// Days.
    #[serde(rename = "pl_orbper", default)]
    pub period: Option<f64>,
    /// Kelvin.
    #[serde(rename = "pl_eqt", default)]
    pub eq_temp: Option<f64>,
    /// Earth masses.
    #[serde(rename = "pl_bmasse", default)]
    pub mass: Option<f64>,
    /// Earth insolation units.
    #[serde(rename = "pl_insol", default)]
    pub insolation: Option<f64>,
    /// AU.
    #[serde(rename = "pl_orbsmax", default)]
    pub semi_major_axis: Option<f64>,
    #[serde(rename = "st_teff", default)]
    pub star_teff: Option<f64>,
    /// Solar radii.
    #[serde(rename = "st_rad", default)]
    pub star_radius: Option<f64>,
    /// Solar masses.
    #[serde(rename = "st_mass", default)]
    pub star_mass: Option<f64>,
    /// log10(L / L☉), as the archive publishes it.
    #[serde(rename = "st_lum", default)]
    pub star_log_luminosity: Option<f64>,
    /// Parsecs.
    #[serde(rename = "sy_dist", default)]
    pub distance: Option<f64>,
    /// Degrees.
    #[serde(default)]
    pub ra: Option<f64>,
    /// Degrees.
    #[serde(default)]
    pub dec: Option<f64>,
    #[serde(rename = "sy_pnum", default)]
    pub system_planets: Option<u32>,
    #[serde(rename = "disc_year", default)]
    pub discovery_year: Option<i32>,
}

impl PlanetRecord {
    /// Parse a JSON array of rows.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(json)
    }
}
