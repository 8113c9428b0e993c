//! Flat planet rows → one aggregate per host star.

use std::collections::HashMap;

use serde::Serialize;

use super::record::PlanetRecord;
use crate::core::attributes::{is_habitable, star_color, SizeCategory};
use crate::systems::vector::VectorColor;

/// A planet with its derived size class and habitable-zone flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Planet {
    pub name: String,
    pub radius: Option<f64>,
    pub period: Option<f64>,
    pub eq_temp: Option<f64>,
    pub mass: Option<f64>,
    pub insolation: Option<f64>,
    pub semi_major_axis: Option<f64>,
    pub discovery_year: Option<i32>,
    pub category: SizeCategory,
    pub hz: bool,
}

impl Planet {
    pub fn from_record(record: &PlanetRecord) -> Self {
        Self {
            name: record.name.clone(),
            radius: record.radius,
            period: record.period,
            eq_temp: record.eq_temp,
            mass: record.mass,
            insolation: record.insolation,
            semi_major_axis: record.semi_major_axis,
            discovery_year: record.discovery_year,
            category: SizeCategory::from_radius(record.radius),
            hz: is_habitable(record.insolation),
        }
    }

    /// Orbital period if it is a usable number.
    pub fn known_period(&self) -> Option<f64> {
        self.period.filter(|p| p.is_finite())
    }
}

/// A host star and its planets.
///
/// Stellar fields come from the first row seen for the host. `min_period`
/// and `min_year` are `+∞` until a planet with a defined value is added.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarSystem {
    pub host: String,
    pub ra: Option<f64>,
    pub dec: Option<f64>,
    pub teff: Option<f64>,
    pub radius: Option<f64>,
    pub mass: Option<f64>,
    /// Linear, solar units.
    pub luminosity: Option<f64>,
    pub distance: Option<f64>,
    pub reported_planets: Option<u32>,
    pub planets: Vec<Planet>,
    pub color: VectorColor,
    pub has_earth: bool,
    pub has_hz: bool,
    pub min_period: f64,
    pub min_year: f64,
}

impl StarSystem {
    fn from_host_record(record: &PlanetRecord) -> Self {
        Self {
            host: record.host.clone(),
            ra: record.ra,
            dec: record.dec,
            teff: record.star_teff,
            radius: record.star_radius,
            mass: record.star_mass,
            luminosity: record
                .star_log_luminosity
                .filter(|l| l.is_finite())
                .map(|l| 10f64.powf(l)),
            distance: record.distance,
            reported_planets: record.system_planets,
            planets: Vec::new(),
            color: star_color(record.star_teff),
            has_earth: false,
            has_hz: false,
            min_period: f64::INFINITY,
            min_year: f64::INFINITY,
        }
    }

    fn add_planet(&mut self, planet: Planet) {
        self.has_hz |= planet.hz;
        self.has_earth |= planet.category == SizeCategory::Earth;
        if let Some(period) = planet.known_period() {
            self.min_period = self.min_period.min(period);
        }
        if let Some(year) = planet.discovery_year {
            self.min_year = self.min_year.min(year as f64);
        }
        self.planets.push(planet);
    }

    /// Reported planet count, or the number of planets in the catalog when
    /// the archive gives none.
    pub fn planet_count(&self) -> usize {
        self.reported_planets
            .map(|n| n as usize)
            .unwrap_or(self.planets.len())
    }

    /// Earliest discovery year, if any planet has one.
    pub fn first_discovery_year(&self) -> Option<i32> {
        self.min_year.is_finite().then_some(self.min_year as i32)
    }
}

/// Group rows by host name, preserving first-seen host order.
///
/// Every row becomes exactly one planet; nothing is dropped. Pure: equal
/// input gives structurally equal output.
pub fn group_by_host(records: &[PlanetRecord]) -> Vec<StarSystem> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut systems: Vec<StarSystem> = Vec::new();

    for record in records {
        if record.host.is_empty() {
            log::warn!("planet row {:?} has no host name", record.name);
        }
        let slot = *slots.entry(record.host.as_str()).or_insert_with(|| {
            systems.push(StarSystem::from_host_record(record));
            systems.len() - 1
        });
        systems[slot].add_planet(Planet::from_record(record));
    }

    systems
}
