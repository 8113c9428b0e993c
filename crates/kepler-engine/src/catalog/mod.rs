//! Catalog ingestion: raw planet rows, host grouping and the fallback sample.

pub mod grouping;
pub mod record;
pub mod sample;

pub use grouping::{group_by_host, Planet, StarSystem};
pub use record::PlanetRecord;
pub use sample::fallback_records;

use crate::api::types::StarId;

/// The loaded star systems plus a generation counter that changes on every
/// load, so derived data (visible subset, diagrams) can tell when it is stale.
#[derive(Debug, Default)]
pub struct Catalog {
    systems: Vec<StarSystem>,
    planets: usize,
    generation: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: &[PlanetRecord]) -> Self {
        let mut catalog = Self::new();
        catalog.replace(records);
        catalog
    }

    /// Regroup from scratch. Any `StarId` handed out before is now stale.
    pub fn replace(&mut self, records: &[PlanetRecord]) {
        self.systems = group_by_host(records);
        self.planets = records.len();
        self.generation += 1;
    }

    pub fn systems(&self) -> &[StarSystem] {
        &self.systems
    }

    pub fn get(&self, id: StarId) -> Option<&StarSystem> {
        self.systems.get(id.index())
    }

    /// Look a system up by host name.
    pub fn find(&self, host: &str) -> Option<StarId> {
        self.systems
            .iter()
            .position(|s| s.host == host)
            .map(StarId::from_index)
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn planet_count(&self) -> usize {
        self.planets
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_bumps_generation() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.generation(), 0);
        catalog.replace(&fallback_records());
        assert_eq!(catalog.generation(), 1);
        catalog.replace(&fallback_records());
        assert_eq!(catalog.generation(), 2);
    }

    #[test]
    fn counts_and_lookup() {
        let catalog = Catalog::from_records(&fallback_records());
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.planet_count(), 11);
        let id = catalog.find("Kepler-186").unwrap();
        assert_eq!(catalog.get(id).unwrap().planets.len(), 5);
        assert!(catalog.find("Kepler-1").is_none());
        assert!(catalog.get(StarId(99)).is_none());
    }
}
