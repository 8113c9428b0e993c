//! Filter criteria and the visible subset.
//!
//! A star is visible when every clause passes. Each clause is independent
//! and `All`/inactive clauses accept everything, so relaxing any clause can
//! only grow the visible set.

use serde::{Deserialize, Serialize};

use crate::api::types::StarId;
use crate::catalog::{Catalog, StarSystem};
use crate::core::attributes::{SizeCategory, TemperatureBand};

pub const PERIOD_CEILING_MIN: u32 = 1;
pub const PERIOD_CEILING_MAX: u32 = 730;
pub const YEAR_FLOOR_MIN: i32 = 2009;
pub const YEAR_FLOOR_MAX: i32 = 2018;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeFilter {
    #[default]
    All,
    Earth,
    SuperEarth,
    Neptune,
    Jupiter,
    Unknown,
}

impl SizeFilter {
    fn category(self) -> Option<SizeCategory> {
        match self {
            SizeFilter::All => None,
            SizeFilter::Earth => Some(SizeCategory::Earth),
            SizeFilter::SuperEarth => Some(SizeCategory::SuperEarth),
            SizeFilter::Neptune => Some(SizeCategory::Neptune),
            SizeFilter::Jupiter => Some(SizeCategory::Jupiter),
            SizeFilter::Unknown => Some(SizeCategory::Unknown),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureFilter {
    #[default]
    All,
    Cool,
    Solar,
    Hot,
}

impl TemperatureFilter {
    fn band(self) -> Option<TemperatureBand> {
        match self {
            TemperatureFilter::All => None,
            TemperatureFilter::Cool => Some(TemperatureBand::Cool),
            TemperatureFilter::Solar => Some(TemperatureBand::Solar),
            TemperatureFilter::Hot => Some(TemperatureBand::Hot),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiplicityFilter {
    #[default]
    All,
    /// Two or more planets.
    Multi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitableFilter {
    #[default]
    All,
    /// At least one planet in the habitable zone.
    Hz,
}

/// How the period ceiling treats a planet whose period is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPeriod {
    #[default]
    Passes,
    Fails,
}

/// The user's filter criteria.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FilterState {
    pub size: SizeFilter,
    pub temperature: TemperatureFilter,
    pub multiplicity: MultiplicityFilter,
    pub habitable: HabitableFilter,
    /// Days, 1..=730.
    pub max_period: u32,
    /// Discovery year, 2009..=2018.
    pub min_year: i32,
    /// Case-insensitive substring of host or planet name; empty is inactive.
    pub search: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            size: SizeFilter::All,
            temperature: TemperatureFilter::All,
            multiplicity: MultiplicityFilter::All,
            habitable: HabitableFilter::All,
            max_period: PERIOD_CEILING_MAX,
            min_year: YEAR_FLOOR_MIN,
            search: String::new(),
        }
    }
}

impl FilterState {
    pub fn set_max_period(&mut self, days: u32) {
        self.max_period = days.clamp(PERIOD_CEILING_MIN, PERIOD_CEILING_MAX);
    }

    pub fn set_min_year(&mut self, year: i32) {
        self.min_year = year.clamp(YEAR_FLOOR_MIN, YEAR_FLOOR_MAX);
    }

    /// Copy with the numeric fields clamped into their slider ranges.
    pub fn normalized(mut self) -> Self {
        self.set_max_period(self.max_period);
        self.set_min_year(self.min_year);
        self
    }

    /// Parse a (possibly partial) filter object. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::normalized)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Copy with one field replaced, e.g. `("maxPeriod", 200)` or
    /// `("size", "earth")`. Unknown field names and ill-typed values are
    /// errors; numeric values are clamped.
    pub fn with_field(&self, field: &str, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let mut object = match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        object.insert(field.to_string(), value);
        serde_json::from_value::<Self>(serde_json::Value::Object(object)).map(Self::normalized)
    }

    /// Whether every clause accepts `star`, with unknown periods passing.
    pub fn matches(&self, star: &StarSystem) -> bool {
        self.matches_with(star, UnknownPeriod::Passes)
    }

    pub fn matches_with(&self, star: &StarSystem, unknown_period: UnknownPeriod) -> bool {
        self.size_passes(star)
            && self.temperature_passes(star)
            && self.multiplicity_passes(star)
            && self.habitable_passes(star)
            && self.period_passes(star, unknown_period)
            && self.year_passes(star)
            && self.search_passes(star)
    }

    fn size_passes(&self, star: &StarSystem) -> bool {
        match self.size.category() {
            None => true,
            Some(category) => star.planets.iter().any(|p| p.category == category),
        }
    }

    fn temperature_passes(&self, star: &StarSystem) -> bool {
        match self.temperature.band() {
            None => true,
            Some(band) => TemperatureBand::from_teff(star.teff) == Some(band),
        }
    }

    fn multiplicity_passes(&self, star: &StarSystem) -> bool {
        match self.multiplicity {
            MultiplicityFilter::All => true,
            MultiplicityFilter::Multi => star.planet_count() >= 2,
        }
    }

    fn habitable_passes(&self, star: &StarSystem) -> bool {
        match self.habitable {
            HabitableFilter::All => true,
            HabitableFilter::Hz => star.has_hz,
        }
    }

    /// One planet under the ceiling is enough. A planet with no known
    /// period counts as under it when the policy says so.
    fn period_passes(&self, star: &StarSystem, unknown_period: UnknownPeriod) -> bool {
        if star.planets.is_empty() {
            return unknown_period == UnknownPeriod::Passes;
        }
        let ceiling = self.max_period as f64;
        star.planets.iter().any(|p| match p.known_period() {
            Some(days) => days <= ceiling,
            None => unknown_period == UnknownPeriod::Passes,
        })
    }

    fn year_passes(&self, star: &StarSystem) -> bool {
        // Stars with no dated planet are exempt.
        !star.min_year.is_finite() || star.min_year >= self.min_year as f64
    }

    fn search_passes(&self, star: &StarSystem) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        star.host.to_lowercase().contains(&needle)
            || star.planets.iter().any(|p| p.name.to_lowercase().contains(&needle))
    }
}

/// Ids of the systems that pass `filter`, in catalog order.
pub fn visible_subset(systems: &[StarSystem], filter: &FilterState, unknown_period: UnknownPeriod) -> Vec<StarId> {
    systems
        .iter()
        .enumerate()
        .filter(|(_, star)| filter.matches_with(star, unknown_period))
        .map(|(index, _)| StarId::from_index(index))
        .collect()
}

/// Memoized visible subset, recomputed only when the catalog generation,
/// the filter or the unknown-period policy changes.
#[derive(Debug, Default)]
pub struct VisibleSet {
    key: Option<(u64, FilterState, UnknownPeriod)>,
    ids: Vec<StarId>,
}

impl VisibleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh(&mut self, catalog: &Catalog, filter: &FilterState, unknown_period: UnknownPeriod) -> &[StarId] {
        let fresh = match &self.key {
            Some((generation, cached, policy)) => {
                *generation == catalog.generation() && cached == filter && *policy == unknown_period
            }
            None => false,
        };
        if !fresh {
            self.ids = visible_subset(catalog.systems(), filter, unknown_period);
            log::debug!("visible subset: {} of {} systems", self.ids.len(), catalog.len());
            self.key = Some((catalog.generation(), filter.clone(), unknown_period));
        }
        &self.ids
    }

    /// Last computed ids, possibly stale.
    pub fn ids(&self) -> &[StarId] {
        &self.ids
    }

    pub fn contains(&self, id: StarId) -> bool {
        self.ids.binary_search(&id).is_ok()
    }
}
