use serde::{Deserialize, Serialize};

use crate::core::filter::UnknownPeriod;
use crate::core::projection::{ProjectionConfig, ViewMode};
use crate::systems::interaction::DEFAULT_HIT_RADIUS;
use crate::systems::orbital::DiagramConfig;

/// Configuration for the explorer, provided by the host page.
/// Every field has a default, so the page may pass a partial JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Pick distance in surface pixels (default: 14).
    pub hit_radius: f32,
    pub projection: ProjectionConfig,
    /// Twinkle angular speed, radians per second.
    pub twinkle_speed: f32,
    /// Background points per square surface pixel.
    pub starfield_density: f32,
    pub starfield_max_points: usize,
    /// Seed for twinkle phases and the starfield.
    pub seed: u64,
    pub diagram: DiagramConfig,
    /// How the period ceiling treats stars with no known period.
    pub unknown_period: UnknownPeriod,
    pub initial_view: ViewMode,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            hit_radius: DEFAULT_HIT_RADIUS,
            projection: ProjectionConfig::default(),
            twinkle_speed: 1.6,
            starfield_density: 0.00035,
            starfield_max_points: 900,
            seed: 0x6b65_706c_6572,
            diagram: DiagramConfig::default(),
            unknown_period: UnknownPeriod::Passes,
            initial_view: ViewMode::Sky,
        }
    }
}

impl ExplorerConfig {
    /// Parse a (possibly partial) config object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(ExplorerConfig::from_json("{}").unwrap(), ExplorerConfig::default());
    }

    #[test]
    fn partial_override() {
        let cfg = ExplorerConfig::from_json(
            r#"{"hit_radius": 20, "unknown_period": "fails", "projection": {"galaxy_px_per_pc": 0.5}}"#,
        )
        .unwrap();
        assert_eq!(cfg.hit_radius, 20.0);
        assert_eq!(cfg.unknown_period, UnknownPeriod::Fails);
        assert_eq!(cfg.projection.galaxy_px_per_pc, 0.5);
        assert_eq!(cfg.projection.field_ra, 290.67);
        assert_eq!(cfg.initial_view, ViewMode::Sky);
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(ExplorerConfig::from_json(r#"{"hit_radius": "wide"}"#).is_err());
    }
}
