//! Categorical labels and colors derived from physical quantities.
//!
//! Everything here is a pure function of its inputs. Unknown inputs map to
//! an explicit `Unknown` / `false` / default value instead of failing.

use serde::{Deserialize, Serialize};

use crate::systems::vector::VectorColor;

/// Upper radius bounds (Earth radii, inclusive) of the size ladder.
pub const EARTH_MAX_RADIUS: f64 = 1.25;
pub const SUPER_EARTH_MAX_RADIUS: f64 = 2.0;
pub const NEPTUNE_MAX_RADIUS: f64 = 6.0;

/// Habitable-zone insolation band, Earth units, both ends inclusive.
pub const HZ_MIN_INSOLATION: f64 = 0.25;
pub const HZ_MAX_INSOLATION: f64 = 1.75;

/// Stellar temperature band edges (K).
pub const COOL_BELOW_TEFF: f64 = 5000.0;
pub const HOT_ABOVE_TEFF: f64 = 6500.0;

/// Assumed effective temperature when a star reports none.
pub const DEFAULT_TEFF: f64 = 5500.0;
/// Solar effective temperature used as the Stefan-Boltzmann reference.
pub const SOLAR_TEFF: f64 = 5772.0;

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Planet size class from radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    Earth,
    SuperEarth,
    Neptune,
    Jupiter,
    Unknown,
}

impl SizeCategory {
    pub fn from_radius(radius: Option<f64>) -> Self {
        match finite(radius) {
            None => SizeCategory::Unknown,
            Some(r) if r <= EARTH_MAX_RADIUS => SizeCategory::Earth,
            Some(r) if r <= SUPER_EARTH_MAX_RADIUS => SizeCategory::SuperEarth,
            Some(r) if r <= NEPTUNE_MAX_RADIUS => SizeCategory::Neptune,
            Some(_) => SizeCategory::Jupiter,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizeCategory::Earth => "Earth-size",
            SizeCategory::SuperEarth => "Super-Earth",
            SizeCategory::Neptune => "Neptune-like",
            SizeCategory::Jupiter => "Jupiter-like",
            SizeCategory::Unknown => "Unknown",
        }
    }

    pub fn color(self) -> VectorColor {
        match self {
            SizeCategory::Earth => VectorColor::rgb8(77, 208, 225),
            SizeCategory::SuperEarth => VectorColor::rgb8(102, 187, 106),
            SizeCategory::Neptune => VectorColor::rgb8(92, 107, 192),
            SizeCategory::Jupiter => VectorColor::rgb8(255, 167, 38),
            SizeCategory::Unknown => VectorColor::rgb8(144, 164, 174),
        }
    }
}

/// Whether an insolation flux falls in the heuristic habitable zone.
pub fn is_habitable(insolation: Option<f64>) -> bool {
    finite(insolation)
        .map(|s| (HZ_MIN_INSOLATION..=HZ_MAX_INSOLATION).contains(&s))
        .unwrap_or(false)
}

/// Stellar temperature band: cool below 5000 K, hot above 6500 K, solar
/// in between (edges inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureBand {
    Cool,
    Solar,
    Hot,
}

impl TemperatureBand {
    pub fn from_teff(teff: Option<f64>) -> Option<Self> {
        let t = finite(teff)?;
        Some(if t < COOL_BELOW_TEFF {
            TemperatureBand::Cool
        } else if t <= HOT_ABOVE_TEFF {
            TemperatureBand::Solar
        } else {
            TemperatureBand::Hot
        })
    }
}

/// Display color for a star, stepping down the O-B-A-F-G-K-M blackbody
/// ladder. Unknown temperature is drawn as a 5500 K star.
pub fn star_color(teff: Option<f64>) -> VectorColor {
    let t = finite(teff).unwrap_or(DEFAULT_TEFF);
    if t >= 30_000.0 {
        VectorColor::rgb8(155, 176, 255)
    } else if t >= 10_000.0 {
        VectorColor::rgb8(170, 191, 255)
    } else if t >= 7_500.0 {
        VectorColor::rgb8(202, 215, 255)
    } else if t >= 6_000.0 {
        VectorColor::rgb8(248, 247, 255)
    } else if t >= 5_200.0 {
        VectorColor::rgb8(255, 244, 234)
    } else if t >= 3_700.0 {
        VectorColor::rgb8(255, 210, 161)
    } else {
        VectorColor::rgb8(255, 204, 111)
    }
}

/// Luminosity in solar units from radius (solar radii) and temperature via
/// L = R² (T / T☉)⁴. Unknown radius counts as 1 R☉, unknown temperature as
/// [`DEFAULT_TEFF`].
pub fn estimate_luminosity(radius: Option<f64>, teff: Option<f64>) -> f64 {
    let r = finite(radius).unwrap_or(1.0);
    let t = finite(teff).unwrap_or(DEFAULT_TEFF);
    r * r * (t / SOLAR_TEFF).powi(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_ladder_boundaries() {
        let radii = [1.0, 1.25, 1.26, 2.0, 2.01, 6.0, 6.01];
        let expected = [
            SizeCategory::Earth,
            SizeCategory::Earth,
            SizeCategory::SuperEarth,
            SizeCategory::SuperEarth,
            SizeCategory::Neptune,
            SizeCategory::Neptune,
            SizeCategory::Jupiter,
        ];
        for (r, want) in radii.iter().zip(expected) {
            assert_eq!(SizeCategory::from_radius(Some(*r)), want, "radius {r}");
        }
    }

    #[test]
    fn unknown_radius_is_unknown_category() {
        assert_eq!(SizeCategory::from_radius(None), SizeCategory::Unknown);
        assert_eq!(SizeCategory::from_radius(Some(f64::NAN)), SizeCategory::Unknown);
    }

    #[test]
    fn size_labels_for_display() {
        assert_eq!(SizeCategory::from_radius(Some(1.0)).label(), "Earth-size");
        assert_eq!(SizeCategory::from_radius(Some(1.8)).label(), "Super-Earth");
        assert_eq!(SizeCategory::from_radius(Some(11.0)).label(), "Jupiter-like");
        assert_eq!(SizeCategory::from_radius(None).label(), "Unknown");
    }

    #[test]
    fn habitable_zone_boundaries() {
        assert!(is_habitable(Some(0.25)));
        assert!(is_habitable(Some(1.75)));
        assert!(is_habitable(Some(1.0)));
        assert!(!is_habitable(Some(0.24)));
        assert!(!is_habitable(Some(1.76)));
        assert!(!is_habitable(None));
        assert!(!is_habitable(Some(f64::NAN)));
    }

    #[test]
    fn temperature_bands() {
        assert_eq!(TemperatureBand::from_teff(Some(3800.0)), Some(TemperatureBand::Cool));
        assert_eq!(TemperatureBand::from_teff(Some(5000.0)), Some(TemperatureBand::Solar));
        assert_eq!(TemperatureBand::from_teff(Some(6500.0)), Some(TemperatureBand::Solar));
        assert_eq!(TemperatureBand::from_teff(Some(6501.0)), Some(TemperatureBand::Hot));
        assert_eq!(TemperatureBand::from_teff(None), None);
    }

    #[test]
    fn star_color_gets_bluer_with_temperature() {
        let cool = star_color(Some(3000.0));
        let solar = star_color(Some(5800.0));
        let hot = star_color(Some(20_000.0));
        assert!(cool.r > cool.b);
        assert!(hot.b > hot.r);
        assert!(hot.b / hot.r > solar.b / solar.r);
    }

    #[test]
    fn unknown_temperature_uses_default_color() {
        assert_eq!(star_color(None), star_color(Some(DEFAULT_TEFF)));
    }

    #[test]
    fn sun_like_luminosity_is_one() {
        let l = estimate_luminosity(Some(1.0), Some(SOLAR_TEFF));
        assert!((l - 1.0).abs() < 1e-12);
        let doubled = estimate_luminosity(Some(2.0), Some(SOLAR_TEFF));
        assert!((doubled - 4.0).abs() < 1e-12);
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&SizeCategory::SuperEarth).unwrap();
        assert_eq!(json, "\"superearth\"");
    }
}
