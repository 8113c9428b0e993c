//! The three view projections: star → surface pixel position.
//!
//! Pure functions of the star's own fields, the viewport size and the
//! projection constants. f64 throughout; converted to f32 only for the final
//! screen coordinate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::catalog::StarSystem;
use crate::core::attributes::{estimate_luminosity, DEFAULT_TEFF};
use crate::renderer::viewport::Viewport;

/// Which projection is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Celestial sky around the Kepler field.
    #[default]
    Sky,
    /// Face-on galactic neighbourhood around the Sun.
    Galaxy,
    /// Hertzsprung-Russell diagram.
    Hr,
}

impl ViewMode {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sky" => Some(ViewMode::Sky),
            "galaxy" => Some(ViewMode::Galaxy),
            "hr" => Some(ViewMode::Hr),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ViewMode::Sky => "sky",
            ViewMode::Galaxy => "galaxy",
            ViewMode::Hr => "hr",
        }
    }
}

/// Margins around the HR plot area, surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Sky field centre, degrees (Kepler field).
    pub field_ra: f64,
    pub field_dec: f64,
    /// Degrees from centre to the viewport edge, horizontally and vertically.
    pub sky_half_span_ra: f64,
    pub sky_half_span_dec: f64,
    /// Galaxy view scale.
    pub galaxy_px_per_pc: f64,
    /// HR temperature axis, K. Hotter stars plot to the left.
    pub hr_teff_min: f64,
    pub hr_teff_max: f64,
    /// HR luminosity axis, log10(L / L☉).
    pub hr_log_lum_min: f64,
    pub hr_log_lum_max: f64,
    pub hr_margins: Margins,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            field_ra: 290.67,
            field_dec: 44.5,
            sky_half_span_ra: 12.0,
            sky_half_span_dec: 8.0,
            galaxy_px_per_pc: 0.35,
            hr_teff_min: 2500.0,
            hr_teff_max: 12_000.0,
            hr_log_lum_min: -2.5,
            hr_log_lum_max: 4.0,
            hr_margins: Margins {
                left: 56.0,
                right: 24.0,
                top: 24.0,
                bottom: 44.0,
            },
        }
    }
}

fn known(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Wrap an angle difference in degrees into [-180, 180).
fn wrap_degrees(delta: f64) -> f64 {
    (delta + 180.0).rem_euclid(360.0) - 180.0
}

/// Small-angle tangent-plane projection around the field centre.
/// East is left, north is up. Unknown coordinates land on the centre.
pub fn project_sky(star: &StarSystem, viewport: &Viewport, cfg: &ProjectionConfig) -> Vec2 {
    let ra = known(star.ra).unwrap_or(cfg.field_ra);
    let dec = known(star.dec).unwrap_or(cfg.field_dec);
    let half_w = viewport.width as f64 / 2.0;
    let half_h = viewport.height as f64 / 2.0;

    let d_ra = wrap_degrees(ra - cfg.field_ra) * dec.to_radians().cos();
    let d_dec = dec - cfg.field_dec;

    let x = half_w - d_ra / cfg.sky_half_span_ra * half_w;
    let y = half_h - d_dec / cfg.sky_half_span_dec * half_h;
    Vec2::new(x as f32, y as f32)
}

/// Observer-centred Cartesian position (pc) with the z axis dropped, seen
/// face-on. Stars without a usable distance fall back to the sky projection.
pub fn project_galaxy(star: &StarSystem, viewport: &Viewport, cfg: &ProjectionConfig) -> Vec2 {
    let (Some(ra), Some(dec), Some(dist)) = (known(star.ra), known(star.dec), known(star.distance))
    else {
        return project_sky(star, viewport, cfg);
    };
    if dist < 0.0 {
        return project_sky(star, viewport, cfg);
    }

    let (ra, dec) = (ra.to_radians(), dec.to_radians());
    let gx = dist * dec.cos() * ra.cos();
    let gy = dist * dec.cos() * ra.sin();

    let center = viewport.center();
    Vec2::new(
        center.x + (gx * cfg.galaxy_px_per_pc) as f32,
        center.y - (gy * cfg.galaxy_px_per_pc) as f32,
    )
}

/// log10 luminosity used on the HR vertical axis: the catalog value when
/// known, otherwise the Stefan-Boltzmann estimate from radius and teff.
pub fn hr_log_luminosity(star: &StarSystem) -> f64 {
    let lum = known(star.luminosity)
        .filter(|l| *l > 0.0)
        .unwrap_or_else(|| estimate_luminosity(star.radius, star.teff));
    let log = lum.log10();
    if log.is_nan() {
        0.0
    } else {
        log
    }
}

/// Horizontal HR coordinate for a temperature, clamped to the plot area.
pub fn hr_x(teff: f64, viewport: &Viewport, cfg: &ProjectionConfig) -> f32 {
    let m = &cfg.hr_margins;
    let plot_w = (viewport.width as f64 - m.left - m.right).max(0.0);
    let t = normalized(teff, cfg.hr_teff_min, cfg.hr_teff_max);
    (m.left + (1.0 - t) * plot_w) as f32
}

/// Vertical HR coordinate for a log luminosity, clamped to the plot area.
pub fn hr_y(log_lum: f64, viewport: &Viewport, cfg: &ProjectionConfig) -> f32 {
    let m = &cfg.hr_margins;
    let plot_h = (viewport.height as f64 - m.top - m.bottom).max(0.0);
    let l = normalized(log_lum, cfg.hr_log_lum_min, cfg.hr_log_lum_max);
    (m.top + (1.0 - l) * plot_h) as f32
}

/// Linear position of `value` in [lo, hi], clamped to [0, 1]. NaN maps to
/// the middle of the range.
fn normalized(value: f64, lo: f64, hi: f64) -> f64 {
    let t = (value - lo) / (hi - lo);
    if t.is_nan() {
        0.5
    } else {
        t.clamp(0.0, 1.0)
    }
}

/// Hertzsprung-Russell placement: hotter left, brighter up.
pub fn project_hr(star: &StarSystem, viewport: &Viewport, cfg: &ProjectionConfig) -> Vec2 {
    let teff = known(star.teff).unwrap_or(DEFAULT_TEFF);
    Vec2::new(
        hr_x(teff, viewport, cfg),
        hr_y(hr_log_luminosity(star), viewport, cfg),
    )
}

/// Dispatch on the active view mode.
pub fn project(mode: ViewMode, star: &StarSystem, viewport: &Viewport, cfg: &ProjectionConfig) -> Vec2 {
    match mode {
        ViewMode::Sky => project_sky(star, viewport, cfg),
        ViewMode::Galaxy => project_galaxy(star, viewport, cfg),
        ViewMode::Hr => project_hr(star, viewport, cfg),
    }
}
