//! Static orbital diagram for one star system.
//!
//! Illustrative, not to scale: planets with a known period get evenly
//! spaced rings ordered by period, and a fixed band of the radial range is
//! shaded as the habitable zone.

use std::cmp::Ordering;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::catalog::{Planet, StarSystem};
use crate::core::attributes::SizeCategory;
use crate::renderer::frame::{Frame, TextAlign};
use crate::renderer::viewport::Viewport;
use crate::systems::vector::VectorColor;

const BACKGROUND: VectorColor = VectorColor::rgb(0.02, 0.03, 0.07);
const RING: VectorColor = VectorColor::new(0.6, 0.68, 0.85, 0.25);
const HZ_FILL: VectorColor = VectorColor::new(0.3, 0.85, 0.45, 0.12);
const HZ_STROKE: VectorColor = VectorColor::new(0.55, 1.0, 0.65, 0.95);
const CAPTION: VectorColor = VectorColor::new(0.75, 0.8, 0.92, 0.85);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Innermost and outermost ring radii as fractions of half the smaller
    /// diagram side.
    pub inner: f32,
    pub outer: f32,
    /// Habitable-zone band as fractions of the inner..outer range.
    pub hz_start: f32,
    pub hz_end: f32,
    /// Star glow radius, same units as `inner`.
    pub star_glow: f32,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            inner: 0.22,
            outer: 0.88,
            hz_start: 0.38,
            hz_end: 0.62,
            star_glow: 0.16,
        }
    }
}

/// Drawn planet radius in pixels by size class.
pub fn planet_draw_radius(category: SizeCategory) -> f32 {
    match category {
        SizeCategory::Earth => 3.0,
        SizeCategory::SuperEarth => 4.0,
        SizeCategory::Neptune => 5.5,
        SizeCategory::Jupiter => 7.0,
        SizeCategory::Unknown => 3.5,
    }
}

/// One planet's slot in the diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSlot<'a> {
    pub planet: &'a Planet,
    pub ring_radius: f32,
    /// Radians.
    pub angle: f32,
}

/// Ring radius and angle for every planet with a known period, innermost
/// (shortest period) first. `inner` and `outer` are in pixels.
pub fn orbit_layout(star: &StarSystem, inner: f32, outer: f32) -> Vec<OrbitSlot<'_>> {
    let mut planets: Vec<&Planet> = star
        .planets
        .iter()
        .filter(|p| p.known_period().is_some())
        .collect();
    planets.sort_by(|a, b| {
        a.known_period()
            .partial_cmp(&b.known_period())
            .unwrap_or(Ordering::Equal)
    });

    let n = planets.len();
    planets
        .into_iter()
        .enumerate()
        .map(|(i, planet)| {
            let ring_radius = if n == 1 {
                (inner + outer) / 2.0
            } else {
                inner + (outer - inner) * i as f32 / (n - 1) as f32
            };
            OrbitSlot {
                planet,
                ring_radius,
                angle: i as f32 / n as f32 * std::f32::consts::TAU,
            }
        })
        .collect()
}

/// Paint the diagram for `star` into `frame` at `size` pixels.
pub fn paint_orbital_diagram(star: &StarSystem, size: Vec2, cfg: &DiagramConfig, frame: &mut Frame) {
    frame.begin(Viewport::new(size.x, size.y));
    let viewport = frame.viewport;
    if viewport.is_empty() {
        return;
    }

    let center = viewport.center();
    let half = viewport.width.min(viewport.height) / 2.0;
    let inner = half * cfg.inner;
    let outer = half * cfg.outer;
    let v = &mut frame.vectors;

    v.fill_rect(Vec2::ZERO, viewport.width, viewport.height, BACKGROUND);

    let span = outer - inner;
    v.fill_annulus(center, inner + span * cfg.hz_start, inner + span * cfg.hz_end, HZ_FILL);

    v.fill_glow(center, half * cfg.star_glow * 2.0, 5, star.color.with_alpha(0.12));
    v.fill_circle(center, half * cfg.star_glow * 0.5, star.color);

    let slots = orbit_layout(star, inner, outer);
    for slot in &slots {
        v.stroke_circle(center, slot.ring_radius, 1.0, RING);
    }
    for slot in &slots {
        let at = center + Vec2::from_angle(slot.angle) * slot.ring_radius;
        let color = slot.planet.category.color();
        let r = planet_draw_radius(slot.planet.category);
        v.fill_glow(at, r * 2.2, 3, color.with_alpha(0.12));
        v.fill_circle(at, r, color);
        if slot.planet.hz {
            v.stroke_circle(at, r + 2.5, 1.5, HZ_STROKE);
        }
    }

    for slot in &slots {
        let at = center + Vec2::from_angle(slot.angle) * slot.ring_radius;
        let r = planet_draw_radius(slot.planet.category);
        frame.label(
            slot.planet.name.clone(),
            at + Vec2::new(0.0, r + 12.0),
            10.0,
            CAPTION,
            TextAlign::Center,
        );
    }
    frame.label(
        "Habitable zone (illustrative)",
        Vec2::new(center.x, viewport.height - 10.0),
        10.0,
        HZ_STROKE.with_alpha(0.7),
        TextAlign::Center,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{fallback_records, group_by_host, PlanetRecord};

    fn kepler_186() -> StarSystem {
        group_by_host(&fallback_records())
            .into_iter()
            .find(|s| s.host == "Kepler-186")
            .unwrap()
    }

    #[test]
    fn rings_ordered_by_period_and_evenly_spaced() {
        let star = kepler_186();
        let slots = orbit_layout(&star, 20.0, 100.0);
        let names: Vec<&str> = slots.iter().map(|s| s.planet.name.as_str()).collect();
        assert_eq!(names, ["Kepler-186 b", "Kepler-186 c", "Kepler-186 d", "Kepler-186 e", "Kepler-186 f"]);
        let radii: Vec<f32> = slots.iter().map(|s| s.ring_radius).collect();
        assert_eq!(radii, [20.0, 40.0, 60.0, 80.0, 100.0]);
        assert!((slots[1].angle - std::f32::consts::TAU / 5.0).abs() < 1e-6);
    }

    #[test]
    fn unknown_periods_get_no_ring() {
        let rows = vec![
            PlanetRecord {
                host: "S".into(),
                name: "S b".into(),
                period: Some(30.0),
                ..Default::default()
            },
            PlanetRecord {
                host: "S".into(),
                name: "S c".into(),
                ..Default::default()
            },
        ];
        let star = group_by_host(&rows).remove(0);
        let slots = orbit_layout(&star, 20.0, 100.0);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].ring_radius, 60.0);
        assert_eq!(slots[0].angle, 0.0);
    }

    #[test]
    fn planet_sizes_follow_category() {
        assert!(planet_draw_radius(SizeCategory::Earth) < planet_draw_radius(SizeCategory::SuperEarth));
        assert!(planet_draw_radius(SizeCategory::Neptune) < planet_draw_radius(SizeCategory::Jupiter));
    }

    #[test]
    fn paints_one_label_per_orbiting_planet() {
        let star = kepler_186();
        let mut frame = Frame::new();
        paint_orbital_diagram(&star, Vec2::new(320.0, 320.0), &DiagramConfig::default(), &mut frame);
        assert!(frame.vectors.vertex_count() > 0);
        assert_eq!(frame.labels.len(), 6);
        assert!(frame.labels.iter().any(|l| l.text == "Kepler-186 f"));
    }

    #[test]
    fn empty_size_paints_nothing() {
        let star = kepler_186();
        let mut frame = Frame::new();
        paint_orbital_diagram(&star, Vec2::ZERO, &DiagramConfig::default(), &mut frame);
        assert_eq!(frame.vectors.vertex_count(), 0);
        assert!(frame.labels.is_empty());
    }
}
