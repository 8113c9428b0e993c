//! Decorative background starfield.
//!
//! Points are stored in normalized surface coordinates so the same field
//! survives resizes and mode switches. Generated once, on the first paint
//! that has a usable surface, and never hit-tested.

use glam::Vec2;

use crate::core::rng::Rng;
use crate::renderer::viewport::Viewport;
use crate::systems::vector::{VectorColor, VectorState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStar {
    /// Position as a fraction of surface width / height.
    pub u: f32,
    pub v: f32,
    pub radius: f32,
    pub alpha: f32,
}

#[derive(Debug, Clone)]
pub struct Starfield {
    points: Option<Vec<FieldStar>>,
    seed: u64,
    /// Points per square surface pixel.
    density: f32,
    max_points: usize,
}

impl Starfield {
    pub fn new(seed: u64, density: f32, max_points: usize) -> Self {
        Self {
            points: None,
            seed,
            density: density.max(0.0),
            max_points,
        }
    }

    pub fn is_generated(&self) -> bool {
        self.points.is_some()
    }

    pub fn points(&self) -> &[FieldStar] {
        self.points.as_deref().unwrap_or(&[])
    }

    /// Generate the field if this is the first usable surface.
    pub fn ensure(&mut self, viewport: &Viewport) -> &[FieldStar] {
        if self.points.is_none() && !viewport.is_empty() {
            let count = ((viewport.area() * self.density) as usize).min(self.max_points);
            let mut rng = Rng::new(self.seed);
            let points = (0..count)
                .map(|_| FieldStar {
                    u: rng.next_f32(),
                    v: rng.next_f32(),
                    radius: rng.range(0.3, 1.2),
                    alpha: rng.range(0.15, 0.6),
                })
                .collect::<Vec<_>>();
            log::debug!("starfield: {} points for {}x{}", points.len(), viewport.width, viewport.height);
            self.points = Some(points);
        }
        self.points()
    }

    pub fn paint(&mut self, viewport: &Viewport, vectors: &mut VectorState) {
        let size = viewport.size();
        for star in self.ensure(viewport) {
            let at = Vec2::new(star.u, star.v) * size;
            vectors.fill_circle(at, star.radius, VectorColor::WHITE.with_alpha(star.alpha));
        }
    }
}
