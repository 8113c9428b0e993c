//! Per-star brightness oscillation.

use crate::core::rng::Rng;

/// Base brightness and swing of the twinkle factor.
pub const TWINKLE_BASE: f32 = 0.82;
pub const TWINKLE_AMPLITUDE: f32 = 0.18;

/// One random phase per catalog entry, re-derived whenever the catalog size
/// changes.
#[derive(Debug, Clone)]
pub struct Twinkle {
    phases: Vec<f32>,
    speed: f32,
    seed: u64,
    reseeds: u64,
}

impl Twinkle {
    pub fn new(seed: u64, speed: f32) -> Self {
        Self {
            phases: Vec::new(),
            speed,
            seed,
            reseeds: 0,
        }
    }

    /// Match the phase table to `len` stars. Returns true if it was rebuilt.
    pub fn sync(&mut self, len: usize) -> bool {
        if self.phases.len() == len {
            return false;
        }
        self.reseeds += 1;
        let mut rng = Rng::new(self.seed.wrapping_add(self.reseeds));
        self.phases = (0..len).map(|_| rng.range(0.0, std::f32::consts::TAU)).collect();
        log::debug!("twinkle: {} phases", len);
        true
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Brightness multiplier for star `index` at animation time `t` seconds,
    /// in [0.64, 1.0].
    pub fn factor(&self, index: usize, t: f32) -> f32 {
        let phase = self.phases.get(index).copied().unwrap_or(0.0);
        TWINKLE_BASE + TWINKLE_AMPLITUDE * (t * self.speed + phase).sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_rebuilds_only_on_size_change() {
        let mut tw = Twinkle::new(11, 1.4);
        assert!(tw.sync(5));
        assert!(!tw.sync(5));
        assert!(tw.sync(7));
        assert_eq!(tw.len(), 7);
    }

    #[test]
    fn factor_stays_in_range() {
        let mut tw = Twinkle::new(2, 1.4);
        tw.sync(50);
        for i in 0..50 {
            for step in 0..100 {
                let f = tw.factor(i, step as f32 * 0.37);
                assert!((0.64 - 1e-5..=1.0 + 1e-5).contains(&f), "factor {f}");
            }
        }
    }

    #[test]
    fn phases_desynchronize_stars() {
        let mut tw = Twinkle::new(2, 1.4);
        tw.sync(10);
        let at_zero: Vec<f32> = (0..10).map(|i| tw.factor(i, 0.0)).collect();
        assert!(at_zero.windows(2).any(|w| (w[0] - w[1]).abs() > 1e-3));
    }
}
