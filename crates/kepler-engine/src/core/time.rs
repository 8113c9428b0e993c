/// Converts host frame timestamps (milliseconds, as handed to a
/// display-refresh callback) into an animation clock in seconds.
///
/// Per-frame deltas are capped so a backgrounded tab does not make every
/// star jump phase on return, and a timestamp that goes backwards (host
/// clock reset) counts as a zero-length frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    elapsed: f64,
    frames: u64,
    max_step: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_ms: None,
            elapsed: 0.0,
            frames: 0,
            max_step: 0.25,
        }
    }

    /// Advance to `timestamp_ms`. Returns elapsed animation seconds.
    pub fn tick(&mut self, timestamp_ms: f64) -> f32 {
        if let Some(last) = self.last_ms {
            let step = ((timestamp_ms - last) / 1000.0).clamp(0.0, self.max_step);
            if step.is_finite() {
                self.elapsed += step;
            }
        }
        self.last_ms = Some(timestamp_ms);
        self.frames += 1;
        self.elapsed as f32
    }

    /// Elapsed animation seconds as of the last tick.
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_starts_at_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(123_456.0), 0.0);
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn accumulates_frame_deltas() {
        let mut clock = FrameClock::new();
        clock.tick(1000.0);
        clock.tick(1016.0);
        let t = clock.tick(1032.0);
        assert!((t - 0.032).abs() < 1e-6, "t = {t}");
    }

    #[test]
    fn caps_long_pauses() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        let t = clock.tick(60_000.0);
        assert!((t - 0.25).abs() < 1e-6, "t = {t}");
    }

    #[test]
    fn backwards_timestamp_is_a_zero_step() {
        let mut clock = FrameClock::new();
        clock.tick(5000.0);
        clock.tick(5100.0);
        let before = clock.elapsed();
        let after = clock.tick(10.0);
        assert_eq!(before, after);
        let next = clock.tick(20.0);
        assert!(next > after);
    }
}
