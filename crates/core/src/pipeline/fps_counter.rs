use std::time::Instant;

/// Average frame rate since the counter started: frames / elapsed seconds.
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    start: Instant,
    frames: u64,
}

impl FpsCounter {
    pub fn start_at(start: Instant) -> Self {
        Self { start, frames: 0 }
    }

    pub fn start() -> Self {
        Self::start_at(Instant::now())
    }

    /// Counts one frame and returns the rate as of `now`.
    ///
    /// Returns 0 when no time has elapsed.
    pub fn tick_at(&mut self, now: Instant) -> f64 {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.start).as_secs_f64();
        if elapsed > 0.0 {
            self.frames as f64 / elapsed
        } else {
            0.0
        }
    }

    pub fn tick(&mut self) -> f64 {
        self.tick_at(Instant::now())
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::time::Duration;

    #[test]
    fn test_zero_elapsed_is_zero() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::start_at(t0);
        assert_eq!(fps.tick_at(t0), 0.0);
        assert_eq!(fps.frames(), 1);
    }

    #[test]
    fn test_rate_is_frames_over_seconds() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::start_at(t0);
        for i in 1..=9 {
            fps.tick_at(t0 + Duration::from_millis(100 * i));
        }
        let rate = fps.tick_at(t0 + Duration::from_secs(2));
        assert_relative_eq!(rate, 5.0);
    }

    #[test]
    fn test_clock_before_start_is_not_negative() {
        let t0 = Instant::now() + Duration::from_secs(5);
        let mut fps = FpsCounter::start_at(t0);
        assert_eq!(fps.tick_at(Instant::now()), 0.0);
    }
}
