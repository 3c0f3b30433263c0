//! Time management utilities

use std::time::Instant;

/// Frame clock driving the rotation rate adjustment
///
/// Rotation rules are tuned for a reference frame rate. The clock turns the
/// measured frame delta into an `fps_adjust` factor (reference rate divided by
/// the current rate) so angular displacement per real second stays constant.
pub struct FrameClock {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
    reference_fps: f32,
}

impl FrameClock {
    /// Create a new clock tuned for the given reference frame rate
    pub fn new(reference_fps: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
            reference_fps,
        }
    }

    /// Sample the wall clock (should be called once per frame)
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance_by(elapsed)
    }

    /// Advance by an explicit delta in seconds, returning the fps adjustment
    ///
    /// Used by hosts with their own timing source and by deterministic loops.
    pub fn advance_by(&mut self, delta_seconds: f32) -> f32 {
        self.delta_time = delta_seconds.max(0.0);
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.fps_adjust()
    }

    /// Ratio of the reference frame rate to the current frame rate
    ///
    /// Returns 1.0 until a non-zero delta has been observed.
    pub fn fps_adjust(&self) -> f32 {
        let adjust = self.reference_fps * self.delta_time;
        if adjust.is_finite() && adjust > 0.0 {
            adjust
        } else {
            1.0
        }
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since clock creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (based on last frame time)
    pub fn current_fps(&self) -> f32 {
        if self.delta_time > 0.0 {
            1.0 / self.delta_time
        } else {
            0.0
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fps_adjust_at_reference_rate() {
        let mut clock = FrameClock::new(60.0);
        let adjust = clock.advance_by(1.0 / 60.0);
        assert_relative_eq!(adjust, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_fps_adjust_at_half_rate() {
        let mut clock = FrameClock::new(60.0);
        let adjust = clock.advance_by(1.0 / 30.0);
        assert_relative_eq!(adjust, 2.0, epsilon = 1e-5);
        assert_relative_eq!(clock.current_fps(), 30.0, epsilon = 1e-3);
    }

    #[test]
    fn test_zero_delta_defaults_to_one() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.fps_adjust(), 1.0);
        assert_eq!(clock.advance_by(0.0), 1.0);
        assert_eq!(clock.frame_count(), 1);
    }
}
