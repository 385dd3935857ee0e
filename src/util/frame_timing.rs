use web_time::{Duration, Instant};

/// Largest frame delta handed to the engine. Longer gaps (a backgrounded
/// tab, a debugger pause) are clamped so a running tween doesn't jump.
const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Frame timing with FPS calculation and optional frame limiting
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    pub fn new(target_fps: u32) -> Self {
        Self {
            target_fps,
            min_frame_duration: min_frame_duration(target_fps),
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Whether enough time has passed since the last frame to render again.
    pub fn should_render(&self) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Mark the end of a frame. Returns the (clamped) time since the
    /// previous frame, which is what the engine tick consumes.
    pub fn end_frame(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.record(elapsed)
    }

    fn record(&mut self, elapsed: Duration) -> Duration {
        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            // Exponential moving average for smooth display
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        elapsed.min(MAX_FRAME_DELTA)
    }

    /// Get the current FPS (smoothed)
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

fn min_frame_duration(target_fps: u32) -> Duration {
    if target_fps > 0 {
        Duration::from_secs_f64(1.0 / f64::from(target_fps))
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_always_renders() {
        let timing = FrameTiming::new(0);
        assert!(timing.should_render());
    }

    #[test]
    fn capped_timer_waits_for_the_next_slot() {
        let timing = FrameTiming::new(1);
        assert!(!timing.should_render());
    }

    #[test]
    fn long_gaps_are_clamped() {
        let mut timing = FrameTiming::new(60);
        let dt = timing.record(Duration::from_secs(3));
        assert_eq!(dt, MAX_FRAME_DELTA);
        let dt = timing.record(Duration::from_millis(16));
        assert_eq!(dt, Duration::from_millis(16));
    }

    #[test]
    fn fps_moves_toward_observed_rate() {
        let mut timing = FrameTiming::new(0);
        for _ in 0..200 {
            let _ = timing.record(Duration::from_millis(20));
        }
        assert!((timing.fps() - 50.0).abs() < 1.0);
    }
}
