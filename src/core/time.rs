//! Frame timing for the garden loop

use std::time::{Duration, Instant};

/// Frame statistics reported by the control server
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct FrameStats {
    pub fps: f32,
    pub frame_count: u64,
    pub elapsed_secs: f32,
}

/// Tracks frame timing, total elapsed time and FPS.
///
/// Elapsed time is what the per-frame flower evaluation is driven by, so it
/// is measured from construction rather than accumulated from deltas.
pub struct FrameTimer {
    start: Instant,
    last_frame: Instant,
    delta: Duration,
    frame_count: u64,
    fps_timer: Instant,
    fps: f32,
    fps_frame_count: u32,
}

impl FrameTimer {
    /// Create a new frame timer
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
            fps_timer: now,
            fps: 0.0,
            fps_frame_count: 0,
        }
    }

    /// Call once per frame to update timing
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        self.delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;
        self.fps_frame_count += 1;

        // Update FPS every second
        let fps_elapsed = now.saturating_duration_since(self.fps_timer);
        if fps_elapsed >= Duration::from_secs(1) {
            self.fps = self.fps_frame_count as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = 0;
            self.fps_timer = now;
        }
    }

    /// Get delta time in seconds
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get delta time as Duration
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Seconds since the timer was created, as of the last tick
    pub fn elapsed_secs(&self) -> f32 {
        self.last_frame.saturating_duration_since(self.start).as_secs_f32()
    }

    /// Get current FPS (updated every second)
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Get total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            fps: self.fps,
            frame_count: self.frame_count,
            elapsed_secs: self.elapsed_secs(),
        }
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_counts_frames() {
        let mut timer = FrameTimer::new();
        let base = timer.start;
        timer.tick_at(base + Duration::from_millis(16));
        timer.tick_at(base + Duration::from_millis(32));
        assert_eq!(timer.frame_count(), 2);
        assert!((timer.delta_secs() - 0.016).abs() < 1e-4);
        assert!((timer.elapsed_secs() - 0.032).abs() < 1e-4);
    }

    #[test]
    fn test_fps_updates_after_one_second() {
        let mut timer = FrameTimer::new();
        let base = timer.start;
        // 59 frames at ~60 Hz stay inside the first second
        for i in 1..=59 {
            timer.tick_at(base + Duration::from_micros(i * 16_667));
        }
        assert_eq!(timer.fps(), 0.0);
        timer.tick_at(base + Duration::from_millis(1_020));
        assert!(timer.fps() > 55.0 && timer.fps() < 65.0);
    }
}
