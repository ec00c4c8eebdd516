//! Time management utilities

use std::time::{Duration, Instant};

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.delta_time = elapsed.as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    ///
    /// This is the application time fed to the precipitation offsets, so it
    /// only ever moves forward.
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

/// Fixed-interval frame limiter
///
/// Sleeps the main thread until the frame deadline instead of spinning, so a
/// capped loop does not peg a core. The scheduling contract is unchanged: the
/// loop body starts at most once per `interval`.
pub struct FrameLimiter {
    interval: Duration,
}

impl FrameLimiter {
    /// Create a limiter with the given target frame interval in seconds
    pub fn new(interval_secs: f32) -> Self {
        Self {
            interval: Duration::from_secs_f32(interval_secs.max(0.0)),
        }
    }

    /// The configured frame interval in seconds
    pub fn interval_secs(&self) -> f32 {
        self.interval.as_secs_f32()
    }

    /// Sleep out the remainder of the frame that started at `frame_start`
    pub fn throttle(&self, frame_start: Instant) {
        let elapsed = frame_start.elapsed();
        if let Some(remaining) = self.interval.checked_sub(elapsed) {
            std::thread::sleep(remaining);
        }
    }
}
