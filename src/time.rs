//! Frame clock for the render loop.
//!
//! Tracks frame count, delta time and a smoothed FPS figure. The caller
//! passes the frame's timestamp in, so the clock agrees exactly with the
//! timestamp the engine uses for its resize debounce.
//!
//! ```ignore
//! let mut clock = FrameClock::new(Instant::now());
//!
//! // In the redraw handler:
//! let now = Instant::now();
//! clock.tick(now);
//! tracing::debug!(fps = clock.fps(), frame = clock.frame());
//! ```

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FrameClock {
    /// When the clock was created.
    start: Instant,
    /// Timestamp of the previous tick.
    last_tick: Instant,
    /// Seconds between the last two ticks.
    delta_secs: f32,
    /// Ticks since start.
    frame_count: u64,
    /// FPS over the last measurement window.
    fps: f32,
    /// Frame count at the start of the window.
    fps_frame_count: u64,
    /// Start of the current measurement window.
    fps_window_start: Instant,
    fps_window: Duration,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self {
            start: now,
            last_tick: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_window_start: now,
            fps_window: Duration::from_millis(500),
        }
    }

    /// Record a frame at `now`. Returns `true` when the FPS figure was refreshed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.delta_secs = now.saturating_duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.frame_count += 1;

        let window = now.saturating_duration_since(self.fps_window_start);
        if window >= self.fps_window {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / window.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_window_start = now;
            return true;
        }
        false
    }

    /// Seconds between the two most recent ticks.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Time from creation to the latest tick.
    pub fn elapsed(&self) -> Duration {
        self.last_tick.saturating_duration_since(self.start)
    }
}
