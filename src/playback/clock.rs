//! Time sources and the drift-free frame pacer.

use std::time::{Duration, Instant};

use crate::foundation::core::Fps;

/// Where the scheduler reads time and parks itself. A trait seam so the
/// scheduler runs deterministically under test clocks.
pub trait Clock {
    /// Monotonic time since an arbitrary origin fixed at construction.
    fn now(&mut self) -> Duration;
    /// Blocks the calling thread; playback never busy-spins.
    fn sleep(&mut self, d: Duration);
}

/// Wall-clock time via a monotonic [`Instant`] origin.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, d: Duration) {
        std::thread::sleep(d);
    }
}

/// The ideal-timestamp pacer.
///
/// `ideal_next` advances by exactly one frame duration per displayed or
/// skipped frame, never by wall-clock elapsed time, so scheduling error
/// never compounds across frames.
#[derive(Clone, Copy, Debug)]
pub struct PlaybackClock {
    frame_duration: Duration,
    ideal_next: Duration,
}

impl PlaybackClock {
    /// Anchors the first frame's ideal timestamp at `start`.
    pub fn new(fps: Fps, start: Duration) -> Self {
        Self {
            frame_duration: fps.frame_duration(),
            ideal_next: start,
        }
    }

    /// Seconds the caller is behind (positive) or ahead (negative) of the
    /// ideal timestamp for the current frame.
    pub fn drift(&self, now: Duration) -> f64 {
        now.as_secs_f64() - self.ideal_next.as_secs_f64()
    }

    /// Moves the ideal timestamp one frame forward (displayed or skipped).
    pub fn advance(&mut self) {
        self.ideal_next += self.frame_duration;
    }

    pub fn ideal_next(&self) -> Duration {
        self.ideal_next
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }
}
