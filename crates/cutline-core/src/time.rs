//! Time helpers for the timeline.
//!
//! Timeline positions are plain seconds (`f64`). The clock advances from a
//! monotonic source, so the accumulated value is only ever compared against
//! clip spans and the timeline duration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open span of timeline time `[start, start + duration)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    /// Start time in seconds (inclusive)
    pub start: f64,
    /// Duration in seconds
    pub duration: f64,
}

impl TimeSpan {
    /// Create a new span from start and duration.
    #[inline]
    pub fn new(start: f64, duration: f64) -> Self {
        Self { start, duration }
    }

    /// End time (exclusive).
    #[inline]
    pub fn end(self) -> f64 {
        self.start + self.duration
    }

    /// Check if a time is within this span.
    #[inline]
    pub fn contains(self, time: f64) -> bool {
        time >= self.start && time < self.end()
    }

    /// Check if two spans overlap.
    pub fn overlaps(self, other: Self) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}s, {:.3}s)", self.start, self.end())
    }
}

/// Clamp a time into `[0, duration]`. Non-finite input maps to 0.
#[inline]
pub fn clamp_time(time: f64, duration: f64) -> f64 {
    if time.is_nan() {
        return 0.0;
    }
    time.clamp(0.0, duration.max(0.0))
}

/// Format seconds as `MM:SS:CC` (minutes, seconds, hundredths).
pub fn format_timecode(seconds: f64) -> String {
    let seconds = if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    };
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    let hundredths = ((seconds % 1.0) * 100.0).floor() as u64;
    format!("{mins:02}:{secs:02}:{hundredths:02}")
}
