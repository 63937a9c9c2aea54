//! Cutline Core - Foundation types for the timeline editor
//!
//! This crate provides the fundamental types used throughout Cutline:
//! - Time helpers (TimeSpan, clamping, timecode display)
//! - Geometric primitives for pointer and preview math
//! - The shared error type

pub mod error;
pub mod geometry;
pub mod time;

pub use error::{CutlineError, Result};
pub use geometry::{Rect, Vec2};
pub use time::{clamp_time, format_timecode, TimeSpan};

/// Timeline defaults used when no configuration overrides them.
pub mod defaults {
    /// Total timeline duration in seconds.
    pub const TIMELINE_DURATION: f64 = 30.0;

    /// Timeline zoom in pixels per second.
    pub const ZOOM: f64 = 40.0;

    /// Duration given to a new clip when none is requested.
    pub const CLIP_DURATION: f64 = 5.0;

    /// Maximum divergence between clock and media surface before a hard seek.
    pub const DRIFT_THRESHOLD: f64 = 0.5;

    /// Clock tick interval in milliseconds (~60 Hz).
    pub const TICK_INTERVAL_MS: u64 = 16;
}
