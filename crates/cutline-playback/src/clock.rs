//! Playback clock: one time cursor advanced at wall-clock rate.
//!
//! The clock never reads time on its own while ticking; callers pass the
//! current monotonic `Instant` so a timer task (or a test) decides when time
//! moves.

use cutline_core::clamp_time;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Run state of the clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockState {
    /// The cursor holds still.
    #[default]
    Stopped,
    /// Each tick advances the cursor by the elapsed wall-clock time.
    Running,
}

/// Result of a single tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// The clock was stopped; nothing changed.
    Idle,
    /// The cursor moved forward by `delta` seconds.
    Advanced { delta: f64 },
    /// The cursor hit the end of the timeline; the clock stopped and rewound to 0.
    ReachedEnd,
}

impl TickOutcome {
    /// Whether the tick changed any clock state.
    pub fn changed(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// The playback clock.
#[derive(Clone, Debug)]
pub struct PlaybackClock {
    state: ClockState,
    current_time: f64,
    duration: f64,
    last_tick: Option<Instant>,
}

impl PlaybackClock {
    /// Create a stopped clock at 0 over a timeline of `duration` seconds.
    pub fn new(duration: f64) -> Self {
        Self {
            state: ClockState::Stopped,
            current_time: 0.0,
            duration: if duration.is_finite() {
                duration.max(0.0)
            } else {
                0.0
            },
            last_tick: None,
        }
    }

    /// Start playback now.
    pub fn play(&mut self) {
        self.play_at(Instant::now());
    }

    /// Start playback with `now` as the reference for the next tick.
    ///
    /// Calling this while already running leaves the tick reference alone.
    pub fn play_at(&mut self, now: Instant) {
        if self.state == ClockState::Running {
            return;
        }
        self.state = ClockState::Running;
        self.last_tick = Some(now);
        tracing::debug!(time = self.current_time, "Playback started");
    }

    /// Stop playback at the current position.
    pub fn pause(&mut self) {
        if self.state == ClockState::Stopped {
            return;
        }
        self.state = ClockState::Stopped;
        self.last_tick = None;
        tracing::debug!(time = self.current_time, "Playback paused");
    }

    /// Move the cursor to `time`, clamped into `[0, duration]`. Run state is kept.
    pub fn seek(&mut self, time: f64) -> f64 {
        self.current_time = clamp_time(time, self.duration);
        tracing::debug!(requested = time, time = self.current_time, "Seeked");
        self.current_time
    }

    /// Advance the cursor by the time elapsed since the previous tick.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if self.state == ClockState::Stopped {
            return TickOutcome::Idle;
        }
        let last = self.last_tick.replace(now).unwrap_or(now);
        let delta = now.saturating_duration_since(last).as_secs_f64();
        self.current_time += delta;

        if self.current_time >= self.duration {
            self.state = ClockState::Stopped;
            self.current_time = 0.0;
            self.last_tick = None;
            tracing::debug!(duration = self.duration, "Reached end of timeline");
            return TickOutcome::ReachedEnd;
        }
        TickOutcome::Advanced { delta }
    }

    /// Current cursor position in seconds.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Timeline duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }
}
