//! Export pipeline for rendering a timeline to a file.
//!
//! Jobs run on a worker thread and stream [`ExportEvent`]s over a
//! crossbeam channel. Progress advances in fixed percentage steps; cancel is
//! checked before every step.

use crossbeam_channel::{unbounded, Receiver};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Percentage added per progress step.
pub const PROGRESS_STEP: u8 = 5;

/// Delay between progress steps.
pub const STEP_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExportError {
    #[error("Invalid export duration: {0}")]
    InvalidDuration(f64),

    #[error("Invalid export format: {0}")]
    InvalidFormat(String),

    #[error("Export cancelled")]
    Cancelled,
}

// ── Format ──────────────────────────────────────────────────────

/// Output frame geometry and rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportFormat {
    pub width: u32,
    pub height: u32,
    pub frame_rate: f64,
}

impl ExportFormat {
    /// 1920x1080 at 30 fps.
    pub fn hd_1080() -> Self {
        Self {
            width: 1920,
            height: 1080,
            frame_rate: 30.0,
        }
    }

    /// 1280x720 at 30 fps.
    pub fn web_720() -> Self {
        Self {
            width: 1280,
            height: 720,
            frame_rate: 30.0,
        }
    }

    /// Frames needed to cover `duration` seconds.
    pub fn total_frames(&self, duration: f64) -> u64 {
        (duration.max(0.0) * self.frame_rate).ceil() as u64
    }
}

impl Default for ExportFormat {
    fn default() -> Self {
        Self::hd_1080()
    }
}

// ── Request / events ────────────────────────────────────────────

/// What to export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Project name, used for the artifact name once one is written.
    pub name: String,
    /// Timeline duration in seconds.
    pub duration: f64,
    /// Number of clips in the timeline at request time.
    pub clip_count: usize,
    pub format: ExportFormat,
}

impl ExportRequest {
    pub fn new(name: impl Into<String>, duration: f64) -> Self {
        Self {
            name: name.into(),
            duration,
            clip_count: 0,
            format: ExportFormat::default(),
        }
    }

    pub fn with_clip_count(mut self, clip_count: usize) -> Self {
        self.clip_count = clip_count;
        self
    }

    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    fn validate(&self) -> Result<(), ExportError> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(ExportError::InvalidDuration(self.duration));
        }
        if self.format.width == 0 || self.format.height == 0 {
            return Err(ExportError::InvalidFormat(format!(
                "{}x{}",
                self.format.width, self.format.height
            )));
        }
        if !self.format.frame_rate.is_finite() || self.format.frame_rate <= 0.0 {
            return Err(ExportError::InvalidFormat(format!(
                "{} fps",
                self.format.frame_rate
            )));
        }
        Ok(())
    }
}

/// Progress reported by a running export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExportEvent {
    Started { total_frames: u64 },
    Progress { percent: u8 },
    Finished { artifact: Option<PathBuf> },
    Failed { reason: String },
}

impl ExportEvent {
    /// Whether no further events follow this one.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished { .. } | Self::Failed { .. })
    }
}

// ── Job ─────────────────────────────────────────────────────────

/// A configured export.
#[derive(Debug, Clone)]
pub struct ExportJob {
    request: ExportRequest,
    step_interval: Duration,
}

impl ExportJob {
    pub fn new(request: ExportRequest) -> Self {
        Self {
            request,
            step_interval: STEP_INTERVAL,
        }
    }

    /// Override the delay between progress steps.
    pub fn with_step_interval(mut self, interval: Duration) -> Self {
        self.step_interval = interval;
        self
    }

    pub fn request(&self) -> &ExportRequest {
        &self.request
    }

    /// Run the export on the current thread, reporting every event to
    /// `on_event`. The last event reported is always terminal.
    pub fn run(&self, mut on_event: impl FnMut(ExportEvent), cancel: &ExportCancel) {
        match self.steps(&mut on_event, cancel) {
            Ok(()) => {
                info!(name = %self.request.name, "Export finished");
                on_event(ExportEvent::Finished { artifact: None });
            }
            Err(e) => {
                info!(name = %self.request.name, error = %e, "Export failed");
                on_event(ExportEvent::Failed {
                    reason: e.to_string(),
                });
            }
        }
    }

    fn steps(
        &self,
        on_event: &mut impl FnMut(ExportEvent),
        cancel: &ExportCancel,
    ) -> Result<(), ExportError> {
        self.request.validate()?;
        let total_frames = self.request.format.total_frames(self.request.duration);
        on_event(ExportEvent::Started { total_frames });

        let mut percent = 0u8;
        while percent < 100 {
            if cancel.is_cancelled() {
                return Err(ExportError::Cancelled);
            }
            if !self.step_interval.is_zero() {
                thread::sleep(self.step_interval);
            }
            percent = (percent + PROGRESS_STEP).min(100);
            debug!(percent, "Export progress");
            on_event(ExportEvent::Progress { percent });
        }
        Ok(())
    }

    /// Run on a worker thread and stream events back.
    pub fn spawn(self, cancel: ExportCancel) -> Receiver<ExportEvent> {
        let (tx, rx) = unbounded();
        thread::spawn(move || {
            self.run(
                |event| {
                    // receiver dropped means nobody is listening
                    let _ = tx.send(event);
                },
                &cancel,
            );
        });
        rx
    }
}

/// Start `request` with default pacing on a worker thread.
pub fn start_export(request: ExportRequest, cancel: ExportCancel) -> Receiver<ExportEvent> {
    info!(name = %request.name, duration = request.duration, "Export started");
    ExportJob::new(request).spawn(cancel)
}

/// Handle for cancelling an in-progress export.
#[derive(Debug, Clone)]
pub struct ExportCancel(Arc<AtomicBool>);

impl ExportCancel {
    /// Create a new cancel handle.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Signal cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Check if cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl Default for ExportCancel {
    fn default() -> Self {
        Self::new()
    }
}
