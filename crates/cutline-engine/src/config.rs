//! Engine configuration.

use cutline_core::{defaults, CutlineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Lowest accepted timeline zoom, in pixels per second.
pub const MIN_ZOOM: f64 = 1.0;

/// Highest accepted timeline zoom, in pixels per second.
pub const MAX_ZOOM: f64 = 1000.0;

/// Tunables for a session and its runtime. Missing JSON fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Timeline length in seconds.
    pub timeline_duration: f64,
    /// Initial zoom in pixels per second.
    pub default_zoom: f64,
    /// Clock tick period.
    pub tick_interval_ms: u64,
    /// Clock/surface divergence tolerated before a hard seek, in seconds.
    pub drift_threshold: f64,
    /// Duration of clips added without one.
    pub default_clip_duration: f64,
    /// Capacity of the runtime command queue.
    pub command_buffer: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timeline_duration: defaults::TIMELINE_DURATION,
            default_zoom: defaults::ZOOM,
            tick_interval_ms: defaults::TICK_INTERVAL_MS,
            drift_threshold: defaults::DRIFT_THRESHOLD,
            default_clip_duration: defaults::CLIP_DURATION,
            command_buffer: 64,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        tracing::info!(path = %path.display(), "Loaded engine config");
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f64) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(CutlineError::Config(format!(
                    "{name} must be positive, got {value}"
                )))
            }
        }

        positive("timeline_duration", self.timeline_duration)?;
        positive("default_zoom", self.default_zoom)?;
        positive("default_clip_duration", self.default_clip_duration)?;
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.default_zoom) {
            return Err(CutlineError::Config(format!(
                "default_zoom must be within [{MIN_ZOOM}, {MAX_ZOOM}], got {}",
                self.default_zoom
            )));
        }
        if !self.drift_threshold.is_finite() || self.drift_threshold < 0.0 {
            return Err(CutlineError::Config(format!(
                "drift_threshold must be non-negative, got {}",
                self.drift_threshold
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(CutlineError::Config("tick_interval_ms must be non-zero".into()));
        }
        if self.command_buffer == 0 {
            return Err(CutlineError::Config("command_buffer must be non-zero".into()));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
