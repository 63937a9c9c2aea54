//! Synchronizes the external media surface with the playback clock.
//!
//! The clock is the source of truth. On every observation the adapter finds
//! the clip under the cursor on the primary media track, hard-seeks the
//! surface only when it has drifted past the threshold, and mirrors the run
//! state. Overlays (active clips on every other track) are computed for the
//! rendering layer but never drawn here.

use cutline_core::defaults::DRIFT_THRESHOLD;
use cutline_timeline::{Clip, ClipId, Track, TrackId, TrackKind, Transform};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::surface::MediaSurface;

/// Text color used when a clip does not set one.
pub const DEFAULT_OVERLAY_COLOR: &str = "#ffffff";

/// Font size used when a clip does not set one.
pub const DEFAULT_FONT_SIZE: f64 = 24.0;

/// A transform with every optional field filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTransform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotation: f64,
    pub opacity: f64,
    pub color: String,
    pub font_size: f64,
}

impl From<&Transform> for ResolvedTransform {
    fn from(t: &Transform) -> Self {
        Self {
            x: t.x,
            y: t.y,
            scale: t.scale,
            rotation: t.rotation,
            opacity: t.opacity,
            color: t
                .color
                .clone()
                .unwrap_or_else(|| DEFAULT_OVERLAY_COLOR.to_string()),
            font_size: t.font_size.unwrap_or(DEFAULT_FONT_SIZE),
        }
    }
}

/// An active clip the preview should draw on top of the media surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayClip {
    pub clip_id: ClipId,
    pub track_id: TrackId,
    pub kind: TrackKind,
    pub source: Option<String>,
    pub text_content: Option<String>,
    pub transform: ResolvedTransform,
}

impl From<&Clip> for OverlayClip {
    fn from(clip: &Clip) -> Self {
        Self {
            clip_id: clip.id.clone(),
            track_id: clip.track_id,
            kind: clip.kind,
            source: clip.source.clone(),
            text_content: clip.text_content.clone(),
            transform: ResolvedTransform::from(&clip.properties),
        }
    }
}

/// The primary clip currently driving the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryPlayback {
    pub clip_id: ClipId,
    /// Offset into the clip's source that the clock asks for.
    pub local_offset: f64,
}

/// What the preview shows at one cursor position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PreviewFrame {
    /// Cursor position this frame was computed for.
    pub time: f64,
    /// Active primary clip, `None` for the empty state.
    pub primary: Option<PrimaryPlayback>,
    /// Active non-primary clips in track order, then clip order.
    pub overlays: Vec<OverlayClip>,
    /// Whether this observation issued a hard seek.
    pub corrected: bool,
}

/// The track whose active clip drives the media surface: the first video track.
pub fn primary_track(tracks: &[Track]) -> Option<&Track> {
    tracks.iter().find(|t| t.kind.is_primary_media())
}

/// Active clips on every track except the primary one.
pub fn active_overlays(tracks: &[Track], time: f64) -> Vec<OverlayClip> {
    let primary = primary_track(tracks).map(|t| t.id);
    tracks
        .iter()
        .filter(|t| Some(t.id) != primary)
        .flat_map(|t| t.active_clips(time))
        .map(OverlayClip::from)
        .collect()
}

/// What the surface was last told to present.
#[derive(Debug, Clone, PartialEq)]
enum Presented {
    Nothing,
    Empty,
    Clip {
        id: ClipId,
        source: Option<String>,
    },
}

/// Drives a [`MediaSurface`] from the clock.
#[derive(Debug)]
pub struct MediaSyncAdapter<S> {
    surface: S,
    drift_threshold: f64,
    presented: Presented,
}

impl<S: MediaSurface> MediaSyncAdapter<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            drift_threshold: DRIFT_THRESHOLD,
            presented: Presented::Nothing,
        }
    }

    /// Override the drift threshold (seconds).
    pub fn with_drift_threshold(mut self, threshold: f64) -> Self {
        if threshold.is_finite() && threshold >= 0.0 {
            self.drift_threshold = threshold;
        }
        self
    }

    pub fn drift_threshold(&self) -> f64 {
        self.drift_threshold
    }

    /// Read-only access to the surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Observe one `(time, tracks, running)` state and bring the surface in line.
    pub fn sync(&mut self, time: f64, running: bool, tracks: &[Track]) -> PreviewFrame {
        let active = primary_track(tracks).and_then(|t| t.clip_at_time(time));
        let overlays = active_overlays(tracks, time);

        let Some(clip) = active else {
            if self.presented != Presented::Empty {
                self.surface.load(None);
                self.presented = Presented::Empty;
            }
            self.surface.pause();
            return PreviewFrame {
                time,
                primary: None,
                overlays,
                corrected: false,
            };
        };

        let wanted = Presented::Clip {
            id: clip.id.clone(),
            source: clip.source.clone(),
        };
        if self.presented != wanted {
            self.surface.load(clip.source.as_deref());
            self.presented = wanted;
        }

        let local_offset = time - clip.start;
        let drift = (self.surface.position() - local_offset).abs();
        let corrected = drift > self.drift_threshold;
        if corrected {
            debug!(clip = %clip.id, drift, local_offset, "Hard seek of media surface");
            self.surface.seek(local_offset);
        }

        if running {
            if let Err(e) = self.surface.play() {
                debug!(clip = %clip.id, error = %e, "Media surface refused to play");
            }
        } else {
            self.surface.pause();
        }

        PreviewFrame {
            time,
            primary: Some(PrimaryPlayback {
                clip_id: clip.id.clone(),
                local_offset,
            }),
            overlays,
            corrected,
        }
    }
}
