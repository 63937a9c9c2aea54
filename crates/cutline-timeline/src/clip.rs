//! Clip types for the timeline.

use cutline_core::TimeSpan;
use serde::{Deserialize, Serialize};

use crate::track::{TrackId, TrackKind};

/// Clip identifier. Unique across every track of a session.
pub type ClipId = String;

/// Smallest duration a clip may have, in seconds.
pub const MIN_CLIP_DURATION: f64 = 0.01;

/// Smallest scale factor a clip may have.
pub const MIN_SCALE: f64 = 0.01;

/// Smallest font size accepted for text clips.
pub const MIN_FONT_SIZE: f64 = 1.0;

/// Placement of a clip inside the preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Horizontal position, percent of preview width (0-100)
    pub x: f64,
    /// Vertical position, percent of preview height (0-100)
    pub y: f64,
    /// Uniform scale factor (> 0)
    pub scale: f64,
    /// Rotation in degrees
    pub rotation: f64,
    /// Opacity in [0, 1]
    pub opacity: f64,
    /// CSS-style color for text clips
    pub color: Option<String>,
    /// Font size for text clips
    pub font_size: Option<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 50.0,
            y: 50.0,
            scale: 1.0,
            rotation: 0.0,
            opacity: 1.0,
            color: None,
            font_size: None,
        }
    }
}

impl Transform {
    /// Merge a patch field-by-field. Unset fields keep their current value;
    /// non-finite numbers are ignored and the rest are clamped into range.
    pub fn apply(&mut self, patch: &TransformPatch) {
        if let Some(x) = patch.x.filter(|v| v.is_finite()) {
            self.x = x.clamp(0.0, 100.0);
        }
        if let Some(y) = patch.y.filter(|v| v.is_finite()) {
            self.y = y.clamp(0.0, 100.0);
        }
        if let Some(scale) = patch.scale.filter(|v| v.is_finite()) {
            self.scale = scale.max(MIN_SCALE);
        }
        if let Some(rotation) = patch.rotation.filter(|v| v.is_finite()) {
            self.rotation = rotation;
        }
        if let Some(opacity) = patch.opacity.filter(|v| v.is_finite()) {
            self.opacity = opacity.clamp(0.0, 1.0);
        }
        if let Some(color) = &patch.color {
            self.color = Some(color.clone());
        }
        if let Some(font_size) = patch.font_size.filter(|v| v.is_finite()) {
            self.font_size = Some(font_size.max(MIN_FONT_SIZE));
        }
    }
}

/// Partial transform. `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub scale: Option<f64>,
    pub rotation: Option<f64>,
    pub opacity: Option<f64>,
    pub color: Option<String>,
    pub font_size: Option<f64>,
}

impl TransformPatch {
    /// Patch touching only the preview position.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// True if the patch sets no field.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A time-bounded, positioned unit of content on a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Unique clip ID
    pub id: ClipId,
    /// Track holding this clip
    pub track_id: TrackId,
    /// Content kind
    pub kind: TrackKind,
    /// Clip name (displayed in UI)
    pub name: String,
    /// Start on the timeline, in seconds (>= 0)
    pub start: f64,
    /// Duration on the timeline, in seconds (> 0)
    pub duration: f64,
    /// Media reference (URL) for video and image clips
    pub source: Option<String>,
    /// Text for text clips
    pub text_content: Option<String>,
    /// Placement in the preview
    pub properties: Transform,
}

impl Clip {
    /// The timeline span `[start, start + duration)`.
    #[inline]
    pub fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start, self.duration)
    }

    /// End time on the timeline (exclusive).
    #[inline]
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Whether the clip covers `time`.
    #[inline]
    pub fn is_active_at(&self, time: f64) -> bool {
        self.span().contains(time)
    }

    /// Label shown on the timeline lane.
    pub fn label(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else {
            self.text_content.as_deref().unwrap_or("Clip")
        }
    }

    /// Shallow-merge top-level fields, field-by-field merge of `properties`.
    pub fn apply(&mut self, patch: &ClipPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(start) = patch.start.filter(|v| v.is_finite()) {
            self.start = start.max(0.0);
        }
        if let Some(duration) = patch.duration.filter(|v| v.is_finite()) {
            self.duration = duration.max(MIN_CLIP_DURATION);
        }
        if let Some(source) = &patch.source {
            self.source = Some(source.clone());
        }
        if let Some(text) = &patch.text_content {
            self.text_content = Some(text.clone());
        }
        self.properties.apply(&patch.properties);
    }
}

/// Partial update for an existing clip.
///
/// `id` and `track_id` are not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipPatch {
    pub kind: Option<TrackKind>,
    pub name: Option<String>,
    pub start: Option<f64>,
    pub duration: Option<f64>,
    pub source: Option<String>,
    pub text_content: Option<String>,
    pub properties: TransformPatch,
}

impl ClipPatch {
    /// Patch moving the clip to a new start time.
    pub fn start(start: f64) -> Self {
        Self {
            start: Some(start),
            ..Self::default()
        }
    }

    /// Patch touching only the transform.
    pub fn properties(properties: TransformPatch) -> Self {
        Self {
            properties,
            ..Self::default()
        }
    }

    /// Patch replacing the text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text_content: Some(text.into()),
            ..Self::default()
        }
    }
}

/// Caller-supplied fields for a new clip. Anything left unset falls back to
/// the store's defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipDraft {
    pub kind: Option<TrackKind>,
    pub name: Option<String>,
    pub start: Option<f64>,
    pub duration: Option<f64>,
    pub source: Option<String>,
    pub text_content: Option<String>,
    pub properties: TransformPatch,
}

impl ClipDraft {
    /// Draft of the given kind.
    pub fn new(kind: TrackKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Text clip draft.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            text_content: Some(content.into()),
            ..Self::new(TrackKind::Text)
        }
    }

    /// Media clip draft referencing `source`.
    pub fn media(kind: TrackKind, source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::new(kind)
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_start(mut self, start: f64) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_properties(mut self, properties: TransformPatch) -> Self {
        self.properties = properties;
        self
    }
}
