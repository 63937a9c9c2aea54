//! Track types for the timeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clip::Clip;

/// Track identifier.
pub type TrackId = u32;

/// Kind of track (and of clip content).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrackKind {
    Video,
    Audio,
    Text,
    Image,
    Overlay,
}

impl TrackKind {
    /// Display name for the kind.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Text => "Text",
            Self::Image => "Image",
            Self::Overlay => "Overlay",
        }
    }

    /// Whether this kind drives the external media surface.
    pub fn is_primary_media(self) -> bool {
        matches!(self, Self::Video)
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// An ordered lane of clips.
///
/// Clips keep insertion order; nothing sorts them by start time and
/// overlapping clips are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Track ID
    pub id: TrackId,
    /// Track kind
    pub kind: TrackKind,
    /// Track name
    pub name: String,
    /// Clips in insertion order
    pub clips: Vec<Clip>,
}

impl Track {
    /// Create an empty track.
    pub fn new(id: TrackId, kind: TrackKind, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            clips: Vec::new(),
        }
    }

    /// Builder-style append used when laying out a session.
    pub fn with_clip(mut self, clip: Clip) -> Self {
        self.push_clip(clip);
        self
    }

    /// Add a clip to the end of the track, claiming it for this track.
    pub fn push_clip(&mut self, mut clip: Clip) {
        clip.track_id = self.id;
        self.clips.push(clip);
    }

    /// Remove a clip by ID. Returns the removed clip.
    pub fn remove_clip(&mut self, id: &str) -> Option<Clip> {
        let index = self.clips.iter().position(|c| c.id == id)?;
        Some(self.clips.remove(index))
    }

    /// Find a clip by ID. Returns (index, &Clip).
    pub fn find_clip(&self, id: &str) -> Option<(usize, &Clip)> {
        self.clips.iter().enumerate().find(|(_, c)| c.id == id)
    }

    /// Find a clip mutably by ID.
    pub fn find_clip_mut(&mut self, id: &str) -> Option<&mut Clip> {
        self.clips.iter_mut().find(|c| c.id == id)
    }

    /// The clip covering `time`.
    ///
    /// When clips overlap, the one added last wins.
    pub fn clip_at_time(&self, time: f64) -> Option<&Clip> {
        self.clips.iter().rev().find(|c| c.is_active_at(time))
    }

    /// All clips covering `time`, in insertion order.
    pub fn active_clips(&self, time: f64) -> impl Iterator<Item = &Clip> + '_ {
        self.clips.iter().filter(move |c| c.is_active_at(time))
    }

    /// End of the last clip on this track (0 when empty).
    pub fn content_end(&self) -> f64 {
        self.clips.iter().map(Clip::end).fold(0.0, f64::max)
    }

    /// Number of clips in this track.
    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }
}
