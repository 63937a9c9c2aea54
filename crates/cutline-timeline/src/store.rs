//! The timeline store: owns tracks, clips and the clip selection.
//!
//! Every mutation is a plain method on `TimelineStore`. Lookups that miss are
//! no-ops (`update_clip`, `delete_clip`) so pointer and property call sites
//! never have to pre-check existence; only `add_clip` reports an unknown track.

use cutline_core::{CutlineError, Result};
use tracing::debug;
use uuid::Uuid;

use crate::clip::{Clip, ClipDraft, ClipId, ClipPatch, Transform, MIN_CLIP_DURATION};
use crate::track::{Track, TrackId, TrackKind};

/// Kind given to a clip whose draft does not name one.
pub const FALLBACK_CLIP_KIND: TrackKind = TrackKind::Image;

/// Name given to a clip whose draft does not name one.
pub const FALLBACK_CLIP_NAME: &str = "New Clip";

/// Ordered tracks plus the weak clip selection.
#[derive(Debug, Clone)]
pub struct TimelineStore {
    tracks: Vec<Track>,
    /// Selected clip ID. Resolved by lookup on read, never a handle.
    selection: Option<ClipId>,
    default_clip_duration: f64,
}

impl TimelineStore {
    /// Create a store over a fixed set of tracks.
    ///
    /// Each clip is re-claimed by the track that holds it so `clip.track_id`
    /// always names its owner.
    pub fn new(tracks: Vec<Track>) -> Self {
        let tracks = tracks
            .into_iter()
            .map(|mut track| {
                let id = track.id;
                for clip in &mut track.clips {
                    clip.track_id = id;
                }
                track
            })
            .collect();
        Self {
            tracks,
            selection: None,
            default_clip_duration: cutline_core::defaults::CLIP_DURATION,
        }
    }

    /// Override the duration given to new clips.
    pub fn with_default_clip_duration(mut self, duration: f64) -> Self {
        if duration.is_finite() {
            self.default_clip_duration = duration.max(MIN_CLIP_DURATION);
        }
        self
    }

    /// Create a clip on `track_id` from `draft`, appended after the track's
    /// existing clips. `playhead` is the default start. The new clip becomes
    /// the selection.
    pub fn add_clip(&mut self, track_id: TrackId, draft: ClipDraft, playhead: f64) -> Result<Clip> {
        let id = self.fresh_clip_id();
        let default_duration = self.default_clip_duration;
        let track = self
            .track_mut(track_id)
            .ok_or(CutlineError::UnknownTrack { track_id })?;

        let mut clip = Clip {
            id,
            track_id,
            kind: draft.kind.unwrap_or(FALLBACK_CLIP_KIND),
            name: draft
                .name
                .unwrap_or_else(|| FALLBACK_CLIP_NAME.to_string()),
            start: playhead.max(0.0),
            duration: default_duration,
            source: None,
            text_content: None,
            properties: Transform::default(),
        };
        clip.apply(&ClipPatch {
            kind: None,
            name: None,
            start: draft.start,
            duration: draft.duration,
            source: draft.source,
            text_content: draft.text_content,
            properties: draft.properties,
        });

        track.push_clip(clip.clone());
        debug!(clip = %clip.id, track = track_id, start = clip.start, "Clip added");
        self.selection = Some(clip.id.clone());
        Ok(clip)
    }

    /// Merge `patch` into the clip with `id`. Returns `false` if no such clip.
    pub fn update_clip(&mut self, id: &str, patch: &ClipPatch) -> bool {
        match self.find_clip_mut(id) {
            Some(clip) => {
                clip.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Remove the clip with `id` from whichever track holds it.
    ///
    /// Idempotent. Clears the selection only if it named this clip.
    pub fn delete_clip(&mut self, id: &str) -> Option<Clip> {
        let removed = self.tracks.iter_mut().find_map(|t| t.remove_clip(id));
        if self.selection.as_deref() == Some(id) {
            self.selection = None;
        }
        if let Some(clip) = &removed {
            debug!(clip = %clip.id, track = clip.track_id, "Clip deleted");
        }
        removed
    }

    /// Set the selection. No existence check happens here.
    pub fn select_clip(&mut self, id: Option<&str>) {
        self.selection = id.map(str::to_owned);
    }

    /// The raw selected ID, whether or not it still resolves.
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// The selected clip, resolved by lookup. A dangling ID reads as `None`.
    pub fn selected_clip(&self) -> Option<&Clip> {
        self.selection.as_deref().and_then(|id| self.find_clip(id))
    }

    /// All tracks in order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Look up a track by ID.
    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    fn track_mut(&mut self, id: TrackId) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id == id)
    }

    /// First track of the given kind.
    pub fn first_track_of_kind(&self, kind: TrackKind) -> Option<&Track> {
        self.tracks.iter().find(|t| t.kind == kind)
    }

    /// Find a clip by ID on any track.
    pub fn find_clip(&self, id: &str) -> Option<&Clip> {
        self.tracks
            .iter()
            .find_map(|t| t.find_clip(id).map(|(_, c)| c))
    }

    fn find_clip_mut(&mut self, id: &str) -> Option<&mut Clip> {
        self.tracks.iter_mut().find_map(|t| t.find_clip_mut(id))
    }

    /// Every clip, track by track.
    pub fn clips(&self) -> impl Iterator<Item = &Clip> + '_ {
        self.tracks.iter().flat_map(|t| t.clips.iter())
    }

    /// Total number of clips.
    pub fn clip_count(&self) -> usize {
        self.tracks.iter().map(Track::clip_count).sum()
    }

    /// End of the last clip on any track.
    pub fn content_end(&self) -> f64 {
        self.tracks.iter().map(Track::content_end).fold(0.0, f64::max)
    }

    fn fresh_clip_id(&self) -> ClipId {
        loop {
            let id = format!("clip-{}", Uuid::new_v4().simple());
            if self.find_clip(&id).is_none() {
                return id;
            }
        }
    }
}
