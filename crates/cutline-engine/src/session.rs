//! The editing session: timeline, clock and zoom behind one owner.
//!
//! Every method that changes observable state bumps `revision`, which is how
//! the runtime decides whether to publish a new [`SessionSnapshot`].

use cutline_core::{CutlineError, Result};
use cutline_interaction::{
    time_at_pointer, InteractionController, PointerEvent, TRACK_HEADER_WIDTH,
};
use cutline_media::ExportRequest;
use cutline_playback::{PlaybackClock, TickOutcome};
use cutline_timeline::demo::demo_tracks;
use cutline_timeline::{
    Clip, ClipDraft, ClipId, ClipPatch, TimelineStore, Track, TrackId, TrackKind,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::config::{EngineConfig, MAX_ZOOM, MIN_ZOOM};

/// Name given to text clips promoted from the asset panel.
pub const NEW_TEXT_NAME: &str = "New Text";

/// Name given to media clips promoted from the asset panel.
pub const NEW_ASSET_NAME: &str = "New Asset";

/// Read-only view of a session at one revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub tracks: Vec<Track>,
    pub current_time: f64,
    pub is_running: bool,
    /// Raw selected ID.
    pub selection: Option<ClipId>,
    /// The selected clip, if the ID still resolves.
    pub selected_clip: Option<Clip>,
    pub zoom: f64,
    pub duration: f64,
    pub revision: u64,
}

impl SessionSnapshot {
    pub fn clip_count(&self) -> usize {
        self.tracks.iter().map(Track::clip_count).sum()
    }

    /// Export request covering the whole timeline.
    pub fn export_request(&self, name: impl Into<String>) -> ExportRequest {
        ExportRequest::new(name, self.duration).with_clip_count(self.clip_count())
    }
}

/// One editing session.
#[derive(Debug, Clone)]
pub struct Session {
    store: TimelineStore,
    clock: PlaybackClock,
    zoom: f64,
    revision: u64,
    config: EngineConfig,
}

impl Session {
    /// Session over `tracks`. The configuration is assumed to be validated.
    pub fn new(config: EngineConfig, tracks: Vec<Track>) -> Self {
        Self {
            store: TimelineStore::new(tracks)
                .with_default_clip_duration(config.default_clip_duration),
            clock: PlaybackClock::new(config.timeline_duration),
            zoom: config.default_zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            revision: 0,
            config,
        }
    }

    /// Session seeded with the stock demo tracks.
    pub fn demo(config: EngineConfig) -> Self {
        Self::new(config, demo_tracks())
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    // ── Timeline ────────────────────────────────────────────────

    /// Add a clip on `track_id` starting at the playhead unless the draft says otherwise.
    pub fn add_clip(&mut self, track_id: TrackId, draft: ClipDraft) -> Result<Clip> {
        let clip = self
            .store
            .add_clip(track_id, draft, self.clock.current_time())?;
        self.touch();
        Ok(clip)
    }

    /// Promote an asset onto the first track of `kind`.
    pub fn add_to_timeline(
        &mut self,
        kind: TrackKind,
        source: Option<String>,
        text: Option<String>,
    ) -> Result<Clip> {
        let track_id = self
            .store
            .first_track_of_kind(kind)
            .map(|t| t.id)
            .ok_or_else(|| CutlineError::NoTrackOfKind {
                kind: kind.to_string(),
            })?;
        let name = if kind == TrackKind::Text {
            NEW_TEXT_NAME
        } else {
            NEW_ASSET_NAME
        };
        let mut draft = ClipDraft::new(kind).with_name(name);
        draft.source = source;
        draft.text_content = text;
        self.add_clip(track_id, draft)
    }

    pub fn update_clip(&mut self, id: &str, patch: &ClipPatch) -> bool {
        let updated = self.store.update_clip(id, patch);
        if updated {
            self.touch();
        }
        updated
    }

    pub fn delete_clip(&mut self, id: &str) -> Option<Clip> {
        let was_selected = self.store.selection() == Some(id);
        let removed = self.store.delete_clip(id);
        if removed.is_some() || was_selected {
            self.touch();
        }
        removed
    }

    pub fn select_clip(&mut self, id: Option<&str>) {
        if self.store.selection() != id {
            self.store.select_clip(id);
            self.touch();
        }
    }

    /// Route a pointer event through `controller` against this session's
    /// store and zoom.
    pub fn pointer(&mut self, controller: &mut InteractionController, event: PointerEvent) -> bool {
        let changed = controller.handle(&mut self.store, self.zoom, event);
        if changed {
            self.touch();
        }
        changed
    }

    // ── Transport ───────────────────────────────────────────────

    pub fn play(&mut self) {
        self.play_at(Instant::now());
    }

    pub fn play_at(&mut self, now: Instant) {
        if !self.clock.is_running() {
            self.clock.play_at(now);
            self.touch();
        }
    }

    pub fn pause(&mut self) {
        if self.clock.is_running() {
            self.clock.pause();
            self.touch();
        }
    }

    /// Move the playhead; returns the clamped time.
    pub fn seek(&mut self, time: f64) -> f64 {
        let time = self.clock.seek(time);
        self.touch();
        time
    }

    /// Seek to the time under a click at `pointer_x` on the ruler.
    pub fn seek_to_pointer(&mut self, pointer_x: f64) -> f64 {
        self.seek(time_at_pointer(pointer_x, TRACK_HEADER_WIDTH, self.zoom))
    }

    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let outcome = self.clock.tick(now);
        if outcome.changed() {
            self.touch();
        }
        outcome
    }

    /// Set the zoom in px/s, clamped to `[MIN_ZOOM, MAX_ZOOM]`. Non-finite
    /// input is ignored. Returns the zoom in effect.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        if !zoom.is_finite() {
            return self.zoom;
        }
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if zoom != self.zoom {
            debug!(zoom, "Zoom changed");
            self.zoom = zoom;
            self.touch();
        }
        self.zoom
    }

    // ── Reads ───────────────────────────────────────────────────

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tracks: self.store.tracks().to_vec(),
            current_time: self.clock.current_time(),
            is_running: self.clock.is_running(),
            selection: self.store.selection().map(str::to_owned),
            selected_clip: self.store.selected_clip().cloned(),
            zoom: self.zoom,
            duration: self.clock.duration(),
            revision: self.revision,
        }
    }

    pub fn store(&self) -> &TimelineStore {
        &self.store
    }

    pub fn tracks(&self) -> &[Track] {
        self.store.tracks()
    }

    pub fn current_time(&self) -> f64 {
        self.clock.current_time()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
