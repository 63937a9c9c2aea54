//! The external media surface capability.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::error::SurfaceError;

/// Transport controls of an external media player (e.g. a video element).
///
/// The engine never constructs or destroys a surface; one is handed to the
/// sync adapter at startup and only the adapter drives its transport.
pub trait MediaSurface: Send {
    /// Jump to `position` seconds into the loaded source.
    fn seek(&mut self, position: f64);

    /// Start or resume playback. May be refused by the platform.
    fn play(&mut self) -> Result<(), SurfaceError>;

    /// Pause playback.
    fn pause(&mut self);

    /// Current position in seconds into the loaded source.
    fn position(&self) -> f64;

    /// Swap the presented source. `None` shows the empty state.
    fn load(&mut self, _source: Option<&str>) {}
}

impl<S: MediaSurface + ?Sized> MediaSurface for Box<S> {
    fn seek(&mut self, position: f64) {
        (**self).seek(position)
    }

    fn play(&mut self) -> Result<(), SurfaceError> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn position(&self) -> f64 {
        (**self).position()
    }

    fn load(&mut self, source: Option<&str>) {
        (**self).load(source)
    }
}

/// Call counters kept by [`HeadlessSurface`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceStats {
    pub seeks: u64,
    pub plays: u64,
    pub pauses: u64,
    pub loads: u64,
    pub rejected_plays: u64,
}

#[derive(Debug, Default)]
struct HeadlessState {
    source: Option<String>,
    base_position: f64,
    playing_since: Option<Instant>,
    autoplay_blocked: bool,
    stats: SurfaceStats,
}

impl HeadlessState {
    fn position(&self) -> f64 {
        let running = self
            .playing_since
            .map(|since| since.elapsed().as_secs_f64())
            .unwrap_or(0.0);
        self.base_position + running
    }
}

/// A surface with no output that advances its position in real time while
/// playing. Clones share state, so one clone can be handed to the engine and
/// another kept to observe it.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse every `play()` call, like a browser blocking autoplay.
    pub fn with_autoplay_blocked(self, blocked: bool) -> Self {
        self.state.lock().autoplay_blocked = blocked;
        self
    }

    /// Snapshot of the call counters.
    pub fn stats(&self) -> SurfaceStats {
        self.state.lock().stats.clone()
    }

    /// The currently presented source.
    pub fn source(&self) -> Option<String> {
        self.state.lock().source.clone()
    }

    pub fn is_playing(&self) -> bool {
        self.state.lock().playing_since.is_some()
    }
}

impl MediaSurface for HeadlessSurface {
    fn seek(&mut self, position: f64) {
        let mut state = self.state.lock();
        state.stats.seeks += 1;
        state.base_position = position.max(0.0);
        if state.playing_since.is_some() {
            state.playing_since = Some(Instant::now());
        }
    }

    fn play(&mut self) -> Result<(), SurfaceError> {
        let mut state = self.state.lock();
        state.stats.plays += 1;
        if state.autoplay_blocked {
            state.stats.rejected_plays += 1;
            return Err(SurfaceError::PlaybackRejected("autoplay blocked".into()));
        }
        if state.source.is_none() {
            state.stats.rejected_plays += 1;
            return Err(SurfaceError::NoSource);
        }
        if state.playing_since.is_none() {
            state.playing_since = Some(Instant::now());
        }
        Ok(())
    }

    fn pause(&mut self) {
        let mut state = self.state.lock();
        state.stats.pauses += 1;
        if state.playing_since.is_some() {
            state.base_position = state.position();
            state.playing_since = None;
        }
    }

    fn position(&self) -> f64 {
        self.state.lock().position()
    }

    fn load(&mut self, source: Option<&str>) {
        let mut state = self.state.lock();
        state.stats.loads += 1;
        state.source = source.map(str::to_owned);
        state.base_position = 0.0;
        state.playing_since = None;
    }
}
