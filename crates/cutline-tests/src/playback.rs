//! Integration tests for playback.
//!
//! Drives the clock and the sync adapter over the demo timeline and checks
//! what the media surface was told to do.

use cutline_playback::{
    MediaSurface, MediaSyncAdapter, PlaybackClock, SurfaceError, TickOutcome,
};
use cutline_timeline::demo::{demo_tracks, IMAGE_TRACK};
use cutline_timeline::{ClipDraft, TimelineStore, TrackKind};
use std::time::{Duration, Instant};

/// Surface whose position only moves when told to, recording every call.
#[derive(Debug, Default)]
struct ScriptedSurface {
    position: f64,
    playing: bool,
    refuse_play: bool,
    seeks: Vec<f64>,
    loads: Vec<Option<String>>,
}

impl MediaSurface for ScriptedSurface {
    fn seek(&mut self, position: f64) {
        self.position = position;
        self.seeks.push(position);
    }

    fn play(&mut self) -> Result<(), SurfaceError> {
        if self.refuse_play {
            return Err(SurfaceError::PlaybackRejected("autoplay blocked".into()));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn load(&mut self, source: Option<&str>) {
        self.position = 0.0;
        self.loads.push(source.map(str::to_owned));
    }
}

#[test]
fn clock_runs_to_end_and_rewinds() {
    let mut clock = PlaybackClock::new(30.0);
    let t0 = Instant::now();
    clock.play_at(t0);

    let mut now = t0;
    let mut last = TickOutcome::Idle;
    for _ in 0..2000 {
        now += Duration::from_millis(16);
        last = clock.tick(now);
        if last == TickOutcome::ReachedEnd {
            break;
        }
    }
    assert_eq!(last, TickOutcome::ReachedEnd);
    assert!(!clock.is_running());
    assert_eq!(clock.current_time(), 0.0);
    assert_eq!(clock.tick(now + Duration::from_secs(1)), TickOutcome::Idle);
}

#[test]
fn small_drift_is_tolerated() {
    let tracks = demo_tracks();
    let mut adapter = MediaSyncAdapter::new(ScriptedSurface::default());

    adapter.sync(2.0, true, &tracks);
    assert_eq!(adapter.surface().seeks, vec![2.0]);

    // surface lagging by 0.3 s stays untouched
    adapter.sync(2.3, true, &tracks);
    assert_eq!(adapter.surface().seeks.len(), 1);

    // 0.6 s is past the threshold
    let frame = adapter.sync(2.6, true, &tracks);
    assert!(frame.corrected);
    assert_eq!(adapter.surface().seeks, vec![2.0, 2.6]);
}

#[test]
fn crossing_a_cut_swaps_source_and_offsets() {
    let tracks = demo_tracks();
    let mut adapter = MediaSyncAdapter::new(ScriptedSurface::default());

    let a = adapter.sync(14.9, true, &tracks);
    let b = adapter.sync(15.2, true, &tracks);

    assert_eq!(a.primary.as_ref().unwrap().clip_id, "clip-1");
    let b_primary = b.primary.as_ref().unwrap();
    assert_eq!(b_primary.clip_id, "clip-2");
    assert!((b_primary.local_offset - 0.2).abs() < 1e-9);
    assert_eq!(adapter.surface().loads.len(), 2);
    assert!(adapter.surface().playing);
}

#[test]
fn gap_on_primary_track_shows_empty_state() {
    let tracks = demo_tracks();
    let mut adapter = MediaSyncAdapter::new(ScriptedSurface::default());

    adapter.sync(5.0, true, &tracks);
    let frame = adapter.sync(27.0, true, &tracks);
    assert!(frame.primary.is_none());
    assert!(!adapter.surface().playing);
    assert_eq!(adapter.surface().loads.last(), Some(&None));

    // the empty state is only loaded once
    adapter.sync(28.0, true, &tracks);
    assert_eq!(adapter.surface().loads.len(), 2);
}

#[test]
fn refused_play_does_not_stop_the_clock() {
    let tracks = demo_tracks();
    let surface = ScriptedSurface {
        refuse_play: true,
        ..ScriptedSurface::default()
    };
    let mut adapter = MediaSyncAdapter::new(surface);
    let mut clock = PlaybackClock::new(30.0);
    let t0 = Instant::now();
    clock.play_at(t0);

    clock.tick(t0 + Duration::from_millis(500));
    let frame = adapter.sync(clock.current_time(), clock.is_running(), &tracks);

    assert!(clock.is_running());
    assert!(frame.primary.is_some());
    assert!(!adapter.surface().playing);
}

#[test]
fn overlays_follow_store_edits() {
    let mut store = TimelineStore::new(demo_tracks());
    let mut adapter = MediaSyncAdapter::new(ScriptedSurface::default());

    let frame = adapter.sync(2.0, false, store.tracks());
    assert_eq!(frame.overlays.len(), 1);
    let title = &frame.overlays[0];
    assert_eq!(title.clip_id, "clip-text-1");
    assert_eq!(title.transform.font_size, 60.0);

    store
        .add_clip(
            IMAGE_TRACK,
            ClipDraft::media(TrackKind::Image, "https://images.example/sticker.png"),
            2.0,
        )
        .unwrap();
    let frame = adapter.sync(2.0, false, store.tracks());
    assert_eq!(frame.overlays.len(), 2);
    assert_eq!(frame.overlays[1].transform.color, "#ffffff");
    assert_eq!(frame.overlays[1].transform.font_size, 24.0);
}
