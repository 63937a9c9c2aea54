//! Integration tests for the timeline subsystem.
//!
//! Exercises cross-crate interactions between cutline-core,
//! cutline-timeline, and cutline-interaction.

use cutline_core::{CutlineError, Rect, Vec2};
use cutline_interaction::{InteractionController, PointerEvent};
use cutline_timeline::demo::{demo_tracks, IMAGE_TRACK, MAIN_TRACK, TEXT_TRACK};
use cutline_timeline::{ClipDraft, ClipPatch, TimelineStore, Transform, TransformPatch};
use proptest::prelude::*;
use std::collections::HashSet;

// ── Helpers ────────────────────────────────────────────────────

fn demo_store() -> TimelineStore {
    TimelineStore::new(demo_tracks())
}

fn start_of(store: &TimelineStore, id: &str) -> f64 {
    store.find_clip(id).map(|c| c.start).unwrap_or(f64::NAN)
}

// ── Create ─────────────────────────────────────────────────────

#[test]
fn add_clip_default_scenario() {
    let mut store = demo_store();
    let clip = store.add_clip(IMAGE_TRACK, ClipDraft::default(), 3.0).unwrap();

    assert_eq!(clip.start, 3.0);
    assert_eq!(clip.duration, 5.0);
    assert_eq!(clip.properties, Transform::default());
    assert_eq!(clip.track_id, IMAGE_TRACK);
    assert_eq!(store.selected_clip().map(|c| c.id.as_str()), Some(clip.id.as_str()));
    assert_eq!(store.track(IMAGE_TRACK).unwrap().clips.last(), Some(&clip));
}

#[test]
fn draft_timing_overrides_playhead_and_default_duration() {
    let mut store = demo_store();
    let draft = ClipDraft::text("Caption").with_start(20.0).with_duration(2.5);
    let clip = store.add_clip(TEXT_TRACK, draft, 3.0).unwrap();

    assert_eq!(clip.start, 20.0);
    assert_eq!(clip.duration, 2.5);
    assert_eq!(clip.text_content.as_deref(), Some("Caption"));

    // negative starts still clamp
    let clip = store
        .add_clip(TEXT_TRACK, ClipDraft::default().with_start(-4.0), 3.0)
        .unwrap();
    assert_eq!(clip.start, 0.0);
}

#[test]
fn add_clip_to_unknown_track_fails_without_side_effects() {
    let mut store = demo_store();
    let before = store.clip_count();
    let err = store.add_clip(42, ClipDraft::default(), 0.0).unwrap_err();
    assert!(matches!(err, CutlineError::UnknownTrack { track_id: 42 }));
    assert_eq!(store.clip_count(), before);
    assert!(store.selection().is_none());
}

#[test]
fn kind_mismatch_is_accepted() {
    let mut store = demo_store();
    let clip = store
        .add_clip(TEXT_TRACK, ClipDraft::media(cutline_timeline::TrackKind::Image, "a.png"), 0.0)
        .unwrap();
    assert_eq!(clip.track_id, TEXT_TRACK);
}

#[test]
fn generated_ids_never_collide_with_demo_ids() {
    let mut store = demo_store();
    let mut seen: HashSet<String> = store.clips().map(|c| c.id.clone()).collect();
    for i in 0..200 {
        let track = [MAIN_TRACK, TEXT_TRACK, IMAGE_TRACK][i % 3];
        let clip = store.add_clip(track, ClipDraft::default(), 0.0).unwrap();
        assert!(seen.insert(clip.id));
    }
    assert_eq!(store.clip_count(), seen.len());
}

// ── Update / delete / select ───────────────────────────────────

#[test]
fn transform_merge_keeps_untouched_fields() {
    let mut store = demo_store();
    let before = store.find_clip("clip-text-1").unwrap().clone();

    assert!(store.update_clip(
        "clip-text-1",
        &ClipPatch::properties(TransformPatch {
            opacity: Some(0.5),
            ..TransformPatch::default()
        })
    ));

    let after = store.find_clip("clip-text-1").unwrap();
    assert_eq!(after.properties.opacity, 0.5);
    assert_eq!(after.properties.x, before.properties.x);
    assert_eq!(after.properties.y, before.properties.y);
    assert_eq!(after.properties.font_size, before.properties.font_size);
    assert_eq!(after.properties.color, before.properties.color);
    assert_eq!(after.text_content, before.text_content);
    assert_eq!(after.start, before.start);
}

#[test]
fn update_and_delete_of_missing_clip_are_noops() {
    let mut store = demo_store();
    let before = store.tracks().to_vec();
    assert!(!store.update_clip("nope", &ClipPatch::start(9.0)));
    assert!(store.delete_clip("nope").is_none());
    assert_eq!(store.tracks(), before.as_slice());
}

#[test]
fn delete_clears_matching_selection_only() {
    let mut store = demo_store();
    store.select_clip(Some("clip-1"));
    store.delete_clip("clip-2");
    assert_eq!(store.selection(), Some("clip-1"));

    store.delete_clip("clip-1");
    assert!(store.selection().is_none());
    assert!(store.delete_clip("clip-1").is_none());
}

#[test]
fn selection_is_weak() {
    let mut store = demo_store();
    store.select_clip(Some("clip-2"));
    store.update_clip("clip-2", &ClipPatch::start(18.0));
    assert_eq!(store.selected_clip().unwrap().start, 18.0);
}

// ── Pointer gestures ───────────────────────────────────────────

#[test]
fn retime_scenario_at_zoom_forty() {
    let mut store = demo_store();
    let mut ctl = InteractionController::new();
    let zoom = 40.0;

    ctl.handle(
        &mut store,
        zoom,
        PointerEvent::TimelineDown {
            clip_id: "clip-text-1".into(),
            pointer: Vec2::new(500.0, 80.0),
        },
    );
    ctl.handle(
        &mut store,
        zoom,
        PointerEvent::TimelineMove {
            pointer: Vec2::new(580.0, 80.0),
        },
    );
    assert_eq!(start_of(&store, "clip-text-1"), 3.0);

    ctl.handle(
        &mut store,
        zoom,
        PointerEvent::TimelineMove {
            pointer: Vec2::new(0.0, 80.0),
        },
    );
    assert_eq!(start_of(&store, "clip-text-1"), 0.0);
    ctl.handle(&mut store, zoom, PointerEvent::TimelineRelease);
    assert!(!ctl.is_dragging());
}

#[test]
fn preview_drag_only_moves_position() {
    let mut store = demo_store();
    let mut ctl = InteractionController::new();
    let rect = Rect::new(100.0, 50.0, 800.0, 450.0);
    let before = store.find_clip("clip-text-1").unwrap().properties.clone();

    ctl.begin_preview_drag(&mut store, "clip-text-1", Vec2::new(500.0, 275.0));
    ctl.preview_pointer_move(&mut store, Vec2::new(300.0, 140.0), rect);
    ctl.end_preview_drag();

    let after = &store.find_clip("clip-text-1").unwrap().properties;
    assert_eq!(after.x, 25.0);
    assert_eq!(after.y, 20.0);
    assert_eq!(after.scale, before.scale);
    assert_eq!(after.rotation, before.rotation);
    assert_eq!(after.opacity, before.opacity);
    assert_eq!(after.color, before.color);
    assert_eq!(after.font_size, before.font_size);
}

// ── Properties ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn merge_law_for_start(start in -50.0f64..50.0, duration in 0.0f64..20.0) {
        let mut store = demo_store();
        let before = store.find_clip("clip-2").unwrap().clone();
        store.update_clip("clip-2", &ClipPatch {
            start: Some(start),
            duration: Some(duration),
            ..ClipPatch::default()
        });
        let after = store.find_clip("clip-2").unwrap();
        prop_assert!(after.start >= 0.0);
        prop_assert!(after.duration > 0.0);
        prop_assert_eq!(&after.name, &before.name);
        prop_assert_eq!(&after.source, &before.source);
        prop_assert_eq!(&after.properties, &before.properties);
    }

    #[test]
    fn drag_results_stay_in_range(
        px in -2000.0f64..2000.0,
        py in -2000.0f64..2000.0,
    ) {
        let mut store = demo_store();
        let mut ctl = InteractionController::new();
        let rect = Rect::new(0.0, 0.0, 640.0, 360.0);
        ctl.begin_preview_drag(&mut store, "clip-text-1", Vec2::ZERO);
        ctl.preview_pointer_move(&mut store, Vec2::new(px, py), rect);
        ctl.begin_timeline_drag(&mut store, "clip-text-1", Vec2::ZERO);
        ctl.timeline_pointer_move(&mut store, Vec2::new(px, py), 40.0);

        let clip = store.find_clip("clip-text-1").unwrap();
        prop_assert!((0.0..=100.0).contains(&clip.properties.x));
        prop_assert!((0.0..=100.0).contains(&clip.properties.y));
        prop_assert!(clip.start >= 0.0);
    }
}
