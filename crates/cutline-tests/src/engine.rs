//! End-to-end scenarios against a running engine.
//!
//! Uses paused tokio time so clock ticks are deterministic.

use cutline_assets::{AssetStudio, StockGenerator, STOCK_IMAGES};
use cutline_core::{CutlineError, Vec2};
use cutline_engine::{spawn, EngineConfig, EngineHandle, Session, NEW_ASSET_NAME};
use cutline_interaction::{PointerEvent, TRACK_HEADER_WIDTH};
use cutline_media::{ExportCancel, ExportEvent, ExportJob};
use cutline_playback::{HeadlessSurface, MediaSurface};
use cutline_timeline::{ClipPatch, TrackKind};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

fn start(config: EngineConfig) -> (EngineHandle, JoinHandle<()>, HeadlessSurface) {
    let surface = HeadlessSurface::new();
    let (handle, task) = spawn(Session::demo(config), surface.clone()).unwrap();
    (handle, task, surface)
}

async fn stop(handle: EngineHandle, task: JoinHandle<()>) {
    handle.shutdown().await.unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn generated_asset_lands_at_playhead() {
    let (engine, task, _) = start(EngineConfig::default());
    let studio = AssetStudio::new(StockGenerator::new());

    engine.seek(4.0).await.unwrap();
    let url = AssetStudio::<StockGenerator>::join(studio.spawn_generate("a lighthouse"))
        .await
        .unwrap();
    assert_eq!(studio.pool().candidates(), vec![STOCK_IMAGES[0].to_string()]);

    let clip = engine
        .add_to_timeline(TrackKind::Image, Some(url.clone()), None)
        .await
        .unwrap();
    assert_eq!(clip.name, NEW_ASSET_NAME);
    assert_eq!(clip.start, 4.0);

    let frame = engine.frame();
    assert!(frame
        .overlays
        .iter()
        .any(|o| o.clip_id == clip.id && o.source.as_deref() == Some(url.as_str())));

    stop(engine, task).await;
}

#[tokio::test(start_paused = true)]
async fn edits_while_playing_show_up_in_next_frame() {
    let (engine, task, _) = start(EngineConfig::default());
    engine.play().await.unwrap();
    sleep(Duration::from_secs(2)).await;
    assert!(engine
        .frame()
        .overlays
        .iter()
        .any(|o| o.clip_id == "clip-text-1"));

    // pull the title card out from under the playhead
    assert!(engine
        .update_clip("clip-text-1", ClipPatch::start(20.0))
        .await
        .unwrap());
    let frame = engine.frame();
    assert!(frame.overlays.iter().all(|o| o.clip_id != "clip-text-1"));
    assert!(engine.snapshot().is_running);

    stop(engine, task).await;
}

#[tokio::test(start_paused = true)]
async fn ruler_click_seeks_and_surface_follows() {
    let (engine, task, surface) = start(EngineConfig::default());

    // 40 px/s, so 800 px past the header is 20 s, inside "City Life"
    let time = engine.seek_to_pointer(TRACK_HEADER_WIDTH + 800.0).await.unwrap();
    assert_eq!(time, 20.0);
    assert_eq!(engine.frame().primary.as_ref().unwrap().clip_id, "clip-2");
    assert!((surface.position() - 5.0).abs() < 1e-9);

    // far right clamps to the timeline end
    let time = engine.seek_to_pointer(1e6).await.unwrap();
    assert_eq!(time, 30.0);

    stop(engine, task).await;
}

#[tokio::test(start_paused = true)]
async fn zoom_changes_drag_scale() {
    let (engine, task, _) = start(EngineConfig::default());
    engine.set_zoom(80.0).await.unwrap();

    engine
        .pointer(PointerEvent::TimelineDown {
            clip_id: "clip-1".into(),
            pointer: Vec2::new(300.0, 10.0),
        })
        .await
        .unwrap();
    engine
        .pointer(PointerEvent::TimelineMove {
            pointer: Vec2::new(380.0, 10.0),
        })
        .await
        .unwrap();
    engine.pointer(PointerEvent::TimelineRelease).await.unwrap();

    let snap = engine.snapshot();
    let clip = snap.tracks[0].clips.iter().find(|c| c.id == "clip-1").unwrap();
    assert_eq!(clip.start, 1.0);
    assert_eq!(snap.selection.as_deref(), Some("clip-1"));

    stop(engine, task).await;
}

#[tokio::test(start_paused = true)]
async fn blocked_autoplay_keeps_clock_running() {
    let surface = HeadlessSurface::new().with_autoplay_blocked(true);
    let (engine, task) = spawn(Session::demo(EngineConfig::default()), surface.clone()).unwrap();

    engine.play().await.unwrap();
    sleep(Duration::from_secs(1)).await;

    assert!(engine.snapshot().is_running);
    assert!(engine.snapshot().current_time > 0.9);
    assert!(surface.stats().rejected_plays > 0);
    assert!(!surface.is_playing());

    stop(engine, task).await;
}

#[tokio::test(start_paused = true)]
async fn export_covers_snapshot() {
    let (engine, task, _) = start(EngineConfig::default());
    engine
        .add_to_timeline(TrackKind::Text, None, Some("Default Text".into()))
        .await
        .unwrap();

    let request = engine.snapshot().export_request("scenario");
    assert_eq!(request.clip_count, 4);
    assert_eq!(request.duration, 30.0);

    let mut events = Vec::new();
    ExportJob::new(request)
        .with_step_interval(Duration::ZERO)
        .run(|e| events.push(e), &ExportCancel::new());
    assert_eq!(events.last(), Some(&ExportEvent::Finished { artifact: None }));

    stop(engine, task).await;
}

#[tokio::test(start_paused = true)]
async fn zero_tick_interval_is_a_config_error() {
    let config = EngineConfig {
        tick_interval_ms: 0,
        ..EngineConfig::default()
    };
    let err = spawn(Session::demo(config), HeadlessSurface::new()).unwrap_err();
    assert!(matches!(err, CutlineError::Config(_)));
}

#[tokio::test(start_paused = true)]
async fn unknown_track_error_crosses_the_channel() {
    let (engine, task, _) = start(EngineConfig::default());
    let err = engine
        .add_to_timeline(TrackKind::Overlay, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CutlineError::NoTrackOfKind { .. }));

    stop(engine, task).await;
}
