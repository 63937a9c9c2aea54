//! Cutline - timeline composition and playback
//!
//! Entry point. Runs a scripted headless session against the demo timeline:
//! generate and promote an asset, drag the title card, play for a couple of
//! seconds, export, then print the final snapshot as JSON.

use anyhow::Result;
use cutline_assets::{draft_script, AssetStudio, StockGenerator};
use cutline_core::{format_timecode, Rect, Vec2};
use cutline_engine::{EngineConfig, EngineHandle, Session};
use cutline_interaction::PointerEvent;
use cutline_media::{start_export, ExportCancel, ExportEvent};
use cutline_playback::HeadlessSurface;
use cutline_timeline::demo::TEXT_TRACK;
use cutline_timeline::{ClipDraft, TrackKind};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Preview viewport used for the scripted drag.
const PREVIEW_RECT: Rect = Rect::new(0.0, 0.0, 1280.0, 720.0);

/// Where the closing caption sits on the timeline, in seconds.
const CAPTION_START: f64 = 20.0;
const CAPTION_DURATION: f64 = 5.0;

/// How long the demo plays.
const PLAY_FOR: Duration = Duration::from_secs(2);

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Cutline starting...");

    // Optional config path on the command line
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => EngineConfig::load(&path)?,
        None => EngineConfig::default(),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(config))
}

async fn run(config: EngineConfig) -> Result<()> {
    let surface = HeadlessSurface::new();
    let (engine, task) = cutline_engine::spawn(Session::demo(config), surface.clone())?;

    let studio = AssetStudio::new(StockGenerator::new());
    let url = AssetStudio::<StockGenerator>::join(
        studio.spawn_generate("a neon city skyline at night"),
    )
    .await?;
    let clip = engine
        .add_to_timeline(TrackKind::Image, Some(url), None)
        .await?;
    info!(clip = %clip.id, start = clip.start, "Promoted generated asset");

    let scenes = draft_script(studio.generator(), "city life").await;
    info!(scenes = scenes.len(), "Script drafted");
    if let Some(closing) = scenes.last() {
        let caption = ClipDraft::text(closing.description.clone())
            .with_name("Caption")
            .with_start(CAPTION_START)
            .with_duration(CAPTION_DURATION);
        let clip = engine.add_clip(TEXT_TRACK, caption).await?;
        info!(clip = %clip.id, scene = %closing.time, "Caption added from script");
    }

    drag_title(&engine).await?;
    play(&engine).await?;
    export(&engine).await;

    println!("{}", serde_json::to_string_pretty(&*engine.snapshot())?);
    let stats = surface.stats();
    info!(
        seeks = stats.seeks,
        plays = stats.plays,
        loads = stats.loads,
        "Media surface activity"
    );

    engine.shutdown().await?;
    task.await?;
    Ok(())
}

/// Move the title card to the lower third of the preview.
async fn drag_title(engine: &EngineHandle) -> Result<()> {
    let center = PREVIEW_RECT.center();
    engine
        .pointer(PointerEvent::PreviewDown {
            clip_id: "clip-text-1".into(),
            pointer: center,
        })
        .await?;
    engine
        .pointer(PointerEvent::PreviewMove {
            pointer: Vec2::new(center.x, PREVIEW_RECT.height * 0.8),
            rect: PREVIEW_RECT,
        })
        .await?;
    engine.pointer(PointerEvent::PreviewRelease).await?;

    if let Some(title) = engine.snapshot().selected_clip.as_ref() {
        info!(
            clip = %title.id,
            x = title.properties.x,
            y = title.properties.y,
            "Title card moved"
        );
    }
    Ok(())
}

async fn play(engine: &EngineHandle) -> Result<()> {
    engine.play().await?;
    let mut ticks = tokio::time::interval(Duration::from_millis(500));
    let deadline = tokio::time::Instant::now() + PLAY_FOR;
    while tokio::time::Instant::now() < deadline {
        ticks.tick().await;
        let snap = engine.snapshot();
        let frame = engine.frame();
        info!(
            time = %format_timecode(snap.current_time),
            primary = frame.primary.as_ref().map(|p| p.clip_id.as_str()).unwrap_or("-"),
            overlays = frame.overlays.len(),
            "Playing"
        );
    }
    engine.pause().await?;
    Ok(())
}

async fn export(engine: &EngineHandle) {
    let request = engine.snapshot().export_request("Cutline Demo");
    let events = start_export(request, ExportCancel::new());
    let outcome = tokio::task::spawn_blocking(move || {
        events
            .iter()
            .inspect(|event| {
                if let ExportEvent::Progress { percent } = event {
                    if percent % 25 == 0 {
                        info!(percent, "Exporting");
                    }
                }
            })
            .last()
    })
    .await;

    match outcome {
        Ok(Some(ExportEvent::Finished { .. })) => info!("Export complete"),
        Ok(Some(event)) => warn!(?event, "Export did not finish"),
        Ok(None) => warn!("Export produced no events"),
        Err(e) => warn!(error = %e, "Export task failed"),
    }
}
