//! Single-owner async runtime.
//!
//! One tokio task owns the [`Session`], the media sync adapter and the
//! interaction controller. Commands arrive over an mpsc channel and the clock
//! ticks on a fixed interval; both are handled in one `select!` loop, so a
//! tick never interleaves with a mutation. After every command or tick the
//! adapter observes the new state before anything else is processed.
//!
//! Observers read [`SessionSnapshot`]s and [`PreviewFrame`]s from watch
//! channels. A snapshot is published only when the session revision moved.

use cutline_core::{CutlineError, Result};
use cutline_interaction::{InteractionController, PointerEvent};
use cutline_playback::{MediaSurface, MediaSyncAdapter, PreviewFrame};
use cutline_timeline::{Clip, ClipDraft, ClipId, ClipPatch, TrackId, TrackKind};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::session::{Session, SessionSnapshot};

/// Requests accepted by the runtime. Every variant but `Shutdown` is answered
/// once the change is applied and observed.
#[derive(Debug)]
pub enum EngineCommand {
    AddClip {
        track_id: TrackId,
        draft: ClipDraft,
        reply: oneshot::Sender<Result<Clip>>,
    },
    AddToTimeline {
        kind: TrackKind,
        source: Option<String>,
        text: Option<String>,
        reply: oneshot::Sender<Result<Clip>>,
    },
    UpdateClip {
        id: ClipId,
        patch: ClipPatch,
        reply: oneshot::Sender<bool>,
    },
    DeleteClip {
        id: ClipId,
        reply: oneshot::Sender<Option<Clip>>,
    },
    SelectClip {
        id: Option<ClipId>,
        reply: oneshot::Sender<()>,
    },
    Play {
        reply: oneshot::Sender<()>,
    },
    Pause {
        reply: oneshot::Sender<()>,
    },
    Seek {
        time: f64,
        reply: oneshot::Sender<f64>,
    },
    SeekToPointer {
        pointer_x: f64,
        reply: oneshot::Sender<f64>,
    },
    SetZoom {
        zoom: f64,
        reply: oneshot::Sender<f64>,
    },
    Pointer {
        event: PointerEvent,
        reply: oneshot::Sender<bool>,
    },
    Shutdown,
}

/// Cloneable handle to a running engine.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    commands: mpsc::Sender<EngineCommand>,
    snapshots: watch::Receiver<Arc<SessionSnapshot>>,
    frames: watch::Receiver<Arc<PreviewFrame>>,
}

impl EngineHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> EngineCommand,
    ) -> Result<T> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(build(reply))
            .await
            .map_err(|_| CutlineError::EngineStopped)?;
        rx.await.map_err(|_| CutlineError::EngineStopped)
    }

    pub async fn add_clip(&self, track_id: TrackId, draft: ClipDraft) -> Result<Clip> {
        self.request(|reply| EngineCommand::AddClip {
            track_id,
            draft,
            reply,
        })
        .await?
    }

    pub async fn add_to_timeline(
        &self,
        kind: TrackKind,
        source: Option<String>,
        text: Option<String>,
    ) -> Result<Clip> {
        self.request(|reply| EngineCommand::AddToTimeline {
            kind,
            source,
            text,
            reply,
        })
        .await?
    }

    pub async fn update_clip(&self, id: impl Into<ClipId>, patch: ClipPatch) -> Result<bool> {
        let id = id.into();
        self.request(|reply| EngineCommand::UpdateClip { id, patch, reply })
            .await
    }

    pub async fn delete_clip(&self, id: impl Into<ClipId>) -> Result<Option<Clip>> {
        let id = id.into();
        self.request(|reply| EngineCommand::DeleteClip { id, reply }).await
    }

    pub async fn select_clip(&self, id: Option<ClipId>) -> Result<()> {
        self.request(|reply| EngineCommand::SelectClip { id, reply }).await
    }

    pub async fn play(&self) -> Result<()> {
        self.request(|reply| EngineCommand::Play { reply }).await
    }

    pub async fn pause(&self) -> Result<()> {
        self.request(|reply| EngineCommand::Pause { reply }).await
    }

    /// Seek; resolves to the clamped time.
    pub async fn seek(&self, time: f64) -> Result<f64> {
        self.request(|reply| EngineCommand::Seek { time, reply }).await
    }

    pub async fn seek_to_pointer(&self, pointer_x: f64) -> Result<f64> {
        self.request(|reply| EngineCommand::SeekToPointer { pointer_x, reply })
            .await
    }

    /// Set zoom; resolves to the zoom in effect.
    pub async fn set_zoom(&self, zoom: f64) -> Result<f64> {
        self.request(|reply| EngineCommand::SetZoom { zoom, reply }).await
    }

    pub async fn pointer(&self, event: PointerEvent) -> Result<bool> {
        self.request(|reply| EngineCommand::Pointer { event, reply }).await
    }

    /// Ask the runtime to stop. Pending commands queued earlier still run.
    pub async fn shutdown(&self) -> Result<()> {
        self.commands
            .send(EngineCommand::Shutdown)
            .await
            .map_err(|_| CutlineError::EngineStopped)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Arc<SessionSnapshot> {
        self.snapshots.borrow().clone()
    }

    /// Latest preview frame.
    pub fn frame(&self) -> Arc<PreviewFrame> {
        self.frames.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<SessionSnapshot>> {
        self.snapshots.clone()
    }

    /// Subscribe to preview frame changes.
    pub fn subscribe_frames(&self) -> watch::Receiver<Arc<PreviewFrame>> {
        self.frames.clone()
    }
}

/// Start the runtime on the current tokio runtime.
///
/// The surface is moved into the task; only the sync adapter drives it.
/// Fails with [`CutlineError::Config`] before spawning anything if the
/// session's configuration is unusable.
pub fn spawn<S>(session: Session, surface: S) -> Result<(EngineHandle, JoinHandle<()>)>
where
    S: MediaSurface + 'static,
{
    let config = session.config().clone();
    config.validate()?;
    let (commands, rx) = mpsc::channel(config.command_buffer);
    let (snapshot_tx, snapshots) = watch::channel(Arc::new(session.snapshot()));
    let (frame_tx, frames) = watch::channel(Arc::new(PreviewFrame::default()));

    let engine = Engine {
        published: session.revision(),
        session,
        adapter: MediaSyncAdapter::new(surface).with_drift_threshold(config.drift_threshold),
        controller: InteractionController::new(),
        snapshot_tx,
        frame_tx,
    };
    let task = tokio::spawn(engine.run(rx));
    info!(tick_ms = config.tick_interval_ms, "Engine started");

    Ok((
        EngineHandle {
            commands,
            snapshots,
            frames,
        },
        task,
    ))
}

/// Monotonic now, read through tokio so paused test time applies.
fn now() -> std::time::Instant {
    tokio::time::Instant::now().into_std()
}

struct Engine<S> {
    session: Session,
    adapter: MediaSyncAdapter<S>,
    controller: InteractionController,
    snapshot_tx: watch::Sender<Arc<SessionSnapshot>>,
    frame_tx: watch::Sender<Arc<PreviewFrame>>,
    published: u64,
}

impl<S: MediaSurface> Engine<S> {
    async fn run(mut self, mut rx: mpsc::Receiver<EngineCommand>) {
        let mut ticker = interval(self.session.config().tick_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.observe();

        loop {
            tokio::select! {
                cmd = rx.recv() => match cmd {
                    Some(EngineCommand::Shutdown) | None => break,
                    Some(cmd) => self.apply(cmd),
                },
                _ = ticker.tick() => {
                    self.session.tick(now());
                    self.observe();
                }
            }
        }

        self.session.pause();
        self.observe();
        info!(revision = self.session.revision(), "Engine stopped");
    }

    fn apply(&mut self, cmd: EngineCommand) {
        match cmd {
            EngineCommand::AddClip {
                track_id,
                draft,
                reply,
            } => {
                let result = self.session.add_clip(track_id, draft);
                self.respond(reply, result);
            }
            EngineCommand::AddToTimeline {
                kind,
                source,
                text,
                reply,
            } => {
                let result = self.session.add_to_timeline(kind, source, text);
                self.respond(reply, result);
            }
            EngineCommand::UpdateClip { id, patch, reply } => {
                let updated = self.session.update_clip(&id, &patch);
                self.respond(reply, updated);
            }
            EngineCommand::DeleteClip { id, reply } => {
                let removed = self.session.delete_clip(&id);
                self.respond(reply, removed);
            }
            EngineCommand::SelectClip { id, reply } => {
                self.session.select_clip(id.as_deref());
                self.respond(reply, ());
            }
            EngineCommand::Play { reply } => {
                self.session.play_at(now());
                self.respond(reply, ());
            }
            EngineCommand::Pause { reply } => {
                self.session.pause();
                self.respond(reply, ());
            }
            EngineCommand::Seek { time, reply } => {
                let time = self.session.seek(time);
                self.respond(reply, time);
            }
            EngineCommand::SeekToPointer { pointer_x, reply } => {
                let time = self.session.seek_to_pointer(pointer_x);
                self.respond(reply, time);
            }
            EngineCommand::SetZoom { zoom, reply } => {
                let zoom = self.session.set_zoom(zoom);
                self.respond(reply, zoom);
            }
            EngineCommand::Pointer { event, reply } => {
                let changed = self.session.pointer(&mut self.controller, event);
                self.respond(reply, changed);
            }
            EngineCommand::Shutdown => {}
        }
    }

    fn respond<T>(&mut self, reply: oneshot::Sender<T>, value: T) {
        self.observe();
        if reply.send(value).is_err() {
            debug!("Requester went away before the reply");
        }
    }

    /// Let the adapter see the current state and publish what changed.
    fn observe(&mut self) {
        let frame = self.adapter.sync(
            self.session.current_time(),
            self.session.is_running(),
            self.session.tracks(),
        );
        self.frame_tx.send_if_modified(|current| {
            if **current == frame {
                false
            } else {
                *current = Arc::new(frame);
                true
            }
        });

        let revision = self.session.revision();
        if revision != self.published {
            self.published = revision;
            self.snapshot_tx.send_replace(Arc::new(self.session.snapshot()));
        }
    }
}
