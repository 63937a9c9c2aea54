//! Cutline Engine - session ownership and runtime
//!
//! - `EngineConfig`: tunables loaded from JSON
//! - `Session`: the one owned editing session (timeline, clock, zoom) with a
//!   revision counter for snapshot diffing
//! - `runtime`: the tokio task that owns a session, ticks its clock and keeps
//!   a media surface in sync

pub mod config;
pub mod runtime;
pub mod session;

pub use config::{EngineConfig, MAX_ZOOM, MIN_ZOOM};
pub use runtime::{spawn, EngineCommand, EngineHandle};
pub use session::{Session, SessionSnapshot, NEW_ASSET_NAME, NEW_TEXT_NAME};
