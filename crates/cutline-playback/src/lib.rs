//! Cutline Playback - clock and media surface synchronization
//!
//! - `PlaybackClock`: the single time cursor and its run/stop state machine
//! - `MediaSurface`: transport capability of the external player
//! - `MediaSyncAdapter`: drives a surface from the cursor with drift tolerance
//!   and computes the active overlay set for the preview

pub mod clock;
pub mod error;
pub mod surface;
pub mod sync;

pub use clock::{ClockState, PlaybackClock, TickOutcome};
pub use error::SurfaceError;
pub use surface::{HeadlessSurface, MediaSurface, SurfaceStats};
pub use sync::{
    active_overlays, primary_track, MediaSyncAdapter, OverlayClip, PreviewFrame, PrimaryPlayback,
    ResolvedTransform,
};
