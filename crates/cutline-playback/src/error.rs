//! Errors reported by media surfaces.

use thiserror::Error;

/// Failures a media surface may report when asked to start playback.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The platform refused to start playback (e.g. autoplay policy).
    #[error("Playback rejected: {0}")]
    PlaybackRejected(String),

    /// Nothing is loaded on the surface.
    #[error("No media source loaded")]
    NoSource,
}
