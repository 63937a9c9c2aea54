//! Cutline Timeline - Track and clip model
//!
//! Implements the timeline structure for the editor:
//! - Tracks holding ordered clips
//! - Clip transforms with field-by-field patching
//! - `TimelineStore` with create/update/delete/select mutations
//! - The stock demo session layout

pub mod clip;
pub mod demo;
pub mod store;
pub mod track;

pub use clip::{Clip, ClipDraft, ClipId, ClipPatch, Transform, TransformPatch};
pub use store::TimelineStore;
pub use track::{Track, TrackId, TrackKind};
