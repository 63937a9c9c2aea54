//! Cutline Interaction - pointer gestures to timeline edits
//!
//! Two independent drag sessions:
//! - preview repositioning writes a clip's `x`/`y` only
//! - timeline retiming writes a clip's `start` only
//!
//! Every move is applied to the store immediately. Releasing the pointer just
//! drops the session; there is nothing to commit or roll back.

pub mod controller;
pub mod drag;

pub use controller::{InteractionController, PointerEvent};
pub use drag::{
    preview_position, retimed_start, time_at_pointer, DragOrigin, PreviewDrag, TimelineDrag,
    TRACK_HEADER_WIDTH,
};
