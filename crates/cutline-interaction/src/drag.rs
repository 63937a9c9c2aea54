//! Drag session state and gesture math.

use cutline_core::{Rect, Vec2};
use cutline_timeline::ClipId;
use serde::{Deserialize, Serialize};

/// Width of the track header column left of the timeline lanes, in pixels.
pub const TRACK_HEADER_WIDTH: f64 = 200.0;

/// State carried for the lifetime of one drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragOrigin<V> {
    /// Clip being dragged
    pub target_id: ClipId,
    /// Pointer position at pointer-down
    pub origin_pointer: Vec2,
    /// Value being edited, as it was at pointer-down
    pub origin_value: V,
}

/// Preview drag; the origin value is the clip's `(x, y)` in percent.
pub type PreviewDrag = DragOrigin<Vec2>;

/// Timeline drag; the origin value is the clip's start in seconds.
pub type TimelineDrag = DragOrigin<f64>;

impl PreviewDrag {
    /// New `(x, y)` for the pointer over `rect`.
    pub fn position_at(&self, rect: Rect, pointer: Vec2) -> Vec2 {
        preview_position(rect, pointer)
    }
}

impl TimelineDrag {
    /// New start time for the pointer at `pointer_x` with `zoom` px/s.
    pub fn start_at(&self, pointer_x: f64, zoom: f64) -> f64 {
        retimed_start(self.origin_value, self.origin_pointer.x, pointer_x, zoom)
    }
}

/// Pointer position as a percentage of the preview, clamped to `[0, 100]`.
pub fn preview_position(rect: Rect, pointer: Vec2) -> Vec2 {
    rect.percent_of(pointer)
}

/// `max(0, origin_start + (pointer_x - origin_x) / zoom)`.
///
/// No upper bound, snapping, or collision handling. A non-positive zoom
/// leaves the start where it was.
pub fn retimed_start(origin_start: f64, origin_x: f64, pointer_x: f64, zoom: f64) -> f64 {
    if zoom.is_nan() || zoom <= 0.0 || !pointer_x.is_finite() {
        return origin_start;
    }
    (origin_start + (pointer_x - origin_x) / zoom).max(0.0)
}

/// Timeline time under a pointer on the ruler or a lane whose left edge is
/// at `lane_left`. Not clamped above; seeking does that.
pub fn time_at_pointer(pointer_x: f64, lane_left: f64, zoom: f64) -> f64 {
    if zoom.is_nan() || zoom <= 0.0 {
        return 0.0;
    }
    ((pointer_x - lane_left) / zoom).max(0.0)
}
