//! Translates pointer events into `TimelineStore` mutations.

use cutline_core::{Rect, Vec2};
use cutline_timeline::{ClipId, ClipPatch, TimelineStore, TransformPatch};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::drag::{PreviewDrag, TimelineDrag};

/// Pointer input routed to the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Pointer pressed on an overlay clip in the preview.
    PreviewDown { clip_id: ClipId, pointer: Vec2 },
    /// Pointer moved over the preview whose bounds are `rect`.
    PreviewMove { pointer: Vec2, rect: Rect },
    /// Pointer released or left the preview.
    PreviewRelease,
    /// Pointer pressed on a clip in a timeline lane.
    TimelineDown { clip_id: ClipId, pointer: Vec2 },
    /// Pointer moved over the timeline.
    TimelineMove { pointer: Vec2 },
    /// Pointer released or left the timeline.
    TimelineRelease,
}

/// Holds the active drag session for each surface.
#[derive(Debug, Default)]
pub struct InteractionController {
    preview: Option<PreviewDrag>,
    timeline: Option<TimelineDrag>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch one pointer event. Returns whether the store changed.
    pub fn handle(&mut self, store: &mut TimelineStore, zoom: f64, event: PointerEvent) -> bool {
        match event {
            PointerEvent::PreviewDown { clip_id, pointer } => {
                self.begin_preview_drag(store, &clip_id, pointer);
                true
            }
            PointerEvent::PreviewMove { pointer, rect } => {
                self.preview_pointer_move(store, pointer, rect)
            }
            PointerEvent::PreviewRelease => {
                self.end_preview_drag();
                false
            }
            PointerEvent::TimelineDown { clip_id, pointer } => {
                self.begin_timeline_drag(store, &clip_id, pointer);
                true
            }
            PointerEvent::TimelineMove { pointer } => {
                self.timeline_pointer_move(store, pointer, zoom)
            }
            PointerEvent::TimelineRelease => {
                self.end_timeline_drag();
                false
            }
        }
    }

    /// Select `clip_id` and, if it exists, start repositioning it in the preview.
    pub fn begin_preview_drag(
        &mut self,
        store: &mut TimelineStore,
        clip_id: &str,
        pointer: Vec2,
    ) -> bool {
        store.select_clip(Some(clip_id));
        self.preview = store.find_clip(clip_id).map(|clip| PreviewDrag {
            target_id: clip.id.clone(),
            origin_pointer: pointer,
            origin_value: Vec2::new(clip.properties.x, clip.properties.y),
        });
        self.preview.is_some()
    }

    /// Move the dragged clip under the pointer. Only `x`/`y` are written.
    pub fn preview_pointer_move(
        &mut self,
        store: &mut TimelineStore,
        pointer: Vec2,
        preview_rect: Rect,
    ) -> bool {
        let Some(drag) = &self.preview else {
            return false;
        };
        let pos = drag.position_at(preview_rect, pointer);
        trace!(clip = %drag.target_id, x = pos.x, y = pos.y, "Preview drag");
        store.update_clip(
            &drag.target_id,
            &ClipPatch::properties(TransformPatch::position(pos.x, pos.y)),
        )
    }

    /// Drop the preview session (pointer-up or pointer-leave).
    pub fn end_preview_drag(&mut self) -> Option<PreviewDrag> {
        self.preview.take()
    }

    /// Select `clip_id` and, if it exists, start retiming it on the timeline.
    pub fn begin_timeline_drag(
        &mut self,
        store: &mut TimelineStore,
        clip_id: &str,
        pointer: Vec2,
    ) -> bool {
        store.select_clip(Some(clip_id));
        self.timeline = store.find_clip(clip_id).map(|clip| TimelineDrag {
            target_id: clip.id.clone(),
            origin_pointer: pointer,
            origin_value: clip.start,
        });
        self.timeline.is_some()
    }

    /// Shift the dragged clip by the horizontal pointer delta. Only `start` is written.
    pub fn timeline_pointer_move(
        &mut self,
        store: &mut TimelineStore,
        pointer: Vec2,
        zoom: f64,
    ) -> bool {
        let Some(drag) = &self.timeline else {
            return false;
        };
        let start = drag.start_at(pointer.x, zoom);
        trace!(clip = %drag.target_id, start, "Timeline drag");
        store.update_clip(&drag.target_id, &ClipPatch::start(start))
    }

    /// Drop the timeline session (pointer-up or pointer-leave).
    pub fn end_timeline_drag(&mut self) -> Option<TimelineDrag> {
        self.timeline.take()
    }

    pub fn preview_drag(&self) -> Option<&PreviewDrag> {
        self.preview.as_ref()
    }

    pub fn timeline_drag(&self) -> Option<&TimelineDrag> {
        self.timeline.as_ref()
    }

    /// Whether any drag session is open.
    pub fn is_dragging(&self) -> bool {
        self.preview.is_some() || self.timeline.is_some()
    }
}
