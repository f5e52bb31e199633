//! Mutable state for one zoom-in-to-zoom-out lifecycle.

use pointfocus_graphics::{Bounds, Offset, OverflowRatio, Point, Size, Velocity};
use smallvec::SmallVec;

use crate::input::DragSample;

/// The aggregate owned by one active zoom lifecycle.
///
/// Created with all-zero defaults when the widget mounts, repopulated at
/// the start of every zoom-in, and reset to defaults once the close fade
/// completes. Only the gesture state machine writes to it.
#[derive(Default)]
pub struct GestureSession {
    /// Container rectangle in page coordinates, captured per zoom-in.
    pub bounds: Bounds,
    /// Natural image size times the active zoom scale.
    pub scaled_size: Size,
    /// Per-axis overflow of `scaled_size` relative to `bounds`.
    pub ratios: OverflowRatio,
    /// Origin-relative anchor used by the follow strategy.
    pub offsets: Point,
    /// `pointer - offset` captured when a drag begins; drag moves are
    /// deltas from here.
    pub drag_start: Point,
    /// Page position of the pointer when the drag began, for the
    /// click-slop check at release.
    pub drag_origin: Point,
    pub prev_sample: Option<DragSample>,
    pub last_sample: Option<DragSample>,
    /// Release velocity measured by the last drag end.
    pub velocity: Velocity,
    /// Set by a drag release that travelled past the click slop; consumed
    /// by the first click handled afterwards.
    pub was_dragging: bool,
    /// Zoom requests that arrived before the image reported its metrics,
    /// replayed once on load. Latest request wins.
    pending_zooms: SmallVec<[Point; 1]>,
}

impl GestureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a zoom-in that cannot run yet because the zoomed image has
    /// not finished loading.
    pub fn defer_zoom(&mut self, at: Point) {
        self.pending_zooms.push(at);
    }

    /// Consumes the deferred zoom request, if any. Multiple requests
    /// collapse to the most recent.
    pub fn take_pending_zoom(&mut self) -> Option<Point> {
        let last = self.pending_zooms.last().copied();
        self.pending_zooms.clear();
        last
    }

    pub fn has_pending_zoom(&self) -> bool {
        !self.pending_zooms.is_empty()
    }

    /// Clears drag and velocity bookkeeping without touching geometry.
    /// Runs as soon as a close is requested, while the visual offsets
    /// survive until the fade completes.
    pub fn clear_drag(&mut self) {
        self.drag_start = Point::ZERO;
        self.drag_origin = Point::ZERO;
        self.prev_sample = None;
        self.last_sample = None;
        self.velocity = Velocity::ZERO;
    }

    /// Restores every field to its mount-time default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current drag offset that would be produced by `pointer`, before
    /// clamping.
    pub fn unclamped_drag_offset(&self, x: f32, y: f32) -> Offset {
        Offset::new(x - self.drag_start.x, y - self.drag_start.y)
    }
}
