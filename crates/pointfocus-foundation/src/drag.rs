//! Drag strategy: the image tracks the pointer delta from where the drag
//! began, clamped so an edge never crosses the container edge.

use pointfocus_graphics::{clamp_to_window, ClampWindow, Offset, Point, Velocity};

use crate::gesture_constants::{CLICK_SLOP, MAX_DRAG_VELOCITY};
use crate::input::DragSample;
use crate::session::GestureSession;

/// Result of a drag release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragRelease {
    /// Instantaneous velocity derived from the last two drag samples,
    /// capped per axis.
    pub velocity: Velocity,
    /// Whether the release counts as a real drag (pointer travelled past
    /// the click slop), i.e. the next click must be suppressed.
    pub was_dragging: bool,
}

/// Clamp window for a dragged image: each axis may move from
/// `-(scaled - bounds)` up to zero.
pub fn overflow_window(session: &GestureSession) -> ClampWindow {
    let overflow_x = session.scaled_size.width - session.bounds.width;
    let overflow_y = session.scaled_size.height - session.bounds.height;
    ClampWindow::new(-overflow_x, 0.0, -overflow_y, 0.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragStrategy {
    pub click_slop: f32,
    pub max_velocity: f32,
}

impl Default for DragStrategy {
    fn default() -> Self {
        Self {
            click_slop: CLICK_SLOP,
            max_velocity: MAX_DRAG_VELOCITY,
        }
    }
}

impl DragStrategy {
    /// Anchors a new drag so subsequent moves are offset-relative.
    ///
    /// `drag_start = pointer - current_offset`: dragging the pointer back
    /// to its press position restores exactly the offset the drag began
    /// with.
    pub fn begin(&self, pointer: Point, current: Offset, session: &mut GestureSession) {
        session.drag_start = Point::new(pointer.x - current.left, pointer.y - current.top);
        session.drag_origin = pointer;
        session.prev_sample = None;
        session.last_sample = None;
    }

    /// Computes the clamped offset for a drag-move and records the sample
    /// for velocity derivation, displacing the older of the retained
    /// pair.
    pub fn apply_drag_move(
        &self,
        x: f32,
        y: f32,
        time_ms: i64,
        session: &mut GestureSession,
    ) -> Offset {
        session.prev_sample = session.last_sample;
        session.last_sample = Some(DragSample::new(x, y, time_ms));

        let candidate = session.unclamped_drag_offset(x, y);
        clamp_to_window(candidate.left, candidate.top, &overflow_window(session))
    }

    /// Ends the drag: derives the release velocity from the retained
    /// sample pair and decides whether the following click is suppressed.
    pub fn finish(&self, pointer: Point, session: &mut GestureSession) -> DragRelease {
        let velocity = self.release_velocity(session);
        session.velocity = velocity;

        let travel_x = (pointer.x - session.drag_origin.x).abs();
        let travel_y = (pointer.y - session.drag_origin.y).abs();
        let was_dragging = travel_x > self.click_slop || travel_y > self.click_slop;
        session.was_dragging = was_dragging;

        DragRelease {
            velocity,
            was_dragging,
        }
    }

    /// `v = (last - prev) / ((t_last - t_prev) / 1000)` per axis, zero
    /// with fewer than two samples or no elapsed time.
    fn release_velocity(&self, session: &GestureSession) -> Velocity {
        let (Some(prev), Some(last)) = (session.prev_sample, session.last_sample) else {
            return Velocity::ZERO;
        };

        let elapsed_ms = last.time_ms - prev.time_ms;
        if elapsed_ms <= 0 {
            return Velocity::ZERO;
        }

        let cap = self.max_velocity.max(0.0);
        let elapsed_secs = elapsed_ms as f32 / 1000.0;
        Velocity::new(
            ((last.x - prev.x) / elapsed_secs).min(cap).max(-cap),
            ((last.y - prev.y) / elapsed_secs).min(cap).max(-cap),
        )
    }
}
