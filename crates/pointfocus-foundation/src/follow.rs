//! Follow strategy: the pointer position maps continuously onto the
//! overflow region while hovering the zoomed image.

use pointfocus_graphics::{
    clamp_to_window, relative_offsets, Bounds, ClampWindow, Offset, Point,
};

use crate::session::GestureSession;

/// Maps a pointer sample onto a ratio-scaled pan offset.
///
/// With `inverted` set (the default), moving the pointer toward the
/// right/bottom edge of the container pans the image so its right/bottom
/// overflow becomes visible. The non-inverted variant moves the image
/// with the pointer instead; the two behaviours differ only in sign.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FollowStrategy {
    pub inverted: bool,
}

impl Default for FollowStrategy {
    fn default() -> Self {
        Self { inverted: true }
    }
}

impl FollowStrategy {
    pub fn new(inverted: bool) -> Self {
        Self { inverted }
    }

    /// Computes the offset for a pointer at page coordinates `(x, y)`.
    ///
    /// The pointer is first made origin-relative through the session's
    /// anchor, then clamped into the container rectangle, then scaled by
    /// the overflow ratio. With zero bounds everything collapses to
    /// `Offset::ZERO`; no NaN can escape.
    pub fn apply_pointer_move(&self, x: f32, y: f32, session: &GestureSession) -> Offset {
        let rel = relative_offsets(x, y, session.offsets.x, session.offsets.y);

        let window = ClampWindow::new(0.0, session.bounds.width, 0.0, session.bounds.height);
        let clamped = clamp_to_window(rel.x, rel.y, &window);

        let sign = if self.inverted { -1.0 } else { 1.0 };
        Offset::new(
            clamped.left * sign * session.ratios.x,
            clamped.top * sign * session.ratios.y,
        )
    }

    /// Positions the image for a zoom-in at `(x, y)`.
    ///
    /// Captures the container bounds, derives the origin anchor from the
    /// page scroll position, and immediately runs one pointer-move so the
    /// image is placed before the first move event arrives. Without a
    /// measured container the session geometry zeroes out and the offset
    /// is `Offset::ZERO`.
    pub fn initialize(
        &self,
        x: f32,
        y: f32,
        scroll: Point,
        bounds: Option<Bounds>,
        session: &mut GestureSession,
    ) -> Offset {
        let Some(bounds) = bounds else {
            session.bounds = Bounds::ZERO;
            session.offsets = Point::ZERO;
            return Offset::ZERO;
        };

        session.bounds = bounds;
        session.offsets = relative_offsets(scroll.x, scroll.y, -bounds.left, -bounds.top);

        self.apply_pointer_move(x, y, session)
    }
}
