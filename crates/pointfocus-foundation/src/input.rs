//! Pointer sample types fed in by the host.

use pointfocus_graphics::Point;

/// Origin of the pointer stream. Mouse and touch streams are mutually
/// exclusive within one zoom session; the first touch of a session wins
/// and forces drag mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// A raw pointer position in page coordinates with the host's event
/// timestamp in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub time_ms: i64,
}

impl PointerSample {
    pub const fn new(x: f32, y: f32, time_ms: i64) -> Self {
        Self { x, y, time_ms }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A timestamped position captured on each drag-move. The session keeps
/// the two most recent to derive the release velocity.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct DragSample {
    pub x: f32,
    pub y: f32,
    pub time_ms: i64,
}

impl DragSample {
    pub const fn new(x: f32, y: f32, time_ms: i64) -> Self {
        Self { x, y, time_ms }
    }
}
