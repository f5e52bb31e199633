//! Geometric primitives: Point, Size, Bounds, Offset, OverflowRatio

/// A position in page coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };
}

/// A container's on-screen rectangle in page coordinates.
///
/// Captured once per zoom-in and refreshed on layout-affecting events;
/// immutable for the rest of the zoom session.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    pub left: f32,
    pub top: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32, left: f32, top: f32) -> Self {
        Self {
            width,
            height,
            left,
            top,
        }
    }

    pub const ZERO: Bounds = Bounds {
        width: 0.0,
        height: 0.0,
        left: 0.0,
        top: 0.0,
    };

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// The translation applied to the zoomed image, in the same pixel unit as
/// [`Bounds`]. The sole observable output of the position strategies and
/// the glide simulator.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Offset {
    pub left: f32,
    pub top: f32,
}

impl Offset {
    pub const fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }

    pub const ZERO: Offset = Offset {
        left: 0.0,
        top: 0.0,
    };
}

/// Per-axis overflow of the scaled image relative to its container:
/// `(scaled - bounds) / bounds`. Converts a 0..bounds cursor position into
/// a pixel pan offset in follow mode.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct OverflowRatio {
    pub x: f32,
    pub y: f32,
}

impl OverflowRatio {
    pub const ZERO: OverflowRatio = OverflowRatio { x: 0.0, y: 0.0 };
}

/// Pointer velocity in px/sec per axis.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Velocity {
    pub vx: f32,
    pub vy: f32,
}

impl Velocity {
    pub const fn new(vx: f32, vy: f32) -> Self {
        Self { vx, vy }
    }

    pub const ZERO: Velocity = Velocity { vx: 0.0, vy: 0.0 };
}

/// Per-axis clamp window for offsets.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ClampWindow {
    pub min_left: f32,
    pub max_left: f32,
    pub min_top: f32,
    pub max_top: f32,
}

impl ClampWindow {
    pub const fn new(min_left: f32, max_left: f32, min_top: f32, max_top: f32) -> Self {
        Self {
            min_left,
            max_left,
            min_top,
            max_top,
        }
    }
}

/// Resolves a host-reported container rectangle.
///
/// `None` (no container handle, e.g. a non-browser evaluation context)
/// resolves to the zero rectangle so downstream math degrades to zero
/// offsets instead of failing.
pub fn capture_bounds(source: Option<Bounds>) -> Bounds {
    source.unwrap_or(Bounds::ZERO)
}

/// Overflow ratios for a scaled image inside `bounds`.
///
/// An axis whose bounds dimension is zero (container not measured yet)
/// yields a zero ratio instead of dividing by zero.
pub fn overflow_ratios(bounds: Bounds, scaled: Size) -> OverflowRatio {
    OverflowRatio {
        x: axis_ratio(scaled.width, bounds.width),
        y: axis_ratio(scaled.height, bounds.height),
    }
}

fn axis_ratio(scaled: f32, bound: f32) -> f32 {
    if bound == 0.0 {
        0.0
    } else {
        (scaled - bound) / bound
    }
}

/// Pointer position relative to a reference origin.
pub fn relative_offsets(page_x: f32, page_y: f32, origin_left: f32, origin_top: f32) -> Point {
    Point {
        x: page_x - origin_left,
        y: page_y - origin_top,
    }
}

/// Clamps each axis independently into `window`.
///
/// Every position strategy and the glide simulator funnel through here, so
/// boundary policy is defined exactly once. The upper bound is applied
/// first: a window whose `min` exceeds its `max` (image smaller than the
/// container on that axis) resolves to `min`.
pub fn clamp_to_window(left: f32, top: f32, window: &ClampWindow) -> Offset {
    Offset {
        left: left.min(window.max_left).max(window.min_left),
        top: top.min(window.max_top).max(window.min_top),
    }
}

/// Natural image size multiplied by the active zoom scale.
///
/// Unreported natural dimensions (zero width or height) yield a zero size.
pub fn scaled_size(natural: Size, zoom_scale: f32) -> Size {
    if natural.width == 0.0 || natural.height == 0.0 {
        return Size::ZERO;
    }
    Size {
        width: natural.width * zoom_scale,
        height: natural.height * zoom_scale,
    }
}
