//! Shared gesture thresholds.
//!
//! These values are in logical pixels. They are deliberately defined in
//! one place so the drag strategy and the state machine agree on what
//! counts as a drag versus a click.

/// Pointer travel between press and release below which a drag is still
/// treated as a click.
///
/// A release inside this slop leaves `was_dragging` unset, so the click
/// that follows is allowed to toggle the zoom. 5.0 is small enough that
/// any intentional pan exceeds it and large enough to absorb the jitter
/// of a stationary press on touch screens.
pub const CLICK_SLOP: f32 = 5.0;

/// Maximum release velocity in logical pixels per second.
///
/// Timestamps arrive from the host at millisecond resolution, so two
/// samples landing in the same or adjacent milliseconds can produce
/// absurd derivatives; the cap keeps the inertia glide inside a plausible
/// range.
pub const MAX_DRAG_VELOCITY: f32 = 8_000.0;
