//! Pointer input, session state and the gesture state machine for the
//! pointfocus zoom/pan engine.
//!
//! Hosts feed [`ZoomGesture`] raw pointer samples and lifecycle events;
//! the machine reads and writes the [`GestureSession`], runs the active
//! position strategy, and reports translation offsets back through the
//! [`ZoomHost`] trait. Rendering, event wiring and image loading stay on
//! the host side.

mod drag;
mod follow;
mod gesture_constants;
mod input;
mod session;
mod zoom_gesture;

pub use drag::{DragRelease, DragStrategy};
pub use follow::FollowStrategy;
pub use gesture_constants::{CLICK_SLOP, MAX_DRAG_VELOCITY};
pub use input::{DragSample, PointerKind, PointerSample};
pub use session::GestureSession;
pub use zoom_gesture::{MoveMode, ZoomConfig, ZoomGesture, ZoomHost, ZoomPhase};
