//! Frame-driven animations for the pointfocus gesture engine
//!
//! Two drivers, both stepped once per display frame through the core
//! frame clock and both structurally cancellable: [`Glide`], the
//! decaying-velocity inertia simulation that continues a pan after a drag
//! release, and [`OffsetTween`], an eased interpolation hosts use for
//! smooth snaps.

mod glide;
mod tween;

pub use glide::{Glide, GlideSpec, NOMINAL_FRAME_SECONDS};
pub use tween::{Easing, OffsetTween};
