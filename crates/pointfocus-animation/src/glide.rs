//! Inertia glide: decaying-velocity pan after a drag release.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pointfocus_core::{FrameCallbackRegistration, FrameClock};
use pointfocus_graphics::{clamp_to_window, ClampWindow, Offset, Velocity};

/// Simulated length of one frame step. The simulation advances by this
/// fixed amount per scheduled frame regardless of the measured frame
/// time, which keeps it deterministic under a manually pumped clock.
pub const NOMINAL_FRAME_SECONDS: f32 = 1.0 / 60.0;

/// Friction and stop threshold for a glide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlideSpec {
    /// Multiplicative velocity decay per step, in (0, 1).
    pub friction: f32,
    /// Velocity magnitude (px/sec) at or below which the glide settles.
    pub min_velocity: f32,
}

impl Default for GlideSpec {
    fn default() -> Self {
        Self {
            friction: 0.95,
            min_velocity: 10.0,
        }
    }
}

impl GlideSpec {
    /// Pulls out-of-range parameters back to usable values. A friction
    /// outside (0, 1) would either freeze or accelerate the glide, so it
    /// falls back to the default.
    pub fn sanitized(self) -> Self {
        let friction = if self.friction > 0.0 && self.friction < 1.0 {
            self.friction
        } else {
            log::warn!("glide friction {} out of (0, 1); using default", self.friction);
            Self::default().friction
        };
        Self {
            friction,
            min_velocity: self.min_velocity.max(0.0),
        }
    }
}

struct GlideState {
    left: Cell<f32>,
    top: Cell<f32>,
    vx: Cell<f32>,
    vy: Cell<f32>,
    window: ClampWindow,
    spec: GlideSpec,
    /// Current frame registration; kept alive so the next step fires,
    /// dropped to cancel it.
    registration: Option<FrameCallbackRegistration>,
    is_running: Cell<bool>,
}

/// Drives the post-release glide.
///
/// Each scheduled frame decays the velocity by `friction`, advances the
/// offset by one nominal frame's worth of travel, clamps it into the
/// overflow window and emits it. An axis that hits the window edge stops
/// contributing (its velocity zeroes). Once both axes are at or below
/// `min_velocity` the last clamped offset has already been emitted and
/// the completion callback runs.
pub struct Glide {
    state: Rc<RefCell<Option<GlideState>>>,
    clock: FrameClock,
}

impl Glide {
    pub fn new(clock: FrameClock) -> Self {
        Self {
            state: Rc::new(RefCell::new(None)),
            clock,
        }
    }

    /// Starts a glide, cancelling any glide already in flight.
    ///
    /// A release velocity already at or below the stop threshold does not
    /// schedule any frame: the starting offset is clamped, emitted once
    /// and the glide completes immediately.
    pub fn start<F, G>(
        &self,
        from: Offset,
        velocity: Velocity,
        window: ClampWindow,
        spec: GlideSpec,
        on_offset: F,
        on_end: G,
    ) where
        F: Fn(Offset) + 'static,
        G: FnOnce() + 'static,
    {
        self.cancel();

        let spec = spec.sanitized();

        if velocity.vx.abs() <= spec.min_velocity && velocity.vy.abs() <= spec.min_velocity {
            on_offset(clamp_to_window(from.left, from.top, &window));
            on_end();
            return;
        }

        *self.state.borrow_mut() = Some(GlideState {
            left: Cell::new(from.left),
            top: Cell::new(from.top),
            vx: Cell::new(velocity.vx),
            vy: Cell::new(velocity.vy),
            window,
            spec,
            registration: None,
            is_running: Cell::new(true),
        });

        schedule_next_step(self.state.clone(), self.clock.clone(), on_offset, on_end);
    }

    /// Stops the glide. No offset is emitted after this returns: the
    /// pending frame registration is dropped, which unregisters the
    /// callback before it can fire.
    pub fn cancel(&self) {
        if let Some(state) = self.state.borrow_mut().take() {
            state.is_running.set(false);
            drop(state.registration);
        }
    }

    pub fn is_running(&self) -> bool {
        self.state
            .borrow()
            .as_ref()
            .is_some_and(|state| state.is_running.get())
    }
}

impl Clone for Glide {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            clock: self.clock.clone(),
        }
    }
}

/// Runs one decay step on the next frame and re-schedules itself while
/// the velocity stays above the stop threshold.
fn schedule_next_step<F, G>(
    state: Rc<RefCell<Option<GlideState>>>,
    clock: FrameClock,
    on_offset: F,
    on_end: G,
) where
    F: Fn(Offset) + 'static,
    G: FnOnce() + 'static,
{
    let state_for_step = state.clone();
    let clock_for_step = clock.clone();

    let registration = clock.with_frame_nanos(move |_frame_time_nanos| {
        let stepped = {
            let state_guard = state_for_step.borrow();
            let Some(glide) = state_guard.as_ref() else {
                return;
            };
            if !glide.is_running.get() {
                return;
            }

            let spec = glide.spec;
            let vx = glide.vx.get() * spec.friction;
            let vy = glide.vy.get() * spec.friction;

            let raw_left = glide.left.get() + vx * NOMINAL_FRAME_SECONDS;
            let raw_top = glide.top.get() + vy * NOMINAL_FRAME_SECONDS;
            let clamped = clamp_to_window(raw_left, raw_top, &glide.window);

            // An axis pinned at the window edge has nowhere left to go.
            let vx = if clamped.left != raw_left { 0.0 } else { vx };
            let vy = if clamped.top != raw_top { 0.0 } else { vy };

            glide.vx.set(vx);
            glide.vy.set(vy);
            glide.left.set(clamped.left);
            glide.top.set(clamped.top);

            let settled = vx.abs() <= spec.min_velocity && vy.abs() <= spec.min_velocity;
            if settled {
                glide.is_running.set(false);
            }

            Some((clamped, settled))
        };

        let Some((offset, settled)) = stepped else {
            return;
        };

        on_offset(offset);

        if settled {
            on_end();
        } else {
            schedule_next_step(state_for_step, clock_for_step, on_offset, on_end);
        }
    });

    if let Some(glide) = state.borrow_mut().as_mut() {
        glide.registration = Some(registration);
    }
}

#[cfg(test)]
#[path = "tests/glide_tests.rs"]
mod tests;
