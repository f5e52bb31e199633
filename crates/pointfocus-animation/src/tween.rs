//! Eased offset interpolation for smooth snaps.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pointfocus_core::{FrameCallbackRegistration, FrameClock};
use pointfocus_graphics::Offset;

/// Easing curves for offset tweens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Applies the curve to a linear fraction in `[0, 1]`.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
        }
    }
}

/// Evaluates a CSS-style cubic bezier timing curve by bisecting for the
/// parametric value whose x matches `fraction`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    fn sample(p1: f32, p2: f32, t: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;
    let mut t = fraction;
    for _ in 0..24 {
        let x = sample(x1, x2, t);
        if (x - fraction).abs() < 1e-5 {
            break;
        }
        if x > fraction {
            t1 = t;
        } else {
            t0 = t;
        }
        t = 0.5 * (t0 + t1);
    }

    sample(y1, y2, t)
}

struct TweenState {
    start: Offset,
    end: Offset,
    duration_nanos: u64,
    easing: Easing,
    start_time_nanos: Cell<Option<u64>>,
    registration: Option<FrameCallbackRegistration>,
    is_running: Cell<bool>,
}

/// Frame-driven interpolation from one offset to another.
///
/// Hosts use this for smooth snap-to-bounds moves. Cancellation follows
/// the same registration-drop rule as the glide: once cancelled, no
/// further offset is emitted.
pub struct OffsetTween {
    state: Rc<RefCell<Option<TweenState>>>,
    clock: FrameClock,
}

impl OffsetTween {
    pub fn new(clock: FrameClock) -> Self {
        Self {
            state: Rc::new(RefCell::new(None)),
            clock,
        }
    }

    /// Starts a tween, cancelling any tween already in flight. A zero
    /// duration emits the end offset on the next frame and completes.
    pub fn start<F, G>(
        &self,
        from: Offset,
        to: Offset,
        duration_ms: u64,
        easing: Easing,
        on_offset: F,
        on_done: G,
    ) where
        F: Fn(Offset) + 'static,
        G: FnOnce() + 'static,
    {
        self.cancel();

        *self.state.borrow_mut() = Some(TweenState {
            start: from,
            end: to,
            duration_nanos: duration_ms * 1_000_000,
            easing,
            start_time_nanos: Cell::new(None),
            registration: None,
            is_running: Cell::new(true),
        });

        schedule_next_step(self.state.clone(), self.clock.clone(), on_offset, on_done);
    }

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

fn schedule_next_step<F, G>(
    state: Rc<RefCell<Option<TweenState>>>,
    clock: FrameClock,
    on_offset: F,
    on_done: G,
) where
    F: Fn(Offset) + 'static,
    G: FnOnce() + 'static,
{
    let state_for_step = state.clone();
    let clock_for_step = clock.clone();

    let registration = clock.with_frame_nanos(move |frame_time_nanos| {
        let stepped = {
            let state_guard = state_for_step.borrow();
            let Some(tween) = state_guard.as_ref() else {
                return;
            };
            if !tween.is_running.get() {
                return;
            }

            let start_time = match tween.start_time_nanos.get() {
                Some(value) => value,
                None => {
                    tween.start_time_nanos.set(Some(frame_time_nanos));
                    frame_time_nanos
                }
            };

            let elapsed = frame_time_nanos.saturating_sub(start_time);
            let fraction = if tween.duration_nanos == 0 {
                1.0
            } else {
                (elapsed as f32 / tween.duration_nanos as f32).min(1.0)
            };
            let eased = tween.easing.transform(fraction);

            let offset = Offset::new(
                tween.start.left + (tween.end.left - tween.start.left) * eased,
                tween.start.top + (tween.end.top - tween.start.top) * eased,
            );

            let finished = fraction >= 1.0;
            if finished {
                tween.is_running.set(false);
            }

            Some((offset, finished))
        };

        let Some((offset, finished)) = stepped else {
            return;
        };

        on_offset(offset);

        if finished {
            on_done();
        } else {
            schedule_next_step(state_for_step, clock_for_step, on_offset, on_done);
        }
    });

    if let Some(tween) = state.borrow_mut().as_mut() {
        tween.registration = Some(registration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointfocus_core::Ticker;

    #[test]
    fn easing_endpoints_are_exact() {
        for easing in [Easing::Linear, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(easing.transform(0.0), 0.0);
            assert_eq!(easing.transform(1.0), 1.0);
        }
    }

    #[test]
    fn ease_out_leads_linear() {
        // EaseOut covers more than half the distance by the halfway mark.
        assert!(Easing::EaseOut.transform(0.5) > 0.5);
    }

    #[test]
    fn tween_reaches_target_at_duration() {
        let ticker = Ticker::new();
        let handle = ticker.handle();
        let tween = OffsetTween::new(handle.frame_clock());

        let emitted = Rc::new(RefCell::new(Vec::new()));
        let done = Rc::new(Cell::new(false));
        let emitted_in_cb = Rc::clone(&emitted);
        let done_in_cb = Rc::clone(&done);

        tween.start(
            Offset::ZERO,
            Offset::new(-100.0, -40.0),
            100,
            Easing::Linear,
            move |offset| emitted_in_cb.borrow_mut().push(offset),
            move || done_in_cb.set(true),
        );

        handle.drain_frame_callbacks(0);
        handle.drain_frame_callbacks(50_000_000);
        handle.drain_frame_callbacks(100_000_000);

        assert!(done.get());
        assert!(!tween.is_running());
        let emitted = emitted.borrow();
        assert_eq!(emitted.first().copied(), Some(Offset::ZERO));
        assert_eq!(emitted[1], Offset::new(-50.0, -20.0));
        assert_eq!(emitted.last().copied(), Some(Offset::new(-100.0, -40.0)));
    }

    #[test]
    fn zero_duration_snaps_on_first_frame() {
        let ticker = Ticker::new();
        let handle = ticker.handle();
        let tween = OffsetTween::new(handle.frame_clock());

        let last = Rc::new(RefCell::new(None));
        let done = Rc::new(Cell::new(false));
        let last_in_cb = Rc::clone(&last);
        let done_in_cb = Rc::clone(&done);

        tween.start(
            Offset::new(5.0, 5.0),
            Offset::new(-30.0, 0.0),
            0,
            Easing::EaseInOut,
            move |offset| *last_in_cb.borrow_mut() = Some(offset),
            move || done_in_cb.set(true),
        );

        handle.drain_frame_callbacks(0);

        assert!(done.get());
        assert_eq!(*last.borrow(), Some(Offset::new(-30.0, 0.0)));
    }

    #[test]
    fn cancel_stops_emission() {
        let ticker = Ticker::new();
        let handle = ticker.handle();
        let tween = OffsetTween::new(handle.frame_clock());

        let count = Rc::new(Cell::new(0u32));
        let count_in_cb = Rc::clone(&count);

        tween.start(
            Offset::ZERO,
            Offset::new(-100.0, 0.0),
            100,
            Easing::Linear,
            move |_| count_in_cb.set(count_in_cb.get() + 1),
            || {},
        );

        handle.drain_frame_callbacks(0);
        tween.cancel();
        handle.drain_frame_callbacks(16_000_000);
        handle.drain_frame_callbacks(32_000_000);

        assert_eq!(count.get(), 1);
        assert!(!tween.is_running());
    }
}
