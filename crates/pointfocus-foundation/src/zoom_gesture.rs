//! The gesture state machine: Idle → Zoomed (follow/drag) → Dragging →
//! FadingOut → Idle.
//!
//! Hosts translate their event source (mouse, touch, keyboard close,
//! transition-end) into calls on [`ZoomGesture`] and receive every
//! computed offset back through [`ZoomHost`]. Which host event maps to
//! which call is the host's business — e.g. a mouse-leave typically
//! becomes `drag_ended` while dragging and `close_requested` otherwise,
//! an escape key becomes `close_requested` — the machine only cares about
//! the semantic stream.

use std::cell::RefCell;
use std::rc::Rc;

use pointfocus_animation::{Glide, GlideSpec};
use pointfocus_core::FrameClock;
use pointfocus_graphics::{
    capture_bounds, clamp_to_window, overflow_ratios, scaled_size, Bounds, Offset, Point, Size,
    Velocity,
};

use crate::drag::{overflow_window, DragStrategy};
use crate::follow::FollowStrategy;
use crate::gesture_constants::{CLICK_SLOP, MAX_DRAG_VELOCITY};
use crate::input::{PointerKind, PointerSample};
use crate::session::GestureSession;

/// How pointer motion pans the zoomed image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveMode {
    /// Hovering pans continuously; no press needed.
    Follow,
    /// The image only moves while the pointer is held down.
    Drag,
}

/// Where the machine currently is in the zoom lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomPhase {
    Idle,
    Zoomed,
    Dragging,
    FadingOut,
}

/// Everything the machine needs from, and reports to, its host.
///
/// The two provider methods are the only inputs the machine pulls; all
/// other data arrives through event calls. Output methods default to
/// no-ops so hosts implement only what they observe.
pub trait ZoomHost {
    /// Current container rectangle in page coordinates, `None` while the
    /// container is unmeasured.
    fn viewport_bounds(&self) -> Option<Bounds>;

    /// Current page scroll position.
    fn scroll_position(&self) -> Point {
        Point::ZERO
    }

    /// A new translation for the zoomed image: follow move, drag move,
    /// glide step or snap.
    fn offset_changed(&mut self, offset: Offset);

    /// A drag ended with the given release velocity at the given offset.
    fn drag_released(&mut self, _velocity: Velocity, _position: Offset) {}

    /// The post-release glide came to rest.
    fn inertia_settled(&mut self) {}

    fn zoomed_in(&mut self) {}

    fn zoomed_out(&mut self) {}

    /// The close is fully over (fade done, session reset); the host may
    /// release its resources for the zoomed image.
    fn close_finalized(&mut self) {}
}

/// Tunables supplied by the host once at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomConfig {
    /// Multiplier applied to the image's natural size; 0 collapses the
    /// zoomed image (and thus every offset) to zero.
    pub zoom_scale: f32,
    pub move_mode: MoveMode,
    /// Glide velocity decay per frame step, in (0, 1).
    pub friction: f32,
    /// Glide stop threshold in px/sec.
    pub min_velocity: f32,
    /// Cap for the measured release velocity in px/sec.
    pub max_velocity: f32,
    /// Pointer travel below which a press-release still counts as a
    /// click.
    pub click_slop: f32,
    /// Host-side close transition length. Zero finalises a close
    /// immediately instead of waiting for `fade_finished`.
    pub fade_duration_ms: u64,
    pub disable_drag: bool,
    pub disable_inertia: bool,
    /// Follow strategy sign; see [`FollowStrategy`].
    pub invert_follow: bool,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            zoom_scale: 1.0,
            move_mode: MoveMode::Follow,
            friction: 0.95,
            min_velocity: 10.0,
            max_velocity: MAX_DRAG_VELOCITY,
            click_slop: CLICK_SLOP,
            fade_duration_ms: 150,
            disable_drag: false,
            disable_inertia: false,
            invert_follow: true,
        }
    }
}

impl ZoomConfig {
    fn sanitized(mut self) -> Self {
        if self.zoom_scale < 0.0 {
            log::warn!("zoom_scale {} below zero; using 0", self.zoom_scale);
            self.zoom_scale = 0.0;
        }
        self.click_slop = self.click_slop.max(0.0);
        self
    }

    fn glide_spec(&self) -> GlideSpec {
        GlideSpec {
            friction: self.friction,
            min_velocity: self.min_velocity,
        }
        .sanitized()
    }
}

struct Inner {
    config: ZoomConfig,
    session: GestureSession,
    phase: ZoomPhase,
    /// Active move mode; starts as configured, forced to drag by touch,
    /// restored when the session closes.
    move_mode: MoveMode,
    pointer_kind: Option<PointerKind>,
    /// Last offset handed to the host.
    offset: Offset,
    natural_size: Size,
    image_ready: bool,
    follow: FollowStrategy,
    drag: DragStrategy,
}

impl Inner {
    fn refresh_metrics(&mut self, bounds: Option<Bounds>) {
        self.session.scaled_size = scaled_size(self.natural_size, self.config.zoom_scale);
        self.session.bounds = capture_bounds(bounds);
        self.session.ratios = overflow_ratios(self.session.bounds, self.session.scaled_size);
    }

    /// Runs the configured strategy's zoom-in placement.
    fn zoom_in_offset(&mut self, x: f32, y: f32, bounds: Option<Bounds>, scroll: Point) -> Offset {
        match self.move_mode {
            MoveMode::Follow => {
                let follow = self.follow;
                follow.initialize(x, y, scroll, bounds, &mut self.session)
            }
            MoveMode::Drag => {
                let bounds = capture_bounds(bounds);
                self.session.bounds = bounds;
                self.session.drag_start = Point::ZERO;

                // Pan the tapped point into view: its container-relative
                // position scaled by the overflow ratio, clamped like any
                // other drag offset.
                let rel_x = x - (scroll.x + bounds.left);
                let rel_y = y - (scroll.y + bounds.top);
                let candidate = Offset::new(
                    rel_x * -self.session.ratios.x,
                    rel_y * -self.session.ratios.y,
                );
                clamp_to_window(
                    candidate.left,
                    candidate.top,
                    &overflow_window(&self.session),
                )
            }
        }
    }

    /// Returns the session and machine to mount-time defaults.
    fn finalize_close(&mut self) {
        self.session.reset();
        self.phase = ZoomPhase::Idle;
        self.offset = Offset::ZERO;
        self.move_mode = self.config.move_mode;
        self.pointer_kind = None;
    }
}

/// The gesture state machine. One instance per widget; single-threaded.
///
/// All mutation of the [`GestureSession`] happens here, strictly in event
/// arrival order. The inertia glide never overlaps a drag: starting a
/// drag cancels an in-flight glide and a glide only starts after a drag
/// has fully ended.
pub struct ZoomGesture<H: ZoomHost + 'static> {
    inner: Rc<RefCell<Inner>>,
    host: Rc<RefCell<H>>,
    glide: Glide,
}

impl<H: ZoomHost + 'static> ZoomGesture<H> {
    pub fn new(clock: FrameClock, config: ZoomConfig, host: Rc<RefCell<H>>) -> Self {
        let config = config.sanitized();
        let inner = Inner {
            session: GestureSession::new(),
            phase: ZoomPhase::Idle,
            move_mode: config.move_mode,
            pointer_kind: None,
            offset: Offset::ZERO,
            natural_size: Size::ZERO,
            image_ready: false,
            follow: FollowStrategy::new(config.invert_follow),
            drag: DragStrategy {
                click_slop: config.click_slop,
                max_velocity: config.max_velocity,
            },
            config,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
            host,
            glide: Glide::new(clock),
        }
    }

    pub fn phase(&self) -> ZoomPhase {
        self.inner.borrow().phase
    }

    pub fn is_zoomed(&self) -> bool {
        matches!(self.phase(), ZoomPhase::Zoomed | ZoomPhase::Dragging)
    }

    pub fn current_offset(&self) -> Offset {
        self.inner.borrow().offset
    }

    pub fn move_mode(&self) -> MoveMode {
        self.inner.borrow().move_mode
    }

    pub fn inertia_running(&self) -> bool {
        self.glide.is_running()
    }

    /// The zoomed image reported its natural pixel size. Computes the
    /// scaled metrics and replays a zoom-in that was waiting for them.
    pub fn image_loaded(&self, natural: Size) {
        let bounds = self.host.borrow().viewport_bounds();

        let pending = {
            let mut inner = self.inner.borrow_mut();
            inner.natural_size = natural;
            inner.image_ready = true;
            inner.refresh_metrics(bounds);
            inner.session.take_pending_zoom()
        };

        if let Some(at) = pending {
            log::debug!("replaying deferred zoom at ({}, {})", at.x, at.y);
            self.zoom_requested(at.x, at.y);
        }
    }

    /// The host signalled a resize or layout change: re-capture bounds
    /// and recompute the ratios.
    pub fn layout_changed(&self) {
        let bounds = self.host.borrow().viewport_bounds();
        let mut inner = self.inner.borrow_mut();
        if inner.image_ready {
            inner.refresh_metrics(bounds);
        }
    }

    /// The zoom scale changed; scaled metrics are recomputed from the
    /// retained natural size.
    pub fn set_zoom_scale(&self, zoom_scale: f32) {
        let bounds = self.host.borrow().viewport_bounds();
        let mut inner = self.inner.borrow_mut();
        inner.config.zoom_scale = zoom_scale.max(0.0);
        if inner.image_ready {
            inner.refresh_metrics(bounds);
        }
    }

    /// A zoom-in at the given page coordinates. Deferred until
    /// `image_loaded` when the image has not reported its metrics yet.
    pub fn zoom_requested(&self, x: f32, y: f32) {
        let (bounds, scroll) = {
            let host = self.host.borrow();
            (host.viewport_bounds(), host.scroll_position())
        };

        let offset = {
            let mut inner = self.inner.borrow_mut();
            if inner.phase != ZoomPhase::Idle {
                return;
            }
            if !inner.image_ready {
                log::debug!("zoom requested before image load; deferring");
                inner.session.defer_zoom(Point::new(x, y));
                return;
            }
            inner.phase = ZoomPhase::Zoomed;
            let offset = inner.zoom_in_offset(x, y, bounds, scroll);
            inner.offset = offset;
            offset
        };

        let mut host = self.host.borrow_mut();
        host.offset_changed(offset);
        host.zoomed_in();
    }

    /// A pointer move while zoomed; drives the follow strategy. Ignored
    /// in drag mode, where only held moves pan.
    pub fn pointer_moved(&self, sample: PointerSample) {
        let offset = {
            let mut inner = self.inner.borrow_mut();
            if inner.phase != ZoomPhase::Zoomed || inner.move_mode != MoveMode::Follow {
                return;
            }
            let offset = inner
                .follow
                .apply_pointer_move(sample.x, sample.y, &inner.session);
            inner.offset = offset;
            offset
        };

        self.host.borrow_mut().offset_changed(offset);
    }

    /// First touch of a session: the pointer stream is touch from here
    /// on, which forces drag mode (hover-follow has no meaning without a
    /// hover).
    pub fn touch_started(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.phase != ZoomPhase::Idle || inner.pointer_kind.is_some() {
            return;
        }
        inner.pointer_kind = Some(PointerKind::Touch);
        inner.move_mode = MoveMode::Drag;
    }

    /// Pointer down while zoomed in drag mode: begins a drag and cancels
    /// any glide still in flight.
    pub fn drag_started(&self, sample: PointerSample) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.config.disable_drag {
                return;
            }
            if inner.phase != ZoomPhase::Zoomed || inner.move_mode != MoveMode::Drag {
                return;
            }
            if inner.pointer_kind.is_none() {
                inner.pointer_kind = Some(PointerKind::Mouse);
            }
            let drag = inner.drag;
            let offset = inner.offset;
            drag.begin(sample.point(), offset, &mut inner.session);
            inner.phase = ZoomPhase::Dragging;
        }

        self.glide.cancel();
    }

    /// Pointer move while dragging.
    pub fn drag_moved(&self, sample: PointerSample) {
        let offset = {
            let mut inner = self.inner.borrow_mut();
            if inner.phase != ZoomPhase::Dragging {
                return;
            }
            let drag = inner.drag;
            let offset = drag.apply_drag_move(sample.x, sample.y, sample.time_ms, &mut inner.session);
            inner.offset = offset;
            offset
        };

        self.host.borrow_mut().offset_changed(offset);
    }

    /// Pointer up: ends the drag, reports the release, and hands the
    /// measured velocity to the glide unless inertia is disabled.
    pub fn drag_ended(&self, sample: PointerSample) {
        let outcome = {
            let mut inner = self.inner.borrow_mut();
            if inner.phase != ZoomPhase::Dragging {
                return;
            }
            inner.phase = ZoomPhase::Zoomed;
            let drag = inner.drag;
            let release = drag.finish(sample.point(), &mut inner.session);
            (
                release,
                inner.offset,
                inner.config.disable_inertia,
                inner.config.glide_spec(),
                overflow_window(&inner.session),
            )
        };
        let (release, offset, disable_inertia, spec, window) = outcome;

        self.host
            .borrow_mut()
            .drag_released(release.velocity, offset);

        if disable_inertia {
            return;
        }

        let inner_for_offset = Rc::downgrade(&self.inner);
        let host_for_offset = Rc::clone(&self.host);
        let host_for_end = Rc::clone(&self.host);
        self.glide.start(
            offset,
            release.velocity,
            window,
            spec,
            move |glide_offset| {
                if let Some(inner) = inner_for_offset.upgrade() {
                    inner.borrow_mut().offset = glide_offset;
                }
                host_for_offset.borrow_mut().offset_changed(glide_offset);
            },
            move || {
                host_for_end.borrow_mut().inertia_settled();
            },
        );
    }

    /// A click on the widget. Consumes the post-drag suppression flag,
    /// toggles the zoom otherwise.
    pub fn clicked(&self, x: f32, y: f32) {
        enum Action {
            Suppress,
            Close,
            ZoomIn,
            Ignore,
        }

        let action = {
            let mut inner = self.inner.borrow_mut();
            if inner.session.was_dragging {
                inner.session.was_dragging = false;
                Action::Suppress
            } else {
                match inner.phase {
                    ZoomPhase::Zoomed | ZoomPhase::Dragging => Action::Close,
                    ZoomPhase::Idle => Action::ZoomIn,
                    ZoomPhase::FadingOut => Action::Ignore,
                }
            }
        };

        match action {
            Action::Suppress => log::debug!("click suppressed after drag"),
            Action::Close => self.close_requested(),
            Action::ZoomIn => self.zoom_requested(x, y),
            Action::Ignore => {}
        }
    }

    /// A zoom-out trigger: explicit close, mouse-leave, escape key or a
    /// toggle. Drag/velocity bookkeeping resets now; visual offsets hold
    /// until the fade completes (immediately with a zero fade duration).
    pub fn close_requested(&self) {
        let immediate = {
            let mut inner = self.inner.borrow_mut();
            if !matches!(inner.phase, ZoomPhase::Zoomed | ZoomPhase::Dragging) {
                return;
            }
            inner.session.clear_drag();
            let immediate = inner.config.fade_duration_ms == 0;
            if immediate {
                inner.finalize_close();
            } else {
                inner.phase = ZoomPhase::FadingOut;
            }
            immediate
        };

        self.glide.cancel();

        let mut host = self.host.borrow_mut();
        host.zoomed_out();
        if immediate {
            host.offset_changed(Offset::ZERO);
            host.close_finalized();
        }
    }

    /// The host's close transition finished; the session returns to
    /// defaults and offsets zero out.
    pub fn fade_finished(&self) {
        let finalized = {
            let mut inner = self.inner.borrow_mut();
            if inner.phase != ZoomPhase::FadingOut {
                return;
            }
            inner.finalize_close();
            true
        };

        if finalized {
            log::debug!("zoom session closed");
            let mut host = self.host.borrow_mut();
            host.offset_changed(Offset::ZERO);
            host.close_finalized();
        }
    }
}

#[cfg(test)]
#[path = "tests/zoom_gesture_tests.rs"]
mod tests;
