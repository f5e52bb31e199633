//! Frame-callback registry.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

pub type FrameCallbackId = u64;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct TickerInner {
    next_frame_callback_id: Cell<FrameCallbackId>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    draining: Cell<bool>,
}

impl TickerInner {
    fn new() -> Self {
        Self {
            next_frame_callback_id: Cell::new(0),
            frame_callbacks: RefCell::new(VecDeque::new()),
            draining: Cell::new(false),
        }
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if self.draining.replace(true) {
            log::error!("re-entrant frame drain; dropping nested tick");
            return;
        }

        // Swap the queue out before invoking so callbacks can re-register
        // for the next frame (recursive stepping) without seeing
        // themselves.
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::new();
        {
            let mut callbacks = self.frame_callbacks.borrow_mut();
            pending.reserve(callbacks.len());
            while let Some(mut entry) = callbacks.pop_front() {
                if let Some(callback) = entry.callback.take() {
                    pending.push(callback);
                }
            }
        }
        for callback in pending {
            callback(frame_time_nanos);
        }

        self.draining.set(false);
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }
}

/// Owns the frame-callback queue. One per engine instance; dropping it
/// invalidates every outstanding handle and registration.
pub struct Ticker {
    inner: Rc<TickerInner>,
}

impl Ticker {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(TickerInner::new()),
        }
    }

    pub fn handle(&self) -> TickerHandle {
        TickerHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

/// Weak handle onto a [`Ticker`]. All operations are no-ops once the
/// ticker is gone, so a stale callback can never fire after teardown.
#[derive(Clone)]
pub struct TickerHandle {
    inner: Weak<TickerInner>,
}

impl TickerHandle {
    /// Queues `callback` for the next frame. Returns `None` when the
    /// owning ticker has been dropped.
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    /// Runs every queued callback with the given frame time. Hosts call
    /// this once per display frame; tests call it directly.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    /// True while any callback is queued, i.e. the host should keep
    /// pumping frames.
    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    pub fn frame_clock(&self) -> crate::FrameClock {
        crate::FrameClock::new(self.clone())
    }
}
