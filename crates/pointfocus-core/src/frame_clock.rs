//! Frame scheduling facade with cancellation-on-drop registrations.

use crate::ticker::{FrameCallbackId, TickerHandle};

/// Schedules one-shot callbacks for the next display frame.
#[derive(Clone)]
pub struct FrameClock {
    handle: TickerHandle,
}

impl FrameClock {
    pub fn new(handle: TickerHandle) -> Self {
        Self { handle }
    }

    pub fn ticker_handle(&self) -> TickerHandle {
        self.handle.clone()
    }

    /// Runs `callback` on the next frame with the frame time in
    /// nanoseconds. The returned registration is the cancellation token:
    /// dropping it (or calling [`FrameCallbackRegistration::cancel`])
    /// guarantees the callback never fires.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        match self.handle.register_frame_callback(callback) {
            Some(id) => FrameCallbackRegistration::new(self.handle.clone(), id),
            None => FrameCallbackRegistration::inactive(self.handle.clone()),
        }
    }

    pub fn with_frame_millis(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        self.with_frame_nanos(move |nanos| {
            let millis = nanos / 1_000_000;
            callback(millis);
        })
    }
}

/// Keeps a scheduled frame callback alive; cancels it when dropped.
pub struct FrameCallbackRegistration {
    handle: TickerHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    fn new(handle: TickerHandle, id: FrameCallbackId) -> Self {
        Self {
            handle,
            id: Some(id),
        }
    }

    fn inactive(handle: TickerHandle) -> Self {
        Self { handle, id: None }
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.handle.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.handle.cancel_frame_callback(id);
        }
    }
}
