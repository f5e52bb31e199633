//! Single-threaded frame runtime for the pointfocus gesture engine
//!
//! The engine's only suspension point is "wait for the next display
//! frame". This crate provides that: a [`Ticker`] owning a queue of
//! one-shot frame callbacks, a [`FrameClock`] facade for scheduling them,
//! and a [`FrameCallbackRegistration`] token that cancels the callback
//! when dropped. Hosts pump the ticker from their real frame source
//! (vsync, requestAnimationFrame, a timer); tests pump it by hand, which
//! makes every animation in the engine deterministic.

mod frame_clock;
mod ticker;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use ticker::{FrameCallbackId, Ticker, TickerHandle};
