//! Pure math/data for the pointfocus gesture engine
//!
//! This crate contains the coordinate-space primitives and conversions the
//! gesture engine is built on: page-space bounds capture, overflow ratios,
//! origin-relative offsets, and boundary clamping. Everything here is a
//! pure function over plain values; no host types, no scheduling.

mod geometry;

pub use geometry::*;
