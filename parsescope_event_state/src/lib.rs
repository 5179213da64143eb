// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsescope Event State: pointer interaction state for graph viewports.
//!
//! This crate turns raw, canvas-local pointer and wheel events into pan and
//! zoom operations on a viewport:
//!
//! - [`drag`]: press/move/release bookkeeping with click detection.
//! - [`pan_zoom`]: the per-viewport [`PointerInteraction`] state machine and
//!   the [`PanZoomTarget`] seam it drives.
//! - [`Modifiers`]: modifier keys carried by pointer events.
//!
//! The crate does not read events from any particular windowing or browser
//! API. Hosts convert their native events into canvas-space
//! [`kurbo::Point`]s, [`Modifiers`] and signed wheel magnitudes, then call
//! the matching [`PointerInteraction`] method.
//!
//! ## Design notes
//!
//! - One [`PointerInteraction`] per viewport; nothing is shared between
//!   viewports.
//! - A release without movement is a click and zooms; a release after
//!   movement does nothing further because the pan was applied live.
//! - Degenerate zooms are dropped silently (logged at `debug`) and the
//!   transform is left as it was.
//!
//! This crate is `no_std`; enable `libm` when building without `std`.

#![no_std]

pub mod drag;
mod modifiers;
pub mod pan_zoom;

pub use modifiers::Modifiers;
pub use pan_zoom::{
    InteractionState, PanZoomConfig, PanZoomTarget, PointerInteraction, PointerResponse,
};
