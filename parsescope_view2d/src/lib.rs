// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsescope View 2D: transform tracking and pan/zoom viewports.
//!
//! This crate provides the headless core of an interactive graph viewport:
//! - [`Transform`]: an always-invertible affine transform value with a
//!   Canvas 2D style composition algebra.
//! - [`DrawingSurface`]: the boundary to a stateful 2D drawing context.
//! - [`TransformTracker`]: a decorator that mirrors a surface's transform and
//!   transform stack, rejecting degenerate operations before they reach it.
//! - [`Viewport`]: a tracked surface plus a cached content image, with a
//!   redraw algorithm that repaints the visible content under the current
//!   transform.
//!
//! It does **not** interpret input events. Pointer-driven pan and zoom live
//! in `parsescope_event_state`, which drives a [`Viewport`] through its
//! tracker.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use parsescope_view2d::Transform;
//!
//! let t = Transform::IDENTITY
//!     .translate(400.0, 300.0)?
//!     .scale(2.0, 2.0)?;
//!
//! // Canvas pixel (402, 300) sits one content unit right of the origin.
//! let content = t.map_point_inverse(Point::new(402.0, 300.0));
//! assert_eq!(content, Point::new(1.0, 0.0));
//! # Ok::<(), parsescope_view2d::DegenerateTransformError>(())
//! ```
//!
//! ## Design notes
//!
//! - The tracker owns the surface and re-exposes its transform methods; the
//!   surface's own behavior is never patched.
//! - The transform stack is an owned sequence of immutable snapshots.
//! - Degenerate transforms are rejected with [`DegenerateTransformError`]
//!   and the previous transform is kept.
//!
//! This crate is `no_std`; enable `libm` when building without `std`.

#![no_std]

extern crate alloc;

mod surface;
mod tracker;
mod transform;
mod viewport;

#[cfg(test)]
mod testing;

pub use surface::DrawingSurface;
pub use tracker::TransformTracker;
pub use transform::{DEGENERACY_EPSILON, DegenerateTransformError, Transform};
pub use viewport::Viewport;
