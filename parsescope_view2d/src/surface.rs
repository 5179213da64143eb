// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size};

/// A stateful 2D drawing surface with a Canvas 2D style transform model.
///
/// This is the boundary to whatever actually puts pixels on screen (a browser
/// `CanvasRenderingContext2d`, a recording backend in tests, ...). Transform
/// calls compose on the right of the surface's current transform, exactly as
/// in Canvas 2D; `save`/`restore` push and pop that transform.
///
/// Surfaces are not expected to validate their transforms. Callers that need
/// an invertible transform at all times should go through
/// [`TransformTracker`](crate::TransformTracker).
pub trait DrawingSurface {
    /// Opaque handle to a rendered image that can be drawn onto this surface.
    type Image;

    /// Size of the surface in device pixels.
    fn size(&self) -> Size;

    /// Pushes the current drawing state.
    fn save(&mut self);

    /// Pops the most recently saved drawing state.
    fn restore(&mut self);

    /// Composes a translation onto the current transform.
    fn translate(&mut self, dx: f64, dy: f64);

    /// Composes a scale onto the current transform.
    fn scale(&mut self, sx: f64, sy: f64);

    /// Composes a rotation (radians) onto the current transform.
    fn rotate(&mut self, angle: f64);

    /// Composes an arbitrary matrix onto the current transform.
    fn transform(&mut self, matrix: Affine);

    /// Replaces the current transform.
    fn set_transform(&mut self, matrix: Affine);

    /// Clears `rect`, given in the current user space, to transparent.
    fn clear_rect(&mut self, rect: Rect);

    /// Draws `image` with its top-left corner at `origin` in user space.
    fn draw_image(&mut self, image: &Self::Image, origin: Point);
}
