// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Point, Rect, Size};

use crate::surface::DrawingSurface;
use crate::tracker::TransformTracker;
use crate::transform::Transform;

/// One canvas's renderable state: a tracked transform plus a cached content image.
///
/// `Viewport` owns its [`TransformTracker`] (and through it, the drawing
/// surface). Content is replaced wholesale with [`Viewport::set_content`];
/// pan and zoom mutate the tracker and then call [`Viewport::redraw`].
pub struct Viewport<S: DrawingSurface> {
    tracker: TransformTracker<S>,
    content: Option<S::Image>,
}

impl<S: DrawingSurface> fmt::Debug for Viewport<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewport")
            .field("transform", &self.tracker.current())
            .field("depth", &self.tracker.depth())
            .field("has_content", &self.content.is_some())
            .finish_non_exhaustive()
    }
}

impl<S: DrawingSurface> Viewport<S> {
    /// Creates an empty viewport over `surface` at the identity transform.
    pub fn new(surface: S) -> Self {
        Self {
            tracker: TransformTracker::new(surface),
            content: None,
        }
    }

    /// The current content → canvas transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.tracker.current()
    }

    /// Canvas size in device pixels.
    #[must_use]
    pub fn canvas_size(&self) -> Size {
        self.tracker.size()
    }

    /// The cached content image, if any.
    #[must_use]
    pub fn content(&self) -> Option<&S::Image> {
        self.content.as_ref()
    }

    /// Shared access to the transform tracker.
    #[must_use]
    pub fn tracker(&self) -> &TransformTracker<S> {
        &self.tracker
    }

    /// Mutable access to the transform tracker.
    ///
    /// Changes made through the tracker become visible on the next
    /// [`Viewport::redraw`].
    pub fn tracker_mut(&mut self) -> &mut TransformTracker<S> {
        &mut self.tracker
    }

    /// Shared access to the drawing surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        self.tracker.surface()
    }

    /// Converts a canvas-space point into content space.
    #[must_use]
    pub fn transformed_point(&self, pt: Point) -> Point {
        self.tracker.transformed_point(pt)
    }

    /// Content-space rectangle currently visible through the canvas.
    ///
    /// This is the bounding box of the four inverse-mapped canvas corners, so
    /// it stays conservative under rotation.
    #[must_use]
    pub fn visible_content_rect(&self) -> Rect {
        let canvas = self.canvas_size().to_rect();
        let corners = [
            Point::new(canvas.x0, canvas.y0),
            Point::new(canvas.x1, canvas.y0),
            Point::new(canvas.x0, canvas.y1),
            Point::new(canvas.x1, canvas.y1),
        ]
        .map(|p| self.tracker.transformed_point(p));
        let mut rect = Rect::from_points(corners[0], corners[1]);
        rect = rect.union_pt(corners[2]);
        rect.union_pt(corners[3])
    }

    /// Repaints the canvas from the cached content under the current transform.
    ///
    /// The visible content rectangle is cleared first, then the whole canvas
    /// is cleared again under the identity transform so no residue survives
    /// accumulated floating-point drift. Calling this repeatedly without
    /// changing transform or content produces the same output.
    pub fn redraw(&mut self) {
        let visible = self.visible_content_rect();
        self.tracker.clear_rect(visible);

        let canvas = self.canvas_size().to_rect();
        self.tracker.save();
        self.tracker.reset_transform();
        self.tracker.clear_rect(canvas);
        self.tracker.restore();

        if let Some(image) = &self.content {
            self.tracker.draw_image(image, Point::ORIGIN);
        }
    }

    /// Replaces the cached content and repaints.
    pub fn set_content(&mut self, image: S::Image) {
        self.content = Some(image);
        self.redraw();
    }

    /// Drops the cached content and repaints an empty canvas.
    pub fn clear_content(&mut self) -> Option<S::Image> {
        let old = self.content.take();
        self.redraw();
        old
    }

    /// Returns to the identity transform and repaints.
    pub fn reset_view(&mut self) {
        self.tracker.reset_transform();
        self.redraw();
    }
}
