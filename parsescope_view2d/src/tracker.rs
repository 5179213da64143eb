// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};
use smallvec::SmallVec;

use crate::surface::DrawingSurface;
use crate::transform::{DegenerateTransformError, Transform};

/// Decorator around a [`DrawingSurface`] that mirrors its transform state.
///
/// Every transform call is validated against the tracked [`Transform`]
/// before it reaches the surface. A call that would make the transform
/// non-invertible is rejected: neither the tracked state nor the surface is
/// touched, so the two never diverge.
///
/// `save`/`restore` maintain an owned stack of transform snapshots alongside
/// the surface's own state stack.
#[derive(Debug)]
pub struct TransformTracker<S> {
    surface: S,
    current: Transform,
    stack: SmallVec<[Transform; 4]>,
}

impl<S: DrawingSurface> TransformTracker<S> {
    /// Wraps `surface`, resetting its transform to the identity.
    pub fn new(mut surface: S) -> Self {
        surface.set_transform(Affine::IDENTITY);
        Self {
            surface,
            current: Transform::IDENTITY,
            stack: SmallVec::new(),
        }
    }

    /// The transform currently installed on the surface.
    #[must_use]
    pub fn current(&self) -> Transform {
        self.current
    }

    /// Number of saved snapshots.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Saves the current transform and forwards to the surface.
    pub fn save(&mut self) {
        self.stack.push(self.current);
        self.surface.save();
    }

    /// Restores the most recently saved transform.
    ///
    /// With nothing saved this is a no-op, as in Canvas 2D.
    pub fn restore(&mut self) {
        let Some(saved) = self.stack.pop() else {
            tracing::debug!("restore without matching save ignored");
            return;
        };
        self.current = saved;
        self.surface.restore();
    }

    /// Composes a translation.
    pub fn translate(&mut self, dx: f64, dy: f64) -> Result<(), DegenerateTransformError> {
        let next = self.check("translate", self.current.translate(dx, dy))?;
        self.current = next;
        self.surface.translate(dx, dy);
        Ok(())
    }

    /// Composes a scale.
    pub fn scale(&mut self, sx: f64, sy: f64) -> Result<(), DegenerateTransformError> {
        let next = self.check("scale", self.current.scale(sx, sy))?;
        self.current = next;
        self.surface.scale(sx, sy);
        Ok(())
    }

    /// Composes a rotation in radians.
    pub fn rotate(&mut self, angle: f64) -> Result<(), DegenerateTransformError> {
        let next = self.check("rotate", self.current.rotate(angle))?;
        self.current = next;
        self.surface.rotate(angle);
        Ok(())
    }

    /// Composes an arbitrary matrix.
    pub fn transform(&mut self, matrix: Affine) -> Result<(), DegenerateTransformError> {
        let next = self.check("transform", self.current.compose(matrix))?;
        self.current = next;
        self.surface.transform(matrix);
        Ok(())
    }

    /// Replaces the transform outright.
    pub fn set_transform(&mut self, matrix: Affine) -> Result<(), DegenerateTransformError> {
        let next = self.check("set_transform", Transform::from_affine(matrix))?;
        self.current = next;
        self.surface.set_transform(matrix);
        Ok(())
    }

    /// Resets to the identity transform.
    pub fn reset_transform(&mut self) {
        self.current = Transform::IDENTITY;
        self.surface.set_transform(Affine::IDENTITY);
    }

    /// Convenience for [`TransformTracker::translate`] with a vector.
    pub fn translate_by(&mut self, delta: Vec2) -> Result<(), DegenerateTransformError> {
        self.translate(delta.x, delta.y)
    }

    /// Converts a canvas-space point into content space under the current transform.
    #[must_use]
    pub fn transformed_point(&self, pt: Point) -> Point {
        self.current.map_point_inverse(pt)
    }

    /// Size of the wrapped surface.
    #[must_use]
    pub fn size(&self) -> Size {
        self.surface.size()
    }

    /// Clears `rect` (user space) on the wrapped surface.
    pub fn clear_rect(&mut self, rect: Rect) {
        self.surface.clear_rect(rect);
    }

    /// Draws `image` at `origin` (user space) on the wrapped surface.
    pub fn draw_image(&mut self, image: &S::Image, origin: Point) {
        self.surface.draw_image(image, origin);
    }

    /// Shared access to the wrapped surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Unwraps the surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    fn check(
        &self,
        op: &'static str,
        candidate: Result<Transform, DegenerateTransformError>,
    ) -> Result<Transform, DegenerateTransformError> {
        candidate.inspect_err(|err| {
            tracing::debug!(op, determinant = err.determinant, "rejected degenerate transform");
        })
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Affine, Point, Size};

    use super::TransformTracker;
    use crate::testing::MockSurface;

    fn tracker() -> TransformTracker<MockSurface> {
        TransformTracker::new(MockSurface::new(Size::new(800.0, 600.0)))
    }

    #[test]
    fn tracked_and_surface_transforms_agree() {
        let mut t = tracker();
        t.translate(10.0, 20.0).unwrap();
        t.scale(2.0, 3.0).unwrap();
        t.rotate(0.25).unwrap();
        t.transform(Affine::new([1.0, 0.5, 0.0, 1.0, 3.0, 4.0])).unwrap();
        assert!(
            t.current().as_affine() == t.surface().transform,
            "tracker and surface diverged"
        );
    }

    #[test]
    fn rejected_scale_leaves_everything_untouched() {
        let mut t = tracker();
        t.translate(5.0, 5.0).unwrap();
        let before = t.current();
        let calls = t.surface().calls;

        assert!(t.scale(0.0, 0.0).is_err());
        assert_eq!(t.current(), before);
        assert_eq!(t.surface().calls, calls, "rejected op reached the surface");
        assert_eq!(t.surface().transform, before.as_affine());
    }

    #[test]
    fn save_restore_round_trips() {
        let mut t = tracker();
        t.scale(2.0, 2.0).unwrap();
        let saved = t.current();
        t.save();
        t.reset_transform();
        t.translate(100.0, 0.0).unwrap();
        assert_eq!(t.depth(), 1);
        t.restore();
        assert_eq!(t.depth(), 0);
        assert_eq!(t.current(), saved);
        assert_eq!(t.surface().transform, saved.as_affine());
    }

    #[test]
    fn unmatched_restore_is_ignored() {
        let mut t = tracker();
        t.translate(1.0, 1.0).unwrap();
        let before = t.current();
        t.restore();
        assert_eq!(t.current(), before);
        assert_eq!(t.surface().depth, 0);
    }

    #[test]
    fn transformed_point_inverts_current_transform() {
        let mut t = tracker();
        t.translate(100.0, 50.0).unwrap();
        t.scale(2.0, 2.0).unwrap();
        let p = t.transformed_point(Point::new(300.0, 250.0));
        assert_eq!(p, Point::new(100.0, 100.0));
    }

    #[test]
    fn set_transform_rejects_singular_matrix() {
        let mut t = tracker();
        assert!(t.set_transform(Affine::new([1.0, 2.0, 2.0, 4.0, 0.0, 0.0])).is_err());
        assert_eq!(t.surface().transform, Affine::IDENTITY);
    }
}
