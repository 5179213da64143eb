// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

/// Smallest determinant magnitude accepted for an installed [`Transform`].
///
/// Anything closer to zero is treated as non-invertible.
pub const DEGENERACY_EPSILON: f64 = 1e-12;

fn is_degenerate(determinant: f64) -> bool {
    determinant.is_nan() || determinant.abs() < DEGENERACY_EPSILON
}

/// Error returned when an operation would produce a non-invertible transform.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[error("transform is not invertible (determinant {determinant:e})")]
pub struct DegenerateTransformError {
    /// Determinant of the rejected matrix (may be NaN for non-finite input).
    pub determinant: f64,
}

/// An invertible 2D affine transform from content space into canvas space.
///
/// `Transform` is a value type: every operation returns a new transform and
/// leaves the receiver untouched. Composition is on the right, matching the
/// Canvas 2D convention, so `t.translate(dx, dy)` maps a point by first
/// translating it and then applying `t`.
///
/// The inverse is computed once on construction and cached, so
/// [`Transform::map_point_inverse`] is as cheap as [`Transform::map_point`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    forward: Affine,
    inverse: Affine,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        forward: Affine::IDENTITY,
        inverse: Affine::IDENTITY,
    };

    /// Validates `affine` and wraps it.
    ///
    /// Fails if any coefficient is non-finite or if the determinant magnitude
    /// of either the matrix or its inverse is below [`DEGENERACY_EPSILON`].
    /// Every accepted transform therefore has an accepted inverse.
    pub fn from_affine(affine: Affine) -> Result<Self, DegenerateTransformError> {
        let determinant = affine.determinant();
        if !affine.is_finite() || is_degenerate(determinant) {
            return Err(DegenerateTransformError { determinant });
        }
        let inverse = affine.inverse();
        if !inverse.is_finite() || is_degenerate(inverse.determinant()) {
            return Err(DegenerateTransformError { determinant });
        }
        Ok(Self {
            forward: affine,
            inverse,
        })
    }

    /// Builds a transform from explicit canvas-style coefficients.
    ///
    /// The matrix is
    ///
    /// ```text
    /// | a c e |
    /// | b d f |
    /// | 0 0 1 |
    /// ```
    pub fn set_explicit(
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
        f: f64,
    ) -> Result<Self, DegenerateTransformError> {
        Self::from_affine(Affine::new([a, b, c, d, e, f]))
    }

    /// Returns `self` composed with a translation.
    pub fn translate(&self, dx: f64, dy: f64) -> Result<Self, DegenerateTransformError> {
        self.compose(Affine::translate(Vec2::new(dx, dy)))
    }

    /// Returns `self` composed with a (possibly non-uniform) scale.
    pub fn scale(&self, sx: f64, sy: f64) -> Result<Self, DegenerateTransformError> {
        self.compose(Affine::scale_non_uniform(sx, sy))
    }

    /// Returns `self` composed with a rotation by `theta` radians.
    pub fn rotate(&self, theta: f64) -> Result<Self, DegenerateTransformError> {
        self.compose(Affine::rotate(theta))
    }

    /// Returns `self * other`.
    pub fn multiply(&self, other: &Self) -> Result<Self, DegenerateTransformError> {
        self.compose(other.forward)
    }

    /// Returns `self` composed with an arbitrary matrix.
    pub fn compose(&self, op: Affine) -> Result<Self, DegenerateTransformError> {
        Self::from_affine(self.forward * op)
    }

    /// Returns the inverse transform.
    ///
    /// Construction already validated the cached inverse, so this only fails
    /// if that inverse no longer passes the same check.
    pub fn invert(&self) -> Result<Self, DegenerateTransformError> {
        let determinant = self.inverse.determinant();
        if is_degenerate(determinant) {
            return Err(DegenerateTransformError { determinant });
        }
        Ok(Self {
            forward: self.inverse,
            inverse: self.forward,
        })
    }

    /// Maps a content-space point into canvas space.
    #[must_use]
    pub fn map_point(&self, pt: Point) -> Point {
        self.forward * pt
    }

    /// Maps a canvas-space point back into content space.
    #[must_use]
    pub fn map_point_inverse(&self, pt: Point) -> Point {
        self.inverse * pt
    }

    /// The underlying forward matrix.
    #[must_use]
    pub fn as_affine(&self) -> Affine {
        self.forward
    }

    /// The cached inverse matrix.
    #[must_use]
    pub fn inverse_affine(&self) -> Affine {
        self.inverse
    }

    /// Coefficients `[a, b, c, d, e, f]` in Canvas 2D order.
    #[must_use]
    pub fn coeffs(&self) -> [f64; 6] {
        self.forward.as_coeffs()
    }

    /// Determinant of the linear part.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.forward.determinant()
    }

    /// Translation component (`e`, `f`).
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.forward.translation()
    }

    /// Compares coefficients with an absolute tolerance.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        self.coeffs()
            .iter()
            .zip(other.coeffs().iter())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_2;

    use kurbo::Point;

    use super::{DEGENERACY_EPSILON, Transform};

    fn assert_point_near(a: Point, b: Point) {
        assert!((a.x - b.x).abs() < 1e-9, "x differs: {a:?} vs {b:?}");
        assert!((a.y - b.y).abs() < 1e-9, "y differs: {a:?} vs {b:?}");
    }

    #[test]
    fn compose_on_the_right() {
        // Scale first, then translate by (10, 0) in *scaled* units.
        let t = Transform::IDENTITY
            .scale(2.0, 2.0)
            .unwrap()
            .translate(10.0, 0.0)
            .unwrap();
        assert_point_near(t.map_point(Point::ORIGIN), Point::new(20.0, 0.0));
        assert_eq!(t.coeffs(), [2.0, 0.0, 0.0, 2.0, 20.0, 0.0]);
    }

    #[test]
    fn rotate_quarter_turn() {
        let t = Transform::IDENTITY.rotate(FRAC_PI_2).unwrap();
        assert_point_near(t.map_point(Point::new(1.0, 0.0)), Point::new(0.0, 1.0));
    }

    #[test]
    fn map_point_inverse_undoes_map_point() {
        let t = Transform::IDENTITY
            .translate(13.0, -7.5)
            .unwrap()
            .rotate(0.3)
            .unwrap()
            .scale(1.7, 0.4)
            .unwrap();
        let p = Point::new(42.0, -3.0);
        assert_point_near(t.map_point_inverse(t.map_point(p)), p);
        assert_point_near(t.invert().unwrap().map_point(p), t.map_point_inverse(p));
    }

    #[test]
    fn double_inversion_is_identity_operation() {
        let t = Transform::IDENTITY
            .scale(3.0, 0.5)
            .unwrap()
            .rotate(1.1)
            .unwrap()
            .translate(-4.0, 9.0)
            .unwrap();
        let back = t.invert().unwrap().invert().unwrap();
        assert!(t.approx_eq(&back, 1e-9));
    }

    #[test]
    fn zero_scale_is_rejected() {
        let err = Transform::IDENTITY.scale(0.0, 1.0).unwrap_err();
        assert_eq!(err.determinant, 0.0);
    }

    #[test]
    fn non_finite_input_is_rejected() {
        assert!(Transform::IDENTITY.translate(f64::NAN, 0.0).is_err());
        assert!(Transform::IDENTITY.rotate(f64::INFINITY).is_err());
        assert!(Transform::set_explicit(1.0, 0.0, 0.0, 1.0, f64::INFINITY, 0.0).is_err());
    }

    #[test]
    fn tiny_determinant_is_rejected() {
        let s = DEGENERACY_EPSILON.sqrt() * 0.5;
        assert!(Transform::IDENTITY.scale(s, s).is_err());
    }

    #[test]
    fn huge_determinant_is_rejected() {
        let err = Transform::set_explicit(1e7, 0.0, 0.0, 1e7, 0.0, 0.0).unwrap_err();
        assert_eq!(err.determinant, 1e14);
        let deep = Transform::IDENTITY.scale(1e5, 1e5).unwrap();
        assert!(deep.scale(100.0, 100.0).is_err());
    }

    #[test]
    fn accepted_transforms_always_invert() {
        let mut t = Transform::IDENTITY;
        while let Ok(next) = t.scale(1.5, 1.5) {
            t = next;
            let inv = t.invert().unwrap();
            assert!(inv.invert().unwrap().approx_eq(&t, 1e-9 * t.coeffs()[0]));
        }
        assert!(t.determinant() < 1.01 / DEGENERACY_EPSILON);
    }

    #[test]
    fn set_explicit_matches_coefficients() {
        let t = Transform::set_explicit(1.0, 2.0, 3.0, 4.0, 5.0, 6.0).unwrap();
        assert_eq!(t.coeffs(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(t.determinant(), -2.0);
    }

    #[test]
    fn multiply_matches_sequential_ops() {
        let a = Transform::IDENTITY.translate(5.0, 5.0).unwrap();
        let b = Transform::IDENTITY.scale(2.0, 3.0).unwrap();
        let via_multiply = a.multiply(&b).unwrap();
        let via_ops = a.scale(2.0, 3.0).unwrap();
        assert!(via_multiply.approx_eq(&via_ops, 0.0));
    }
}
