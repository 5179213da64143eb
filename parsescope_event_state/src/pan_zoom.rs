// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-driven pan, zoom, and click-to-zoom for one viewport.
//!
//! [`PointerInteraction`] is a two-state machine (`Idle`, `Dragging`) that
//! turns raw pointer and wheel events into operations on a
//! [`PanZoomTarget`]:
//!
//! - Press, move, release: the content point grabbed at press time follows
//!   the pointer (pan).
//! - Press and release without moving: zoom in one click around the pointer,
//!   or out when shift is held.
//! - Wheel: zoom around the pointer, proportional to the wheel delta.
//!
//! Every zoom is centered: the content point under the pointer stays under
//! the pointer.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Size};
//! use parsescope_event_state::pan_zoom::{PointerInteraction, PointerResponse};
//! use parsescope_event_state::Modifiers;
//! use parsescope_surface_ref::RefSurface;
//! use parsescope_view2d::Viewport;
//!
//! let mut viewport = Viewport::new(RefSurface::new(Size::new(800.0, 600.0)));
//! let mut pointer = PointerInteraction::default();
//!
//! pointer.pointer_down(&viewport, Point::new(100.0, 100.0));
//! pointer.pointer_move(&mut viewport, Point::new(150.0, 120.0));
//! let response = pointer.pointer_up(&mut viewport, Point::new(150.0, 120.0), Modifiers::empty());
//! assert_eq!(response, PointerResponse::Released);
//! assert_eq!(viewport.transform().coeffs(), [1.0, 0.0, 0.0, 1.0, 50.0, 20.0]);
//! ```

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `powf`
use kurbo::{Affine, Point, Vec2};
use parsescope_view2d::{DegenerateTransformError, DrawingSurface, Viewport};

use crate::drag::DragState;
use crate::modifiers::Modifiers;

/// Something a [`PointerInteraction`] can pan and zoom.
///
/// Implemented for [`Viewport`]; tests and hosts with their own canvas
/// model can implement it directly.
pub trait PanZoomTarget {
    /// Converts a canvas-space point into content space under the current transform.
    fn transformed_point(&self, pt: Point) -> Point;

    /// Composes `op` onto the current transform, or rejects it unchanged.
    fn apply(&mut self, op: Affine) -> Result<(), DegenerateTransformError>;

    /// Repaints under the current transform.
    fn redraw(&mut self);
}

impl<S: DrawingSurface> PanZoomTarget for Viewport<S> {
    fn transformed_point(&self, pt: Point) -> Point {
        Self::transformed_point(self, pt)
    }

    fn apply(&mut self, op: Affine) -> Result<(), DegenerateTransformError> {
        self.tracker_mut().transform(op)
    }

    fn redraw(&mut self) {
        Self::redraw(self);
    }
}

/// Tuning for pointer pan/zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanZoomConfig {
    /// Zoom factor applied per click; a zoom of `n` clicks scales by `scale_factor^n`.
    pub scale_factor: f64,
    /// Raw wheel magnitude that counts as one click.
    pub wheel_delta_divisor: f64,
    /// Clicks applied by a press/release without movement.
    pub click_zoom_clicks: f64,
}

impl Default for PanZoomConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.1,
            wheel_delta_divisor: 40.0,
            click_zoom_clicks: 1.0,
        }
    }
}

impl PanZoomConfig {
    /// Sets [`PanZoomConfig::scale_factor`].
    #[must_use]
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Sets [`PanZoomConfig::wheel_delta_divisor`].
    #[must_use]
    pub fn with_wheel_delta_divisor(mut self, divisor: f64) -> Self {
        self.wheel_delta_divisor = divisor;
        self
    }

    /// Sets [`PanZoomConfig::click_zoom_clicks`].
    #[must_use]
    pub fn with_click_zoom_clicks(mut self, clicks: f64) -> Self {
        self.click_zoom_clicks = clicks;
        self
    }

    /// Converts a raw wheel delta into zoom clicks.
    ///
    /// Returns `None` for a zero or non-finite result.
    #[must_use]
    pub fn wheel_clicks(&self, delta: f64) -> Option<f64> {
        let clicks = delta / self.wheel_delta_divisor;
        (clicks.is_finite() && clicks != 0.0).then_some(clicks)
    }
}

/// Coarse interaction state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionState {
    /// No button held.
    Idle,
    /// A button is held; see [`PointerInteraction::drag`].
    Dragging,
}

/// What a pointer event did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerResponse {
    /// Nothing happened (e.g. a move while idle, a zero wheel delta).
    Ignored,
    /// A press started a drag session.
    Pressed,
    /// The transform was translated by `delta` content units.
    Panned {
        /// Content-space translation that was applied.
        delta: Vec2,
    },
    /// A centered zoom was applied.
    Zoomed {
        /// Scale factor that was applied.
        factor: f64,
        /// Content-space point that stayed fixed.
        focus: Point,
    },
    /// A drag with movement ended; no further action.
    Released,
    /// A drag was abandoned without a click zoom.
    Cancelled,
    /// The operation would have made the transform degenerate and was dropped.
    Rejected,
}

impl PointerResponse {
    /// Returns `true` if the host should keep text selection suppressed.
    ///
    /// Selection should be suppressed from a [`PointerResponse::Pressed`]
    /// until the session ends.
    #[must_use]
    pub fn suppresses_selection(self) -> bool {
        matches!(self, Self::Pressed | Self::Panned { .. })
    }
}

/// Per-viewport pointer state machine.
///
/// Each viewport gets its own instance, owning its own last pointer position
/// and drag state.
#[derive(Clone, Debug, Default)]
pub struct PointerInteraction {
    config: PanZoomConfig,
    last_position: Point,
    drag: Option<DragState>,
}

impl PointerInteraction {
    /// Creates an idle interaction with the given tuning.
    #[must_use]
    pub fn new(config: PanZoomConfig) -> Self {
        Self {
            config,
            last_position: Point::ORIGIN,
            drag: None,
        }
    }

    /// Current tuning.
    #[must_use]
    pub fn config(&self) -> &PanZoomConfig {
        &self.config
    }

    /// Replaces the tuning. Does not affect an in-progress drag.
    pub fn set_config(&mut self, config: PanZoomConfig) {
        self.config = config;
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> InteractionState {
        if self.drag.is_some() {
            InteractionState::Dragging
        } else {
            InteractionState::Idle
        }
    }

    /// Returns `true` while a button is held.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The active drag session, if any.
    #[must_use]
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Last canvas-space pointer position seen by any event.
    #[must_use]
    pub fn last_position(&self) -> Point {
        self.last_position
    }

    /// Handles a button press at canvas position `pos`.
    ///
    /// A press while already dragging restarts the session.
    pub fn pointer_down<T>(&mut self, target: &T, pos: Point) -> PointerResponse
    where
        T: PanZoomTarget + ?Sized,
    {
        self.last_position = pos;
        let anchor = target.transformed_point(pos);
        self.drag = Some(DragState::start(pos, anchor));
        tracing::trace!(?pos, ?anchor, "drag started");
        PointerResponse::Pressed
    }

    /// Handles pointer movement to canvas position `pos`.
    ///
    /// While dragging, the transform is translated so the anchor grabbed at
    /// press time sits under `pos` again, then the target is redrawn.
    pub fn pointer_move<T>(&mut self, target: &mut T, pos: Point) -> PointerResponse
    where
        T: PanZoomTarget + ?Sized,
    {
        self.last_position = pos;
        let Some(drag) = self.drag.as_mut() else {
            return PointerResponse::Ignored;
        };
        let pt = target.transformed_point(pos);
        let delta = pt - drag.anchor;
        match target.apply(Affine::translate(delta)) {
            Ok(()) => {
                drag.update(pos);
                target.redraw();
                PointerResponse::Panned { delta }
            }
            Err(err) => {
                tracing::debug!(%err, ?delta, "pan rejected");
                PointerResponse::Rejected
            }
        }
    }

    /// Handles a button release at canvas position `pos`.
    ///
    /// A release without movement is a click: zoom in by the configured click
    /// amount, or out when shift is held.
    pub fn pointer_up<T>(
        &mut self,
        target: &mut T,
        pos: Point,
        modifiers: Modifiers,
    ) -> PointerResponse
    where
        T: PanZoomTarget + ?Sized,
    {
        self.last_position = pos;
        let Some(drag) = self.drag.take() else {
            return PointerResponse::Ignored;
        };
        if !drag.is_click() {
            tracing::trace!(offset = ?drag.total_offset(), "drag ended");
            return PointerResponse::Released;
        }
        let sign = if modifiers.shift() { -1.0 } else { 1.0 };
        self.zoom(target, sign * self.config.click_zoom_clicks)
    }

    /// Handles a wheel event at canvas position `pos`.
    ///
    /// Positive `delta` zooms in. Works in either state.
    pub fn wheel<T>(&mut self, target: &mut T, pos: Point, delta: f64) -> PointerResponse
    where
        T: PanZoomTarget + ?Sized,
    {
        self.last_position = pos;
        match self.config.wheel_clicks(delta) {
            Some(clicks) => self.zoom(target, clicks),
            None => PointerResponse::Ignored,
        }
    }

    /// Abandons a drag session without a click zoom.
    ///
    /// Use this when the pointer leaves the canvas or capture is lost.
    pub fn cancel(&mut self) -> PointerResponse {
        match self.drag.take() {
            Some(_) => PointerResponse::Cancelled,
            None => PointerResponse::Ignored,
        }
    }

    /// Zooms by `clicks` around the last pointer position.
    ///
    /// The content point under the pointer stays fixed. The whole zoom is
    /// applied as a single composed matrix, so a degenerate result leaves the
    /// transform exactly as it was.
    pub fn zoom<T>(&mut self, target: &mut T, clicks: f64) -> PointerResponse
    where
        T: PanZoomTarget + ?Sized,
    {
        let focus = target.transformed_point(self.last_position);
        let factor = self.config.scale_factor.powf(clicks);
        let v = focus.to_vec2();
        let op = Affine::translate(v) * Affine::scale(factor) * Affine::translate(-v);
        match target.apply(op) {
            Ok(()) => {
                target.redraw();
                tracing::trace!(clicks, factor, ?focus, "zoomed");
                PointerResponse::Zoomed { factor, focus }
            }
            Err(err) => {
                tracing::debug!(%err, clicks, factor, "zoom rejected");
                PointerResponse::Rejected
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use parsescope_view2d::Transform;

    use super::*;

    /// Bare transform target that counts redraws.
    #[derive(Default)]
    struct Bare {
        transform: Transform,
        redraws: usize,
    }

    impl PanZoomTarget for Bare {
        fn transformed_point(&self, pt: Point) -> Point {
            self.transform.map_point_inverse(pt)
        }

        fn apply(&mut self, op: Affine) -> Result<(), DegenerateTransformError> {
            self.transform = self.transform.compose(op)?;
            Ok(())
        }

        fn redraw(&mut self) {
            self.redraws += 1;
        }
    }

    fn near(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn click_without_movement_zooms_in() {
        let mut t = Bare::default();
        let mut p = PointerInteraction::default();
        assert_eq!(p.pointer_down(&t, Point::new(10.0, 10.0)), PointerResponse::Pressed);
        assert_eq!(p.state(), InteractionState::Dragging);

        let r = p.pointer_up(&mut t, Point::new(10.0, 10.0), Modifiers::empty());
        assert!(matches!(
            r,
            PointerResponse::Zoomed { factor, .. } if (factor - 1.1).abs() < 1e-12
        ));
        assert_eq!(p.state(), InteractionState::Idle);
        assert!(t.transform.determinant() > 1.0);
        assert_eq!(t.redraws, 1);
    }

    #[test]
    fn shift_click_zooms_out() {
        let mut t = Bare::default();
        let mut p = PointerInteraction::default();
        p.pointer_down(&t, Point::new(10.0, 10.0));
        let r = p.pointer_up(&mut t, Point::new(10.0, 10.0), Modifiers::SHIFT);
        assert!(matches!(r, PointerResponse::Zoomed { factor, .. } if factor < 1.0));
        assert!(t.transform.determinant() < 1.0);
    }

    #[test]
    fn drag_with_movement_pans_and_does_not_zoom() {
        let mut t = Bare::default();
        let mut p = PointerInteraction::default();
        p.pointer_down(&t, Point::new(0.0, 0.0));
        let r = p.pointer_move(&mut t, Point::new(30.0, -10.0));
        assert_eq!(r, PointerResponse::Panned { delta: Vec2::new(30.0, -10.0) });
        assert!(r.suppresses_selection());
        let before_release = t.transform;

        let r = p.pointer_up(&mut t, Point::new(30.0, -10.0), Modifiers::empty());
        assert_eq!(r, PointerResponse::Released);
        assert!(!r.suppresses_selection());
        assert_eq!(t.transform, before_release);
        assert_eq!(t.transform.determinant(), 1.0);
    }

    #[test]
    fn anchor_stays_under_pointer_while_dragging() {
        let mut t = Bare {
            transform: Transform::IDENTITY.scale(2.0, 2.0).unwrap(),
            redraws: 0,
        };
        let mut p = PointerInteraction::default();
        p.pointer_down(&t, Point::new(100.0, 100.0));
        let anchor = p.drag().unwrap().anchor;
        for pos in [Point::new(120.0, 90.0), Point::new(160.0, 140.0), Point::new(5.0, 5.0)] {
            p.pointer_move(&mut t, pos);
            assert!(near(t.transformed_point(pos), anchor));
        }
    }

    #[test]
    fn move_while_idle_only_tracks_position() {
        let mut t = Bare::default();
        let mut p = PointerInteraction::default();
        assert_eq!(p.pointer_move(&mut t, Point::new(4.0, 2.0)), PointerResponse::Ignored);
        assert_eq!(p.last_position(), Point::new(4.0, 2.0));
        assert_eq!(t.redraws, 0);
    }

    #[test]
    fn wheel_zoom_keeps_focus_fixed() {
        let mut t = Bare::default();
        let mut p = PointerInteraction::default();
        let pos = Point::new(400.0, 300.0);
        let before = t.transformed_point(pos);
        let r = p.wheel(&mut t, pos, 120.0);
        assert!(matches!(r, PointerResponse::Zoomed { .. }));
        assert!(near(t.transformed_point(pos), before));
    }

    #[test]
    fn zero_wheel_delta_is_ignored() {
        let mut t = Bare::default();
        let mut p = PointerInteraction::default();
        assert_eq!(p.wheel(&mut t, Point::new(1.0, 1.0), 0.0), PointerResponse::Ignored);
        assert_eq!(t.transform, Transform::IDENTITY);
    }

    #[test]
    fn degenerate_zoom_is_rolled_back() {
        let mut t = Bare::default();
        let mut p = PointerInteraction::default();
        p.wheel(&mut t, Point::new(50.0, 50.0), 40.0);
        let before = t.transform;
        // 1.1^-2000 underflows the determinant.
        assert_eq!(p.zoom(&mut t, -2000.0), PointerResponse::Rejected);
        assert_eq!(t.transform, before);
        assert_eq!(t.redraws, 1);
    }

    #[test]
    fn release_while_idle_is_ignored() {
        let mut t = Bare::default();
        let mut p = PointerInteraction::default();
        assert_eq!(
            p.pointer_up(&mut t, Point::ORIGIN, Modifiers::empty()),
            PointerResponse::Ignored
        );
        assert_eq!(t.transform, Transform::IDENTITY);
    }

    #[test]
    fn cancel_ends_drag_without_zoom() {
        let mut t = Bare::default();
        let mut p = PointerInteraction::default();
        p.pointer_down(&t, Point::new(3.0, 3.0));
        assert_eq!(p.cancel(), PointerResponse::Cancelled);
        assert!(!p.is_dragging());
        assert_eq!(
            p.pointer_up(&mut t, Point::new(3.0, 3.0), Modifiers::empty()),
            PointerResponse::Ignored
        );
        assert_eq!(t.transform, Transform::IDENTITY);
    }

    #[test]
    fn config_builders() {
        let config = PanZoomConfig::default()
            .with_scale_factor(2.0)
            .with_wheel_delta_divisor(100.0)
            .with_click_zoom_clicks(0.5);
        assert_eq!(config.wheel_clicks(50.0), Some(0.5));
        assert_eq!(config.wheel_clicks(f64::NAN), None);

        let mut t = Bare::default();
        let mut p = PointerInteraction::new(config);
        p.pointer_down(&t, Point::ORIGIN);
        let r = p.pointer_up(&mut t, Point::ORIGIN, Modifiers::empty());
        assert!(matches!(
            r,
            PointerResponse::Zoomed { factor, .. } if (factor - 2.0_f64.sqrt()).abs() < 1e-12
        ));
    }
}
