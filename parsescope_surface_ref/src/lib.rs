// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsescope reference drawing surface.
//!
//! This crate provides a small, stateful implementation of
//! [`DrawingSurface`] for **call recording and state tracing**.
//!
//! It is intentionally *not* a rasterizer:
//! - It does **not** produce pixels.
//! - It applies transform calls with Canvas 2D semantics and records every
//!   call together with the surface state at the time it was applied.
//! - It is intended for tests and debugging that want to assert on what a
//!   viewport drew, and under which transform.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Affine, Point, Rect, Size, Vec2};
use parsescope_view2d::DrawingSurface;

/// Image handle understood by [`RefSurface`].
///
/// Only identity and nominal size are tracked.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RefImage {
    /// Caller-chosen identifier.
    pub id: u32,
    /// Nominal size in content units.
    pub size: Size,
}

impl RefImage {
    /// Creates an image handle.
    #[must_use]
    pub const fn new(id: u32, size: Size) -> Self {
        Self { id, size }
    }
}

/// Snapshot of the surface state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StateSnapshot {
    /// Current transform.
    pub transform: Affine,
    /// Number of saved states.
    pub depth: u32,
}

impl Default for StateSnapshot {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            depth: 0,
        }
    }
}

/// State-changing call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StateOp {
    /// `save()`.
    Save,
    /// `restore()`.
    Restore,
    /// `translate(dx, dy)`.
    Translate(Vec2),
    /// `scale(sx, sy)`.
    Scale(Vec2),
    /// `rotate(angle)`.
    Rotate(f64),
    /// `transform(matrix)`.
    Transform(Affine),
    /// `set_transform(matrix)`.
    SetTransform(Affine),
}

/// Pixel-producing call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// `clear_rect(rect)`.
    ClearRect(Rect),
    /// `draw_image(image, origin)`.
    DrawImage {
        /// Image that was drawn.
        image: RefImage,
        /// User-space origin.
        origin: Point,
    },
}

/// Event recorded by the reference surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Event {
    /// State operation and the resulting state snapshot.
    State {
        /// State operation that was applied.
        op: StateOp,
        /// Snapshot after applying the operation.
        state: StateSnapshot,
    },
    /// Draw operation and the state snapshot used for drawing.
    Draw {
        /// Draw operation that was applied.
        op: DrawOp,
        /// Snapshot at the time of drawing.
        state: StateSnapshot,
    },
}

/// Recording implementation of [`DrawingSurface`].
#[derive(Debug)]
pub struct RefSurface {
    size: Size,
    state: StateSnapshot,
    stack: Vec<StateSnapshot>,
    /// Log of events in the order they were applied.
    events: Vec<Event>,
}

impl RefSurface {
    /// Creates a surface of the given pixel size.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            state: StateSnapshot::default(),
            stack: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Returns a slice of recorded events.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Clears all recorded events but keeps the current state.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> StateSnapshot {
        self.state
    }

    /// Iterates over recorded draw operations with their snapshots.
    pub fn draws(&self) -> impl Iterator<Item = (DrawOp, StateSnapshot)> + '_ {
        self.events.iter().filter_map(|event| match *event {
            Event::Draw { op, state } => Some((op, state)),
            Event::State { .. } => None,
        })
    }

    /// The most recently drawn image, if any.
    #[must_use]
    pub fn last_image(&self) -> Option<RefImage> {
        self.draws()
            .filter_map(|(op, _)| match op {
                DrawOp::DrawImage { image, .. } => Some(image),
                DrawOp::ClearRect(_) => None,
            })
            .last()
    }

    fn state_op(&mut self, op: StateOp) {
        match op {
            StateOp::Save => {
                self.stack.push(self.state);
                self.state.depth = depth_of(&self.stack);
            }
            StateOp::Restore => {
                if let Some(saved) = self.stack.pop() {
                    self.state = saved;
                }
                self.state.depth = depth_of(&self.stack);
            }
            StateOp::Translate(v) => self.compose(Affine::translate(v)),
            StateOp::Scale(v) => self.compose(Affine::scale_non_uniform(v.x, v.y)),
            StateOp::Rotate(angle) => self.compose(Affine::rotate(angle)),
            StateOp::Transform(m) => self.compose(m),
            StateOp::SetTransform(m) => self.state.transform = m,
        }
        self.events.push(Event::State {
            op,
            state: self.state,
        });
    }

    fn compose(&mut self, op: Affine) {
        self.state.transform = self.state.transform * op;
    }

    fn draw_op(&mut self, op: DrawOp) {
        self.events.push(Event::Draw {
            op,
            state: self.state,
        });
    }
}

fn depth_of(stack: &[StateSnapshot]) -> u32 {
    u32::try_from(stack.len()).unwrap_or(u32::MAX)
}

impl DrawingSurface for RefSurface {
    type Image = RefImage;

    fn size(&self) -> Size {
        self.size
    }

    fn save(&mut self) {
        self.state_op(StateOp::Save);
    }

    fn restore(&mut self) {
        self.state_op(StateOp::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state_op(StateOp::Translate(Vec2::new(dx, dy)));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state_op(StateOp::Scale(Vec2::new(sx, sy)));
    }

    fn rotate(&mut self, angle: f64) {
        self.state_op(StateOp::Rotate(angle));
    }

    fn transform(&mut self, matrix: Affine) {
        self.state_op(StateOp::Transform(matrix));
    }

    fn set_transform(&mut self, matrix: Affine) {
        self.state_op(StateOp::SetTransform(matrix));
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.draw_op(DrawOp::ClearRect(rect));
    }

    fn draw_image(&mut self, image: &RefImage, origin: Point) {
        self.draw_op(DrawOp::DrawImage {
            image: *image,
            origin,
        });
    }
}
