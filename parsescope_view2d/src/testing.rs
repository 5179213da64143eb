// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal in-crate surface for unit tests.

use alloc::vec::Vec;

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::DrawingSurface;

#[derive(Debug)]
pub(crate) struct MockSurface {
    pub(crate) size: Size,
    pub(crate) transform: Affine,
    pub(crate) stack: Vec<Affine>,
    pub(crate) depth: usize,
    pub(crate) calls: usize,
    pub(crate) clears: Vec<(Rect, Affine)>,
    pub(crate) draws: Vec<(u32, Point, Affine)>,
}

impl MockSurface {
    pub(crate) fn new(size: Size) -> Self {
        Self {
            size,
            transform: Affine::IDENTITY,
            stack: Vec::new(),
            depth: 0,
            calls: 0,
            clears: Vec::new(),
            draws: Vec::new(),
        }
    }
}

impl DrawingSurface for MockSurface {
    type Image = u32;

    fn size(&self) -> Size {
        self.size
    }

    fn save(&mut self) {
        self.calls += 1;
        self.stack.push(self.transform);
        self.depth = self.stack.len();
    }

    fn restore(&mut self) {
        self.calls += 1;
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
        self.depth = self.stack.len();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.calls += 1;
        self.transform = self.transform * Affine::translate(Vec2::new(dx, dy));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.calls += 1;
        self.transform = self.transform * Affine::scale_non_uniform(sx, sy);
    }

    fn rotate(&mut self, angle: f64) {
        self.calls += 1;
        self.transform = self.transform * Affine::rotate(angle);
    }

    fn transform(&mut self, matrix: Affine) {
        self.calls += 1;
        self.transform = self.transform * matrix;
    }

    fn set_transform(&mut self, matrix: Affine) {
        self.calls += 1;
        self.transform = matrix;
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.calls += 1;
        self.clears.push((rect, self.transform));
    }

    fn draw_image(&mut self, image: &u32, origin: Point) {
        self.calls += 1;
        self.draws.push((*image, origin, self.transform));
    }
}
