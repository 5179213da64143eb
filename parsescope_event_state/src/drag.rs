// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state helper: remember where a press landed and whether it moved.
//!
//! ## Usage
//!
//! 1) On press, create a [`DragState`] with [`DragState::start`], passing the
//!    canvas-space press position and the content-space anchor under it.
//! 2) On each move event, call [`DragState::update`] to get the canvas-space
//!    delta since the last update. This also flips [`DragState::moved`] once
//!    the pointer leaves the press position.
//! 3) On release, [`DragState::is_click`] tells a click from a drag.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use parsescope_event_state::drag::DragState;
//!
//! let mut drag = DragState::start(Point::new(10.0, 20.0), Point::new(10.0, 20.0));
//! assert!(drag.is_click());
//!
//! let delta = drag.update(Point::new(15.0, 25.0));
//! assert_eq!((delta.x, delta.y), (5.0, 5.0));
//! assert!(drag.moved);
//! ```

use kurbo::{Point, Vec2};

/// State of one pointer press, from press to release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// Content-space point that was under the pointer at press time.
    pub anchor: Point,
    /// Canvas-space press position.
    pub press: Point,
    /// Last canvas-space position seen during the drag.
    pub last: Point,
    /// Whether the pointer has relocated since the press.
    pub moved: bool,
}

impl DragState {
    /// Starts tracking a press at canvas position `press` over content point `anchor`.
    #[must_use]
    pub fn start(press: Point, anchor: Point) -> Self {
        Self {
            anchor,
            press,
            last: press,
            moved: false,
        }
    }

    /// Records a new canvas position, returning the delta since the last one.
    pub fn update(&mut self, pos: Point) -> Vec2 {
        let delta = pos - self.last;
        self.last = pos;
        if pos != self.press {
            self.moved = true;
        }
        delta
    }

    /// Canvas-space offset from the press position to the last position.
    #[must_use]
    pub fn total_offset(&self) -> Vec2 {
        self.last - self.press
    }

    /// Returns `true` if releasing now should count as a click.
    #[must_use]
    pub fn is_click(&self) -> bool {
        !self.moved
    }
}
