// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use parsescope_event_state::Modifiers;
use web_sys::{MouseEvent, WheelEvent};

use crate::input;

/// Pointer position relative to the target canvas's padding edge.
pub fn canvas_point(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.offset_x()), f64::from(event.offset_y()))
}

/// Modifier keys held during `event`.
pub fn event_modifiers(event: &MouseEvent) -> Modifiers {
    input::modifiers(
        event.shift_key(),
        event.ctrl_key(),
        event.alt_key(),
        event.meta_key(),
    )
}

/// Signed wheel magnitude of `event`; positive zooms in.
pub fn wheel_delta(event: &WheelEvent) -> f64 {
    input::wheel_magnitude(event.delta_y(), event.delta_mode())
}
