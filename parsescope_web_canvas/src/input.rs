// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion of browser input values into the interaction layer's terms.
//!
//! These helpers take plain numbers and flags so they work on any target;
//! the `wasm32` event adapters feed them from `MouseEvent` and `WheelEvent`.

use parsescope_event_state::Modifiers;

/// `WheelEvent.deltaMode` for pixel deltas.
pub const DOM_DELTA_PIXEL: u32 = 0;
/// `WheelEvent.deltaMode` for line deltas.
pub const DOM_DELTA_LINE: u32 = 1;
/// `WheelEvent.deltaMode` for page deltas.
pub const DOM_DELTA_PAGE: u32 = 2;

/// Wheel magnitude of one scrolled line. One line is one zoom click.
pub const LINE_MAGNITUDE: f64 = 40.0;
/// Wheel magnitude of one scrolled page.
pub const PAGE_MAGNITUDE: f64 = 400.0;

/// Converts a `WheelEvent` vertical delta into a signed wheel magnitude.
///
/// The result is positive when scrolling up (zoom in), matching the legacy
/// `wheelDelta` convention. Unknown delta modes are treated as pixels.
#[must_use]
pub fn wheel_magnitude(delta_y: f64, delta_mode: u32) -> f64 {
    let scale = match delta_mode {
        DOM_DELTA_LINE => LINE_MAGNITUDE,
        DOM_DELTA_PAGE => PAGE_MAGNITUDE,
        _ => 1.0,
    };
    -delta_y * scale
}

/// Builds [`Modifiers`] from a DOM event's modifier key flags.
#[must_use]
pub fn modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    let mut m = Modifiers::empty();
    m.set(Modifiers::SHIFT, shift);
    m.set(Modifiers::CTRL, ctrl);
    m.set(Modifiers::ALT, alt);
    m.set(Modifiers::META, meta);
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolling_up_zooms_in() {
        assert_eq!(wheel_magnitude(-100.0, DOM_DELTA_PIXEL), 100.0);
        assert_eq!(wheel_magnitude(3.0, DOM_DELTA_LINE), -120.0);
        assert_eq!(wheel_magnitude(-1.0, DOM_DELTA_PAGE), 400.0);
        assert_eq!(wheel_magnitude(-7.0, 42), 7.0);
    }

    #[test]
    fn modifier_flags() {
        assert_eq!(modifiers(false, false, false, false), Modifiers::empty());
        let m = modifiers(true, false, true, false);
        assert!(m.shift());
        assert!(m.contains(Modifiers::ALT));
        assert!(!m.contains(Modifiers::CTRL));
    }
}
