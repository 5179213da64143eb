// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use parsescope_event_state::{PanZoomConfig, PointerInteraction, PointerResponse};
use parsescope_pipeline::{GraphView, Target, Ticket};
use parsescope_view2d::Viewport;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, HtmlImageElement, MouseEvent, WheelEvent};

use crate::events::{canvas_point, event_modifiers, wheel_delta};
use crate::loads::ContentLoads;
use crate::surface::{CanvasImage, WebCanvasSurface};

#[derive(Debug)]
struct Inner {
    viewport: Viewport<WebCanvasSurface>,
    pointer: PointerInteraction,
    loads: ContentLoads,
}

/// One pan/zoom graph canvas: a viewport plus its own pointer state.
///
/// This is a shared handle; clones refer to the same canvas. Forward the
/// canvas's `mousedown`, `mousemove`, `mouseup`, `mouseleave` and `wheel`
/// events to the matching methods. Default actions (text selection, page
/// scroll) are prevented while they would interfere.
///
/// Content that is still decoding is drawn again from its `load` event, as
/// long as it is still the canvas's content by then.
#[derive(Clone, Debug)]
pub struct GraphCanvas {
    inner: Rc<RefCell<Inner>>,
}

impl GraphCanvas {
    /// Wraps `canvas`, which shows the `target` graph, with default pan/zoom
    /// tuning.
    pub fn new(canvas: HtmlCanvasElement, target: Target) -> Result<Self, JsValue> {
        Ok(Self {
            inner: Rc::new(RefCell::new(Inner {
                viewport: Viewport::new(WebCanvasSurface::new(canvas)?),
                pointer: PointerInteraction::default(),
                loads: ContentLoads::new(target),
            })),
        })
    }

    /// Replaces the pan/zoom tuning.
    #[must_use]
    pub fn with_config(self, config: PanZoomConfig) -> Self {
        self.inner.borrow_mut().pointer.set_config(config);
        self
    }

    /// Runs `f` with the viewport.
    pub fn with_viewport<R>(&self, f: impl FnOnce(&mut Viewport<WebCanvasSurface>) -> R) -> R {
        f(&mut self.inner.borrow_mut().viewport)
    }

    /// Repaints the current content, e.g. after the canvas was resized.
    pub fn redraw(&self) {
        self.inner.borrow_mut().viewport.redraw();
    }

    /// Replaces the content and repaints, again once it has decoded.
    pub fn set_content(&self, image: CanvasImage) {
        let decoding = match &image {
            CanvasImage::Image(img) if !img.complete() => Some(img.clone()),
            _ => None,
        };
        let mut inner = self.inner.borrow_mut();
        match decoding {
            Some(img) => {
                let ticket = inner.loads.pending();
                redraw_on_load(&img, Rc::downgrade(&self.inner), ticket);
            }
            None => inner.loads.ready(),
        }
        inner.viewport.set_content(image);
    }

    /// `mousedown` handler.
    pub fn mouse_down(&self, event: &MouseEvent) -> PointerResponse {
        let inner = &mut *self.inner.borrow_mut();
        let response = inner.pointer.pointer_down(&inner.viewport, canvas_point(event));
        if response.suppresses_selection() {
            event.prevent_default();
        }
        response
    }

    /// `mousemove` handler.
    pub fn mouse_move(&self, event: &MouseEvent) -> PointerResponse {
        let inner = &mut *self.inner.borrow_mut();
        let response = inner
            .pointer
            .pointer_move(&mut inner.viewport, canvas_point(event));
        if response.suppresses_selection() {
            event.prevent_default();
        }
        response
    }

    /// `mouseup` handler.
    pub fn mouse_up(&self, event: &MouseEvent) -> PointerResponse {
        let inner = &mut *self.inner.borrow_mut();
        inner.pointer.pointer_up(
            &mut inner.viewport,
            canvas_point(event),
            event_modifiers(event),
        )
    }

    /// `mouseleave` handler: ends a drag without zooming.
    pub fn mouse_leave(&self) -> PointerResponse {
        self.inner.borrow_mut().pointer.cancel()
    }

    /// `wheel` handler.
    pub fn wheel(&self, event: &WheelEvent) -> PointerResponse {
        let inner = &mut *self.inner.borrow_mut();
        let response = inner
            .pointer
            .wheel(&mut inner.viewport, canvas_point(event), wheel_delta(event));
        if !matches!(response, PointerResponse::Ignored) {
            event.prevent_default();
        }
        response
    }
}

impl GraphView for GraphCanvas {
    type Image = CanvasImage;

    fn set_content(&mut self, image: CanvasImage) {
        Self::set_content(self, image);
    }
}

fn redraw_on_load(img: &HtmlImageElement, canvas: Weak<RefCell<Inner>>, ticket: Ticket) {
    let on_load = Closure::once_into_js(move || {
        let Some(inner) = canvas.upgrade() else {
            return;
        };
        let mut inner = inner.borrow_mut();
        if inner.loads.loaded(ticket) {
            inner.viewport.redraw();
        } else {
            tracing::trace!(
                target_graph = ?inner.loads.target(),
                ticket = ticket.seq(),
                "load of replaced content ignored"
            );
        }
    });
    img.set_onload(Some(on_load.unchecked_ref()));
}
