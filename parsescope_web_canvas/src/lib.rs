// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser bindings for Parsescope.
//!
//! On `wasm32` this crate provides:
//! - `WebCanvasSurface`: a [`DrawingSurface`](parsescope_view2d::DrawingSurface)
//!   over `web_sys::CanvasRenderingContext2d`.
//! - `GraphCanvas`: a shared handle to a viewport plus its pointer state,
//!   with handlers for the canvas's mouse and wheel events. It is the
//!   pipeline's graph view and repaints when decoding content finishes.
//! - DOM boundaries for the compile pipeline: `JsCompiler` and `SvgRenderer`
//!   wrap JS functions, `ElementList` and `ElementStatus` write into elements.
//!
//! The [`input`] helpers that normalize wheel deltas and modifier flags, and
//! the [`loads`] bookkeeping for asynchronously decoded content, are
//! available on every target.
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn graph(
//!     canvas: web_sys::HtmlCanvasElement,
//! ) -> Result<parsescope_web_canvas::GraphCanvas, wasm_bindgen::JsValue> {
//!     parsescope_web_canvas::GraphCanvas::new(canvas, parsescope_pipeline::Target::Ast)
//! }
//! ```
//!
//! Notes:
//! - Graph images arrive as `<img>` elements with SVG data URLs. They decode
//!   asynchronously; `GraphCanvas` redraws from the image's `load` event
//!   unless newer content replaced it meanwhile.
//! - Canvas 2D errors are ignored; the transform tracker keeps transforms
//!   valid before they reach the context.

pub mod input;
pub mod loads;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod graph_canvas;
#[cfg(target_arch = "wasm32")]
mod surface;

#[cfg(target_arch = "wasm32")]
pub use dom::{ElementList, ElementStatus, JsCompiler, SvgRenderer, svg_data_url, svg_image};
#[cfg(target_arch = "wasm32")]
pub use events::{canvas_point, event_modifiers, wheel_delta};
#[cfg(target_arch = "wasm32")]
pub use graph_canvas::GraphCanvas;
pub use loads::ContentLoads;
#[cfg(target_arch = "wasm32")]
pub use surface::{CanvasImage, WebCanvasSurface};
