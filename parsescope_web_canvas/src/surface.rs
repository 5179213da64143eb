// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size};
use parsescope_view2d::DrawingSurface;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

/// Something drawable with `drawImage`.
#[derive(Clone, Debug)]
pub enum CanvasImage {
    /// A decoded (or decoding) `<img>`.
    Image(HtmlImageElement),
    /// Another canvas, e.g. an offscreen pre-render.
    Canvas(HtmlCanvasElement),
}

/// [`DrawingSurface`] over a DOM canvas's 2D context.
///
/// Canvas 2D calls that report errors (non-finite arguments, an image that
/// failed to decode) are ignored; the tracker already rejects degenerate
/// transforms before they get here.
#[derive(Debug)]
pub struct WebCanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl WebCanvasSurface {
    /// Creates a surface drawing into `canvas`.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("missing 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// The canvas element.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// The underlying 2D context.
    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }
}

impl DrawingSurface for WebCanvasSurface {
    type Image = CanvasImage;

    fn size(&self) -> Size {
        Size::new(f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let _ = self.ctx.translate(dx, dy);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        let _ = self.ctx.scale(sx, sy);
    }

    fn rotate(&mut self, angle: f64) {
        let _ = self.ctx.rotate(angle);
    }

    fn transform(&mut self, matrix: Affine) {
        let [a, b, c, d, e, f] = matrix.as_coeffs();
        let _ = self.ctx.transform(a, b, c, d, e, f);
    }

    fn set_transform(&mut self, matrix: Affine) {
        let [a, b, c, d, e, f] = matrix.as_coeffs();
        let _ = self.ctx.set_transform(a, b, c, d, e, f);
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ctx.clear_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn draw_image(&mut self, image: &CanvasImage, origin: Point) {
        let drawn = match image {
            CanvasImage::Image(img) => self
                .ctx
                .draw_image_with_html_image_element(img, origin.x, origin.y),
            CanvasImage::Canvas(canvas) => self
                .ctx
                .draw_image_with_html_canvas_element(canvas, origin.x, origin.y),
        };
        if let Err(err) = drawn {
            tracing::debug!(?err, "drawImage failed");
        }
    }
}
