// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use js_sys::Function;
use parsescope_pipeline::{
    Compiler, CompilerFailure, GraphRenderer, ListView, RenderFailure, Status, StatusView,
};
use wasm_bindgen::JsValue;
use web_sys::{Element, HtmlImageElement};

use crate::surface::CanvasImage;

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Wraps SVG markup in a `data:` URL for an `<img>` source.
pub fn svg_data_url(svg: &str) -> String {
    let encoded: String = js_sys::encode_uri_component(svg).into();
    format!("data:image/svg+xml;charset=utf-8,{encoded}")
}

/// Creates an `<img>` showing `svg`.
///
/// The image decodes asynchronously. [`GraphCanvas`](crate::GraphCanvas)
/// repaints once it has loaded.
pub fn svg_image(svg: &str) -> Result<HtmlImageElement, JsValue> {
    let img = HtmlImageElement::new()?;
    img.set_src(&svg_data_url(svg));
    Ok(img)
}

/// [`Compiler`] backed by a JS function `(source: string) => string`.
///
/// A thrown exception or a non-string return is a compile failure.
#[derive(Debug, Clone)]
pub struct JsCompiler {
    compile: Function,
}

impl JsCompiler {
    /// Wraps `compile`.
    pub fn new(compile: Function) -> Self {
        Self { compile }
    }
}

impl Compiler for JsCompiler {
    fn compile(&mut self, source: &str) -> Result<String, CompilerFailure> {
        let out = self
            .compile
            .call1(&JsValue::NULL, &JsValue::from_str(source))
            .map_err(|err| CompilerFailure::new(js_message(&err)))?;
        out.as_string()
            .ok_or_else(|| CompilerFailure::new("compiler returned a non-string result"))
    }
}

/// [`GraphRenderer`] backed by a JS function `(spec: string) => string`
/// returning SVG markup, such as a Graphviz binding.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    render: Function,
}

impl SvgRenderer {
    /// Wraps `render`.
    pub fn new(render: Function) -> Self {
        Self { render }
    }
}

impl GraphRenderer for SvgRenderer {
    type Image = CanvasImage;

    fn render(&mut self, spec: &str) -> Result<CanvasImage, RenderFailure> {
        let svg = self
            .render
            .call1(&JsValue::NULL, &JsValue::from_str(spec))
            .map_err(|err| RenderFailure::new(js_message(&err)))?
            .as_string()
            .ok_or_else(|| RenderFailure::new("renderer returned a non-string result"))?;
        svg_image(&svg)
            .map(CanvasImage::Image)
            .map_err(|err| RenderFailure::new(js_message(&err)))
    }
}

/// [`ListView`] that renders each entry as a `<p>` child of an element.
#[derive(Debug, Clone)]
pub struct ElementList {
    parent: Element,
}

impl ElementList {
    /// Uses `parent` as the list container. Existing children are kept until
    /// the first [`ListView::clear`].
    pub fn new(parent: Element) -> Self {
        Self { parent }
    }
}

impl ListView for ElementList {
    fn clear(&mut self) {
        self.parent.set_inner_html("");
    }

    fn append(&mut self, entry: &str) {
        let Some(doc) = self.parent.owner_document() else {
            return;
        };
        match doc.create_element("p") {
            Ok(p) => {
                p.set_text_content(Some(entry));
                let _ = self.parent.append_child(&p);
            }
            Err(err) => tracing::warn!(?err, "could not create list entry"),
        }
    }
}

/// [`StatusView`] that writes the message into an element.
#[derive(Debug, Clone)]
pub struct ElementStatus {
    element: Element,
}

impl ElementStatus {
    /// Writes into `element`.
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl StatusView for ElementStatus {
    fn notify(&mut self, status: Status, message: &str) {
        self.element.set_text_content(Some(message));
        let _ = self.element.set_attribute(
            "data-status",
            match status {
                Status::Success => "success",
                Status::Failure => "failure",
            },
        );
    }
}
