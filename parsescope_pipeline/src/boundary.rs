// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Traits for the collaborators a [`CompilePipeline`](crate::CompilePipeline) talks to.
//!
//! The compiler, the graph layout engine, the text editor and the views are
//! all external. The pipeline only sees them through these seams.

use crate::error::{CompilerFailure, RenderFailure};

/// Turns source text into a raw structured (JSON) compile result.
pub trait Compiler {
    /// Compiles `source`.
    fn compile(&mut self, source: &str) -> Result<String, CompilerFailure>;
}

impl<F> Compiler for F
where
    F: FnMut(&str) -> Result<String, CompilerFailure>,
{
    fn compile(&mut self, source: &str) -> Result<String, CompilerFailure> {
        self(source)
    }
}

/// Lays out and rasterizes a textual graph specification.
pub trait GraphRenderer {
    /// Drawable produced by a render.
    type Image: Clone;

    /// Renders `spec` into an image.
    fn render(&mut self, spec: &str) -> Result<Self::Image, RenderFailure>;
}

/// Source of the text to compile.
pub trait SourceEditor {
    /// The editor's full current text.
    fn current_source_text(&self) -> String;
}

impl SourceEditor for str {
    fn current_source_text(&self) -> String {
        self.to_owned()
    }
}

impl SourceEditor for String {
    fn current_source_text(&self) -> String {
        self.clone()
    }
}

/// A list of text entries, repopulated once per successful compile.
pub trait ListView {
    /// Removes every entry.
    fn clear(&mut self);

    /// Appends one entry at the end.
    fn append(&mut self, entry: &str);
}

impl ListView for Vec<String> {
    fn clear(&mut self) {
        Self::clear(self);
    }

    fn append(&mut self, entry: &str) {
        self.push(entry.to_owned());
    }
}

/// A view showing one rendered graph.
pub trait GraphView {
    /// Image type accepted as content.
    type Image;

    /// Replaces the displayed graph.
    fn set_content(&mut self, image: Self::Image);
}

#[cfg(feature = "view2d")]
impl<S: parsescope_view2d::DrawingSurface> GraphView for parsescope_view2d::Viewport<S> {
    type Image = S::Image;

    fn set_content(&mut self, image: Self::Image) {
        Self::set_content(self, image);
    }
}

/// Outcome shown to the user after a compile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Everything was applied.
    Success,
    /// Nothing was applied.
    Failure,
}

/// The single user-visible notification slot.
pub trait StatusView {
    /// Shows `message`, replacing any previous one.
    fn notify(&mut self, status: Status, message: &str);
}

impl<F> StatusView for F
where
    F: FnMut(Status, &str),
{
    fn notify(&mut self, status: Status, message: &str) {
        self(status, message);
    }
}
