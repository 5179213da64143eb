// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsescope Pipeline: compile once, update every view together.
//!
//! A [`CompilePipeline`] sends source text to a [`Compiler`], decodes the
//! structured result into a [`CompileResult`], renders the AST and parse
//! tree graphs through a [`GraphRenderer`], and then replaces the token
//! list, both graph views and the analysis list in one step.
//!
//! Failure handling has a single channel. A compiler error, a malformed
//! result or a render error is reported once through the [`StatusView`] and
//! returned as a [`PipelineError`]; no view changes.
//!
//! Hosts whose compiler answers asynchronously split a run in two with
//! [`CompilePipeline::begin`] and [`CompilePipeline::complete`]. Tickets are
//! sequenced so an older answer arriving after a newer request is dropped.
//!
//! With the default `view2d` feature, [`parsescope_view2d::Viewport`]
//! implements [`GraphView`], so graph renders land directly in pan/zoom
//! viewports.

mod boundary;
mod cache;
mod config;
mod error;
mod pipeline;
mod result;
pub mod sequence;

pub use boundary::{
    Compiler, GraphRenderer, GraphView, ListView, SourceEditor, Status, StatusView,
};
pub use cache::{GraphCache, GraphImage};
pub use config::PipelineConfig;
pub use error::{CompilerFailure, GraphKind, MalformedResult, PipelineError, RenderFailure};
pub use pipeline::{CompilePipeline, Consumers, FanOutSummary, RunOutcome};
pub use result::{CompileResult, split_token_markup};
pub use sequence::{RequestSequencer, Target, Ticket};
