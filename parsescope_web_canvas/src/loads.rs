// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Load completions for graph content that decodes asynchronously.
//!
//! A graph canvas may receive an image before the browser has decoded it.
//! Each such image gets a [`Ticket`] for the canvas's [`Target`]; when the
//! image finishes loading, the canvas repaints only if that ticket is still
//! the newest content for the target. Loads of replaced content are dropped,
//! since the newer content repaints on its own.

use parsescope_pipeline::{RequestSequencer, Target, Ticket};

/// Which content load, if any, a graph canvas is still waiting on.
#[derive(Clone, Debug)]
pub struct ContentLoads {
    target: Target,
    sequencer: RequestSequencer,
}

impl ContentLoads {
    /// Tracks loads for the canvas showing `target`.
    #[must_use]
    pub fn new(target: Target) -> Self {
        Self {
            target,
            sequencer: RequestSequencer::new(),
        }
    }

    /// The graph this canvas shows.
    #[must_use]
    pub fn target(&self) -> Target {
        self.target
    }

    /// Records content that is still decoding and returns the ticket its load
    /// completion must present.
    pub fn pending(&mut self) -> Ticket {
        self.sequencer.issue(&[self.target])
    }

    /// Records content that can be drawn right away. Pending loads go stale.
    pub fn ready(&mut self) {
        let ticket = self.sequencer.issue(&[self.target]);
        self.sequencer.settle(ticket, &[self.target]);
    }

    /// Returns `true` if the load for `ticket` should repaint the canvas.
    ///
    /// Each ticket repaints at most once.
    pub fn loaded(&mut self, ticket: Ticket) -> bool {
        self.sequencer.settle(ticket, &[self.target])
    }
}
