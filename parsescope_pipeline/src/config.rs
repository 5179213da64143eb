// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};

/// User-facing text of a [`CompilePipeline`](crate::CompilePipeline).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Status message after a compile was applied.
    pub success_message: String,
    /// Status message after a compile failed and nothing was applied.
    pub failure_message: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            success_message: "Success!".to_owned(),
            failure_message: "Fail!".to_owned(),
        }
    }
}

impl PipelineConfig {
    /// Sets [`PipelineConfig::success_message`].
    #[must_use]
    pub fn with_success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = message.into();
        self
    }

    /// Sets [`PipelineConfig::failure_message`].
    #[must_use]
    pub fn with_failure_message(mut self, message: impl Into<String>) -> Self {
        self.failure_message = message.into();
        self
    }
}
