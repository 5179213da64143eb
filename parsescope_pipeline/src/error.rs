// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// The compiler boundary rejected the source text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("compiler failed: {message}")]
pub struct CompilerFailure {
    /// Message reported by the compiler.
    pub message: String,
}

impl CompilerFailure {
    /// Creates a failure carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The compiler returned something that is not a well-formed compile result.
#[derive(Debug, thiserror::Error)]
#[error("malformed compile result: {source}")]
pub struct MalformedResult {
    #[from]
    source: serde_json::Error,
}

impl MalformedResult {
    /// Line in the raw result where decoding stopped (1-based).
    #[must_use]
    pub fn line(&self) -> usize {
        self.source.line()
    }

    /// Column in the raw result where decoding stopped (1-based).
    #[must_use]
    pub fn column(&self) -> usize {
        self.source.column()
    }
}

/// The graph-render boundary rejected a graph specification.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("render failed: {message}")]
pub struct RenderFailure {
    /// Message reported by the renderer.
    pub message: String,
}

impl RenderFailure {
    /// Creates a failure carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Which of the two graphs a render belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GraphKind {
    /// Abstract syntax tree.
    Ast,
    /// Concrete parse tree.
    ParseTree,
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ast => "ast",
            Self::ParseTree => "parse tree",
        })
    }
}

/// Everything that can stop a compile from reaching the views.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// See [`CompilerFailure`].
    #[error(transparent)]
    Compiler(#[from] CompilerFailure),
    /// See [`MalformedResult`].
    #[error(transparent)]
    Malformed(#[from] MalformedResult),
    /// A graph could not be rendered; nothing was applied.
    #[error("{graph} graph: {source}")]
    Render {
        /// The graph that failed.
        graph: GraphKind,
        /// The renderer's failure.
        #[source]
        source: RenderFailure,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_part() {
        let err = PipelineError::Render {
            graph: GraphKind::ParseTree,
            source: RenderFailure::new("syntax error in line 3"),
        };
        assert_eq!(
            err.to_string(),
            "parse tree graph: render failed: syntax error in line 3"
        );

        let err = PipelineError::from(CompilerFailure::new("unexpected `}`"));
        assert_eq!(err.to_string(), "compiler failed: unexpected `}`");
    }

    #[test]
    fn malformed_reports_position() {
        let json_err = serde_json::from_str::<serde_json::Value>("{\n  \"a\": }").unwrap_err();
        let err = MalformedResult::from(json_err);
        assert_eq!(err.line(), 2);
        assert!(err.to_string().starts_with("malformed compile result: "));
    }
}
