// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::boundary::{
    Compiler, GraphRenderer, GraphView, ListView, SourceEditor, Status, StatusView,
};
use crate::cache::GraphCache;
use crate::config::PipelineConfig;
use crate::error::{CompilerFailure, GraphKind, PipelineError, RenderFailure};
use crate::result::CompileResult;
use crate::sequence::{RequestSequencer, Target, Ticket};

/// The four views a compile fans out to, plus the status slot.
pub struct Consumers<'a, I> {
    /// Token list.
    pub tokens: &'a mut dyn ListView,
    /// Abstract syntax tree viewport.
    pub ast: &'a mut dyn GraphView<Image = I>,
    /// Parse tree viewport.
    pub ptree: &'a mut dyn GraphView<Image = I>,
    /// Analysis message list.
    pub analysis: &'a mut dyn ListView,
    /// Success/failure notification.
    pub status: &'a mut dyn StatusView,
}

impl<I> fmt::Debug for Consumers<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumers").finish_non_exhaustive()
    }
}

/// What an applied fan-out did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FanOutSummary {
    /// Entries written to the token list.
    pub tokens: usize,
    /// Entries written to the analysis list.
    pub analysis: usize,
    /// Whether the AST graph was rendered (`false`: cached image reused).
    pub ast_rendered: bool,
    /// Whether the parse tree graph was rendered (`false`: cached image reused).
    pub ptree_rendered: bool,
}

/// Result of completing a ticketed request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The result reached every view.
    Applied(FanOutSummary),
    /// A newer request was issued meanwhile; nothing was touched.
    Discarded,
}

struct Prepared<I> {
    image: I,
    rendered: bool,
}

/// Compiles source text and distributes the outcome to all views at once.
///
/// A run either updates the token list, both graph views and the analysis
/// list together, or none of them. All rendering happens before the first
/// view is touched, and the graph caches are only updated once everything
/// succeeded.
///
/// ```
/// use parsescope_pipeline::{
///     CompilePipeline, CompilerFailure, Consumers, GraphRenderer, GraphView, RenderFailure,
///     Status,
/// };
///
/// struct Echo;
/// impl GraphRenderer for Echo {
///     type Image = String;
///     fn render(&mut self, spec: &str) -> Result<String, RenderFailure> {
///         Ok(spec.to_uppercase())
///     }
/// }
///
/// #[derive(Default)]
/// struct Slot(Option<String>);
/// impl GraphView for Slot {
///     type Image = String;
///     fn set_content(&mut self, image: String) {
///         self.0 = Some(image);
///     }
/// }
///
/// let compiler = |_: &str| -> Result<String, CompilerFailure> {
///     Ok(r#"{"tokens":["fn"],"ast":"ast","ptree":"pt","analysis":[]}"#.to_owned())
/// };
/// let mut pipeline = CompilePipeline::new(compiler, Echo);
///
/// let (mut tokens, mut analysis) = (Vec::<String>::new(), Vec::<String>::new());
/// let (mut ast, mut ptree) = (Slot::default(), Slot::default());
/// let mut status = |_: Status, _: &str| {};
/// pipeline
///     .run(
///         "fn",
///         Consumers {
///             tokens: &mut tokens,
///             ast: &mut ast,
///             ptree: &mut ptree,
///             analysis: &mut analysis,
///             status: &mut status,
///         },
///     )
///     .unwrap();
/// assert_eq!(tokens, ["fn"]);
/// assert_eq!(ast.0.as_deref(), Some("AST"));
/// ```
pub struct CompilePipeline<C, R: GraphRenderer> {
    compiler: C,
    renderer: R,
    config: PipelineConfig,
    ast_cache: GraphCache<R::Image>,
    ptree_cache: GraphCache<R::Image>,
    sequencer: RequestSequencer,
}

impl<C, R: GraphRenderer> fmt::Debug for CompilePipeline<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompilePipeline")
            .field("config", &self.config)
            .field("ast_cached", &self.ast_cache.get().is_some())
            .field("ptree_cached", &self.ptree_cache.get().is_some())
            .field("sequencer", &self.sequencer)
            .finish_non_exhaustive()
    }
}

impl<C: Compiler, R: GraphRenderer> CompilePipeline<C, R> {
    /// Creates a pipeline with default messages and empty caches.
    pub fn new(compiler: C, renderer: R) -> Self {
        Self {
            compiler,
            renderer,
            config: PipelineConfig::default(),
            ast_cache: GraphCache::new(),
            ptree_cache: GraphCache::new(),
            sequencer: RequestSequencer::new(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The compiler boundary.
    pub fn compiler_mut(&mut self) -> &mut C {
        &mut self.compiler
    }

    /// The graph-render boundary.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Last committed AST render.
    pub fn ast_cache(&self) -> &GraphCache<R::Image> {
        &self.ast_cache
    }

    /// Last committed parse tree render.
    pub fn ptree_cache(&self) -> &GraphCache<R::Image> {
        &self.ptree_cache
    }

    /// Compiles `source` and fans the result out to `consumers`.
    ///
    /// On any failure the status view is notified once with the failure
    /// message and no view is touched. A run supersedes every request still
    /// outstanding from [`CompilePipeline::begin`].
    pub fn run(
        &mut self,
        source: &str,
        mut consumers: Consumers<'_, R::Image>,
    ) -> Result<FanOutSummary, PipelineError> {
        let ticket = self.sequencer.issue(&Target::ALL);
        let span = tracing::info_span!(
            "compile",
            ticket = ticket.seq(),
            source_len = source.len()
        );
        let _guard = span.enter();
        let outcome = self.compiler.compile(source);
        self.sequencer.settle(ticket, &Target::ALL);
        self.fan_out(outcome, &mut consumers)
    }

    /// Reads the editor's current text and [runs](CompilePipeline::run) it.
    pub fn run_from_editor<E: SourceEditor + ?Sized>(
        &mut self,
        editor: &E,
        consumers: Consumers<'_, R::Image>,
    ) -> Result<FanOutSummary, PipelineError> {
        let source = editor.current_source_text();
        self.run(&source, consumers)
    }

    /// Starts a request whose compiler outcome will arrive later.
    ///
    /// Pass the returned ticket to [`CompilePipeline::complete`]. Issuing a
    /// new ticket makes every older one stale.
    pub fn begin(&mut self) -> Ticket {
        let ticket = self.sequencer.issue(&Target::ALL);
        tracing::debug!(ticket = ticket.seq(), "compile requested");
        ticket
    }

    /// Finishes a request started with [`CompilePipeline::begin`].
    ///
    /// A stale or already completed ticket is dropped without touching any
    /// view or notifying the status view.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<String, CompilerFailure>,
        mut consumers: Consumers<'_, R::Image>,
    ) -> Result<RunOutcome, PipelineError> {
        let span = tracing::info_span!("compile", ticket = ticket.seq());
        let _guard = span.enter();
        if !self.sequencer.settle(ticket, &Target::ALL) {
            tracing::debug!(
                latest = self.sequencer.latest().map(Ticket::seq),
                "stale compile result discarded"
            );
            return Ok(RunOutcome::Discarded);
        }
        self.fan_out(outcome, &mut consumers).map(RunOutcome::Applied)
    }

    fn fan_out(
        &mut self,
        outcome: Result<String, CompilerFailure>,
        consumers: &mut Consumers<'_, R::Image>,
    ) -> Result<FanOutSummary, PipelineError> {
        match self.prepare(outcome) {
            Ok((result, ast, ptree)) => Ok(self.apply(result, ast, ptree, consumers)),
            Err(err) => {
                tracing::warn!(%err, "compile failed; views left unchanged");
                consumers
                    .status
                    .notify(Status::Failure, &self.config.failure_message);
                Err(err)
            }
        }
    }

    /// Everything that can fail, with no view or cache touched.
    fn prepare(
        &mut self,
        outcome: Result<String, CompilerFailure>,
    ) -> Result<(CompileResult, Prepared<R::Image>, Prepared<R::Image>), PipelineError> {
        let raw = outcome?;
        let result = CompileResult::from_json(&raw)?;
        let ast = render_graph(&mut self.renderer, &self.ast_cache, &result.ast)
            .map_err(|source| PipelineError::Render {
                graph: GraphKind::Ast,
                source,
            })?;
        let ptree = render_graph(&mut self.renderer, &self.ptree_cache, &result.ptree)
            .map_err(|source| PipelineError::Render {
                graph: GraphKind::ParseTree,
                source,
            })?;
        Ok((result, ast, ptree))
    }

    fn apply(
        &mut self,
        result: CompileResult,
        ast: Prepared<R::Image>,
        ptree: Prepared<R::Image>,
        consumers: &mut Consumers<'_, R::Image>,
    ) -> FanOutSummary {
        replace_list(consumers.tokens, &result.tokens);
        consumers.ast.set_content(ast.image.clone());
        consumers.ptree.set_content(ptree.image.clone());
        replace_list(consumers.analysis, &result.analysis);

        if ast.rendered {
            self.ast_cache.commit(result.ast, ast.image);
        }
        if ptree.rendered {
            self.ptree_cache.commit(result.ptree, ptree.image);
        }

        let summary = FanOutSummary {
            tokens: result.tokens.len(),
            analysis: result.analysis.len(),
            ast_rendered: ast.rendered,
            ptree_rendered: ptree.rendered,
        };
        tracing::info!(?summary, "compile applied");
        consumers
            .status
            .notify(Status::Success, &self.config.success_message);
        summary
    }
}

fn render_graph<R: GraphRenderer>(
    renderer: &mut R,
    cache: &GraphCache<R::Image>,
    spec: &str,
) -> Result<Prepared<R::Image>, RenderFailure> {
    if let Some(image) = cache.lookup(spec) {
        tracing::debug!(spec_len = spec.len(), "graph unchanged; reusing render");
        return Ok(Prepared {
            image: image.clone(),
            rendered: false,
        });
    }
    Ok(Prepared {
        image: renderer.render(spec)?,
        rendered: true,
    })
}

fn replace_list(list: &mut dyn ListView, entries: &[String]) {
    list.clear();
    for entry in entries {
        list.append(entry);
    }
}
