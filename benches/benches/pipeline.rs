// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::Size;
use parsescope_pipeline::{
    CompilePipeline, CompileResult, CompilerFailure, Consumers, GraphRenderer, RenderFailure,
    Status,
};
use parsescope_surface_ref::{RefImage, RefSurface};
use parsescope_view2d::Viewport;

struct CountingRenderer(u32);

impl GraphRenderer for CountingRenderer {
    type Image = RefImage;

    fn render(&mut self, _spec: &str) -> Result<RefImage, RenderFailure> {
        self.0 = self.0.wrapping_add(1);
        Ok(RefImage::new(self.0, Size::new(300.0, 200.0)))
    }
}

/// A compile result with `n` tokens and a graph of `n` nodes.
fn result_json(n: usize) -> String {
    let tokens: Vec<String> = (0..n).map(|i| format!("T{i}")).collect();
    let graph: String = (1..n).map(|i| format!("n{} -> n{i}; ", i / 2)).collect();
    compile_json(&tokens, &format!("digraph {{ {graph}}}"))
}

fn compile_json(tokens: &[String], graph: &str) -> String {
    let tokens = tokens
        .iter()
        .map(|t| format!("\"{t}\""))
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "{{\"tokens\":[{tokens}],\"ast\":\"{graph}\",\"ptree\":\"{graph}\",\"analysis\":[\"ok\"]}}"
    )
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for n in [16_usize, 1024] {
        let raw = result_json(n);
        group.bench_function(format!("decode_{n}"), |b| {
            b.iter(|| black_box(CompileResult::from_json(black_box(&raw)).is_ok()));
        });

        let compiled = raw.clone();
        let compiler = move |_: &str| -> Result<String, CompilerFailure> { Ok(compiled.clone()) };
        let mut pipeline = CompilePipeline::new(compiler, CountingRenderer(0));
        let mut tokens = Vec::<String>::new();
        let mut analysis = Vec::<String>::new();
        let mut ast = Viewport::new(RefSurface::new(Size::new(640.0, 480.0)));
        let mut ptree = Viewport::new(RefSurface::new(Size::new(640.0, 480.0)));
        let mut status = |_: Status, _: &str| {};

        // Same graph every time, so this measures the cached path.
        group.bench_function(format!("run_cached_{n}"), |b| {
            b.iter(|| {
                let r = pipeline.run(
                    "src",
                    Consumers {
                        tokens: &mut tokens,
                        ast: &mut ast,
                        ptree: &mut ptree,
                        analysis: &mut analysis,
                        status: &mut status,
                    },
                );
                black_box(r.is_ok());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
