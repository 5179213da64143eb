// Copyright 2025 the Parsescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use parsescope_event_state::{Modifiers, PointerInteraction};
use parsescope_surface_ref::{RefImage, RefSurface};
use parsescope_view2d::{Transform, Viewport};

fn viewport() -> Viewport<RefSurface> {
    let mut vp = Viewport::new(RefSurface::new(Size::new(1280.0, 800.0)));
    vp.set_content(RefImage::new(1, Size::new(2000.0, 1500.0)));
    vp
}

/// Deterministic pointer path around the canvas center.
fn path(steps: usize) -> Vec<Point> {
    (0..steps)
        .map(|i| {
            let t = i as f64 * 0.05;
            Point::new(640.0 + 300.0 * t.cos(), 400.0 + 200.0 * (2.0 * t).sin())
        })
        .collect()
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    let t = Transform::IDENTITY
        .translate(120.0, -40.0)
        .and_then(|t| t.scale(1.7, 1.7))
        .and_then(|t| t.rotate(0.3))
        .unwrap_or_default();

    group.bench_function("compose_chain", |b| {
        b.iter(|| {
            let r = black_box(Transform::IDENTITY)
                .translate(10.0, 20.0)
                .and_then(|t| t.scale(1.1, 1.1))
                .and_then(|t| t.translate(-10.0, -20.0));
            black_box(r.is_ok());
        });
    });
    group.bench_function("map_point_inverse", |b| {
        b.iter(|| black_box(t.map_point_inverse(black_box(Point::new(400.0, 300.0)))));
    });
    group.finish();
}

fn bench_interaction(c: &mut Criterion) {
    let mut group = c.benchmark_group("interaction");
    let moves = path(256);

    group.bench_function("wheel_zoom_256", |b| {
        b.iter_batched(
            || (viewport(), PointerInteraction::default()),
            |(mut vp, mut pointer)| {
                for (i, &pos) in moves.iter().enumerate() {
                    let delta = if i % 2 == 0 { 40.0 } else { -40.0 };
                    black_box(pointer.wheel(&mut vp, pos, delta));
                }
                vp
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("drag_256", |b| {
        b.iter_batched(
            || (viewport(), PointerInteraction::default()),
            |(mut vp, mut pointer)| {
                pointer.pointer_down(&vp, moves[0]);
                for &pos in &moves[1..] {
                    black_box(pointer.pointer_move(&mut vp, pos));
                }
                pointer.pointer_up(&mut vp, moves[moves.len() - 1], Modifiers::empty());
                vp
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("redraw", |b| {
        b.iter_batched(
            viewport,
            |mut vp| {
                vp.redraw();
                vp
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_transform, bench_interaction);
criterion_main!(benches);
