// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Vec2};
use understory_board::{Board, Item, ItemKind, LayoutOptions};

fn board(n: usize) -> Board {
    let mut board = Board::new(Rect::ZERO);
    board.set_layout_options(LayoutOptions {
        grid_columns: 64,
        ..LayoutOptions::default()
    });
    board.set_items((0..n).map(|i| Item::new(format!("n{i}"), ItemKind::Frame)));
    board.commit();
    board
}

fn bench_visible(c: &mut Criterion) {
    let container = Rect::new(0.0, 0.0, 1920.0, 1080.0);
    let mut group = c.benchmark_group("board/visible");

    for n in [1_024usize, 16_384] {
        group.throughput(Throughput::Elements(n as u64));

        let mut near = board(n);
        group.bench_function(BenchmarkId::new("zoomed_in", n), |b| {
            b.iter(|| black_box(near.visible(container).count()));
        });

        let mut far = board(n);
        far.view_mut().set_transform(0.05, 0.0, 0.0);
        group.bench_function(BenchmarkId::new("zoomed_out", n), |b| {
            b.iter(|| black_box(far.visible(container).count()));
        });

        let mut panning = board(n);
        group.bench_function(BenchmarkId::new("panning", n), |b| {
            b.iter(|| {
                panning.view_mut().pan_by(Vec2::new(-7.0, -3.0));
                black_box(panning.visible(container).count())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_visible);
criterion_main!(benches);
