// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Size;
use understory_chain_layout::{CollapseState, LayoutOptions, compute_layout};
use understory_relations::{BaseGraph, Item, ItemKind, ViewMode, build_base_nodes};

const SIZES: [usize; 3] = [256, 2_048, 16_384];

fn id(i: usize) -> String {
    format!("n{i}")
}

/// Rows of `len` chained frames, no cross links.
fn chains(n: usize, len: usize) -> BaseGraph {
    let items: Vec<Item> = (0..n)
        .map(|i| {
            let item = Item::new(id(i), ItemKind::Frame);
            if (i + 1) % len == 0 || i + 1 == n {
                item
            } else {
                item.with_next([id(i + 1)])
            }
        })
        .collect();
    build_base_nodes(&items, ViewMode::All)
}

/// Every frame links to a shared hub and to its successor, closing one big cycle.
fn fan_in(n: usize) -> BaseGraph {
    let items: Vec<Item> = (0..n)
        .map(|i| {
            Item::new(id(i), ItemKind::Frame)
                .with_next([id((i + 1) % n)])
                .with_children([id(0)])
        })
        .collect();
    build_base_nodes(&items, ViewMode::All)
}

/// Isolated frames only; everything lands in the grid.
fn grid(n: usize) -> BaseGraph {
    let items: Vec<Item> = (0..n).map(|i| Item::new(id(i), ItemKind::Frame)).collect();
    build_base_nodes(&items, ViewMode::All)
}

fn bench_layout(c: &mut Criterion) {
    let options = LayoutOptions::default();
    let collapse = CollapseState::new();
    let mut group = c.benchmark_group("chain_layout/compute");

    for n in SIZES {
        group.throughput(Throughput::Elements(n as u64));
        let cases = [("chains", chains(n, 8)), ("fan_in", fan_in(n)), ("grid", grid(n))];
        for (name, graph) in &cases {
            group.bench_with_input(BenchmarkId::new(*name, n), graph, |b, graph| {
                b.iter(|| {
                    black_box(compute_layout(
                        graph,
                        |_, _| Size::new(320.0, 200.0),
                        &options,
                        &collapse,
                    ))
                });
            });
        }
    }

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("relations/build_base_nodes");

    for n in SIZES {
        let items: Vec<Item> = (0..n)
            .map(|i| {
                let kind = if i % 3 == 0 {
                    ItemKind::Component
                } else {
                    ItemKind::Frame
                };
                Item::new(id(i), kind).with_next([id(i + 1), String::new()])
            })
            .collect();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("pages", n), &items, |b, items| {
            b.iter(|| black_box(build_base_nodes(items, ViewMode::Pages)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_layout, bench_build);
criterion_main!(benches);
