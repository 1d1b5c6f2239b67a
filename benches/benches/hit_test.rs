// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for Espalier hit-testing.
//!
//! Hit-testing walks paint order in reverse, so the interesting cases are
//! points over deep button grids (early accept near the top of the walk)
//! and points over bare desktop (full rejection scan).

use core::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use espalier_tree::{Dock, HitFilter, NodeDesc, NodeFlags, NodeId, Slot, Tree};
use kurbo::{Point, Rect, Size};

const DESKTOP: Size = Size::new(1280.0, 800.0);

fn build_scene() -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let root = tree.insert(
        None,
        NodeDesc::with_bounds(Rect::from_origin_size(Point::ZERO, DESKTOP)),
    );

    for w in 0..8 {
        let x = 16.0 + 40.0 * w as f64;
        let y = 16.0 + 30.0 * w as f64;
        let window = tree.insert(
            Some((root, Slot::Logical)),
            NodeDesc::with_bounds(Rect::new(x, y, x + 520.0, y + 380.0)),
        );
        tree.set_flag(window, NodeFlags::WINDOW, true);
        tree.insert(
            Some((window, Slot::Cosmetic)),
            NodeDesc::docked(Dock::Top, Size::new(0.0, 28.0)),
        );
        let body = tree.insert(
            Some((window, Slot::Logical)),
            NodeDesc::docked(Dock::Fill, Size::ZERO),
        );
        for row in 0..6 {
            for col in 0..8 {
                let bx = 8.0 + 62.0 * col as f64;
                let by = 8.0 + 56.0 * row as f64;
                let button = tree.insert(
                    Some((body, Slot::Logical)),
                    NodeDesc::with_bounds(Rect::new(bx, by, bx + 56.0, by + 48.0)),
                );
                tree.set_flag(button, NodeFlags::FOCUSABLE, true);
            }
        }
    }

    tree.layout(root, DESKTOP, 1.0);
    (tree, root)
}

/// A deterministic grid of probe points covering the whole desktop,
/// windows and bare background alike.
fn points() -> Vec<Point> {
    let mut pts = Vec::new();
    for ix in 0..24 {
        for iy in 0..16 {
            pts.push(Point::new(
                DESKTOP.width * (ix as f64 + 0.5) / 24.0,
                DESKTOP.height * (iy as f64 + 0.5) / 16.0,
            ));
        }
    }
    pts
}

fn hit_test(c: &mut Criterion) {
    let mut g = c.benchmark_group("hit_test");
    g.warm_up_time(Duration::from_secs(1));
    g.measurement_time(Duration::from_secs(3));

    let (tree, root) = build_scene();
    let pts = points();

    let interactive = HitFilter::new();
    g.bench_function("point_sweep", |b| {
        b.iter(|| {
            for &p in &pts {
                black_box(tree.hit_test(root, black_box(p), &interactive));
            }
        });
    });

    let focusable = HitFilter::new().focusable();
    g.bench_function("point_sweep_focusable", |b| {
        b.iter(|| {
            for &p in &pts {
                black_box(tree.hit_test(root, black_box(p), &focusable));
            }
        });
    });

    // Worst case: a point no window covers rejects every subtree.
    let miss = Point::new(DESKTOP.width - 2.0, 2.0);
    g.bench_function("point_miss", |b| {
        b.iter(|| black_box(tree.hit_test(root, black_box(miss), &interactive)));
    });

    g.finish();
}

criterion_group!(benches, hit_test);
criterion_main!(benches);
