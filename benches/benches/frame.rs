// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for the Espalier frame pipeline.
//!
//! The scene is a deterministic synthetic desktop shaped like a small
//! widget gallery: overlapping windows, each with a docked title bar, a
//! fill-docked body and a grid of buttons. Numbers here track the
//! per-frame passes a host pays every render tick.

use core::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use espalier_desktop::{ButtonState, Desktop, EventReply, FrameInput, PointerButton};
use espalier_tree::{Dock, DrawEnv, NodeDesc, NodeFlags, NodeId, Slot, Tree, UpdateEnv};
use kurbo::{Point, Rect, Size};

const DESKTOP: Size = Size::new(1280.0, 800.0);
const WINDOWS: usize = 8;
const ROWS: usize = 6;
const COLS: usize = 8;

/// Build the gallery scene and lay it out once.
fn build_scene() -> (Tree, NodeId, Vec<NodeId>) {
    let mut tree = Tree::new();
    let root = tree.insert(
        None,
        NodeDesc::with_bounds(Rect::from_origin_size(Point::ZERO, DESKTOP)),
    );
    let mut ids = Vec::new();

    for w in 0..WINDOWS {
        let x = 16.0 + 40.0 * w as f64;
        let y = 16.0 + 30.0 * w as f64;
        let window = tree.insert(
            Some((root, Slot::Logical)),
            NodeDesc::with_bounds(Rect::new(x, y, x + 520.0, y + 380.0)),
        );
        tree.set_flag(window, NodeFlags::WINDOW, true);
        ids.push(window);

        let title = tree.insert(
            Some((window, Slot::Cosmetic)),
            NodeDesc::docked(Dock::Top, Size::new(0.0, 28.0)),
        );
        ids.push(title);
        let body = tree.insert(
            Some((window, Slot::Logical)),
            NodeDesc::docked(Dock::Fill, Size::ZERO),
        );
        ids.push(body);

        for row in 0..ROWS {
            for col in 0..COLS {
                let bx = 8.0 + 62.0 * col as f64;
                let by = 8.0 + 56.0 * row as f64;
                let button = tree.insert(
                    Some((body, Slot::Logical)),
                    NodeDesc::with_bounds(Rect::new(bx, by, bx + 56.0, by + 48.0)),
                );
                tree.set_flag(button, NodeFlags::FOCUSABLE, true);
                ids.push(button);
            }
        }
    }

    tree.layout(root, DESKTOP, 1.0);
    (tree, root, ids)
}

fn build_desktop() -> Desktop {
    let mut desktop = Desktop::new(DESKTOP);
    let root = desktop.root();
    for w in 0..WINDOWS {
        let x = 16.0 + 40.0 * w as f64;
        let y = 16.0 + 30.0 * w as f64;
        let tree = desktop.tree_mut();
        let window = tree.insert(
            Some((root, Slot::Logical)),
            NodeDesc::with_bounds(Rect::new(x, y, x + 520.0, y + 380.0)),
        );
        tree.set_flag(window, NodeFlags::WINDOW, true);
        let body = tree.insert(
            Some((window, Slot::Logical)),
            NodeDesc::docked(Dock::Fill, Size::ZERO),
        );
        for row in 0..ROWS {
            for col in 0..COLS {
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
    desktop.frame(&FrameInput::new(16), &mut |_, _| EventReply::IGNORED);
    desktop
}

fn frame(c: &mut Criterion) {
    let mut g = c.benchmark_group("frame");
    g.warm_up_time(Duration::from_secs(1));
    g.measurement_time(Duration::from_secs(3));

    {
        let (mut tree, root, _ids) = build_scene();
        g.bench_function("update_pass", |b| {
            b.iter(|| {
                let mut hook = |_: &mut Tree, _: NodeId| {};
                tree.update(black_box(root), &UpdateEnv::new(16), &mut hook);
                black_box(tree.take_fired_timers())
            });
        });
    }

    {
        let (mut tree, root, _ids) = build_scene();
        g.bench_function("layout_steady", |b| {
            b.iter(|| {
                tree.layout(black_box(root), DESKTOP, 1.0);
            });
        });
    }

    {
        let (mut tree, root, ids) = build_scene();
        let moved = ids[ids.len() / 2];
        let mut toggle = false;
        g.bench_function("layout_one_moved", |b| {
            b.iter(|| {
                toggle = !toggle;
                let nudge = if toggle { 8.0 } else { 8.5 };
                tree.set_position(moved, Point::new(nudge, 8.0));
                tree.layout(black_box(root), DESKTOP, 1.0);
            });
        });
    }

    {
        let (tree, root, _ids) = build_scene();
        let env = DrawEnv::default();
        g.bench_function("display_list", |b| {
            b.iter(|| black_box(tree.display_list(black_box(root), &env)).len());
        });
    }

    g.finish();
}

fn desktop(c: &mut Criterion) {
    let mut g = c.benchmark_group("desktop");
    g.warm_up_time(Duration::from_secs(1));
    g.measurement_time(Duration::from_secs(3));

    {
        let mut desktop = build_desktop();
        // A pointer sweep across the gallery: hot tracking, hover events
        // and all four passes every frame.
        let inputs: Vec<FrameInput> = (0..32)
            .map(|i| {
                let t = i as f64 / 31.0;
                FrameInput::new(16)
                    .with_pointer(Point::new(40.0 + 1100.0 * t, 30.0 + 700.0 * t))
            })
            .collect();
        g.bench_function("frame_pointer_sweep", |b| {
            b.iter(|| {
                for input in &inputs {
                    desktop.frame(black_box(input), &mut |_, _| EventReply::IGNORED);
                }
            });
        });
    }

    {
        let mut desktop = build_desktop();
        let at = Point::new(60.0, 70.0);
        let down = FrameInput::new(16)
            .with_pointer(at)
            .with_button(PointerButton::Primary, ButtonState::Pressed);
        let up = FrameInput::new(16)
            .with_pointer(at)
            .with_button(PointerButton::Primary, ButtonState::Released);
        g.bench_function("frame_click_cycle", |b| {
            b.iter(|| {
                desktop.frame(black_box(&down), &mut |_, _| EventReply::IGNORED);
                desktop.frame(black_box(&up), &mut |_, _| EventReply::IGNORED);
            });
        });
    }

    g.finish();
}

criterion_group!(benches, frame, desktop);
criterion_main!(benches);
