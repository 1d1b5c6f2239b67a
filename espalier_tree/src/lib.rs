// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=espalier_tree --heading-base-level=0

//! Espalier Tree: a retained scene tree with docking, anchoring and a frame
//! pipeline.
//!
//! [`Tree`] stores nodes in a generational arena addressed by [`NodeId`]s;
//! stale ids are detected everywhere and refused, never dereferenced. Each
//! node owns two ordered child collections: *logical* children (the
//! interactive content) and *cosmetic* children (decorations such as frames,
//! grips and scrollbars). A node belongs to at most one collection at a time,
//! cycles are refused, and structural changes made while a collection is
//! being traversed are deferred until the traversal ends.
//!
//! Geometry per node is a local rectangle in the parent's content space plus
//! a dock mode, anchor edges, size limits, margin and padding. The layout
//! pass tiles docked children against a running dock area, re-derives
//! anchored children from their captured frames, and computes screen and
//! clip rectangles top-down.
//!
//! A frame is four passes: [`Tree::update`] (fades, timers, effective
//! opacity, host hooks), [`Tree::layout`], [`Tree::late_update`] (hooks that
//! need final rectangles) and [`Tree::display_list`] (flatten to paint
//! order). Hit-testing with [`Tree::hit_test`] walks paint order in reverse,
//! so the topmost node on screen wins.
//!
//! ## Usage
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use espalier_tree::{Dock, HitFilter, NodeDesc, Slot, Tree};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(None, NodeDesc::with_bounds(Rect::new(0.0, 0.0, 640.0, 480.0)));
//! let toolbar = tree.insert(
//!     Some((root, Slot::Logical)),
//!     NodeDesc::docked(Dock::Top, Size::new(0.0, 32.0)),
//! );
//! let content = tree.insert(
//!     Some((root, Slot::Logical)),
//!     NodeDesc::docked(Dock::Fill, Size::ZERO),
//! );
//!
//! tree.layout(root, Size::new(640.0, 480.0), 1.0);
//! assert_eq!(tree.screen_rect(toolbar), Some(Rect::new(0.0, 0.0, 640.0, 32.0)));
//! assert_eq!(tree.screen_rect(content), Some(Rect::new(0.0, 32.0, 640.0, 480.0)));
//!
//! let hit = tree.hit_test(root, Point::new(10.0, 10.0), &HitFilter::new());
//! assert_eq!(hit, Some(toolbar));
//! ```
//!
//! Structural changes during traversal are the normal case for UI code
//! (handlers open windows, close menus, reparent rows); see
//! [`espalier_collection`] for the deferral rules and
//! [`Tree::take_structure_log`] for observing commits.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod draw;
mod hit;
mod layout;
mod pipeline;
mod tree;
mod types;

pub use espalier_collection::Change;
pub use espalier_event_state::interaction::InteractionState;

pub use draw::{DisplayItem, DrawEnv};
pub use hit::HitFilter;
pub use pipeline::{NodeHook, UpdateEnv};
pub use tree::{StructureChange, StructureEvent, StructureGuard, StructureOp, Tree, Verdict};
pub use types::{Anchors, AutoSize, Dock, NodeDesc, NodeFlags, NodeId, Slot};
