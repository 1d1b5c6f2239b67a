// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw preparation: flattening the tree into paint-ordered items.

use alloc::vec::Vec;

use espalier_event_state::interaction::InteractionState;

use crate::layout::clip_is_empty;
use crate::tree::Tree;
use crate::types::{NodeFlags, NodeId, Slot};

/// Pointer and focus inputs to [`Tree::display_list`], mirroring the ones
/// the update pass saw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawEnv {
    /// Node currently under the pointer, if any.
    pub hot: Option<NodeId>,
    /// Node currently held by a pointer button, if any.
    pub pressed: Option<NodeId>,
    /// Node currently owning keyboard focus, if any.
    pub focused: Option<NodeId>,
}

/// One renderable node, in paint order.
///
/// Everything a renderer needs to draw the node is carried here; the
/// renderer never walks the tree itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayItem<'t> {
    /// The node this item was emitted for.
    pub node: NodeId,
    /// Screen-space rectangle.
    pub rect: kurbo::Rect,
    /// Screen-space clip; never empty.
    pub clip: kurbo::Rect,
    /// Effective opacity as of the last update pass.
    pub opacity: f64,
    /// The node's style key.
    pub style: Option<&'t str>,
    /// Resolved interaction state.
    pub state: InteractionState,
}

impl Tree {
    /// Flatten the subtree rooted at `root` into paint order: each node
    /// before its children, cosmetic children before logical ones, siblings
    /// in collection order so later ones paint on top. Hidden nodes and
    /// empty clips prune their whole subtree.
    ///
    /// Hit-testing walks the exact reverse of this order, so what reads as
    /// topmost on screen is also what the pointer reaches first.
    pub fn display_list(&self, root: NodeId, env: &DrawEnv) -> Vec<DisplayItem<'_>> {
        let mut out = Vec::new();
        if self.is_alive(root) {
            self.draw_node(root, env, &mut out);
        }
        out
    }

    fn draw_node<'t>(&'t self, id: NodeId, env: &DrawEnv, out: &mut Vec<DisplayItem<'t>>) {
        let n = self.node(id);
        if !n.flags.contains(NodeFlags::VISIBLE) {
            return;
        }
        if clip_is_empty(n.clip_rect) {
            return;
        }
        let state = self
            .interaction_state(
                id,
                env.hot == Some(id),
                env.pressed == Some(id),
                env.focused == Some(id),
            )
            .unwrap_or_default();
        out.push(DisplayItem {
            node: id,
            rect: n.screen_rect,
            clip: n.clip_rect,
            opacity: n.effective_opacity,
            style: n.style.as_deref(),
            state,
        });
        for &child in n.cosmetic.as_slice() {
            if self.owner_of(child) == Some((id, Slot::Cosmetic)) {
                self.draw_node(child, env, out);
            }
        }
        for &child in n.logical.as_slice() {
            if self.owner_of(child) == Some((id, Slot::Logical)) {
                self.draw_node(child, env, out);
            }
        }
    }
}
