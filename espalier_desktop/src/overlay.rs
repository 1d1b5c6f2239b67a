// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Modal and dropdown bookkeeping.
//!
//! Both stacks hold plain node ids; the desktop decides what pushing and
//! popping mean for the tree (reparenting, detaching, routing restrictions).

use espalier_tree::{NodeId, Tree};
use smallvec::SmallVec;

/// Ordered modal windows; the topmost one restricts click dispatch.
#[derive(Clone, Debug, Default)]
pub(crate) struct ModalStack {
    entries: SmallVec<[NodeId; 2]>,
}

impl ModalStack {
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The modal currently holding the lock.
    pub(crate) fn top(&self) -> Option<NodeId> {
        self.entries.last().copied()
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.entries.contains(&id)
    }

    /// Push a modal; refused if it is already registered.
    pub(crate) fn push(&mut self, id: NodeId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.entries.push(id);
        true
    }

    pub(crate) fn pop(&mut self) -> Option<NodeId> {
        self.entries.pop()
    }

    /// Remove a modal from anywhere in the stack.
    pub(crate) fn remove(&mut self, id: NodeId) -> bool {
        match self.entries.iter().position(|&m| m == id) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Drop entries that died or left the routable tree.
    pub(crate) fn prune(&mut self, tree: &Tree, root: NodeId) {
        self.entries
            .retain(|&mut m| tree.is_alive(m) && tree.is_attached_under(root, m));
    }
}

/// One open dropdown: the overlay node and the node that opened it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DropdownEntry {
    /// The overlay node, reparented under the desktop root while open.
    pub(crate) node: NodeId,
    /// The node the overlay cascades from; ownership decides which entries
    /// survive a stacked open and what a modal's reach covers.
    pub(crate) owner: NodeId,
}

/// Open dropdowns, bottom to top.
#[derive(Clone, Debug, Default)]
pub(crate) struct DropdownStack {
    entries: SmallVec<[DropdownEntry; 4]>,
}

impl DropdownStack {
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &DropdownEntry> {
        self.entries.iter()
    }

    pub(crate) fn top(&self) -> Option<&DropdownEntry> {
        self.entries.last()
    }

    pub(crate) fn push(&mut self, node: NodeId, owner: NodeId) {
        self.entries.push(DropdownEntry { node, owner });
    }

    pub(crate) fn pop(&mut self) -> Option<DropdownEntry> {
        self.entries.pop()
    }

    pub(crate) fn contains_node(&self, node: NodeId) -> bool {
        self.entries.iter().any(|e| e.node == node)
    }

    /// Drop entries whose overlay died or left the routable tree.
    pub(crate) fn prune(&mut self, tree: &Tree, root: NodeId) {
        self.entries
            .retain(|e| tree.is_alive(e.node) && tree.is_attached_under(root, e.node));
    }
}
