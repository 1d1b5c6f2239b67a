// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=espalier_focus --heading-base-level=0

//! Espalier Focus: tab-order traversal primitives.
//!
//! This crate models keyboard focus cycling as a pluggable policy over a
//! snapshot of candidates:
//!
//! - **Navigation intents** ([`Navigation`]): [`Navigation::Next`] and
//!   [`Navigation::Prev`], the Tab / Shift+Tab pair.
//! - A **candidate snapshot** ([`FocusEntry`] / [`FocusSpace`]): each entry
//!   carries the node's handle, its optional explicit tab order, and whether
//!   it can currently take focus. Entries appear in tree order; candidates
//!   without an explicit order follow the indexed ones in that order.
//! - A **policy** ([`FocusPolicy`]) that picks the next focus target. The
//!   provided [`TabPolicy`] walks candidates by ascending explicit order,
//!   then tree order, wrapping at the ends.
//!
//! The types are generic over the node handle `K`, so hosts plug in their
//! own id types and build the snapshot however they walk their tree.
//!
//! ## Usage
//!
//! ```rust
//! use espalier_focus::{FocusEntry, FocusPolicy, FocusSpace, Navigation, TabPolicy};
//!
//! let entries = vec![
//!     FocusEntry { id: 10_u32, order: None, enabled: true },
//!     FocusEntry { id: 11_u32, order: Some(1), enabled: true },
//!     FocusEntry { id: 12_u32, order: None, enabled: true },
//! ];
//! let space = FocusSpace { nodes: &entries };
//! let policy = TabPolicy::default();
//!
//! // Explicit orders come first, then tree order; Tab wraps at the end.
//! assert_eq!(policy.next(None, Navigation::Next, &space), Some(11));
//! assert_eq!(policy.next(Some(11), Navigation::Next, &space), Some(10));
//! assert_eq!(policy.next(Some(12), Navigation::Next, &space), Some(11));
//! assert_eq!(policy.next(Some(11), Navigation::Prev, &space), Some(12));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::cmp::Ordering;

/// Direction of focus traversal.
///
/// The Tab / Shift+Tab pair. Policies interpret these against their own
/// ordering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Move to the next candidate in forward order.
    Next,
    /// Move to the previous candidate in backward order.
    Prev,
}

/// Wrap behavior at the ends of the traversal order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Stop at the ends; traversal past them yields no candidate.
    Never,
    /// Cycle around to the other end.
    Wrap,
}

/// A single focusable candidate within a [`FocusSpace`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusEntry<K> {
    /// Handle of the focusable node.
    pub id: K,
    /// Explicit tab order. Indexed candidates sort ascending ahead of
    /// un-indexed ones.
    pub order: Option<u32>,
    /// Whether the node can take focus right now. Disabled entries are
    /// skipped but may stay in the snapshot.
    pub enabled: bool,
}

/// A read-only snapshot of focus candidates, in tree order.
///
/// Hosts rebuild this per navigation event from whatever subtree currently
/// scopes the traversal (the active window or modal layer, typically).
#[derive(Clone, Copy, Debug)]
pub struct FocusSpace<'a, K> {
    /// The candidates, in tree order.
    pub nodes: &'a [FocusEntry<K>],
}

/// A focus traversal policy: given the current focus and an intent, pick
/// the next target from the snapshot.
pub trait FocusPolicy<K>
where
    K: Copy + Eq,
{
    /// Compute the next focus target. `origin` is the currently focused
    /// node, or `None` when nothing holds focus yet.
    fn next(&self, origin: Option<K>, direction: Navigation, space: &FocusSpace<'_, K>)
    -> Option<K>;
}

/// Tab-order traversal: ascending explicit order, then tree order.
#[derive(Copy, Clone, Debug)]
pub struct TabPolicy {
    /// Wrap behavior at the ends.
    pub wrap: WrapMode,
}

impl Default for TabPolicy {
    fn default() -> Self {
        Self {
            wrap: WrapMode::Wrap,
        }
    }
}

impl<K> FocusPolicy<K> for TabPolicy
where
    K: Copy + Eq,
{
    fn next(
        &self,
        origin: Option<K>,
        direction: Navigation,
        space: &FocusSpace<'_, K>,
    ) -> Option<K> {
        let nodes = space.nodes;
        let mut indices: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.enabled.then_some(i))
            .collect();
        if indices.is_empty() {
            return None;
        }
        // Stable: candidates with equal (or no) explicit order keep tree
        // order.
        indices.sort_by(|&ia, &ib| compare_tab_order(&nodes[ia], &nodes[ib]));

        let origin_pos =
            origin.and_then(|o| indices.iter().position(|&i| nodes[i].id == o));
        let last = indices.len() - 1;
        let target = match (direction, origin_pos) {
            (Navigation::Next, None) => Some(0),
            (Navigation::Prev, None) => Some(last),
            (Navigation::Next, Some(pos)) => {
                if pos < last {
                    Some(pos + 1)
                } else if self.wrap == WrapMode::Wrap {
                    Some(0)
                } else {
                    None
                }
            }
            (Navigation::Prev, Some(pos)) => {
                if pos > 0 {
                    Some(pos - 1)
                } else if self.wrap == WrapMode::Wrap {
                    Some(last)
                } else {
                    None
                }
            }
        };
        target.map(|pos| nodes[indices[pos]].id)
    }
}

fn compare_tab_order<K>(a: &FocusEntry<K>, b: &FocusEntry<K>) -> Ordering {
    match (a.order, b.order) {
        (Some(ao), Some(bo)) => ao.cmp(&bo),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn entry(id: u32, order: Option<u32>) -> FocusEntry<u32> {
        FocusEntry {
            id,
            order,
            enabled: true,
        }
    }

    #[test]
    fn cycles_in_tree_order_without_explicit_orders() {
        let entries = vec![entry(1, None), entry(2, None), entry(3, None)];
        let space = FocusSpace { nodes: &entries };
        let policy = TabPolicy::default();
        assert_eq!(policy.next(None, Navigation::Next, &space), Some(1));
        assert_eq!(policy.next(Some(1), Navigation::Next, &space), Some(2));
        assert_eq!(policy.next(Some(3), Navigation::Next, &space), Some(1));
        assert_eq!(policy.next(Some(1), Navigation::Prev, &space), Some(3));
    }

    #[test]
    fn explicit_orders_come_first() {
        let entries = vec![entry(1, None), entry(2, Some(2)), entry(3, Some(1))];
        let space = FocusSpace { nodes: &entries };
        let policy = TabPolicy::default();
        // Traversal order is 3, 2, 1.
        assert_eq!(policy.next(None, Navigation::Next, &space), Some(3));
        assert_eq!(policy.next(Some(3), Navigation::Next, &space), Some(2));
        assert_eq!(policy.next(Some(2), Navigation::Next, &space), Some(1));
        assert_eq!(policy.next(Some(1), Navigation::Next, &space), Some(3));
    }

    #[test]
    fn equal_orders_keep_tree_order() {
        let entries = vec![entry(5, Some(1)), entry(6, Some(1)), entry(7, Some(1))];
        let space = FocusSpace { nodes: &entries };
        let policy = TabPolicy::default();
        assert_eq!(policy.next(Some(5), Navigation::Next, &space), Some(6));
        assert_eq!(policy.next(Some(6), Navigation::Next, &space), Some(7));
    }

    #[test]
    fn disabled_candidates_are_skipped() {
        let mut entries = vec![entry(1, None), entry(2, None), entry(3, None)];
        entries[1].enabled = false;
        let space = FocusSpace { nodes: &entries };
        let policy = TabPolicy::default();
        assert_eq!(policy.next(Some(1), Navigation::Next, &space), Some(3));
    }

    #[test]
    fn never_wrap_stops_at_the_ends() {
        let entries = vec![entry(1, None), entry(2, None)];
        let space = FocusSpace { nodes: &entries };
        let policy = TabPolicy {
            wrap: WrapMode::Never,
        };
        assert_eq!(policy.next(Some(2), Navigation::Next, &space), None);
        assert_eq!(policy.next(Some(1), Navigation::Prev, &space), None);
    }

    #[test]
    fn stale_origin_restarts_from_the_edge() {
        let entries = vec![entry(1, None), entry(2, None)];
        let space = FocusSpace { nodes: &entries };
        let policy = TabPolicy::default();
        // 99 is not in the snapshot (freed, or outside the scope).
        assert_eq!(policy.next(Some(99), Navigation::Next, &space), Some(1));
        assert_eq!(policy.next(Some(99), Navigation::Prev, &space), Some(2));
    }

    #[test]
    fn empty_or_fully_disabled_space_yields_nothing() {
        let space: FocusSpace<'_, u32> = FocusSpace { nodes: &[] };
        let policy = TabPolicy::default();
        assert_eq!(policy.next(None, Navigation::Next, &space), None);

        let entries = vec![FocusEntry {
            id: 1_u32,
            order: None,
            enabled: false,
        }];
        let space = FocusSpace { nodes: &entries };
        assert_eq!(policy.next(None, Navigation::Next, &space), None);
    }
}
