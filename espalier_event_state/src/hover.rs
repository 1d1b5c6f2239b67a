// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Enter/leave transitions from root→target paths.
//!
//! Feed the current root→target path on every pointer move; the state diffs
//! it against the previous path and produces the transitions: leaves for the
//! abandoned suffix (innermost first), then enters for the new suffix
//! (outermost first). Elements on the shared prefix see nothing.

use alloc::vec::Vec;

/// An enter or leave transition for one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// The pointer path now includes this element.
    Enter(K),
    /// The pointer path no longer includes this element.
    Leave(K),
}

/// Tracks the hovered path and emits transitions on change.
#[derive(Clone, Debug, Default)]
pub struct HoverState<K> {
    path: Vec<K>,
}

impl<K: PartialEq + Clone> HoverState<K> {
    /// Create an empty hover state (nothing hovered).
    pub const fn new() -> Self {
        Self { path: Vec::new() }
    }

    /// Replace the hovered path, returning the transitions.
    ///
    /// `path` runs root→target. Leaves are emitted innermost-first, then
    /// enters outermost-first, so handlers always see a consistent nesting
    /// order.
    pub fn update_path(&mut self, path: &[K]) -> Vec<HoverEvent<K>> {
        let shared = self
            .path
            .iter()
            .zip(path.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut events = Vec::with_capacity((self.path.len() - shared) + (path.len() - shared));
        for left in self.path[shared..].iter().rev() {
            events.push(HoverEvent::Leave(left.clone()));
        }
        for entered in &path[shared..] {
            events.push(HoverEvent::Enter(entered.clone()));
        }

        self.path.clear();
        self.path.extend_from_slice(path);
        events
    }

    /// Leave everything; equivalent to `update_path(&[])`.
    pub fn clear(&mut self) -> Vec<HoverEvent<K>> {
        self.update_path(&[])
    }

    /// The current root→target path.
    pub fn current(&self) -> &[K] {
        &self.path
    }

    /// The innermost hovered element, if any.
    pub fn hovered(&self) -> Option<&K> {
        self.path.last()
    }
}
