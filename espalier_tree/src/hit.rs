// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point queries against laid-out geometry.

use kurbo::Point;

use crate::layout::clip_is_empty;
use crate::tree::Tree;
use crate::types::{NodeFlags, NodeId, Slot};

/// Filter for [`Tree::hit_test`] candidates.
///
/// The default accepts the usual interactive surface: visible, enabled,
/// pickable nodes, cosmetic children included. Flags filter the candidate
/// node itself; an unqualified node's children are still probed, only
/// [`NodeFlags::VISIBLE`] prunes whole subtrees.
///
/// ## Usage
///
/// ```rust
/// use espalier_tree::HitFilter;
///
/// let filter = HitFilter::new().focusable();
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitFilter {
    required: NodeFlags,
    include_cosmetic: bool,
}

impl Default for HitFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl HitFilter {
    /// The standard interactive filter: visible, enabled, pickable.
    pub const fn new() -> Self {
        Self {
            required: NodeFlags::VISIBLE
                .union(NodeFlags::ENABLED)
                .union(NodeFlags::PICKABLE),
            include_cosmetic: true,
        }
    }

    /// Also require [`NodeFlags::FOCUSABLE`].
    #[must_use]
    pub const fn focusable(self) -> Self {
        self.require(NodeFlags::FOCUSABLE)
    }

    /// Require additional flags on the hit node.
    #[must_use]
    pub const fn require(mut self, flags: NodeFlags) -> Self {
        self.required = self.required.union(flags);
        self
    }

    /// Skip cosmetic children entirely.
    #[must_use]
    pub const fn logical_only(mut self) -> Self {
        self.include_cosmetic = false;
        self
    }

    /// Returns `true` if a node with `flags` passes this filter.
    pub const fn matches(&self, flags: NodeFlags) -> bool {
        flags.contains(self.required)
    }
}

impl Tree {
    /// Find the topmost node under `point` (screen space) that passes
    /// `filter`.
    ///
    /// Topmost follows paint order in reverse: later siblings beat earlier
    /// ones, logical children beat cosmetic ones, children beat their
    /// parent. Points outside a node's clip rectangle miss its whole
    /// subtree, so the result is always a node that is actually visible at
    /// that point as of the last layout pass.
    pub fn hit_test(&self, root: NodeId, point: Point, filter: &HitFilter) -> Option<NodeId> {
        if !self.is_alive(root) {
            return None;
        }
        self.hit_node(root, point, filter)
    }

    fn hit_node(&self, id: NodeId, point: Point, filter: &HitFilter) -> Option<NodeId> {
        let n = self.node(id);
        if !n.flags.contains(NodeFlags::VISIBLE) {
            return None;
        }
        if clip_is_empty(n.clip_rect) || !n.clip_rect.contains(point) {
            return None;
        }
        for &child in n.logical.as_slice().iter().rev() {
            if self.owner_of(child) != Some((id, Slot::Logical)) {
                continue;
            }
            if let Some(hit) = self.hit_node(child, point, filter) {
                return Some(hit);
            }
        }
        if filter.include_cosmetic {
            for &child in n.cosmetic.as_slice().iter().rev() {
                if self.owner_of(child) != Some((id, Slot::Cosmetic)) {
                    continue;
                }
                if let Some(hit) = self.hit_node(child, point, filter) {
                    return Some(hit);
                }
            }
        }
        filter.matches(n.flags).then_some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeDesc;
    use kurbo::{Rect, Size};

    fn laid_out(w: f64, h: f64) -> (Tree, NodeId) {
        let mut tree = Tree::new();
        let root = tree.insert(None, NodeDesc::with_bounds(Rect::new(0.0, 0.0, w, h)));
        (tree, root)
    }

    fn at(tree: &mut Tree, parent: NodeId, slot: Slot, r: Rect) -> NodeId {
        tree.insert(Some((parent, slot)), NodeDesc::with_bounds(r))
    }

    #[test]
    fn last_added_sibling_is_topmost() {
        let (mut tree, root) = laid_out(100.0, 100.0);
        let a = at(&mut tree, root, Slot::Logical, Rect::new(10.0, 10.0, 60.0, 60.0));
        let b = at(&mut tree, root, Slot::Logical, Rect::new(30.0, 30.0, 90.0, 90.0));
        tree.layout(root, Size::new(100.0, 100.0), 1.0);
        let filter = HitFilter::new();
        assert_eq!(tree.hit_test(root, Point::new(40.0, 40.0), &filter), Some(b));
        assert_eq!(tree.hit_test(root, Point::new(15.0, 15.0), &filter), Some(a));
        assert_eq!(tree.hit_test(root, Point::new(5.0, 5.0), &filter), Some(root));
    }

    #[test]
    fn children_hit_above_their_parent() {
        let (mut tree, root) = laid_out(100.0, 100.0);
        let panel = at(&mut tree, root, Slot::Logical, Rect::new(0.0, 0.0, 80.0, 80.0));
        let button = at(&mut tree, panel, Slot::Logical, Rect::new(10.0, 10.0, 30.0, 30.0));
        tree.layout(root, Size::new(100.0, 100.0), 1.0);
        let filter = HitFilter::new();
        assert_eq!(
            tree.hit_test(root, Point::new(20.0, 20.0), &filter),
            Some(button)
        );
        assert_eq!(
            tree.hit_test(root, Point::new(60.0, 60.0), &filter),
            Some(panel)
        );
    }

    #[test]
    fn logical_children_sit_above_cosmetic_ones() {
        let (mut tree, root) = laid_out(100.0, 100.0);
        let frame = at(&mut tree, root, Slot::Cosmetic, Rect::new(0.0, 0.0, 50.0, 50.0));
        let content = at(&mut tree, root, Slot::Logical, Rect::new(0.0, 0.0, 50.0, 50.0));
        tree.layout(root, Size::new(100.0, 100.0), 1.0);
        let filter = HitFilter::new();
        assert_eq!(
            tree.hit_test(root, Point::new(25.0, 25.0), &filter),
            Some(content)
        );
        let _ = frame;
    }

    #[test]
    fn logical_only_skips_cosmetic_subtrees() {
        let (mut tree, root) = laid_out(100.0, 100.0);
        let grip = at(&mut tree, root, Slot::Cosmetic, Rect::new(0.0, 0.0, 50.0, 50.0));
        tree.layout(root, Size::new(100.0, 100.0), 1.0);
        let all = HitFilter::new();
        let logical = HitFilter::new().logical_only();
        assert_eq!(tree.hit_test(root, Point::new(25.0, 25.0), &all), Some(grip));
        assert_eq!(
            tree.hit_test(root, Point::new(25.0, 25.0), &logical),
            Some(root)
        );
    }

    #[test]
    fn hidden_subtree_is_pruned() {
        let (mut tree, root) = laid_out(100.0, 100.0);
        let panel = at(&mut tree, root, Slot::Logical, Rect::new(0.0, 0.0, 80.0, 80.0));
        let child = at(&mut tree, panel, Slot::Logical, Rect::new(10.0, 10.0, 30.0, 30.0));
        tree.set_flag(panel, NodeFlags::VISIBLE, false);
        tree.layout(root, Size::new(100.0, 100.0), 1.0);
        let filter = HitFilter::new();
        assert_eq!(
            tree.hit_test(root, Point::new(20.0, 20.0), &filter),
            Some(root)
        );
        let _ = child;
    }

    #[test]
    fn disabled_node_is_skipped_but_not_its_children() {
        let (mut tree, root) = laid_out(100.0, 100.0);
        let panel = at(&mut tree, root, Slot::Logical, Rect::new(0.0, 0.0, 80.0, 80.0));
        let button = at(&mut tree, panel, Slot::Logical, Rect::new(10.0, 10.0, 30.0, 30.0));
        tree.set_flag(panel, NodeFlags::ENABLED, false);
        tree.layout(root, Size::new(100.0, 100.0), 1.0);
        let filter = HitFilter::new();
        // The panel itself no longer qualifies; the probe falls through to
        // whatever sits beneath it.
        assert_eq!(
            tree.hit_test(root, Point::new(60.0, 60.0), &filter),
            Some(root)
        );
        assert_eq!(
            tree.hit_test(root, Point::new(20.0, 20.0), &filter),
            Some(button)
        );
    }

    #[test]
    fn clipped_out_point_misses() {
        let (mut tree, root) = laid_out(100.0, 100.0);
        let panel = at(&mut tree, root, Slot::Logical, Rect::new(0.0, 0.0, 50.0, 50.0));
        // Sticks out past the panel's right edge.
        let child = at(&mut tree, panel, Slot::Logical, Rect::new(40.0, 10.0, 70.0, 30.0));
        tree.layout(root, Size::new(100.0, 100.0), 1.0);
        let filter = HitFilter::new();
        assert_eq!(
            tree.hit_test(root, Point::new(45.0, 20.0), &filter),
            Some(child)
        );
        // Past the clip the child is not visible, so not hittable.
        assert_eq!(
            tree.hit_test(root, Point::new(60.0, 20.0), &filter),
            Some(root)
        );
    }

    #[test]
    fn focusable_filter_narrows_candidates() {
        let (mut tree, root) = laid_out(100.0, 100.0);
        let label = at(&mut tree, root, Slot::Logical, Rect::new(0.0, 0.0, 50.0, 50.0));
        let mut desc = NodeDesc::with_bounds(Rect::new(0.0, 0.0, 30.0, 30.0));
        desc.flags |= NodeFlags::FOCUSABLE;
        let field = tree.insert(Some((label, Slot::Logical)), desc);
        tree.layout(root, Size::new(100.0, 100.0), 1.0);
        let filter = HitFilter::new().focusable();
        assert_eq!(
            tree.hit_test(root, Point::new(10.0, 10.0), &filter),
            Some(field)
        );
        assert_eq!(tree.hit_test(root, Point::new(40.0, 40.0), &filter), None);
    }
}
