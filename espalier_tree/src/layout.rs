// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout pass: docking, anchoring, clipping, self-sizing.

use alloc::vec::Vec;
use kurbo::{Point, Rect, Size};

use crate::tree::Tree;
use crate::types::{Anchors, AutoSize, Dock, NodeFlags, NodeId, Slot, clamp_size};

/// Multiply a local rectangle into screen space.
pub(crate) fn scaled(r: Rect, scale: f64) -> Rect {
    Rect::new(r.x0 * scale, r.y0 * scale, r.x1 * scale, r.y1 * scale)
}

/// Intersect a screen rectangle with the parent clip; disjoint rectangles
/// collapse to the canonical empty clip.
pub(crate) fn intersect_clip(screen: Rect, parent: Rect) -> Rect {
    let c = screen.intersect(parent);
    if clip_is_empty(c) { Rect::ZERO } else { c }
}

/// Returns `true` for clips with no area; such subtrees are pruned from
/// hit-testing and draw-prep.
pub(crate) fn clip_is_empty(clip: Rect) -> bool {
    clip.width() <= 0.0 || clip.height() <= 0.0
}

impl Tree {
    /// Run the layout pass over the subtree rooted at `root`.
    ///
    /// `size` is the root's local size (clamped to its limits) and `scale`
    /// multiplies local geometry into screen space. Each node is placed by
    /// its dock mode against the parent's running dock area, or by its
    /// captured anchors against the parent's current content size; screen
    /// and clip rectangles are stored as the walk descends.
    ///
    /// Layout runs no host hooks, so it iterates child snapshots without
    /// taking collection locks.
    pub fn layout(&mut self, root: NodeId, size: Size, scale: f64) {
        let Some(n) = self.node_opt_mut(root) else {
            return;
        };
        n.size = clamp_size(size, n.min_size, n.max_size);
        let abs = Rect::from_origin_size(n.origin, n.size);
        let screen = scaled(abs, scale);
        n.screen_rect = screen;
        n.clip_rect = screen;
        self.layout_children(root, abs, screen, scale);
    }

    fn layout_children(&mut self, parent: NodeId, parent_abs: Rect, parent_clip: Rect, scale: f64) {
        let padding = self.node(parent).padding;
        let content = Rect::new(
            parent_abs.x0 + padding.x0,
            parent_abs.y0 + padding.y0,
            (parent_abs.x1 - padding.x1).max(parent_abs.x0 + padding.x0),
            (parent_abs.y1 - padding.y1).max(parent_abs.y0 + padding.y0),
        );
        // Each collection tiles its own dock area over the same content box,
        // cosmetic children first.
        for slot in [Slot::Cosmetic, Slot::Logical] {
            let mut area = content;
            let kids: Vec<NodeId> = self.node(parent).collection(slot).as_slice().to_vec();
            for child in kids {
                if self.owner_of(child) != Some((parent, slot)) {
                    continue;
                }
                let abs = self.place_child(child, content, &mut area);
                let screen = scaled(abs, scale);
                let clip = intersect_clip(screen, parent_clip);
                {
                    let n = self.node_mut(child);
                    n.screen_rect = screen;
                    n.clip_rect = clip;
                }
                self.layout_children(child, abs, clip, scale);
                self.autosize(child, parent_clip, scale);
            }
        }
    }

    /// Place one child, consuming dock area for the edge modes. Returns the
    /// absolute rectangle; local origin and size are stored on the node.
    fn place_child(&mut self, child: NodeId, content: Rect, area: &mut Rect) -> Rect {
        let (dock, size, m, min_size, max_size, origin) = {
            let n = self.node(child);
            (n.dock, n.size, n.margin, n.min_size, n.max_size, n.origin)
        };
        let (w, h) = (size.width, size.height);
        let rect = match dock {
            Dock::None => return self.place_anchored(child, content),
            Dock::Left => {
                let x0 = area.x0 + m.x0;
                let y0 = area.y0 + m.y0;
                let r = Rect::new(x0, y0, x0 + w, (area.y1 - m.y1).max(y0));
                area.x0 = (r.x1 + m.x1).min(area.x1);
                r
            }
            Dock::Right => {
                let x1 = area.x1 - m.x1;
                let y0 = area.y0 + m.y0;
                let r = Rect::new(x1 - w, y0, x1, (area.y1 - m.y1).max(y0));
                area.x1 = (r.x0 - m.x0).max(area.x0);
                r
            }
            Dock::Top => {
                let x0 = area.x0 + m.x0;
                let y0 = area.y0 + m.y0;
                let r = Rect::new(x0, y0, (area.x1 - m.x1).max(x0), y0 + h);
                area.y0 = (r.y1 + m.y1).min(area.y1);
                r
            }
            Dock::Bottom => {
                let x0 = area.x0 + m.x0;
                let y1 = area.y1 - m.y1;
                let r = Rect::new(x0, y1 - h, (area.x1 - m.x1).max(x0), y1);
                area.y1 = (r.y0 - m.y0).max(area.y0);
                r
            }
            Dock::Fill => {
                let x0 = area.x0 + m.x0;
                let y0 = area.y0 + m.y0;
                Rect::new(x0, y0, (area.x1 - m.x1).max(x0), (area.y1 - m.y1).max(y0))
            }
            Dock::FillX => {
                let x0 = area.x0 + m.x0;
                let y0 = content.y0 + origin.y;
                Rect::new(x0, y0, (area.x1 - m.x1).max(x0), y0 + h)
            }
            Dock::FillY => {
                let x0 = content.x0 + origin.x;
                let y0 = area.y0 + m.y0;
                Rect::new(x0, y0, x0 + w, (area.y1 - m.y1).max(y0))
            }
            Dock::Center => {
                let x0 = area.x0 + (area.width() - w) / 2.0;
                let y0 = area.y0 + (area.height() - h) / 2.0;
                Rect::new(x0, y0, x0 + w, y0 + h)
            }
            Dock::CenterX => {
                let x0 = area.x0 + (area.width() - w) / 2.0;
                let y0 = content.y0 + origin.y;
                Rect::new(x0, y0, x0 + w, y0 + h)
            }
            Dock::CenterY => {
                let x0 = content.x0 + origin.x;
                let y0 = area.y0 + (area.height() - h) / 2.0;
                Rect::new(x0, y0, x0 + w, y0 + h)
            }
        };
        // Clamp the imposed extent, keeping the docked edge in place.
        let size = clamp_size(rect.size(), min_size, max_size);
        let rect = match dock {
            Dock::Right => Rect::new(rect.x1 - size.width, rect.y0, rect.x1, rect.y0 + size.height),
            Dock::Bottom => {
                Rect::new(rect.x0, rect.y1 - size.height, rect.x0 + size.width, rect.y1)
            }
            _ => Rect::from_origin_size(rect.origin(), size),
        };
        let n = self.node_mut(child);
        n.origin = Point::new(rect.x0 - content.x0, rect.y0 - content.y0);
        n.size = rect.size();
        rect
    }

    /// Place an undocked child from its captured anchor frame: edges
    /// anchored to a parent side keep their distance to that side as the
    /// parent resizes, un-anchored edges keep the captured extent.
    fn place_anchored(&mut self, child: NodeId, content: Rect) -> Rect {
        let (frame, captured, a, min_size, max_size) = {
            let n = self.node(child);
            (
                n.anchor_frame,
                n.anchor_parent,
                n.anchors,
                n.min_size,
                n.max_size,
            )
        };
        let (cw, ch) = (content.width(), content.height());
        let right_gap = captured.width - frame.x1;
        let bottom_gap = captured.height - frame.y1;

        let (x0, x1) = if a.contains(Anchors::LEFT) && a.contains(Anchors::RIGHT) {
            (frame.x0, (cw - right_gap).max(frame.x0))
        } else if a.contains(Anchors::RIGHT) {
            (cw - right_gap - frame.width(), cw - right_gap)
        } else {
            (frame.x0, frame.x0 + frame.width())
        };
        let (y0, y1) = if a.contains(Anchors::TOP) && a.contains(Anchors::BOTTOM) {
            (frame.y0, (ch - bottom_gap).max(frame.y0))
        } else if a.contains(Anchors::BOTTOM) {
            (ch - bottom_gap - frame.height(), ch - bottom_gap)
        } else {
            (frame.y0, frame.y0 + frame.height())
        };

        let size = clamp_size(Size::new(x1 - x0, y1 - y0), min_size, max_size);
        // Clamping holds the anchored edge; left/top win when both are.
        let x0 = if a.contains(Anchors::RIGHT) && !a.contains(Anchors::LEFT) {
            x1 - size.width
        } else {
            x0
        };
        let y0 = if a.contains(Anchors::BOTTOM) && !a.contains(Anchors::TOP) {
            y1 - size.height
        } else {
            y0
        };

        let n = self.node_mut(child);
        n.origin = Point::new(x0, y0);
        n.size = size;
        Rect::from_origin_size(Point::new(content.x0 + x0, content.y0 + y0), size)
    }

    /// Shrink-wrap `id` around its laid-out children per its auto-size mask:
    /// logical children for containers, cosmetic otherwise. Hidden children
    /// do not hold the box open. Runs after the node's subtree is laid out;
    /// positions settle on the following frame.
    fn autosize(&mut self, id: NodeId, parent_clip: Rect, scale: f64) {
        let (mask, measured) = {
            let n = self.node(id);
            let slot = if n.flags.contains(NodeFlags::CONTAINER) {
                Slot::Logical
            } else {
                Slot::Cosmetic
            };
            (n.auto_size, slot)
        };
        if mask.is_empty() {
            return;
        }
        let kids: Vec<NodeId> = self.node(id).collection(measured).as_slice().to_vec();
        let mut extent = Size::ZERO;
        for child in kids {
            if self.owner_of(child) != Some((id, measured)) {
                continue;
            }
            let n = self.node(child);
            if !n.flags.contains(NodeFlags::VISIBLE) {
                continue;
            }
            extent.width = extent.width.max(n.origin.x + n.size.width + n.margin.x1);
            extent.height = extent.height.max(n.origin.y + n.size.height + n.margin.y1);
        }
        let (padding, mut size, min_size, max_size) = {
            let n = self.node(id);
            (n.padding, n.size, n.min_size, n.max_size)
        };
        if mask.contains(AutoSize::HORIZONTAL) {
            size.width = padding.x0 + extent.width + padding.x1;
        }
        if mask.contains(AutoSize::VERTICAL) {
            size.height = padding.y0 + extent.height + padding.y1;
        }
        let size = clamp_size(size, min_size, max_size);
        if size == self.node(id).size {
            return;
        }
        let n = self.node_mut(id);
        n.size = size;
        n.screen_rect = Rect::from_origin_size(n.screen_rect.origin(), size * scale);
        n.clip_rect = intersect_clip(n.screen_rect, parent_clip);
        self.recapture_anchor(id);
    }

    /// Resize `id`, growing away from its anchored edges: a right-anchored
    /// node keeps its right edge in place, a bottom-anchored node its bottom
    /// edge. The size is clamped to the node's limits and the anchor frame
    /// is re-captured.
    pub fn resize_to(&mut self, id: NodeId, size: Size) -> bool {
        let Some(n) = self.node_opt_mut(id) else {
            return false;
        };
        let new = clamp_size(size, n.min_size, n.max_size);
        if n.anchors.contains(Anchors::RIGHT) && !n.anchors.contains(Anchors::LEFT) {
            n.origin.x -= new.width - n.size.width;
        }
        if n.anchors.contains(Anchors::BOTTOM) && !n.anchors.contains(Anchors::TOP) {
            n.origin.y -= new.height - n.size.height;
        }
        n.size = new;
        self.recapture_anchor(id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeDesc;

    fn root_tree(w: f64, h: f64) -> (Tree, NodeId) {
        let mut tree = Tree::new();
        let root = tree.insert(None, NodeDesc::with_bounds(Rect::new(0.0, 0.0, w, h)));
        (tree, root)
    }

    #[test]
    fn dock_left_then_fill_tiles_remainder() {
        let (mut tree, root) = root_tree(200.0, 100.0);
        let a = tree.insert(
            Some((root, Slot::Logical)),
            NodeDesc::docked(Dock::Left, Size::new(50.0, 0.0)),
        );
        let b = tree.insert(
            Some((root, Slot::Logical)),
            NodeDesc::docked(Dock::Fill, Size::ZERO),
        );
        tree.layout(root, Size::new(200.0, 100.0), 1.0);
        assert_eq!(tree.screen_rect(a), Some(Rect::new(0.0, 0.0, 50.0, 100.0)));
        assert_eq!(
            tree.screen_rect(b),
            Some(Rect::new(50.0, 0.0, 200.0, 100.0))
        );
    }

    #[test]
    fn dock_right_and_bottom_tile_from_far_edges() {
        let (mut tree, root) = root_tree(200.0, 100.0);
        let right = tree.insert(
            Some((root, Slot::Logical)),
            NodeDesc::docked(Dock::Right, Size::new(40.0, 0.0)),
        );
        let bottom = tree.insert(
            Some((root, Slot::Logical)),
            NodeDesc::docked(Dock::Bottom, Size::new(0.0, 20.0)),
        );
        tree.layout(root, Size::new(200.0, 100.0), 1.0);
        assert_eq!(
            tree.screen_rect(right),
            Some(Rect::new(160.0, 0.0, 200.0, 100.0))
        );
        // The bottom bar tiles against what the right panel left over.
        assert_eq!(
            tree.screen_rect(bottom),
            Some(Rect::new(0.0, 80.0, 160.0, 100.0))
        );
    }

    #[test]
    fn dock_margins_consume_area() {
        let (mut tree, root) = root_tree(200.0, 100.0);
        let mut desc = NodeDesc::docked(Dock::Left, Size::new(50.0, 0.0));
        desc.margin = kurbo::Insets::new(5.0, 0.0, 5.0, 0.0);
        let a = tree.insert(Some((root, Slot::Logical)), desc);
        let b = tree.insert(
            Some((root, Slot::Logical)),
            NodeDesc::docked(Dock::Fill, Size::ZERO),
        );
        tree.layout(root, Size::new(200.0, 100.0), 1.0);
        assert_eq!(tree.screen_rect(a), Some(Rect::new(5.0, 0.0, 55.0, 100.0)));
        assert_eq!(
            tree.screen_rect(b),
            Some(Rect::new(60.0, 0.0, 200.0, 100.0))
        );
    }

    #[test]
    fn cosmetic_and_logical_dock_areas_are_independent() {
        let (mut tree, root) = root_tree(200.0, 100.0);
        let grip = tree.insert(
            Some((root, Slot::Cosmetic)),
            NodeDesc::docked(Dock::Left, Size::new(30.0, 0.0)),
        );
        let panel = tree.insert(
            Some((root, Slot::Logical)),
            NodeDesc::docked(Dock::Left, Size::new(50.0, 0.0)),
        );
        tree.layout(root, Size::new(200.0, 100.0), 1.0);
        // Both tile from the same content edge; neither consumes the other's
        // area.
        assert_eq!(
            tree.screen_rect(grip),
            Some(Rect::new(0.0, 0.0, 30.0, 100.0))
        );
        assert_eq!(
            tree.screen_rect(panel),
            Some(Rect::new(0.0, 0.0, 50.0, 100.0))
        );
    }

    #[test]
    fn padding_shrinks_the_content_box() {
        let (mut tree, root) = root_tree(100.0, 100.0);
        tree.set_padding(root, kurbo::Insets::uniform(10.0));
        let fill = tree.insert(
            Some((root, Slot::Logical)),
            NodeDesc::docked(Dock::Fill, Size::ZERO),
        );
        tree.layout(root, Size::new(100.0, 100.0), 1.0);
        assert_eq!(
            tree.screen_rect(fill),
            Some(Rect::new(10.0, 10.0, 90.0, 90.0))
        );
    }

    #[test]
    fn center_centers_in_the_remaining_area() {
        let (mut tree, root) = root_tree(200.0, 100.0);
        let _left = tree.insert(
            Some((root, Slot::Logical)),
            NodeDesc::docked(Dock::Left, Size::new(50.0, 0.0)),
        );
        let centered = tree.insert(
            Some((root, Slot::Logical)),
            NodeDesc::docked(Dock::Center, Size::new(20.0, 20.0)),
        );
        tree.layout(root, Size::new(200.0, 100.0), 1.0);
        assert_eq!(
            tree.screen_rect(centered),
            Some(Rect::new(115.0, 40.0, 135.0, 60.0))
        );
    }

    #[test]
    fn top_left_anchor_keeps_absolute_position() {
        let (mut tree, root) = root_tree(100.0, 100.0);
        let child = tree.insert(
            Some((root, Slot::Logical)),
            NodeDesc::with_bounds(Rect::new(10.0, 10.0, 60.0, 40.0)),
        );
        tree.layout(root, Size::new(100.0, 100.0), 1.0);
        tree.layout(root, Size::new(300.0, 200.0), 1.0);
        assert_eq!(
            tree.screen_rect(child),
            Some(Rect::new(10.0, 10.0, 60.0, 40.0))
        );
    }

    #[test]
    fn all_edges_anchored_stretches_with_parent() {
        let (mut tree, root) = root_tree(100.0, 100.0);
        let mut desc = NodeDesc::with_bounds(Rect::new(10.0, 10.0, 90.0, 90.0));
        desc.anchors = Anchors::LEFT | Anchors::TOP | Anchors::RIGHT | Anchors::BOTTOM;
        let child = tree.insert(Some((root, Slot::Logical)), desc);
        tree.layout(root, Size::new(100.0, 100.0), 1.0);
        tree.layout(root, Size::new(200.0, 150.0), 1.0);
        assert_eq!(
            tree.screen_rect(child),
            Some(Rect::new(10.0, 10.0, 190.0, 140.0))
        );
        // The ten-pixel margins hold on the way back down as well.
        tree.layout(root, Size::new(60.0, 300.0), 1.0);
        assert_eq!(
            tree.screen_rect(child),
            Some(Rect::new(10.0, 10.0, 50.0, 290.0))
        );
    }

    #[test]
    fn right_anchor_tracks_the_far_edge() {
        let (mut tree, root) = root_tree(100.0, 100.0);
        let mut desc = NodeDesc::with_bounds(Rect::new(70.0, 10.0, 90.0, 30.0));
        desc.anchors = Anchors::RIGHT | Anchors::TOP;
        let child = tree.insert(Some((root, Slot::Logical)), desc);
        tree.layout(root, Size::new(100.0, 100.0), 1.0);
        tree.layout(root, Size::new(250.0, 100.0), 1.0);
        assert_eq!(
            tree.screen_rect(child),
            Some(Rect::new(220.0, 10.0, 240.0, 30.0))
        );
    }

    #[test]
    fn anchor_capture_follows_explicit_placement() {
        let (mut tree, root) = root_tree(100.0, 100.0);
        let child = tree.insert(
            Some((root, Slot::Logical)),
            NodeDesc::with_bounds(Rect::new(10.0, 10.0, 30.0, 30.0)),
        );
        tree.layout(root, Size::new(100.0, 100.0), 1.0);
        tree.set_position(child, Point::new(40.0, 40.0));
        tree.layout(root, Size::new(100.0, 100.0), 1.0);
        assert_eq!(
            tree.screen_rect(child),
            Some(Rect::new(40.0, 40.0, 60.0, 60.0))
        );
    }

    #[test]
    fn scale_multiplies_screen_space_only() {
        let (mut tree, root) = root_tree(100.0, 100.0);
        let child = tree.insert(
            Some((root, Slot::Logical)),
            NodeDesc::with_bounds(Rect::new(10.0, 0.0, 30.0, 20.0)),
        );
        tree.layout(root, Size::new(100.0, 100.0), 2.0);
        assert_eq!(
            tree.screen_rect(child),
            Some(Rect::new(20.0, 0.0, 60.0, 40.0))
        );
        assert_eq!(tree.bounds(child), Some(Rect::new(10.0, 0.0, 30.0, 20.0)));
    }

    #[test]
    fn clip_intersects_the_parent_chain() {
        let (mut tree, root) = root_tree(100.0, 100.0);
        let child = tree.insert(
            Some((root, Slot::Logical)),
            NodeDesc::with_bounds(Rect::new(80.0, 80.0, 150.0, 150.0)),
        );
        let grandchild = tree.insert(
            Some((child, Slot::Logical)),
            NodeDesc::with_bounds(Rect::new(40.0, 40.0, 60.0, 60.0)),
        );
        tree.layout(root, Size::new(100.0, 100.0), 1.0);
        assert_eq!(
            tree.clip_rect(child),
            Some(Rect::new(80.0, 80.0, 100.0, 100.0))
        );
        // The grandchild sits past the root's edge entirely.
        assert_eq!(tree.clip_rect(grandchild), Some(Rect::ZERO));
    }

    #[test]
    fn overconsumed_dock_area_collapses_to_zero() {
        let (mut tree, root) = root_tree(200.0, 100.0);
        let _a = tree.insert(
            Some((root, Slot::Logical)),
            NodeDesc::docked(Dock::Left, Size::new(150.0, 0.0)),
        );
        let _b = tree.insert(
            Some((root, Slot::Logical)),
            NodeDesc::docked(Dock::Left, Size::new(100.0, 0.0)),
        );
        let c = tree.insert(
            Some((root, Slot::Logical)),
            NodeDesc::docked(Dock::Fill, Size::ZERO),
        );
        tree.layout(root, Size::new(200.0, 100.0), 1.0);
        assert_eq!(tree.size(c).map(|s| s.width), Some(0.0));
        assert_eq!(tree.clip_rect(c), Some(Rect::ZERO));
    }

    #[test]
    fn fill_respects_max_size() {
        let (mut tree, root) = root_tree(200.0, 100.0);
        let mut desc = NodeDesc::docked(Dock::Fill, Size::ZERO);
        desc.max_size = Size::new(80.0, 0.0);
        let child = tree.insert(Some((root, Slot::Logical)), desc);
        tree.layout(root, Size::new(200.0, 100.0), 1.0);
        assert_eq!(
            tree.screen_rect(child),
            Some(Rect::new(0.0, 0.0, 80.0, 100.0))
        );
    }

    #[test]
    fn autosize_wraps_logical_children() {
        let (mut tree, root) = root_tree(300.0, 300.0);
        let mut desc = NodeDesc::with_bounds(Rect::new(0.0, 0.0, 10.0, 10.0));
        desc.flags |= NodeFlags::CONTAINER;
        desc.auto_size = AutoSize::HORIZONTAL | AutoSize::VERTICAL;
        desc.padding = kurbo::Insets::uniform(5.0);
        let container = tree.insert(Some((root, Slot::Logical)), desc);
        let _a = tree.insert(
            Some((container, Slot::Logical)),
            NodeDesc::with_bounds(Rect::new(0.0, 0.0, 30.0, 10.0)),
        );
        let _b = tree.insert(
            Some((container, Slot::Logical)),
            NodeDesc::with_bounds(Rect::new(10.0, 0.0, 50.0, 30.0)),
        );
        tree.layout(root, Size::new(300.0, 300.0), 1.0);
        assert_eq!(tree.size(container), Some(Size::new(60.0, 40.0)));
    }

    #[test]
    fn autosize_skips_hidden_children() {
        let (mut tree, root) = root_tree(300.0, 300.0);
        let mut desc = NodeDesc::with_bounds(Rect::new(0.0, 0.0, 10.0, 10.0));
        desc.flags |= NodeFlags::CONTAINER;
        desc.auto_size = AutoSize::HORIZONTAL;
        let container = tree.insert(Some((root, Slot::Logical)), desc);
        let _shown = tree.insert(
            Some((container, Slot::Logical)),
            NodeDesc::with_bounds(Rect::new(0.0, 0.0, 30.0, 10.0)),
        );
        let hidden = tree.insert(
            Some((container, Slot::Logical)),
            NodeDesc::with_bounds(Rect::new(0.0, 0.0, 200.0, 10.0)),
        );
        tree.set_flag(hidden, NodeFlags::VISIBLE, false);
        tree.layout(root, Size::new(300.0, 300.0), 1.0);
        assert_eq!(tree.size(container).map(|s| s.width), Some(30.0));
    }

    #[test]
    fn resize_to_grows_away_from_anchored_edges() {
        let (mut tree, root) = root_tree(100.0, 100.0);
        let mut desc = NodeDesc::with_bounds(Rect::new(70.0, 10.0, 90.0, 30.0));
        desc.anchors = Anchors::RIGHT | Anchors::TOP;
        let child = tree.insert(Some((root, Slot::Logical)), desc);
        assert!(tree.resize_to(child, Size::new(30.0, 20.0)));
        assert_eq!(tree.bounds(child), Some(Rect::new(60.0, 10.0, 90.0, 30.0)));
        // The re-captured frame keeps the right edge glued through layout.
        tree.layout(root, Size::new(100.0, 100.0), 1.0);
        assert_eq!(
            tree.screen_rect(child),
            Some(Rect::new(60.0, 10.0, 90.0, 30.0))
        );
    }

    #[test]
    fn resize_to_clamps_to_limits() {
        let (mut tree, root) = root_tree(100.0, 100.0);
        let mut desc = NodeDesc::with_bounds(Rect::new(0.0, 0.0, 20.0, 20.0));
        desc.max_size = Size::new(25.0, 0.0);
        let child = tree.insert(Some((root, Slot::Logical)), desc);
        assert!(tree.resize_to(child, Size::new(500.0, 20.0)));
        assert_eq!(tree.size(child), Some(Size::new(25.0, 20.0)));
    }
}
