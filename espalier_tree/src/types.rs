// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene tree: node identifiers, flags, docking and
//! anchoring configuration.

use alloc::string::String;
use kurbo::{Insets, Point, Rect, Size};

/// Identifier for a node in the tree.
///
/// This is a small, copyable handle that stays stable across updates but
/// becomes invalid when the underlying slot is reused. It consists of a slot
/// index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On free, the slot is returned to the free list; any existing `NodeId`
///   that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a
///   new, distinct `NodeId`.
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId`
/// still refers to a live node. Stale `NodeId`s never alias a different live
/// node because the generation must match, and every operation on a stale id
/// is a refusal or a no-op.
///
/// The generation increments on slot reuse and never decreases. `u32` is
/// ample for practical lifetimes; behavior on generation overflow is
/// unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling participation in rendering, input, and focus.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u16 {
        /// Node and subtree participate in layout, drawing, and hit testing.
        const VISIBLE   = 1 << 0;
        /// Node accepts input. Disabled nodes render in their disabled state
        /// and never become hot, pressed, or focused.
        const ENABLED   = 1 << 1;
        /// Node participates in hit testing.
        const PICKABLE  = 1 << 2;
        /// Node participates in keyboard focus traversal.
        const FOCUSABLE = 1 << 3;
        /// Node hosts logical children; auto-sizing measures the logical
        /// collection instead of the cosmetic one.
        const CONTAINER = 1 << 4;
        /// Node is a window: it can be brought to front and take window
        /// focus as a unit.
        const WINDOW    = 1 << 5;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::ENABLED | Self::PICKABLE
    }
}

bitflags::bitflags! {
    /// Edges of a node bound to the matching edges of its parent.
    ///
    /// When the parent resizes, distances between anchored edges and the
    /// parent's edges are preserved as captured at the last explicit
    /// placement. Unanchored edges keep their absolute position and size, so
    /// the default behaves like a plain fixed placement.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Anchors: u8 {
        /// Left edge tracks the parent's left edge.
        const LEFT   = 1 << 0;
        /// Top edge tracks the parent's top edge.
        const TOP    = 1 << 1;
        /// Right edge tracks the parent's right edge.
        const RIGHT  = 1 << 2;
        /// Bottom edge tracks the parent's bottom edge.
        const BOTTOM = 1 << 3;
    }
}

impl Default for Anchors {
    fn default() -> Self {
        Self::LEFT | Self::TOP
    }
}

bitflags::bitflags! {
    /// Axes on which a node resizes itself to the bounding box of its
    /// children after they are laid out.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct AutoSize: u8 {
        /// Grow or shrink the width to fit children.
        const HORIZONTAL = 1 << 0;
        /// Grow or shrink the height to fit children.
        const VERTICAL   = 1 << 1;
    }
}

/// Docking mode, deciding how layout places a node in its parent.
///
/// Docked siblings consume the parent's remaining dock area strictly in
/// collection order: edge modes tile against their edge and shrink the area,
/// fill and center modes use the remainder without shrinking it. `None`
/// places the node by its captured [`Anchors`] geometry instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dock {
    /// Not docked; anchored placement applies.
    #[default]
    None,
    /// Flush against the left edge of the remaining area, full height.
    Left,
    /// Flush against the right edge of the remaining area, full height.
    Right,
    /// Flush against the top edge of the remaining area, full width.
    Top,
    /// Flush against the bottom edge of the remaining area, full width.
    Bottom,
    /// Occupy the whole remaining area.
    Fill,
    /// Span the remaining width, keeping the node's own height.
    FillX,
    /// Span the remaining height, keeping the node's own width.
    FillY,
    /// Center in the remaining area, keeping the node's own size.
    Center,
    /// Center horizontally in the remaining area, keeping the node's own
    /// vertical placement.
    CenterX,
    /// Center vertically in the remaining area, keeping the node's own
    /// horizontal placement.
    CenterY,
}

/// Which of a node's two child collections an edge lives in.
///
/// Logical children are the structural content of a node; cosmetic children
/// are presentation parts (borders, grips, captions) owned by the same node.
/// The two collections are ordered independently, and membership in one of
/// them is what makes a node logical or cosmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The structural child collection.
    Logical,
    /// The presentation child collection.
    Cosmetic,
}

/// Initial configuration for a node, passed to
/// [`Tree::insert`](crate::Tree::insert).
#[derive(Clone, Debug)]
pub struct NodeDesc {
    /// Placement in the parent's content space; also the first anchor
    /// capture.
    pub bounds: Rect,
    /// Minimum size; zero components are unbounded.
    pub min_size: Size,
    /// Maximum size; zero components are unbounded.
    pub max_size: Size,
    /// Space kept around the node when docked.
    pub margin: Insets,
    /// Space kept between the node's edges and its content area.
    pub padding: Insets,
    /// Docking mode.
    pub dock: Dock,
    /// Anchored edges used while not docked.
    pub anchors: Anchors,
    /// Self-sizing axes.
    pub auto_size: AutoSize,
    /// Participation flags.
    pub flags: NodeFlags,
    /// Style key resolved by the host's skin at draw time.
    pub style: Option<String>,
    /// Position in keyboard focus order; `None` keeps the node out of the
    /// explicit tab ring (it can still be focused by pointer).
    pub tab_index: Option<u32>,
    /// Base opacity in `0.0..=1.0`.
    pub opacity: f64,
    /// Persistent checked input for state resolution.
    pub checked: bool,
    /// Persistent selected input for state resolution.
    pub selected: bool,
}

impl Default for NodeDesc {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            min_size: Size::ZERO,
            max_size: Size::ZERO,
            margin: Insets::ZERO,
            padding: Insets::ZERO,
            dock: Dock::None,
            anchors: Anchors::default(),
            auto_size: AutoSize::empty(),
            flags: NodeFlags::default(),
            style: None,
            tab_index: None,
            opacity: 1.0,
            checked: false,
            selected: false,
        }
    }
}

impl NodeDesc {
    /// A description with the given placement and defaults elsewhere.
    pub fn with_bounds(bounds: Rect) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    /// A description docked with `dock` and the given size hint.
    pub fn docked(dock: Dock, size: Size) -> Self {
        Self {
            bounds: Rect::from_origin_size(Point::ZERO, size),
            dock,
            ..Self::default()
        }
    }
}

/// Clamp `size` to the node's limits; zero limit components are unbounded.
pub(crate) fn clamp_size(size: Size, min: Size, max: Size) -> Size {
    let mut w = size.width.max(min.width).max(0.0);
    let mut h = size.height.max(min.height).max(0.0);
    if max.width > 0.0 {
        w = w.min(max.width);
    }
    if max.height > 0.0 {
        h = h.min(max.height);
    }
    Size::new(w, h)
}
