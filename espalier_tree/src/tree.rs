// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: slots, ownership, structural mutation.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Insets, Point, Rect, Size};
use smallvec::SmallVec;

use espalier_collection::{Change, Collection};
use espalier_event_state::interaction::{InteractionState, StateInputs, StateOverride};

use crate::types::{Anchors, AutoSize, Dock, NodeDesc, NodeFlags, NodeId, Slot, clamp_size};

/// Answer of a [`StructureGuard`] to a proposed structural change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Let the change commit.
    Allow,
    /// Cancel the change; the tree stays as it was.
    Reject,
}

/// A structural change proposed to a [`StructureGuard`].
#[derive(Clone, Copy, Debug)]
pub struct StructureChange {
    /// Node whose child collection is about to change.
    pub parent: NodeId,
    /// Which collection.
    pub slot: Slot,
    /// The proposed operation.
    pub op: StructureOp,
}

/// Operation kind within a [`StructureChange`].
#[derive(Clone, Copy, Debug)]
pub enum StructureOp {
    /// `child` is about to join the collection.
    Attach {
        /// The joining node.
        child: NodeId,
    },
    /// `child` is about to leave the collection.
    Detach {
        /// The leaving node.
        child: NodeId,
    },
    /// The collection is about to be emptied.
    Clear,
    /// The collection is about to be reordered.
    Sort,
}

/// Host veto consulted before structural changes commit.
///
/// The guard sees the whole tree read-only and the proposed change;
/// returning [`Verdict::Reject`] cancels the operation silently (the caller
/// sees an ordinary refusal). Teardown via [`Tree::free`] is not guarded.
pub type StructureGuard = fn(&Tree, &StructureChange) -> Verdict;

/// A committed structural change, for observers.
///
/// Drained with [`Tree::take_structure_log`]; deferred operations show up
/// once they commit at cleanup, in commit order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StructureEvent {
    /// Node whose child collection changed.
    pub parent: NodeId,
    /// Which collection.
    pub slot: Slot,
    /// What happened.
    pub change: Change<NodeId>,
}

/// A scheduled one-shot action on a node.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TimerEntry {
    pub(crate) remaining_ms: f64,
    pub(crate) tag: u32,
}

/// An opacity transition in progress.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fade {
    /// Opacity to arrive at.
    pub(crate) target: f64,
    /// Opacity units per second.
    pub(crate) speed: f64,
}

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) generation: u32,
    /// Live owner; tracks committed membership only.
    pub(crate) parent: Option<(NodeId, Slot)>,
    /// Owner-to-be while an attach is buffered behind a lock.
    pub(crate) pending_parent: Option<(NodeId, Slot)>,
    pub(crate) logical: Collection<NodeId>,
    pub(crate) cosmetic: Collection<NodeId>,

    // Local placement, in the parent's content space.
    pub(crate) origin: Point,
    pub(crate) size: Size,
    pub(crate) min_size: Size,
    pub(crate) max_size: Size,
    pub(crate) margin: Insets,
    pub(crate) padding: Insets,
    pub(crate) dock: Dock,
    pub(crate) anchors: Anchors,
    pub(crate) auto_size: AutoSize,

    // Geometry captured at the last explicit placement; anchored layout
    // re-derives position and size from these against the current parent.
    pub(crate) anchor_frame: Rect,
    pub(crate) anchor_parent: Size,

    pub(crate) flags: NodeFlags,
    pub(crate) style: Option<String>,
    pub(crate) tab_index: Option<u32>,
    pub(crate) checked: bool,
    pub(crate) selected: bool,
    pub(crate) state_override: StateOverride,

    pub(crate) opacity: f64,
    pub(crate) fade: Option<Fade>,
    pub(crate) timers: SmallVec<[TimerEntry; 2]>,

    // Computed by the layout and update passes, in screen space.
    pub(crate) screen_rect: Rect,
    pub(crate) clip_rect: Rect,
    pub(crate) effective_opacity: f64,
}

impl Node {
    fn new(generation: u32, desc: NodeDesc) -> Self {
        let size = clamp_size(desc.bounds.size(), desc.min_size, desc.max_size);
        let bounds = Rect::from_origin_size(desc.bounds.origin(), size);
        Self {
            generation,
            parent: None,
            pending_parent: None,
            logical: Collection::new(),
            cosmetic: Collection::new(),
            origin: bounds.origin(),
            size,
            min_size: desc.min_size,
            max_size: desc.max_size,
            margin: desc.margin,
            padding: desc.padding,
            dock: desc.dock,
            anchors: desc.anchors,
            auto_size: desc.auto_size,
            anchor_frame: bounds,
            anchor_parent: Size::ZERO,
            flags: desc.flags,
            style: desc.style,
            tab_index: desc.tab_index,
            checked: desc.checked,
            selected: desc.selected,
            state_override: StateOverride::new(),
            opacity: desc.opacity.clamp(0.0, 1.0),
            fade: None,
            timers: SmallVec::new(),
            screen_rect: Rect::ZERO,
            clip_rect: Rect::ZERO,
            effective_opacity: desc.opacity.clamp(0.0, 1.0),
        }
    }

    pub(crate) fn collection(&self, slot: Slot) -> &Collection<NodeId> {
        match slot {
            Slot::Logical => &self.logical,
            Slot::Cosmetic => &self.cosmetic,
        }
    }

    pub(crate) fn collection_mut(&mut self, slot: Slot) -> &mut Collection<NodeId> {
        match slot {
            Slot::Logical => &mut self.logical,
            Slot::Cosmetic => &mut self.cosmetic,
        }
    }
}

/// The scene tree: an arena of nodes with two ordered child collections each.
///
/// Nodes are addressed by generational [`NodeId`]s; stale ids are detected
/// and refused everywhere, so holding an id to a freed node is harmless.
/// Structural changes respect the single-ownership rule (a node has at most
/// one owner), refuse cycles, and defer when the affected collection is
/// locked by a traversal in progress.
///
/// ## Example
///
/// ```rust
/// use kurbo::Rect;
/// use espalier_tree::{NodeDesc, Slot, Tree};
///
/// let mut tree = Tree::new();
/// let root = tree.insert(None, NodeDesc::with_bounds(Rect::new(0.0, 0.0, 640.0, 480.0)));
/// let child = tree.insert(
///     Some((root, Slot::Logical)),
///     NodeDesc::with_bounds(Rect::new(10.0, 10.0, 110.0, 40.0)),
/// );
///
/// assert_eq!(tree.parent_of(child), Some(root));
/// assert_eq!(tree.children(root, Slot::Logical), &[child]);
/// ```
pub struct Tree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    guard: Option<StructureGuard>,
    structure_log: Vec<StructureEvent>,
    pub(crate) fired_timers: Vec<(NodeId, u32)>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("structure_log", &self.structure_log.len())
            .finish_non_exhaustive()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            guard: None,
            structure_log: Vec::new(),
            fired_timers: Vec::new(),
        }
    }

    /// Install or remove the structural guard.
    pub fn set_guard(&mut self, guard: Option<StructureGuard>) {
        self.guard = guard;
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation
    /// matches the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Create a node from `desc`, optionally attaching it to a parent.
    ///
    /// The node is always created; if the attach itself is refused (stale
    /// parent, guard veto), the node stays alive and unattached.
    pub fn insert(&mut self, parent: Option<(NodeId, Slot)>, desc: NodeDesc) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, desc));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, desc)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some((p, slot)) = parent {
            let _ = self.attach(p, slot, id);
        }
        id
    }

    /// Add `child` to `parent`'s collection in `slot`.
    ///
    /// Ownership moves atomically: the child leaves its previous collection
    /// as part of the same operation, and if any step refuses, nothing
    /// changes. Refused when either id is stale, when the attach would make
    /// a node its own ancestor, when the child is already a live member of
    /// the target collection, or when the guard rejects.
    ///
    /// When the target or the previous collection is locked, the transfer is
    /// deferred the way all locked mutations are and commits at cleanup.
    pub fn attach(&mut self, parent: NodeId, slot: Slot, child: NodeId) -> bool {
        self.attach_inner(parent, slot, child, None)
    }

    /// [`Tree::attach`], splicing `child` in at `index` among its new
    /// siblings (clamped to the collection length).
    ///
    /// Order is layout-significant: a child spliced in mid-sequence docks
    /// before the siblings that now follow it. When the target collection is
    /// locked, the index applies at cleanup against the sequence as it
    /// stands then.
    pub fn attach_at(&mut self, parent: NodeId, slot: Slot, index: usize, child: NodeId) -> bool {
        self.attach_inner(parent, slot, child, Some(index))
    }

    fn attach_inner(
        &mut self,
        parent: NodeId,
        slot: Slot,
        child: NodeId,
        position: Option<usize>,
    ) -> bool {
        if !self.is_alive(parent) || !self.is_alive(child) || parent == child {
            return false;
        }
        if self.is_ancestor_of(child, parent) {
            return false;
        }
        if !self.guard_allows(StructureChange {
            parent,
            slot,
            op: StructureOp::Attach { child },
        }) {
            return false;
        }

        // A buffered move elsewhere is cancelled by this one.
        if let Some((pp, ps)) = self.node(child).pending_parent {
            self.node_mut(pp).collection_mut(ps).remove(child);
            self.node_mut(child).pending_parent = None;
        }

        if !self.node(parent).collection(slot).can_add(child) {
            return false;
        }

        // Leave the old owner first; a failed detach cancels the attach.
        // An entry already flagged for removal needs no detach here, and a
        // flagged entry in the target itself is re-added in place below.
        if let Some((op, os)) = self.node(child).parent {
            if !self.node(op).collection(os).is_doomed(child) {
                if !self.node_mut(op).collection_mut(os).remove(child) {
                    return false;
                }
                self.reconcile(op, os);
            }
        }

        let added = match position {
            Some(index) => self.node_mut(parent).collection_mut(slot).insert(index, child),
            None => self.node_mut(parent).collection_mut(slot).add(child),
        };
        debug_assert!(added, "feasibility was checked above");
        if self.node(parent).collection(slot).is_pending_add(child) {
            self.node_mut(child).pending_parent = Some((parent, slot));
        }
        self.reconcile(parent, slot);
        true
    }

    /// Remove `child` from its owner's collection.
    ///
    /// Refused when the id is stale, the node has no owner, the entry is
    /// already flagged for removal, or the guard rejects. While the owning
    /// collection is locked the entry is flagged and stays visible to the
    /// traversal in progress; the unlink commits at cleanup.
    pub fn detach(&mut self, child: NodeId) -> bool {
        if !self.is_alive(child) {
            return false;
        }
        if let Some((pp, ps)) = self.node(child).pending_parent {
            self.node_mut(pp).collection_mut(ps).remove(child);
            self.node_mut(child).pending_parent = None;
            return true;
        }
        let Some((op, os)) = self.node(child).parent else {
            return false;
        };
        if !self.guard_allows(StructureChange {
            parent: op,
            slot: os,
            op: StructureOp::Detach { child },
        }) {
            return false;
        }
        if !self.node_mut(op).collection_mut(os).remove(child) {
            return false;
        }
        self.reconcile(op, os);
        true
    }

    /// Free `id` and its whole subtree, returning the slots for reuse.
    ///
    /// Teardown is not guarded. Ids into the freed subtree become stale
    /// immediately; a locked owner collection keeps its (now stale) entry
    /// until its next cleanup, where it is purged and logged.
    pub fn free(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        // Unlink from the owner without consulting the guard.
        if let Some((pp, ps)) = self.node(id).pending_parent {
            self.node_mut(pp).collection_mut(ps).remove(id);
            self.node_mut(id).pending_parent = None;
        }
        if let Some((op, os)) = self.node(id).parent {
            self.node_mut(op).collection_mut(os).remove(id);
            self.node_mut(id).parent = None;
            self.reconcile(op, os);
        }
        // Children buffered for attach here stay with their live owners.
        for slot in [Slot::Logical, Slot::Cosmetic] {
            let buffered: Vec<NodeId> = self.node(id).collection(slot).pending_adds().collect();
            for child in buffered {
                if let Some(n) = self.node_opt_mut(child) {
                    if n.pending_parent == Some((id, slot)) {
                        n.pending_parent = None;
                    }
                }
            }
            let members: Vec<NodeId> = self.node(id).collection(slot).as_slice().to_vec();
            for child in members {
                if self.owner_of(child) == Some((id, slot)) {
                    self.free(child);
                }
            }
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Move `id` to the end of its owner collection, stacking it above its
    /// siblings. Deferred while the collection is locked.
    pub fn move_to_end(&mut self, id: NodeId) -> bool {
        let Some((op, os)) = self.owner_of(id) else {
            return false;
        };
        let coll = self.node(op).collection(os);
        if coll.as_slice().last() == Some(&id) && !coll.needs_cleanup() {
            return true;
        }
        let coll = self.node_mut(op).collection_mut(os);
        if !coll.remove(id) {
            return false;
        }
        let added = coll.add(id);
        debug_assert!(added, "re-adding a just-removed key cannot be refused");
        self.reconcile(op, os);
        true
    }

    /// Empty `parent`'s collection in `slot`.
    ///
    /// Refused for stale ids and guard vetoes. While locked, every entry is
    /// flagged instead and the unlinks commit at cleanup.
    pub fn clear_children(&mut self, parent: NodeId, slot: Slot) -> bool {
        if !self.is_alive(parent) {
            return false;
        }
        if !self.guard_allows(StructureChange {
            parent,
            slot,
            op: StructureOp::Clear,
        }) {
            return false;
        }
        // Clearing drops buffered additions outright; release their owners.
        let buffered: Vec<NodeId> = self.node(parent).collection(slot).pending_adds().collect();
        for child in buffered {
            if let Some(n) = self.node_opt_mut(child) {
                if n.pending_parent == Some((parent, slot)) {
                    n.pending_parent = None;
                }
            }
        }
        let members: Vec<NodeId> = self.node(parent).collection(slot).as_slice().to_vec();
        let was_locked = self.node(parent).collection(slot).is_locked();
        self.node_mut(parent).collection_mut(slot).clear();
        if !was_locked {
            for child in members {
                if let Some(n) = self.node_opt_mut(child) {
                    if n.parent == Some((parent, slot)) {
                        n.parent = None;
                    }
                }
            }
        }
        self.reconcile(parent, slot);
        true
    }

    /// Reorder `parent`'s collection in `slot` with `compare`.
    ///
    /// Order is layout- and paint-significant, so observers are notified via
    /// the structure log. Refused for stale ids, guard vetoes, and while the
    /// collection is locked.
    pub fn sort_children<F>(&mut self, parent: NodeId, slot: Slot, compare: F) -> bool
    where
        F: FnMut(&NodeId, &NodeId) -> core::cmp::Ordering,
    {
        if !self.is_alive(parent) {
            return false;
        }
        if self.node(parent).collection(slot).is_locked() {
            return false;
        }
        if !self.guard_allows(StructureChange {
            parent,
            slot,
            op: StructureOp::Sort,
        }) {
            return false;
        }
        let sorted = self.node_mut(parent).collection_mut(slot).sort_by(compare);
        self.reconcile(parent, slot);
        sorted
    }

    /// Lock both of `id`'s collections for a traversal.
    pub fn lock_children(&mut self, id: NodeId) {
        if let Some(n) = self.node_opt_mut(id) {
            n.logical.lock();
            n.cosmetic.lock();
        }
    }

    /// Release the traversal locks taken by [`Tree::lock_children`].
    pub fn unlock_children(&mut self, id: NodeId) {
        if let Some(n) = self.node_opt_mut(id) {
            n.logical.unlock();
            n.cosmetic.unlock();
        }
    }

    /// Commit deferred mutations on both of `id`'s collections and log the
    /// resulting changes.
    ///
    /// Entries whose nodes were freed while the lock was held are purged
    /// here as well.
    pub fn cleanup_children(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        for slot in [Slot::Logical, Slot::Cosmetic] {
            // Purge stale ids left behind by free() during the lock.
            let stale: Vec<NodeId> = self
                .node(id)
                .collection(slot)
                .as_slice()
                .iter()
                .copied()
                .filter(|&c| !self.is_alive(c))
                .collect();
            if !self.node(id).collection(slot).is_locked() {
                for c in stale {
                    self.node_mut(id).collection_mut(slot).remove(c);
                }
                self.node_mut(id).collection_mut(slot).cleanup();
            }
            self.reconcile(id, slot);
        }
    }

    /// Drain committed structural changes since the last drain.
    pub fn take_structure_log(&mut self) -> Vec<StructureEvent> {
        core::mem::take(&mut self.structure_log)
    }

    /// Drain `(node, tag)` pairs for timers that came due during update.
    pub fn take_fired_timers(&mut self) -> Vec<(NodeId, u32)> {
        core::mem::take(&mut self.fired_timers)
    }

    fn guard_allows(&self, change: StructureChange) -> bool {
        match self.guard {
            Some(guard) => guard(self, &change) == Verdict::Allow,
            None => true,
        }
    }

    /// Drain one collection's journal: update ownership pointers for
    /// committed changes and append them to the structure log.
    fn reconcile(&mut self, parent: NodeId, slot: Slot) {
        let changes = match self.node_opt_mut(parent) {
            Some(n) => n.collection_mut(slot).take_changes(),
            None => return,
        };
        for change in changes {
            match change {
                Change::Added { key, .. } => {
                    if let Some(n) = self.node_opt_mut(key) {
                        n.parent = Some((parent, slot));
                        if n.pending_parent == Some((parent, slot)) {
                            n.pending_parent = None;
                        }
                        self.recapture_anchor(key);
                    }
                }
                Change::Removed { key } => {
                    if let Some(n) = self.node_opt_mut(key) {
                        if n.parent == Some((parent, slot)) {
                            n.parent = None;
                        }
                    }
                }
                Change::Cleared | Change::Sorted => {}
            }
            self.structure_log.push(StructureEvent {
                parent,
                slot,
                change,
            });
        }
    }

    // --- ancestry ---

    /// Returns `true` if `a` is an ancestor of `b` along committed or
    /// buffered ownership.
    pub fn is_ancestor_of(&self, a: NodeId, b: NodeId) -> bool {
        let mut current = self.effective_owner(b);
        while let Some((p, _)) = current {
            if p == a {
                return true;
            }
            current = self.effective_owner(p);
        }
        false
    }

    /// The owner a node will have once deferred transfers commit.
    fn effective_owner(&self, id: NodeId) -> Option<(NodeId, Slot)> {
        let n = self.node_opt(id)?;
        n.pending_parent.or(n.parent)
    }

    /// The committed owner and slot of `id`.
    pub fn owner_of(&self, id: NodeId) -> Option<(NodeId, Slot)> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// The committed parent of `id`.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.owner_of(id).map(|(p, _)| p)
    }

    /// The committed members of `id`'s collection in `slot`, in order.
    pub fn children(&self, id: NodeId, slot: Slot) -> &[NodeId] {
        match self.node_opt(id) {
            Some(n) => n.collection(slot).as_slice(),
            None => &[],
        }
    }

    /// Path from the tree root down to `id`, inclusive.
    pub fn path_from_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        if !self.is_alive(id) {
            return path;
        }
        let mut current = Some(id);
        while let Some(node) = current {
            path.push(node);
            current = self.parent_of(node);
        }
        path.reverse();
        path
    }

    /// Returns `true` if walking committed ownership from `id` reaches
    /// `root`. A node is routable for input only while attached this way.
    pub fn is_attached_under(&self, root: NodeId, id: NodeId) -> bool {
        id == root && self.is_alive(root) || self.is_ancestor_of(root, id)
    }

    // --- node access ---

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    pub(crate) fn node_opt(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.idx())
            .and_then(|slot| slot.as_ref())
            .filter(|n| n.generation == id.1)
    }

    pub(crate) fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.idx())
            .and_then(|slot| slot.as_mut())
            .filter(|n| n.generation == id.1)
    }

    /// Iterate all live node ids.
    pub fn iter_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, n)| {
            n.as_ref().map(|n| {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "NodeId uses 32-bit indices by design."
                )]
                NodeId::new(i as u32, n.generation)
            })
        })
    }

    // --- geometry properties ---

    /// Local placement in the parent's content space.
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        self.node_opt(id)
            .map(|n| Rect::from_origin_size(n.origin, n.size))
    }

    /// Local position in the parent's content space.
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.node_opt(id).map(|n| n.origin)
    }

    /// Local size.
    pub fn size(&self, id: NodeId) -> Option<Size> {
        self.node_opt(id).map(|n| n.size)
    }

    /// Place the node and capture the anchor geometry.
    ///
    /// The size is clamped to the node's limits, never refused.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        n.origin = bounds.origin();
        n.size = clamp_size(bounds.size(), n.min_size, n.max_size);
        self.recapture_anchor(id);
    }

    /// Move the node and capture the anchor geometry.
    pub fn set_position(&mut self, id: NodeId, position: Point) {
        if let Some(n) = self.node_opt_mut(id) {
            n.origin = position;
            self.recapture_anchor(id);
        }
    }

    /// Resize the node in place (top-left fixed) and capture the anchor
    /// geometry. The size is clamped to the node's limits.
    pub fn set_size(&mut self, id: NodeId, size: Size) {
        if let Some(n) = self.node_opt_mut(id) {
            n.size = clamp_size(size, n.min_size, n.max_size);
            self.recapture_anchor(id);
        }
    }

    /// Set the minimum size (zero components unbounded) and re-clamp.
    pub fn set_min_size(&mut self, id: NodeId, min: Size) {
        if let Some(n) = self.node_opt_mut(id) {
            n.min_size = min;
            n.size = clamp_size(n.size, n.min_size, n.max_size);
        }
    }

    /// Set the maximum size (zero components unbounded) and re-clamp.
    pub fn set_max_size(&mut self, id: NodeId, max: Size) {
        if let Some(n) = self.node_opt_mut(id) {
            n.max_size = max;
            n.size = clamp_size(n.size, n.min_size, n.max_size);
        }
    }

    /// Set the docking margin.
    pub fn set_margin(&mut self, id: NodeId, margin: Insets) {
        if let Some(n) = self.node_opt_mut(id) {
            n.margin = margin;
        }
    }

    /// Set the content padding.
    pub fn set_padding(&mut self, id: NodeId, padding: Insets) {
        if let Some(n) = self.node_opt_mut(id) {
            n.padding = padding;
        }
    }

    /// Change the docking mode.
    ///
    /// Leaving docked mode captures the current geometry as the anchor
    /// frame, so the node stays where the dock last put it.
    pub fn set_dock(&mut self, id: NodeId, dock: Dock) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        let was_docked = n.dock != Dock::None;
        n.dock = dock;
        if was_docked && dock == Dock::None {
            self.recapture_anchor(id);
        }
    }

    /// Change the anchored edges and re-capture against the current
    /// geometry.
    pub fn set_anchors(&mut self, id: NodeId, anchors: Anchors) {
        if let Some(n) = self.node_opt_mut(id) {
            n.anchors = anchors;
            self.recapture_anchor(id);
        }
    }

    /// Set the self-sizing axes.
    pub fn set_auto_size(&mut self, id: NodeId, auto_size: AutoSize) {
        if let Some(n) = self.node_opt_mut(id) {
            n.auto_size = auto_size;
        }
    }

    /// The docking mode.
    pub fn dock(&self, id: NodeId) -> Option<Dock> {
        self.node_opt(id).map(|n| n.dock)
    }

    /// The anchored edges.
    pub fn anchors(&self, id: NodeId) -> Option<Anchors> {
        self.node_opt(id).map(|n| n.anchors)
    }

    /// Screen-space rectangle as of the last layout pass.
    pub fn screen_rect(&self, id: NodeId) -> Option<Rect> {
        self.node_opt(id).map(|n| n.screen_rect)
    }

    /// Screen-space clip rectangle as of the last layout pass: the node's
    /// screen rectangle intersected with its parent's clip chain.
    pub fn clip_rect(&self, id: NodeId) -> Option<Rect> {
        self.node_opt(id).map(|n| n.clip_rect)
    }

    /// Re-capture the anchor frame from the current local geometry and the
    /// current parent content size.
    pub(crate) fn recapture_anchor(&mut self, id: NodeId) {
        let parent_content = self
            .owner_of(id)
            .map(|(p, _)| self.content_size(p))
            .unwrap_or(Size::ZERO);
        if let Some(n) = self.node_opt_mut(id) {
            n.anchor_frame = Rect::from_origin_size(n.origin, n.size);
            n.anchor_parent = parent_content;
        }
    }

    /// The node's content size: its size shrunk by padding, never negative.
    pub(crate) fn content_size(&self, id: NodeId) -> Size {
        match self.node_opt(id) {
            Some(n) => Size::new(
                (n.size.width - n.padding.x0 - n.padding.x1).max(0.0),
                (n.size.height - n.padding.y0 - n.padding.y1).max(0.0),
            ),
            None => Size::ZERO,
        }
    }

    // --- flags and state inputs ---

    /// The node's flags.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.flags)
    }

    /// Replace the node's flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.flags = flags;
        }
    }

    /// Set or clear individual flags.
    pub fn set_flag(&mut self, id: NodeId, flag: NodeFlags, on: bool) {
        if let Some(n) = self.node_opt_mut(id) {
            n.flags.set(flag, on);
        }
    }

    /// The style key.
    pub fn style(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id).and_then(|n| n.style.as_deref())
    }

    /// Set the style key.
    pub fn set_style(&mut self, id: NodeId, style: Option<String>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.style = style;
        }
    }

    /// The explicit tab order position.
    pub fn tab_index(&self, id: NodeId) -> Option<u32> {
        self.node_opt(id).and_then(|n| n.tab_index)
    }

    /// Set the explicit tab order position.
    pub fn set_tab_index(&mut self, id: NodeId, tab_index: Option<u32>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.tab_index = tab_index;
        }
    }

    /// The checked input.
    pub fn is_checked(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some_and(|n| n.checked)
    }

    /// Set the checked input.
    pub fn set_checked(&mut self, id: NodeId, checked: bool) {
        if let Some(n) = self.node_opt_mut(id) {
            n.checked = checked;
        }
    }

    /// The selected input.
    pub fn is_selected(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some_and(|n| n.selected)
    }

    /// Set the selected input.
    pub fn set_selected(&mut self, id: NodeId, selected: bool) {
        if let Some(n) = self.node_opt_mut(id) {
            n.selected = selected;
        }
    }

    /// Pin the node's interaction state, bypassing computation until
    /// cleared with `set_state_override(id, None)`. Input changes never
    /// clear a pin.
    pub fn set_state_override(&mut self, id: NodeId, state: Option<InteractionState>) {
        if let Some(n) = self.node_opt_mut(id) {
            match state {
                Some(s) => n.state_override.pin(s),
                None => n.state_override.clear(),
            }
        }
    }

    /// The pinned state, if any.
    pub fn state_override(&self, id: NodeId) -> Option<InteractionState> {
        self.node_opt(id).and_then(|n| n.state_override.pinned())
    }

    /// Resolve the node's interaction state given the desktop-held inputs.
    pub fn interaction_state(
        &self,
        id: NodeId,
        hot: bool,
        pressed: bool,
        focused: bool,
    ) -> Option<InteractionState> {
        let n = self.node_opt(id)?;
        Some(n.state_override.resolve(StateInputs {
            enabled: n.flags.contains(NodeFlags::ENABLED),
            checked: n.checked,
            selected: n.selected,
            hot,
            pressed,
            focused,
        }))
    }

    // --- opacity and timers ---

    /// The node's base opacity.
    pub fn opacity(&self, id: NodeId) -> Option<f64> {
        self.node_opt(id).map(|n| n.opacity)
    }

    /// Set the base opacity immediately, cancelling any fade.
    pub fn set_opacity(&mut self, id: NodeId, opacity: f64) {
        if let Some(n) = self.node_opt_mut(id) {
            n.opacity = opacity.clamp(0.0, 1.0);
            n.fade = None;
        }
    }

    /// Fade the base opacity toward `target` at `per_second` units per
    /// second; the update pass advances it each frame.
    pub fn fade_to(&mut self, id: NodeId, target: f64, per_second: f64) {
        if let Some(n) = self.node_opt_mut(id) {
            n.fade = Some(Fade {
                target: target.clamp(0.0, 1.0),
                speed: per_second.abs(),
            });
        }
    }

    /// The effective opacity computed by the last update pass: the product
    /// of ancestor opacity, style opacity, and the node's own.
    pub fn effective_opacity(&self, id: NodeId) -> Option<f64> {
        self.node_opt(id).map(|n| n.effective_opacity)
    }

    /// Schedule a one-shot timer on the node; after `delay_ms` of
    /// accumulated frame time, `(id, tag)` appears in
    /// [`Tree::take_fired_timers`].
    pub fn schedule(&mut self, id: NodeId, delay_ms: u64, tag: u32) -> bool {
        match self.node_opt_mut(id) {
            Some(n) => {
                #[allow(
                    clippy::cast_precision_loss,
                    reason = "delays are far below 2^52 ms"
                )]
                n.timers.push(TimerEntry {
                    remaining_ms: delay_ms as f64,
                    tag,
                });
                true
            }
            None => false,
        }
    }
}
