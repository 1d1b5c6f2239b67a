// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The desktop: one tree, one pointer, one frame entry point.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use espalier_event_state::click::{ClickTracker, Release};
use espalier_event_state::drag::DragMonitor;
use espalier_event_state::hover::{HoverEvent, HoverState};
use espalier_event_state::interaction::InteractionState;
use espalier_focus::{FocusEntry, FocusPolicy, FocusSpace, Navigation, TabPolicy};
use espalier_tree::{
    DisplayItem, DrawEnv, HitFilter, NodeDesc, NodeFlags, NodeHook, NodeId, Slot, Tree, UpdateEnv,
};
use kurbo::{Point, Rect, Size, Vec2};

use crate::event::{EventHandler, UiEvent};
use crate::input::{ButtonState, FrameInput, Key, Modifiers, PointerButton};
use crate::overlay::{DropdownStack, ModalStack};

/// An in-flight drag: the payload rides the pointer until the primary
/// button releases.
#[derive(Clone, Copy, Debug, PartialEq)]
struct DragSession {
    payload: NodeId,
    /// Payload screen origin relative to the pointer at grab time, so the
    /// grab point stays under the cursor.
    offset: Vec2,
    grid: Option<Size>,
    target: Option<NodeId>,
    invalid: bool,
}

/// The root orchestrator: owns the scene tree and routes one frame of input
/// at a time.
///
/// A desktop holds the tree, the root node, the hot/pressed/focused
/// references, the modal and dropdown stacks, and the drag session. Hosts
/// drive it with [`Desktop::frame`] once per render tick and read back a
/// display list with [`Desktop::draw`]. Between frames, the structural API
/// (modals, dropdowns, drags, focus) is open for the host to act on what its
/// event handler observed.
///
/// Within a frame, work runs in a fixed order: drag session, hot tracking
/// and tooltip dwell, button transitions, keys, wheel, then the tree's
/// update → layout → late-update passes.
pub struct Desktop {
    tree: Tree,
    root: NodeId,
    size: Size,
    scale: f64,
    now_ms: u64,
    pointer: Point,
    hot: Option<NodeId>,
    press: Option<(PointerButton, NodeId)>,
    focused: Option<NodeId>,
    hover: HoverState<NodeId>,
    clicks: [ClickTracker<NodeId>; PointerButton::COUNT],
    drag_monitor: DragMonitor,
    modals: ModalStack,
    dropdowns: DropdownStack,
    drag: Option<DragSession>,
    tooltip_delay_ms: u64,
    dwell_ms: u64,
    tooltip_fired: bool,
    style_opacity: Option<Box<dyn Fn(Option<&str>, InteractionState) -> f64>>,
}

impl fmt::Debug for Desktop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Desktop")
            .field("root", &self.root)
            .field("size", &self.size)
            .field("hot", &self.hot)
            .field("press", &self.press)
            .field("focused", &self.focused)
            .field("modal", &self.modals.top())
            .field("dragging", &self.drag.is_some())
            .finish_non_exhaustive()
    }
}

impl Desktop {
    /// Create a desktop of the given size, with a fresh tree and root node.
    ///
    /// The root sits at the origin with no padding, covers the whole desktop
    /// area, and hosts logical children.
    pub fn new(size: Size) -> Self {
        let mut tree = Tree::new();
        let root = tree.insert(
            None,
            NodeDesc {
                bounds: Rect::from_origin_size(Point::ZERO, size),
                flags: NodeFlags::VISIBLE
                    | NodeFlags::ENABLED
                    | NodeFlags::PICKABLE
                    | NodeFlags::CONTAINER,
                ..NodeDesc::default()
            },
        );
        Self {
            tree,
            root,
            size,
            scale: 1.0,
            now_ms: 0,
            pointer: Point::ZERO,
            hot: None,
            press: None,
            focused: None,
            hover: HoverState::new(),
            clicks: core::array::from_fn(|_| ClickTracker::new()),
            drag_monitor: DragMonitor::new(),
            modals: ModalStack::default(),
            dropdowns: DropdownStack::default(),
            drag: None,
            tooltip_delay_ms: 500,
            dwell_ms: 0,
            tooltip_fired: false,
            style_opacity: None,
        }
    }

    // --- accessors ---

    /// The scene tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The scene tree, mutable. Structural edits between frames are
    /// immediate; edits from event handlers during a frame defer per the
    /// collection rules.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The node currently under the pointer.
    pub fn hot(&self) -> Option<NodeId> {
        self.hot
    }

    /// The node holding the active press, if a button is down on one.
    pub fn pressed(&self) -> Option<NodeId> {
        self.press.map(|(_, node)| node)
    }

    /// The node holding keyboard focus.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Move keyboard focus without firing focus events; routing fires them
    /// only for changes it makes itself. Focusing a node that is not
    /// attached under the desktop root leaves focus where it was.
    pub fn set_focus(&mut self, node: Option<NodeId>) {
        match node {
            Some(n) => {
                if self.tree.is_attached_under(self.root, n) {
                    self.focused = Some(n);
                }
            }
            None => self.focused = None,
        }
    }

    /// The pointer position from the most recent frame.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Resize the desktop; takes effect at the next layout pass.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    /// The desktop size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Set the factor multiplying local geometry into screen space.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.max(0.0);
    }

    /// The screen-space scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Pointer travel, in pixels, before a held press reports
    /// [`UiEvent::DragDetected`].
    pub fn set_drag_threshold(&mut self, pixels: f64) {
        self.drag_monitor.threshold = pixels;
    }

    /// Maximum time between two clicks of a double click.
    pub fn set_double_click_window(&mut self, ms: u64) {
        for tracker in &mut self.clicks {
            tracker.double_click_window = ms;
        }
    }

    /// How long the pointer must rest on a node before
    /// [`UiEvent::TooltipDue`] fires.
    pub fn set_tooltip_delay(&mut self, ms: u64) {
        self.tooltip_delay_ms = ms;
    }

    /// Wire in a style-opacity resolver for the update pass, typically a
    /// skin handle: `desktop.set_style_opacity(move |key, state|
    /// skin.opacity(key, state))`.
    pub fn set_style_opacity(
        &mut self,
        resolve: impl Fn(Option<&str>, InteractionState) -> f64 + 'static,
    ) {
        self.style_opacity = Some(Box::new(resolve));
    }

    // --- frame driving ---

    /// Run one frame: route `input`, then drive the update, layout, and
    /// late-update passes over the whole tree.
    ///
    /// Every event the routing produces is delivered to `handler`
    /// synchronously, in the order the routing steps run.
    pub fn frame(&mut self, input: &FrameInput, handler: EventHandler<'_>) {
        self.frame_with_hooks(input, handler, &mut |_, _| {}, &mut |_, _| {});
    }

    /// [`Desktop::frame`] with host hooks visited per node during the
    /// update and late-update passes.
    pub fn frame_with_hooks(
        &mut self,
        input: &FrameInput,
        handler: EventHandler<'_>,
        update_hook: NodeHook<'_>,
        late_hook: NodeHook<'_>,
    ) {
        self.now_ms = self.now_ms.saturating_add(input.elapsed_ms);
        self.pointer = input.pointer;
        self.validate_references();

        self.drive_drag(input, &mut *handler);
        self.route_pointer(input, &mut *handler);
        self.route_buttons(input, &mut *handler);
        self.route_keys(input, &mut *handler);
        self.route_wheel(input, &mut *handler);

        let style = self.style_opacity.as_deref();
        let env = UpdateEnv {
            elapsed_ms: input.elapsed_ms,
            hot: self.hot,
            pressed: self.press.map(|(_, node)| node),
            focused: self.focused,
            style_opacity: style,
        };
        self.tree.update(self.root, &env, update_hook);

        for (node, tag) in self.tree.take_fired_timers() {
            let _ = (handler)(&mut self.tree, &UiEvent::TimerFired { node, tag });
        }

        self.tree.layout(self.root, self.size, self.scale);
        self.tree.late_update(self.root, late_hook);

        // The desktop re-derives its references by query each frame; drain
        // the journal so it never accumulates.
        let _ = self.tree.take_structure_log();
    }

    /// Flatten the tree into paint order for the renderer, using the
    /// hot/pressed/focused references routing last settled on.
    pub fn draw(&self) -> Vec<DisplayItem<'_>> {
        self.tree.display_list(
            self.root,
            &DrawEnv {
                hot: self.hot,
                pressed: self.press.map(|(_, node)| node),
                focused: self.focused,
            },
        )
    }

    // --- modal stack ---

    /// Register a modal window; while any modal is registered, clicks
    /// outside the topmost one's reach are suppressed.
    ///
    /// The window must be alive and attached under the root. Registering
    /// brings it to front. Returns `false` for stale, detached, or already
    /// registered windows.
    pub fn push_modal(&mut self, window: NodeId) -> bool {
        if window == self.root
            || !self.tree.is_alive(window)
            || !self.tree.is_attached_under(self.root, window)
        {
            return false;
        }
        if !self.modals.push(window) {
            return false;
        }
        self.tree.move_to_end(window);
        true
    }

    /// Release the topmost modal, returning it.
    pub fn pop_modal(&mut self) -> Option<NodeId> {
        self.modals.pop()
    }

    /// Release a modal from anywhere in the stack.
    pub fn remove_modal(&mut self, window: NodeId) -> bool {
        self.modals.remove(window)
    }

    /// The modal currently restricting dispatch, if any.
    pub fn modal(&self) -> Option<NodeId> {
        self.modals.top()
    }

    // --- dropdown stack ---

    /// Open `node` as a dropdown overlay cascading from `owner`.
    ///
    /// The overlay is reparented into the root's logical collection so it
    /// renders on top. Opening plain (`stacked = false`) replaces the whole
    /// stack. Opening stacked closes entries until one contains `owner`, so
    /// sibling branches collapse while ancestor menus survive; that is what
    /// makes cascading sub-menus work.
    ///
    /// Returns `false` for stale ids, the root, or an already open overlay.
    pub fn open_dropdown(&mut self, node: NodeId, owner: NodeId, stacked: bool) -> bool {
        if node == self.root || !self.tree.is_alive(node) || !self.tree.is_alive(owner) {
            return false;
        }
        if self.dropdowns.contains_node(node) {
            return false;
        }
        if stacked {
            while let Some(top) = self.dropdowns.top().map(|e| e.node) {
                if self.tree.is_attached_under(top, owner) {
                    break;
                }
                self.close_top_dropdown();
            }
        } else {
            self.close_dropdowns();
        }
        let reparented = if self.tree.owner_of(node) == Some((self.root, Slot::Logical)) {
            self.tree.move_to_end(node)
        } else {
            self.tree.attach(self.root, Slot::Logical, node)
        };
        if !reparented {
            return false;
        }
        self.dropdowns.push(node, owner);
        true
    }

    /// Collapse the whole dropdown stack, top down.
    pub fn close_dropdowns(&mut self) {
        while !self.dropdowns.is_empty() {
            self.close_top_dropdown();
        }
    }

    /// The open overlays, bottom to top.
    pub fn open_dropdowns(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.dropdowns.iter().map(|e| e.node)
    }

    fn close_top_dropdown(&mut self) {
        if let Some(entry) = self.dropdowns.pop() {
            self.tree.detach(entry.node);
        }
    }

    // --- drag and drop ---

    /// Start dragging `payload`. No-op (returning `false`) while a drag is
    /// already in flight, for stale ids, or for the root.
    ///
    /// The payload is reparented into the root's logical collection so it
    /// renders above everything, keeps its grab point under the pointer
    /// (snapped to `grid` when given), and stops participating in drop
    /// targeting. The press that started the gesture will not produce a
    /// click.
    pub fn begin_drag(&mut self, payload: NodeId, grid: Option<Size>) -> bool {
        if self.drag.is_some() || payload == self.root || !self.tree.is_alive(payload) {
            return false;
        }
        let reparented = if self.tree.owner_of(payload) == Some((self.root, Slot::Logical)) {
            self.tree.move_to_end(payload)
        } else {
            self.tree.attach(self.root, Slot::Logical, payload)
        };
        if !reparented {
            return false;
        }
        let origin = self
            .tree
            .screen_rect(payload)
            .map_or(self.pointer, |r| r.origin());
        self.drag = Some(DragSession {
            payload,
            offset: origin - self.pointer,
            grid,
            target: None,
            invalid: false,
        });
        self.clicks[PointerButton::Primary.index()].cancel();
        self.drag_monitor.disarm();
        true
    }

    /// Returns `true` while a drag session is in flight.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The dragged node, if a session is in flight.
    pub fn drag_payload(&self) -> Option<NodeId> {
        self.drag.map(|s| s.payload)
    }

    /// The current drop candidate, if a session is in flight and the
    /// payload is over one.
    pub fn drop_target(&self) -> Option<NodeId> {
        self.drag.and_then(|s| s.target)
    }

    fn drive_drag(&mut self, input: &FrameInput, handler: EventHandler<'_>) {
        let Some(mut session) = self.drag else {
            return;
        };

        let mut origin = input.pointer + session.offset;
        if let Some(grid) = session.grid {
            origin = snap_to_grid(origin, grid);
        }
        // The root sits at the origin with no padding, so screen and
        // root-content coordinates differ only by scale.
        let local = (origin.to_vec2() / self.scale.max(f64::MIN_POSITIVE)).to_point();
        self.tree.set_position(session.payload, local);

        // Retarget with the payload hidden so it never shadows the target.
        let was_visible = self
            .tree
            .flags(session.payload)
            .is_some_and(|f| f.contains(NodeFlags::VISIBLE));
        self.tree
            .set_flag(session.payload, NodeFlags::VISIBLE, false);
        let target = self.routed_target(input.pointer);
        self.tree
            .set_flag(session.payload, NodeFlags::VISIBLE, was_visible);

        if target != session.target {
            // Each candidate gets a fresh verdict; its own enter (or the old
            // target's leave) may refuse the pending drop.
            session.invalid = false;
            if let Some(old) = session.target {
                let reply = (handler)(
                    &mut self.tree,
                    &UiEvent::DragLeave {
                        node: old,
                        payload: session.payload,
                    },
                );
                session.invalid |= reply.reject_drop;
            }
            if let Some(new) = target {
                let reply = (handler)(
                    &mut self.tree,
                    &UiEvent::DragEnter {
                        node: new,
                        payload: session.payload,
                    },
                );
                session.invalid |= reply.reject_drop;
            }
            session.target = target;
        }
        if let Some(node) = session.target {
            let _ = (handler)(
                &mut self.tree,
                &UiEvent::DragOver {
                    node,
                    payload: session.payload,
                    position: input.pointer,
                },
            );
        }

        if input.button(PointerButton::Primary).went_up() {
            self.tree.detach(session.payload);
            if session.invalid {
                if let Some(node) = session.target {
                    let _ = (handler)(
                        &mut self.tree,
                        &UiEvent::DragLeave {
                            node,
                            payload: session.payload,
                        },
                    );
                }
            } else {
                let node = session.target.unwrap_or(self.root);
                let _ = (handler)(
                    &mut self.tree,
                    &UiEvent::Drop {
                        node,
                        payload: session.payload,
                        position: input.pointer,
                    },
                );
            }
            self.drag = None;
        } else {
            self.drag = Some(session);
        }
    }

    // --- per-frame routing ---

    fn validate_references(&mut self) {
        let root = self.root;
        if self
            .hot
            .is_some_and(|n| !self.tree.is_alive(n) || !self.tree.is_attached_under(root, n))
        {
            self.hot = None;
        }
        if let Some((button, node)) = self.press {
            if !self.tree.is_alive(node) || !self.tree.is_attached_under(root, node) {
                self.clicks[button.index()].cancel();
                self.press = None;
            }
        }
        if self
            .focused
            .is_some_and(|n| !self.tree.is_alive(n) || !self.tree.is_attached_under(root, n))
        {
            self.focused = None;
        }
        self.modals.prune(&self.tree, root);
        self.dropdowns.prune(&self.tree, root);
        if self.drag.is_some_and(|s| !self.tree.is_alive(s.payload)) {
            self.drag = None;
        }
    }

    /// The raw hit at `point`, before modal constraints.
    fn raw_target(&self, point: Point) -> Option<NodeId> {
        self.tree.hit_test(self.root, point, &HitFilter::new())
    }

    /// The hit at `point` with the modal constraint applied: a disallowed
    /// target falls back to the root.
    fn routed_target(&self, point: Point) -> Option<NodeId> {
        let hit = self.raw_target(point)?;
        Some(if self.modal_allows(hit) { hit } else { self.root })
    }

    fn modal_allows(&self, target: NodeId) -> bool {
        match self.modals.top() {
            Some(modal) => self.within_modal_reach(modal, target, self.dropdowns.len()),
            None => true,
        }
    }

    /// A node is within a modal's reach inside its subtree, or inside a
    /// dropdown whose owner is itself within reach (cascading menus opened
    /// from the modal). `budget` bounds the owner chain.
    fn within_modal_reach(&self, modal: NodeId, node: NodeId, budget: usize) -> bool {
        if self.tree.is_attached_under(modal, node) {
            return true;
        }
        if budget == 0 {
            return false;
        }
        self.dropdowns.iter().any(|e| {
            self.tree.is_attached_under(e.node, node)
                && self.within_modal_reach(modal, e.owner, budget - 1)
        })
    }

    fn route_pointer(&mut self, input: &FrameInput, handler: EventHandler<'_>) {
        // Hot only moves while the pointer is free: a held or just-released
        // button freezes it, and a drag session replaces it with drop
        // targeting.
        let quiet = input
            .buttons
            .iter()
            .all(|b| matches!(b, ButtonState::Idle | ButtonState::Pressed));
        if !quiet || self.drag.is_some() {
            self.dwell_ms = 0;
            self.tooltip_fired = false;
            return;
        }

        let target = self.routed_target(input.pointer);
        if target != self.hot {
            let path = match target {
                Some(t) => self.tree.path_from_root(t),
                None => Vec::new(),
            };
            for transition in self.hover.update_path(&path) {
                let event = match transition {
                    HoverEvent::Enter(node) => UiEvent::PointerEnter { node },
                    HoverEvent::Leave(node) => UiEvent::PointerLeave { node },
                };
                let _ = (handler)(&mut self.tree, &event);
            }
            self.hot = target;
            self.dwell_ms = 0;
            self.tooltip_fired = false;
            return;
        }

        // Dwell accumulates only while the pointer rests with no button
        // activity at all; a fresh press resets it.
        let resting = input.buttons.iter().all(|b| matches!(b, ButtonState::Idle));
        if !resting {
            self.dwell_ms = 0;
            self.tooltip_fired = false;
            return;
        }
        if let Some(node) = self.hot {
            self.dwell_ms = self.dwell_ms.saturating_add(input.elapsed_ms);
            if !self.tooltip_fired && self.dwell_ms >= self.tooltip_delay_ms {
                self.tooltip_fired = true;
                let _ = (handler)(&mut self.tree, &UiEvent::TooltipDue { node });
            }
        }
    }

    fn route_buttons(&mut self, input: &FrameInput, handler: EventHandler<'_>) {
        for button in PointerButton::ALL {
            match input.button(button) {
                ButtonState::Idle => {}
                ButtonState::Pressed => self.on_button_down(button, input.pointer, &mut *handler),
                ButtonState::Held => self.on_button_held(button, input.pointer, &mut *handler),
                ButtonState::Released => self.on_button_up(button, input.pointer, &mut *handler),
            }
        }
    }

    fn on_button_down(&mut self, button: PointerButton, position: Point, handler: EventHandler<'_>) {
        let Some(target) = self.raw_target(position) else {
            // A press over nothing is still an outside click for overlays.
            self.collapse_dropdowns_for_click(None, position);
            return;
        };
        if !self.modal_allows(target) {
            return;
        }

        self.collapse_dropdowns_for_click(Some(target), position);
        self.raise_windows(target);

        if let Some(focus) = self.nearest_focusable(target) {
            self.change_focus(Some(focus), &mut *handler);
        }

        self.clicks[button.index()].on_down(target, position, self.now_ms);
        if button == PointerButton::Primary {
            self.drag_monitor.arm(position);
        }
        if self.press.is_none() {
            self.press = Some((button, target));
        }
        let _ = (handler)(
            &mut self.tree,
            &UiEvent::PressDown {
                node: target,
                button,
                position,
            },
        );
    }

    fn on_button_held(&mut self, button: PointerButton, position: Point, handler: EventHandler<'_>) {
        if button != PointerButton::Primary || self.drag.is_some() {
            return;
        }
        if self.drag_monitor.track(position) {
            if let Some(node) = self.clicks[button.index()].press_target().copied() {
                let _ = (handler)(&mut self.tree, &UiEvent::DragDetected { node, position });
            }
        }
    }

    fn on_button_up(&mut self, button: PointerButton, position: Point, handler: EventHandler<'_>) {
        let release_target = self.routed_target(position);
        let release = self.clicks[button.index()].on_up(release_target, position, self.now_ms);
        if button == PointerButton::Primary {
            self.drag_monitor.disarm();
        }
        if self.press.is_some_and(|(b, _)| b == button) {
            self.press = None;
        }

        let clicked = match release {
            Release::NoPress => return,
            Release::Released(node) => {
                let _ = (handler)(
                    &mut self.tree,
                    &UiEvent::Released {
                        node,
                        button,
                        position,
                    },
                );
                return;
            }
            Release::Click(node) => (node, false),
            Release::DoubleClick(node) => (node, true),
        };

        let (node, double) = clicked;
        let _ = (handler)(
            &mut self.tree,
            &UiEvent::Released {
                node,
                button,
                position,
            },
        );
        let _ = (handler)(
            &mut self.tree,
            &UiEvent::Click {
                node,
                button,
                position,
            },
        );
        if double {
            let _ = (handler)(
                &mut self.tree,
                &UiEvent::DoubleClick {
                    node,
                    button,
                    position,
                },
            );
        }
    }

    /// Collapse open dropdowns that a press landed outside of: top down,
    /// stopping at the first entry that contains the press target or whose
    /// rectangle covers the click point. A click on a menu item thus closes
    /// the cascade above that menu while the menu itself stays open.
    fn collapse_dropdowns_for_click(&mut self, target: Option<NodeId>, position: Point) {
        while let Some(top) = self.dropdowns.top().map(|e| e.node) {
            if target.is_some_and(|t| self.tree.is_attached_under(top, t)) {
                break;
            }
            let covering = self
                .tree
                .screen_rect(top)
                .is_some_and(|r| r.contains(position));
            if covering {
                break;
            }
            self.close_top_dropdown();
        }
    }

    /// Bring every window on the path to `target` to the front of its
    /// siblings. Modal windows keep their stacking.
    fn raise_windows(&mut self, target: NodeId) {
        for node in self.tree.path_from_root(target) {
            if node == self.root {
                continue;
            }
            let Some(flags) = self.tree.flags(node) else {
                continue;
            };
            if flags.contains(NodeFlags::WINDOW) && !self.modals.contains(node) {
                self.tree.move_to_end(node);
            }
        }
    }

    /// The pressed node itself when focusable, else its nearest focusable
    /// ancestor.
    fn nearest_focusable(&self, target: NodeId) -> Option<NodeId> {
        let mut current = Some(target);
        while let Some(node) = current {
            let flags = self.tree.flags(node)?;
            if flags.contains(NodeFlags::FOCUSABLE)
                && flags.contains(NodeFlags::ENABLED)
                && flags.contains(NodeFlags::VISIBLE)
            {
                return Some(node);
            }
            current = self.tree.parent_of(node);
        }
        None
    }

    fn change_focus(&mut self, next: Option<NodeId>, handler: EventHandler<'_>) {
        if next == self.focused {
            return;
        }
        if let Some(old) = self.focused.take() {
            let _ = (handler)(&mut self.tree, &UiEvent::FocusLost { node: old });
        }
        self.focused = next;
        if let Some(new) = next {
            let _ = (handler)(&mut self.tree, &UiEvent::FocusGained { node: new });
        }
    }

    fn route_keys(&mut self, input: &FrameInput, handler: EventHandler<'_>) {
        for key in &input.keys {
            if key.key == Key::Tab {
                let direction = if key.modifiers.contains(Modifiers::SHIFT) {
                    Navigation::Prev
                } else {
                    Navigation::Next
                };
                self.cycle_focus(direction, &mut *handler);
                continue;
            }
            let mut current = self.focused;
            while let Some(node) = current {
                let reply = (handler)(&mut self.tree, &UiEvent::Key { node, event: *key });
                if reply.consumed {
                    break;
                }
                current = self.tree.parent_of(node);
            }
        }
    }

    fn route_wheel(&mut self, input: &FrameInput, handler: EventHandler<'_>) {
        if input.wheel == Vec2::ZERO {
            return;
        }
        let mut current = self.hot;
        while let Some(node) = current {
            let reply = (handler)(
                &mut self.tree,
                &UiEvent::Wheel {
                    node,
                    delta: input.wheel,
                },
            );
            if reply.consumed {
                break;
            }
            current = self.tree.parent_of(node);
        }
    }

    /// Move focus along the tab ring. The ring covers the topmost modal's
    /// subtree while one is registered, the whole tree otherwise.
    fn cycle_focus(&mut self, direction: Navigation, handler: EventHandler<'_>) {
        let scope = self.modals.top().unwrap_or(self.root);
        let mut entries = Vec::new();
        collect_focusables(&self.tree, scope, &mut entries);
        if entries.is_empty() {
            return;
        }
        let origin = self
            .focused
            .filter(|f| entries.iter().any(|e| e.id == *f));
        let next = TabPolicy::default().next(origin, direction, &FocusSpace { nodes: &entries });
        if next.is_some() {
            self.change_focus(next, handler);
        }
    }
}

/// Gather focus candidates under `id` in tree order (cosmetic before
/// logical, matching the pipeline walk). Hidden subtrees contribute
/// nothing; disabled candidates are listed so the policy can skip them.
fn collect_focusables(tree: &Tree, id: NodeId, out: &mut Vec<FocusEntry<NodeId>>) {
    let Some(flags) = tree.flags(id) else {
        return;
    };
    if !flags.contains(NodeFlags::VISIBLE) {
        return;
    }
    if flags.contains(NodeFlags::FOCUSABLE) {
        out.push(FocusEntry {
            id,
            order: tree.tab_index(id),
            enabled: flags.contains(NodeFlags::ENABLED),
        });
    }
    for slot in [Slot::Cosmetic, Slot::Logical] {
        for &child in tree.children(id, slot) {
            if tree.owner_of(child) == Some((id, slot)) {
                collect_focusables(tree, child, out);
            }
        }
    }
}

/// Snap an origin to the nearest grid line on each axis; zero grid
/// components leave that axis free.
fn snap_to_grid(origin: Point, grid: Size) -> Point {
    let mut snapped = origin;
    if grid.width > 0.0 {
        snapped.x = (origin.x / grid.width).round() * grid.width;
    }
    if grid.height > 0.0 {
        snapped.y = (origin.y / grid.height).round() * grid.height;
    }
    snapped
}
