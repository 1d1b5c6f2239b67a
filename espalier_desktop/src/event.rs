// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events the desktop emits and the host's reply channel.

use espalier_tree::{NodeId, Tree};
use kurbo::{Point, Vec2};

use crate::input::{KeyEvent, PointerButton};

/// One routed interaction, delivered synchronously to the host handler
/// during the frame that produced it.
///
/// Pointer events name the node they resolved to; bubbling events (wheel,
/// key) are delivered once per node along the ancestor chain until a reply
/// consumes them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UiEvent {
    /// The pointer path now includes this node.
    PointerEnter {
        /// Node entered.
        node: NodeId,
    },
    /// The pointer path no longer includes this node.
    PointerLeave {
        /// Node left.
        node: NodeId,
    },
    /// A button went down on this node.
    PressDown {
        /// Press target.
        node: NodeId,
        /// Button that went down.
        button: PointerButton,
        /// Pointer position at press time.
        position: Point,
    },
    /// The button that pressed this node came back up. Fires whether or not
    /// the release still lands on the node.
    Released {
        /// The original press target.
        node: NodeId,
        /// Button that went up.
        button: PointerButton,
        /// Pointer position at release time.
        position: Point,
    },
    /// Press and release paired up on this node.
    Click {
        /// Click target.
        node: NodeId,
        /// Button that clicked.
        button: PointerButton,
        /// Pointer position at release time.
        position: Point,
    },
    /// A second click within the double-click window of the first.
    DoubleClick {
        /// Click target.
        node: NodeId,
        /// Button that clicked.
        button: PointerButton,
        /// Pointer position at release time.
        position: Point,
    },
    /// The pointer travelled past the drag threshold while the primary
    /// button held this node. Fires once per press; the host decides whether
    /// to start a drag session.
    DragDetected {
        /// The pressed node.
        node: NodeId,
        /// Pointer position when the threshold was crossed.
        position: Point,
    },
    /// Wheel travel, bubbling from the hot node upward until consumed.
    Wheel {
        /// Node the event is offered to.
        node: NodeId,
        /// Wheel delta for the frame.
        delta: Vec2,
    },
    /// A key event, bubbling from the focused node upward until consumed.
    Key {
        /// Node the event is offered to.
        node: NodeId,
        /// The key press.
        event: KeyEvent,
    },
    /// The node took keyboard focus.
    FocusGained {
        /// New focus holder.
        node: NodeId,
    },
    /// The node lost keyboard focus.
    FocusLost {
        /// Previous focus holder.
        node: NodeId,
    },
    /// The pointer has rested on the node for the tooltip delay.
    TooltipDue {
        /// The dwelled-on node.
        node: NodeId,
    },
    /// A timer scheduled with [`Tree::schedule`] came due this frame.
    TimerFired {
        /// Node the timer was scheduled on.
        node: NodeId,
        /// Host-chosen tag passed to `schedule`.
        tag: u32,
    },
    /// A drag session's payload moved onto this node.
    DragEnter {
        /// New drop candidate.
        node: NodeId,
        /// The dragged node.
        payload: NodeId,
    },
    /// A drag session's payload moved off this node, or the session ended
    /// invalid over it.
    DragLeave {
        /// Previous drop candidate.
        node: NodeId,
        /// The dragged node.
        payload: NodeId,
    },
    /// Fires on the current drop candidate every frame while dragging.
    DragOver {
        /// Current drop candidate.
        node: NodeId,
        /// The dragged node.
        payload: NodeId,
        /// Pointer position this frame.
        position: Point,
    },
    /// The drag session ended over this node with the drop still valid.
    Drop {
        /// Drop target; the desktop root when the payload was over nothing.
        node: NodeId,
        /// The dropped node, already detached from the root.
        payload: NodeId,
        /// Pointer position at release.
        position: Point,
    },
}

/// The host's answer to one [`UiEvent`].
///
/// `consumed` stops wheel and key bubbling; `reject_drop` marks the
/// in-flight drop invalid from a drag enter or leave handler. Fields other
/// events do not read are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventReply {
    /// Stop offering this event to ancestors.
    pub consumed: bool,
    /// Mark the pending drop invalid.
    pub reject_drop: bool,
}

impl EventReply {
    /// Not handled; bubbling continues.
    pub const IGNORED: Self = Self {
        consumed: false,
        reject_drop: false,
    };

    /// Handled; stop bubbling.
    pub const CONSUMED: Self = Self {
        consumed: true,
        reject_drop: false,
    };

    /// Refuse the pending drop.
    pub const REJECT_DROP: Self = Self {
        consumed: false,
        reject_drop: true,
    };
}

/// Host callback receiving every routed event.
///
/// Handlers run synchronously during the frame. They may mutate the tree;
/// while an update pass holds collections locked, structural changes defer
/// to the usual cleanup points.
pub type EventHandler<'a> = &'a mut dyn FnMut(&mut Tree, &UiEvent) -> EventReply;
