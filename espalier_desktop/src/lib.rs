// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=espalier_desktop --heading-base-level=0

//! Espalier Desktop: frame-driven input routing over an Espalier tree.
//!
//! [`Desktop`] owns a [`Tree`](espalier_tree::Tree), a root node covering the
//! desktop area, and all the cross-frame pointer and keyboard state a
//! windowing surface needs: the hot node, the active press, keyboard focus,
//! the modal and dropdown stacks, and the drag-and-drop session. Hosts feed
//! it one [`FrameInput`] per render tick; the desktop routes the input into
//! [`UiEvent`]s delivered to a host callback, then drives the tree's update,
//! layout and late-update passes and hands back a display list from
//! [`Desktop::draw`].
//!
//! Routing follows familiar desktop conventions: presses raise the window
//! chain under the pointer and move focus to the nearest focusable node,
//! clicks and double clicks come from press/release pairing on the same
//! node, TAB cycles focus (within the topmost modal while one is active),
//! a registered modal suppresses presses outside its reach, dropdowns
//! collapse on outside clicks, and a drag session turns hit-testing into
//! drop targeting with enter/over/leave/drop events.
//!
//! ## Usage
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use espalier_desktop::{
//!     ButtonState, Desktop, EventReply, FrameInput, PointerButton, UiEvent,
//! };
//! use espalier_tree::{NodeDesc, NodeFlags, Slot};
//!
//! let mut desktop = Desktop::new(Size::new(640.0, 480.0));
//! let root = desktop.root();
//! let window = desktop.tree_mut().insert(
//!     Some((root, Slot::Logical)),
//!     NodeDesc::with_bounds(Rect::new(40.0, 40.0, 360.0, 280.0)),
//! );
//! desktop.tree_mut().set_flag(window, NodeFlags::WINDOW, true);
//! let button = desktop.tree_mut().insert(
//!     Some((window, Slot::Logical)),
//!     NodeDesc::with_bounds(Rect::new(10.0, 10.0, 110.0, 34.0)),
//! );
//! desktop.tree_mut().set_flag(button, NodeFlags::FOCUSABLE, true);
//!
//! // One frame to lay the scene out before pointing at it.
//! desktop.frame(&FrameInput::new(16), &mut |_, _| EventReply::IGNORED);
//!
//! let at_button = Point::new(60.0, 60.0);
//! let press = FrameInput::new(16)
//!     .with_pointer(at_button)
//!     .with_button(PointerButton::Primary, ButtonState::Pressed);
//! desktop.frame(&press, &mut |_, _| EventReply::IGNORED);
//!
//! let mut clicked = None;
//! let release = FrameInput::new(16)
//!     .with_pointer(at_button)
//!     .with_button(PointerButton::Primary, ButtonState::Released);
//! desktop.frame(&release, &mut |_tree, event| {
//!     if let UiEvent::Click { node, .. } = event {
//!         clicked = Some(*node);
//!     }
//!     EventReply::CONSUMED
//! });
//!
//! assert_eq!(clicked, Some(button));
//! assert_eq!(desktop.focused(), Some(button));
//! ```
//!
//! Event handlers get `&mut Tree` and may edit structure freely; edits made
//! mid-traversal defer per the collection rules. Desktop-level moves
//! (opening dropdowns, registering modals, starting drags) are methods on
//! [`Desktop`] itself, so hosts record the intent in the handler and apply
//! it between frames.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod desktop;
mod event;
mod input;
mod overlay;

pub use desktop::Desktop;
pub use event::{EventHandler, EventReply, UiEvent};
pub use input::{ButtonState, FrameInput, Key, KeyEvent, Modifiers, PointerButton};
