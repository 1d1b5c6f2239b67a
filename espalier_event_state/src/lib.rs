// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=espalier_event_state --heading-base-level=0

//! Espalier Event State: interaction state machines for UI input.
//!
//! This crate provides small, focused state machines for pointer and keyboard
//! interactions that need tracking across multiple events. Each module handles
//! one pattern:
//!
//! - [`interaction`]: the visual interaction state of a single element
//!   (hot/pressed/focused layered over checked/selected/disabled), with an
//!   explicit override for externally pinned states
//! - [`click`]: press/release pairing with click and double-click recognition
//! - [`drag`]: squared-distance drag thresholds that fire once per press
//! - [`hover`]: enter/leave transitions as the pointer moves between elements
//!
//! The machines accept pre-computed information (hit-test targets, root→target
//! paths, raw pointer positions) and produce transitions; they do not assume
//! any particular scene graph or event loop. Element handles are a generic
//! `K`, so applications plug in their own id types.
//!
//! ## Usage
//!
//! Interaction state resolution:
//!
//! ```rust
//! use espalier_event_state::interaction::{InteractionState, StateInputs};
//!
//! let state = InteractionState::compute(StateInputs {
//!     enabled: true,
//!     checked: true,
//!     selected: true,
//!     hot: false,
//!     pressed: false,
//!     focused: true,
//! });
//! assert_eq!(state, InteractionState::CheckedFocused);
//! ```
//!
//! Click and double-click recognition:
//!
//! ```rust
//! # #[cfg(feature = "click")]
//! # fn example() {
//! use kurbo::Point;
//! use espalier_event_state::click::{ClickTracker, Release};
//!
//! let mut clicks: ClickTracker<u32> = ClickTracker::new();
//! clicks.on_down(42, Point::new(10.0, 10.0), 1_000);
//! let release = clicks.on_up(Some(42), Point::new(11.0, 10.0), 1_080);
//! assert_eq!(release, Release::Click(42));
//!
//! clicks.on_down(42, Point::new(11.0, 10.0), 1_200);
//! let release = clicks.on_up(Some(42), Point::new(11.0, 10.0), 1_260);
//! assert_eq!(release, Release::DoubleClick(42));
//! # }
//! # #[cfg(feature = "click")]
//! # example();
//! ```
//!
//! Hover transitions from root→target paths:
//!
//! ```rust
//! use espalier_event_state::hover::{HoverEvent, HoverState};
//!
//! let mut hover = HoverState::new();
//! let events = hover.update_path(&[1, 2, 3]);
//! assert_eq!(
//!     events,
//!     vec![HoverEvent::Enter(1), HoverEvent::Enter(2), HoverEvent::Enter(3)]
//! );
//!
//! // Moving to a sibling leaves the inner element first.
//! let events = hover.update_path(&[1, 2, 4]);
//! assert_eq!(events, vec![HoverEvent::Leave(3), HoverEvent::Enter(4)]);
//! ```
//!
//! ## Features
//!
//! - `click`: press/click/double-click recognition (requires `kurbo`)
//! - `drag`: drag threshold tracking (requires `kurbo`)
//!
//! This crate is `no_std` compatible (with `alloc`) for all modules.

#![no_std]

extern crate alloc;

#[cfg(feature = "click")]
pub mod click;

#[cfg(feature = "drag")]
pub mod drag;
pub mod hover;
pub mod interaction;
