// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=espalier_style --heading-base-level=0

//! Espalier Style: skin resolution for scene nodes.
//!
//! Scene nodes carry a *style key* (a plain string) and the frame pipeline
//! computes an [`InteractionState`] for each of them; what those two look
//! like on screen is this crate's job. A [`Skin`] maps style keys to
//! [`StyleSet`]s, and a set maps interaction states to [`StyleBundle`]s: the
//! colours, texture-atlas region, font key, content padding and opacity a
//! renderer needs to draw the element.
//!
//! Resolution never fails. An unknown key falls back to the skin's fallback
//! bundle, and a state without an explicit entry falls back to its set's
//! base, so a half-skinned scene still renders.
//!
//! ## Usage
//!
//! ```rust
//! use espalier_style::{InteractionState, SkinBuilder, StyleBundle, StyleSet};
//! use peniko::Color;
//!
//! let base = StyleBundle {
//!     fill: Color::from_rgb8(0x00, 0x78, 0xd4),
//!     ..StyleBundle::default()
//! };
//! let hot = StyleBundle {
//!     fill: Color::from_rgb8(0x10, 0x8e, 0xe4),
//!     ..base
//! };
//!
//! let skin = SkinBuilder::new()
//!     .style("button", StyleSet::new(base).with(InteractionState::Hot, hot))
//!     .build();
//!
//! assert_eq!(skin.resolve("button", InteractionState::Hot).fill, hot.fill);
//! assert_eq!(skin.resolve("button", InteractionState::Pressed).fill, base.fill);
//! ```
//!
//! The update pass takes an opacity resolver; [`Skin::opacity`] has the
//! matching shape:
//!
//! ```rust
//! # use espalier_style::{InteractionState, SkinBuilder};
//! let skin = SkinBuilder::new().build();
//! let resolve = |key: Option<&str>, state: InteractionState| skin.opacity(key, state);
//! assert_eq!(resolve(None, InteractionState::Default), 1.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bundle;
mod skin;

pub use espalier_event_state::interaction::InteractionState;

pub use bundle::{FontKey, StyleBundle};
pub use skin::{Skin, SkinBuilder, StyleSet};
