// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Skin lookup: style key + interaction state to bundle.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use espalier_event_state::interaction::InteractionState;
use hashbrown::HashMap;

use crate::bundle::StyleBundle;

/// The per-state bundles of one style key.
///
/// A set always carries a *base* bundle, used for every state that has no
/// explicit entry of its own. A button skin typically sets the base plus
/// `Hot` and `Pressed`; the twelve other states then render as the base
/// rather than vanishing.
///
/// # Example
///
/// ```rust
/// use espalier_style::{InteractionState, StyleBundle, StyleSet};
///
/// let base = StyleBundle::default();
/// let hot = StyleBundle { opacity: 0.9, ..base };
///
/// let set = StyleSet::new(base).with(InteractionState::Hot, hot);
/// assert_eq!(set.bundle(InteractionState::Hot).opacity, 0.9);
/// assert_eq!(set.bundle(InteractionState::Pressed).opacity, 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StyleSet {
    base: StyleBundle,
    states: Vec<(InteractionState, StyleBundle)>,
}

impl StyleSet {
    /// Creates a set whose every state renders as `base`.
    #[must_use]
    pub fn new(base: StyleBundle) -> Self {
        Self {
            base,
            states: Vec::new(),
        }
    }

    /// Sets the bundle for one state.
    ///
    /// If the state was already set, the bundle is replaced.
    #[must_use]
    pub fn with(mut self, state: InteractionState, bundle: StyleBundle) -> Self {
        match self.states.iter_mut().find(|(s, _)| *s == state) {
            Some(entry) => entry.1 = bundle,
            None => self.states.push((state, bundle)),
        }
        self
    }

    /// Returns the bundle for `state`, falling back to the base.
    #[must_use]
    pub fn bundle(&self, state: InteractionState) -> &StyleBundle {
        self.states
            .iter()
            .find(|(s, _)| *s == state)
            .map_or(&self.base, |(_, bundle)| bundle)
    }

    /// Returns the base bundle.
    #[must_use]
    pub fn base(&self) -> &StyleBundle {
        &self.base
    }
}

/// A named collection of style sets.
///
/// Nodes carry style *keys* (plain strings); the skin owns what those keys
/// look like. Resolution never fails: an unknown key falls back to the
/// skin's fallback bundle, so partially skinned scenes render with neutral
/// placeholders instead of erroring.
///
/// Skins are immutable after creation. Use [`SkinBuilder`] to construct them.
///
/// # Memory Layout
///
/// Internally, `Skin` wraps an `Rc<SkinData>`, making cloning cheap. The
/// draw side and the update-pass opacity closure can each hold a handle to
/// the same skin.
///
/// # Example
///
/// ```rust
/// use espalier_style::{InteractionState, Skin, SkinBuilder, StyleBundle, StyleSet};
///
/// let base = StyleBundle::default();
/// let pressed = StyleBundle { opacity: 0.8, ..base };
///
/// let skin = SkinBuilder::new()
///     .style("button", StyleSet::new(base).with(InteractionState::Pressed, pressed))
///     .build();
///
/// assert_eq!(skin.resolve("button", InteractionState::Pressed).opacity, 0.8);
/// // Unknown keys resolve to the fallback bundle.
/// assert_eq!(skin.resolve("missing", InteractionState::Default), StyleBundle::default());
/// ```
#[derive(Clone, Debug)]
pub struct Skin {
    inner: Rc<SkinData>,
}

/// Internal storage for skin styles.
#[derive(Debug, Default)]
struct SkinData {
    styles: HashMap<String, StyleSet>,
    fallback: StyleBundle,
}

impl Skin {
    /// Returns `true` if this skin has no style sets.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.styles.is_empty()
    }

    /// Returns the number of style sets in this skin.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.styles.len()
    }

    /// Returns `true` if this skin has a set for the style key.
    #[must_use]
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.inner.styles.contains_key(key)
    }

    /// Resolves a style key and interaction state to a bundle.
    ///
    /// Known keys resolve through their [`StyleSet`] (explicit state entry,
    /// else the set's base); unknown keys resolve to the fallback bundle.
    #[must_use]
    pub fn resolve(&self, key: &str, state: InteractionState) -> StyleBundle {
        self.inner
            .styles
            .get(key)
            .map_or(self.inner.fallback, |set| *set.bundle(state))
    }

    /// Resolves the opacity contribution of a style key and state.
    ///
    /// The signature matches the update pass's style-opacity input, so a
    /// skin handle can be wired in directly. A keyless element contributes
    /// the fallback bundle's opacity.
    #[must_use]
    pub fn opacity(&self, key: Option<&str>, state: InteractionState) -> f64 {
        match key {
            Some(key) => self.resolve(key, state).opacity,
            None => self.inner.fallback.opacity,
        }
    }

    /// Returns the bundle unknown keys resolve to.
    #[must_use]
    pub fn fallback(&self) -> &StyleBundle {
        &self.inner.fallback
    }

    /// Returns an iterator over the style keys in this skin.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.styles.keys().map(String::as_str)
    }
}

impl Default for Skin {
    fn default() -> Self {
        SkinBuilder::new().build()
    }
}

/// Builder for constructing [`Skin`] instances.
///
/// # Example
///
/// ```rust
/// use espalier_style::{SkinBuilder, StyleBundle, StyleSet};
///
/// let skin = SkinBuilder::new()
///     .style("window", StyleSet::new(StyleBundle::default()))
///     .style("button", StyleSet::new(StyleBundle::default()))
///     .build();
///
/// assert_eq!(skin.len(), 2);
/// assert!(skin.contains("window"));
/// ```
#[derive(Debug, Default)]
pub struct SkinBuilder {
    styles: HashMap<String, StyleSet>,
    fallback: StyleBundle,
}

impl SkinBuilder {
    /// Creates a new empty skin builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the style set for a key.
    ///
    /// If the key was already set, the set is replaced.
    #[must_use]
    pub fn style(mut self, key: impl Into<String>, set: StyleSet) -> Self {
        self.styles.insert(key.into(), set);
        self
    }

    /// Replaces the bundle unknown keys resolve to.
    ///
    /// Defaults to [`StyleBundle::default`].
    #[must_use]
    pub fn fallback(mut self, bundle: StyleBundle) -> Self {
        self.fallback = bundle;
        self
    }

    /// Builds the skin.
    #[must_use]
    pub fn build(self) -> Skin {
        Skin {
            inner: Rc::new(SkinData {
                styles: self.styles,
                fallback: self.fallback,
            }),
        }
    }
}
