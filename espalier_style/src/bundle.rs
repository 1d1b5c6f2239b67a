// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The visual treatment of one style key in one interaction state.

use core::fmt;

use kurbo::{Insets, Rect};
use peniko::Color;

/// A key for looking up fonts in the host's font table.
///
/// Font keys are simple u16 identifiers, typically defined as constants at
/// the application level. The renderer collaborator owns the table they index
/// into; this crate only carries the key.
///
/// # Example
///
/// ```rust
/// use espalier_style::FontKey;
///
/// const BODY: FontKey = FontKey::new(0);
/// const HEADING: FontKey = FontKey::new(1);
/// const MONOSPACE: FontKey = FontKey::new(2);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontKey(u16);

impl FontKey {
    /// Creates a new font key with the given index.
    #[must_use]
    #[inline]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the underlying index of this font key.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for FontKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FontKey").field(&self.0).finish()
    }
}

impl fmt::Display for FontKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FontKey({})", self.0)
    }
}

/// Everything a renderer needs to draw one element in one state.
///
/// Bundles are plain values: resolving a style key against a
/// [`Skin`](crate::Skin) copies one out, and hosts are free to build them in
/// constants or tweak individual fields with struct-update syntax.
///
/// # Example
///
/// ```rust
/// use espalier_style::StyleBundle;
/// use kurbo::Insets;
/// use peniko::Color;
///
/// let button = StyleBundle {
///     fill: Color::from_rgb8(0x00, 0x78, 0xd4),
///     text: Color::WHITE,
///     padding: Insets::uniform_xy(12.0, 6.0),
///     ..StyleBundle::default()
/// };
/// assert_eq!(button.opacity, 1.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StyleBundle {
    /// Background fill colour.
    pub fill: Color,
    /// Border / outline colour.
    pub stroke: Color,
    /// Foreground text colour.
    pub text: Color,
    /// Region of the host's texture atlas to draw, if the element is
    /// textured rather than flat-filled.
    pub texture: Option<Rect>,
    /// Font table key for any text content.
    pub font: FontKey,
    /// Padding between the element's edge and its content.
    pub padding: Insets,
    /// Opacity contribution of this state, in `0.0..=1.0`. Multiplied into
    /// the element's effective opacity during the update pass.
    pub opacity: f64,
}

impl Default for StyleBundle {
    /// The built-in bundle: a neutral dark scheme, flat-filled, fully opaque.
    ///
    /// Unresolved style keys fall back to this, so a scene with no skin at
    /// all still renders legibly.
    fn default() -> Self {
        Self {
            fill: Color::from_rgb8(0x2d, 0x2d, 0x30),
            stroke: Color::from_rgb8(0x3f, 0x3f, 0x46),
            text: Color::from_rgb8(0xf1, 0xf1, 0xf1),
            texture: None,
            font: FontKey::new(0),
            padding: Insets::ZERO,
            opacity: 1.0,
        }
    }
}
