// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame input snapshots supplied by the host.
//!
//! The desktop never polls hardware. Once per frame the host hands it a
//! [`FrameInput`]: where the pointer is, what each button did since the last
//! frame, the wheel delta, and the key events that arrived. Button state is
//! *transitional*: the host reports went-down / still-down / went-up, so the
//! desktop does not have to diff snapshots itself.

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// A pointer button the desktop routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// The primary (usually left) button; drives clicks, focus, and drags.
    Primary,
    /// The secondary (usually right) button.
    Secondary,
    /// The middle button or wheel press.
    Middle,
}

impl PointerButton {
    /// Number of routed buttons.
    pub const COUNT: usize = 3;

    /// All routed buttons, in index order.
    pub const ALL: [Self; Self::COUNT] = [Self::Primary, Self::Secondary, Self::Middle];

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
            Self::Middle => 2,
        }
    }
}

/// What one button did between the previous frame and this one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ButtonState {
    /// Up, and was up last frame too.
    #[default]
    Idle,
    /// Went down this frame.
    Pressed,
    /// Down since an earlier frame.
    Held,
    /// Went up this frame.
    Released,
}

impl ButtonState {
    /// The button is down at the end of this frame.
    pub const fn is_down(self) -> bool {
        matches!(self, Self::Pressed | Self::Held)
    }

    /// The button transitioned down this frame.
    pub const fn went_down(self) -> bool {
        matches!(self, Self::Pressed)
    }

    /// The button transitioned up this frame.
    pub const fn went_up(self) -> bool {
        matches!(self, Self::Released)
    }
}

bitflags::bitflags! {
    /// Modifier keys held while a key event fired.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Either shift key.
        const SHIFT   = 1 << 0;
        /// Either control key.
        const CONTROL = 1 << 1;
        /// Either alt key.
        const ALT     = 1 << 2;
    }
}

/// A key the host reports.
///
/// The desktop itself only interprets [`Key::Tab`] (focus cycling);
/// everything else routes to the focused node and bubbles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Focus traversal; shift reverses direction.
    Tab,
    /// Enter / return.
    Enter,
    /// Escape.
    Escape,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// A printable character.
    Character(char),
}

/// One key press, with the modifiers held at the time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key that went down.
    pub key: Key,
    /// Modifiers held while it did.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press with no modifiers.
    pub const fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// A key press with shift held.
    pub const fn shifted(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::SHIFT,
        }
    }
}

/// Everything the host observed since the previous frame.
///
/// Build one per frame with [`FrameInput::new`] and fill in what happened;
/// unmentioned fields mean "nothing".
///
/// ```rust
/// use espalier_desktop::{FrameInput, PointerButton, ButtonState};
/// use kurbo::Point;
///
/// let input = FrameInput::new(16)
///     .with_pointer(Point::new(120.0, 48.0))
///     .with_button(PointerButton::Primary, ButtonState::Pressed);
/// assert!(input.button(PointerButton::Primary).went_down());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FrameInput {
    /// Pointer position in screen space. A pointer outside the root finds
    /// no hot node.
    pub pointer: Point,
    /// Per-button transition state, indexed by [`PointerButton`].
    pub buttons: [ButtonState; PointerButton::COUNT],
    /// Wheel travel this frame; zero means no wheel activity.
    pub wheel: Vec2,
    /// Key events in arrival order.
    pub keys: SmallVec<[KeyEvent; 4]>,
    /// Milliseconds since the previous frame.
    pub elapsed_ms: u64,
}

impl FrameInput {
    /// An idle frame advancing by `elapsed_ms`: pointer at the origin, no
    /// buttons, no wheel, no keys.
    pub fn new(elapsed_ms: u64) -> Self {
        Self {
            pointer: Point::ZERO,
            buttons: [ButtonState::Idle; PointerButton::COUNT],
            wheel: Vec2::ZERO,
            keys: SmallVec::new(),
            elapsed_ms,
        }
    }

    /// The transition state of `button` this frame.
    pub const fn button(&self, button: PointerButton) -> ButtonState {
        self.buttons[button.index()]
    }

    /// Returns `true` if any button is down at the end of this frame.
    pub fn any_button_down(&self) -> bool {
        self.buttons.iter().any(|b| b.is_down())
    }

    /// This frame with the pointer at `position`.
    #[must_use]
    pub fn with_pointer(mut self, position: Point) -> Self {
        self.pointer = position;
        self
    }

    /// This frame with `button` in `state`.
    #[must_use]
    pub fn with_button(mut self, button: PointerButton, state: ButtonState) -> Self {
        self.buttons[button.index()] = state;
        self
    }

    /// This frame with a wheel delta.
    #[must_use]
    pub fn with_wheel(mut self, delta: Vec2) -> Self {
        self.wheel = delta;
        self
    }

    /// This frame with `key` appended to the key queue.
    #[must_use]
    pub fn with_key(mut self, key: KeyEvent) -> Self {
        self.keys.push(key);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_frame_reports_nothing() {
        let input = FrameInput::new(16);
        assert!(!input.any_button_down());
        assert_eq!(input.wheel, Vec2::ZERO);
        assert!(input.keys.is_empty());
        for button in PointerButton::ALL {
            assert_eq!(input.button(button), ButtonState::Idle);
        }
    }

    #[test]
    fn transitions_classify() {
        assert!(ButtonState::Pressed.is_down());
        assert!(ButtonState::Held.is_down());
        assert!(!ButtonState::Released.is_down());
        assert!(ButtonState::Released.went_up());
        assert!(!ButtonState::Held.went_down());
    }

    #[test]
    fn builders_compose() {
        let input = FrameInput::new(8)
            .with_button(PointerButton::Middle, ButtonState::Held)
            .with_wheel(Vec2::new(0.0, -3.0))
            .with_key(KeyEvent::shifted(Key::Tab));
        assert!(input.any_button_down());
        assert_eq!(input.keys.len(), 1);
        assert!(input.keys[0].modifiers.contains(Modifiers::SHIFT));
    }
}
