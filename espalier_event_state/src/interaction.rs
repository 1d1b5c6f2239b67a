// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual interaction state for a single element.
//!
//! An element's rendered state is a combination of three layers:
//!
//! - a *family* chosen by persistent inputs: checked beats selected beats the
//!   plain family;
//! - a *modifier* chosen by transient inputs: disabled beats focused beats
//!   pressed beats hot beats none;
//! - an optional *override* that pins the state externally and bypasses
//!   computation entirely until cleared.
//!
//! [`InteractionState::compute`] resolves the first two layers from
//! [`StateInputs`]. The override layer is [`StateOverride`]: set it with
//! [`StateOverride::pin`] and the pinned state wins until
//! [`StateOverride::clear`] is called; there is no implicit reset.

/// The resolved visual state of an element.
///
/// One of fifteen values: five modifiers across three families. Style
/// resolution maps each value to its visual treatment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionState {
    /// Plain family, no modifier.
    #[default]
    Default,
    /// Plain family, pointer over the element.
    Hot,
    /// Plain family, pointer held down on the element.
    Pressed,
    /// Plain family, element holds keyboard focus.
    Focused,
    /// Plain family, element does not accept input.
    Disabled,
    /// Selected family, no modifier.
    Selected,
    /// Selected family, pointer over the element.
    SelectedHot,
    /// Selected family, pointer held down on the element.
    SelectedPressed,
    /// Selected family, element holds keyboard focus.
    SelectedFocused,
    /// Selected family, element does not accept input.
    SelectedDisabled,
    /// Checked family, no modifier.
    Checked,
    /// Checked family, pointer over the element.
    CheckedHot,
    /// Checked family, pointer held down on the element.
    CheckedPressed,
    /// Checked family, element holds keyboard focus.
    CheckedFocused,
    /// Checked family, element does not accept input.
    CheckedDisabled,
}

/// The raw inputs a state is computed from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StateInputs {
    /// The element accepts input. When `false` the disabled modifier wins.
    pub enabled: bool,
    /// Persistent checked/toggled input (checkbox, toggle button).
    pub checked: bool,
    /// Persistent selection membership (list rows, tabs).
    pub selected: bool,
    /// The pointer is over the element.
    pub hot: bool,
    /// The pointer is held down with the element as its press target.
    pub pressed: bool,
    /// The element holds keyboard focus.
    pub focused: bool,
}

/// Which transient modifier applies within a family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Modifier {
    None,
    Hot,
    Pressed,
    Focused,
    Disabled,
}

impl InteractionState {
    /// Resolve the state for the given inputs.
    ///
    /// Family precedence is checked over selected over plain. Modifier
    /// precedence is disabled over focused over pressed over hot: a focused
    /// element keeps its focused treatment even while the pointer presses it.
    ///
    /// ```rust
    /// use espalier_event_state::interaction::{InteractionState, StateInputs};
    ///
    /// let inputs = StateInputs {
    ///     enabled: true,
    ///     pressed: true,
    ///     focused: true,
    ///     ..StateInputs::default()
    /// };
    /// assert_eq!(InteractionState::compute(inputs), InteractionState::Focused);
    /// ```
    pub fn compute(inputs: StateInputs) -> Self {
        let modifier = if !inputs.enabled {
            Modifier::Disabled
        } else if inputs.focused {
            Modifier::Focused
        } else if inputs.pressed {
            Modifier::Pressed
        } else if inputs.hot {
            Modifier::Hot
        } else {
            Modifier::None
        };
        match (inputs.checked, inputs.selected, modifier) {
            (true, _, Modifier::None) => Self::Checked,
            (true, _, Modifier::Hot) => Self::CheckedHot,
            (true, _, Modifier::Pressed) => Self::CheckedPressed,
            (true, _, Modifier::Focused) => Self::CheckedFocused,
            (true, _, Modifier::Disabled) => Self::CheckedDisabled,
            (false, true, Modifier::None) => Self::Selected,
            (false, true, Modifier::Hot) => Self::SelectedHot,
            (false, true, Modifier::Pressed) => Self::SelectedPressed,
            (false, true, Modifier::Focused) => Self::SelectedFocused,
            (false, true, Modifier::Disabled) => Self::SelectedDisabled,
            (false, false, Modifier::None) => Self::Default,
            (false, false, Modifier::Hot) => Self::Hot,
            (false, false, Modifier::Pressed) => Self::Pressed,
            (false, false, Modifier::Focused) => Self::Focused,
            (false, false, Modifier::Disabled) => Self::Disabled,
        }
    }

    /// Returns `true` for the five checked-family states.
    pub const fn is_checked(self) -> bool {
        matches!(
            self,
            Self::Checked
                | Self::CheckedHot
                | Self::CheckedPressed
                | Self::CheckedFocused
                | Self::CheckedDisabled
        )
    }

    /// Returns `true` for the five disabled states.
    pub const fn is_disabled(self) -> bool {
        matches!(
            self,
            Self::Disabled | Self::SelectedDisabled | Self::CheckedDisabled
        )
    }
}

/// An externally pinned state that bypasses computation.
///
/// Pinning is explicit and so is release: [`StateOverride::resolve`] returns
/// the pinned state for as long as one is set, regardless of inputs, and
/// resumes computing from inputs only after [`StateOverride::clear`]. Input
/// changes never clear a pin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StateOverride {
    pinned: Option<InteractionState>,
}

impl StateOverride {
    /// No pin; states resolve from inputs.
    pub const fn new() -> Self {
        Self { pinned: None }
    }

    /// Pin `state` until [`StateOverride::clear`] is called.
    pub fn pin(&mut self, state: InteractionState) {
        self.pinned = Some(state);
    }

    /// Release the pin; the next [`StateOverride::resolve`] computes again.
    pub fn clear(&mut self) {
        self.pinned = None;
    }

    /// The pinned state, if any.
    pub const fn pinned(self) -> Option<InteractionState> {
        self.pinned
    }

    /// Resolve: the pinned state if set, the computed state otherwise.
    pub fn resolve(self, inputs: StateInputs) -> InteractionState {
        match self.pinned {
            Some(state) => state,
            None => InteractionState::compute(inputs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled() -> StateInputs {
        StateInputs {
            enabled: true,
            ..StateInputs::default()
        }
    }

    #[test]
    fn default_state_for_plain_inputs() {
        assert_eq!(
            InteractionState::compute(enabled()),
            InteractionState::Default
        );
    }

    #[test]
    fn checked_beats_selected() {
        let inputs = StateInputs {
            checked: true,
            selected: true,
            ..enabled()
        };
        assert_eq!(InteractionState::compute(inputs), InteractionState::Checked);
    }

    #[test]
    fn checked_selected_focused_resolves_to_checked_focused() {
        let inputs = StateInputs {
            checked: true,
            selected: true,
            focused: true,
            ..enabled()
        };
        assert_eq!(
            InteractionState::compute(inputs),
            InteractionState::CheckedFocused
        );
    }

    #[test]
    fn disabled_beats_every_modifier() {
        let inputs = StateInputs {
            enabled: false,
            hot: true,
            pressed: true,
            focused: true,
            selected: true,
            ..StateInputs::default()
        };
        assert_eq!(
            InteractionState::compute(inputs),
            InteractionState::SelectedDisabled
        );
    }

    #[test]
    fn focused_beats_pressed_and_hot() {
        let inputs = StateInputs {
            hot: true,
            pressed: true,
            focused: true,
            ..enabled()
        };
        assert_eq!(InteractionState::compute(inputs), InteractionState::Focused);
    }

    #[test]
    fn pressed_beats_hot() {
        let inputs = StateInputs {
            hot: true,
            pressed: true,
            ..enabled()
        };
        assert_eq!(InteractionState::compute(inputs), InteractionState::Pressed);
    }

    #[test]
    fn override_pins_until_cleared() {
        let mut over = StateOverride::new();
        over.pin(InteractionState::Pressed);
        let inputs = StateInputs {
            checked: true,
            ..enabled()
        };
        assert_eq!(over.resolve(inputs), InteractionState::Pressed);
        // Input changes do not release the pin.
        assert_eq!(over.resolve(enabled()), InteractionState::Pressed);
        over.clear();
        assert_eq!(over.resolve(inputs), InteractionState::Checked);
    }
}
