// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press/release pairing with click and double-click recognition.
//!
//! A click is a press and a release delivered to the same target. The release
//! itself always belongs to the press target, even when the pointer has moved
//! off the element by the time the button comes up; the click is only
//! generated when the release target matches the press target.
//!
//! A second click on the same target within the double-click window (and
//! within a small radius of the first) is reported as a double click. A
//! double click resets the chain, so a third press starts over as a plain
//! click.
//!
//! ## Usage
//!
//! ```
//! use espalier_event_state::click::{ClickTracker, Release};
//! use kurbo::Point;
//!
//! let mut tracker: ClickTracker<u32> = ClickTracker::new();
//!
//! tracker.on_down(7, Point::new(4.0, 4.0), 100);
//! // Release over a different element: the press target is released,
//! // but no click is generated.
//! assert_eq!(
//!     tracker.on_up(Some(9), Point::new(40.0, 4.0), 160),
//!     Release::Released(7)
//! );
//! ```
//!
//! One tracker follows one button. Hosts that distinguish several buttons
//! keep one tracker per button and feed each only its own transitions.

use kurbo::Point;

/// Click recognition for a single pointer button.
///
/// Tracks at most one active press and the most recent click, and classifies
/// each release as a plain release, a click, or a double click.
#[derive(Clone, Debug)]
pub struct ClickTracker<K> {
    /// The active press, if the button is currently down.
    press: Option<Press<K>>,
    /// The click a follow-up press may turn into a double click.
    last_click: Option<Press<K>>,
    /// Maximum time between two clicks of a double click (milliseconds).
    pub double_click_window: u64,
    /// Maximum distance between the two presses of a double click, or `None`
    /// for no spatial limit.
    pub double_click_radius: Option<f64>,
}

/// State of an active or completed press.
#[derive(Clone, Debug)]
pub struct Press<K> {
    /// Target element the press landed on.
    pub target: K,
    /// Pointer position at press time.
    pub down_position: Point,
    /// Timestamp of the press (milliseconds).
    pub down_time: u64,
}

/// Classification of a pointer-up event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Release<K> {
    /// No press was active; the up event has no counterpart.
    NoPress,
    /// The press target was released, but the up landed elsewhere.
    Released(K),
    /// Press and release paired up on the same target.
    Click(K),
    /// A click within the double-click window of the previous click.
    DoubleClick(K),
}

impl<K: PartialEq + Clone> ClickTracker<K> {
    /// Create a tracker with the default thresholds.
    ///
    /// Defaults to a 500 ms double-click window and a 5 px radius.
    pub fn new() -> Self {
        Self {
            press: None,
            last_click: None,
            double_click_window: 500,
            double_click_radius: Some(5.0),
        }
    }

    /// Create a tracker with custom thresholds.
    ///
    /// `double_click_radius` of `None` removes the spatial limit;
    /// `double_click_window` of `0` effectively disables double clicks.
    pub fn with_thresholds(double_click_window: u64, double_click_radius: Option<f64>) -> Self {
        Self {
            press: None,
            last_click: None,
            double_click_window,
            double_click_radius,
        }
    }

    /// Record a press on `target`.
    ///
    /// A press that arrives while another is active replaces it; the first
    /// press will never produce a click.
    pub fn on_down(&mut self, target: K, position: Point, timestamp: u64) {
        self.press = Some(Press {
            target,
            down_position: position,
            down_time: timestamp,
        });
    }

    /// Record a release and classify it.
    ///
    /// `target` is the element under the pointer at release time, or `None`
    /// when the pointer is over nothing. The double-click window is measured
    /// from the previous click's press to this release, the radius from that
    /// press's position to this release's position.
    pub fn on_up(&mut self, target: Option<K>, position: Point, timestamp: u64) -> Release<K> {
        let Some(press) = self.press.take() else {
            return Release::NoPress;
        };
        if target.as_ref() != Some(&press.target) {
            self.last_click = None;
            return Release::Released(press.target);
        }

        let chained = self.last_click.take().is_some_and(|last| {
            last.target == press.target
                && timestamp.saturating_sub(last.down_time) <= self.double_click_window
                && self
                    .double_click_radius
                    .is_none_or(|r| last.down_position.distance(position) <= r)
        });
        if chained {
            // Chain consumed: the next click starts over.
            return Release::DoubleClick(press.target);
        }
        self.last_click = Some(press.clone());
        Release::Click(press.target)
    }

    /// Drop the active press without generating anything.
    ///
    /// Returns `true` if a press was active.
    pub fn cancel(&mut self) -> bool {
        self.press.take().is_some()
    }

    /// Returns `true` while a press is active.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// The active press target, if any.
    pub fn press_target(&self) -> Option<&K> {
        self.press.as_ref().map(|p| &p.target)
    }

    /// The active press, if any.
    pub fn press(&self) -> Option<&Press<K>> {
        self.press.as_ref()
    }
}

impl<K: PartialEq + Clone> Default for ClickTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_target_generates_click() {
        let mut t: ClickTracker<u32> = ClickTracker::new();
        t.on_down(42, Point::new(10.0, 20.0), 1000);
        assert_eq!(
            t.on_up(Some(42), Point::new(12.0, 22.0), 1050),
            Release::Click(42)
        );
    }

    #[test]
    fn different_target_releases_without_click() {
        let mut t: ClickTracker<u32> = ClickTracker::new();
        t.on_down(42, Point::new(10.0, 20.0), 1000);
        assert_eq!(
            t.on_up(Some(9), Point::new(80.0, 20.0), 1050),
            Release::Released(42)
        );
    }

    #[test]
    fn release_over_nothing_still_releases_press_target() {
        let mut t: ClickTracker<u32> = ClickTracker::new();
        t.on_down(42, Point::new(10.0, 20.0), 1000);
        assert_eq!(
            t.on_up(None, Point::new(500.0, 500.0), 1050),
            Release::Released(42)
        );
    }

    #[test]
    fn up_without_down_is_no_press() {
        let mut t: ClickTracker<u32> = ClickTracker::new();
        assert_eq!(t.on_up(Some(42), Point::new(0.0, 0.0), 10), Release::NoPress);
    }

    #[test]
    fn second_click_within_window_is_double() {
        let mut t: ClickTracker<u32> = ClickTracker::new();
        t.on_down(42, Point::new(10.0, 10.0), 1000);
        assert_eq!(
            t.on_up(Some(42), Point::new(10.0, 10.0), 1040),
            Release::Click(42)
        );
        t.on_down(42, Point::new(11.0, 10.0), 1300);
        assert_eq!(
            t.on_up(Some(42), Point::new(11.0, 10.0), 1340),
            Release::DoubleClick(42)
        );
    }

    #[test]
    fn third_click_starts_a_new_chain() {
        let mut t: ClickTracker<u32> = ClickTracker::new();
        for (down, up, expected) in [
            (1000, 1020, Release::Click(42)),
            (1100, 1120, Release::DoubleClick(42)),
            (1200, 1220, Release::Click(42)),
        ] {
            t.on_down(42, Point::new(5.0, 5.0), down);
            assert_eq!(t.on_up(Some(42), Point::new(5.0, 5.0), up), expected);
        }
    }

    #[test]
    fn slow_second_click_is_single() {
        let mut t: ClickTracker<u32> = ClickTracker::with_thresholds(200, None);
        t.on_down(42, Point::new(0.0, 0.0), 1000);
        t.on_up(Some(42), Point::new(0.0, 0.0), 1020);
        t.on_down(42, Point::new(0.0, 0.0), 1500);
        assert_eq!(
            t.on_up(Some(42), Point::new(0.0, 0.0), 1520),
            Release::Click(42)
        );
    }

    #[test]
    fn distant_second_click_is_single() {
        let mut t: ClickTracker<u32> = ClickTracker::new();
        t.on_down(42, Point::new(0.0, 0.0), 1000);
        t.on_up(Some(42), Point::new(0.0, 0.0), 1020);
        t.on_down(42, Point::new(30.0, 0.0), 1100);
        assert_eq!(
            t.on_up(Some(42), Point::new(30.0, 0.0), 1120),
            Release::Click(42)
        );
    }

    #[test]
    fn double_click_needs_the_same_target() {
        let mut t: ClickTracker<u32> = ClickTracker::new();
        t.on_down(1, Point::new(0.0, 0.0), 1000);
        t.on_up(Some(1), Point::new(0.0, 0.0), 1020);
        t.on_down(2, Point::new(0.0, 0.0), 1100);
        assert_eq!(
            t.on_up(Some(2), Point::new(0.0, 0.0), 1120),
            Release::Click(2)
        );
    }

    #[test]
    fn cancel_discards_the_press() {
        let mut t: ClickTracker<u32> = ClickTracker::new();
        t.on_down(42, Point::new(0.0, 0.0), 1000);
        assert!(t.cancel());
        assert!(!t.is_pressed());
        assert_eq!(t.on_up(Some(42), Point::new(0.0, 0.0), 1020), Release::NoPress);
    }

    #[test]
    fn missed_release_breaks_the_chain() {
        let mut t: ClickTracker<u32> = ClickTracker::new();
        t.on_down(42, Point::new(0.0, 0.0), 1000);
        t.on_up(Some(42), Point::new(0.0, 0.0), 1020);
        // Press drifts off the target before release.
        t.on_down(42, Point::new(0.0, 0.0), 1100);
        t.on_up(Some(7), Point::new(90.0, 0.0), 1120);
        t.on_down(42, Point::new(0.0, 0.0), 1200);
        assert_eq!(
            t.on_up(Some(42), Point::new(0.0, 0.0), 1220),
            Release::Click(42)
        );
    }
}
