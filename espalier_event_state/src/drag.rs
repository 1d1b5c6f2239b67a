// Copyright 2025 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag threshold detection.
//!
//! A press is not a drag until the pointer has moved far enough. The monitor
//! arms on press, compares squared distances against a squared threshold on
//! every move, and reports exactly once when the threshold is crossed. The
//! host starts its drag operation on that report and disarms on release.
//!
//! ## Usage
//!
//! ```
//! use espalier_event_state::drag::DragMonitor;
//! use kurbo::Point;
//!
//! let mut monitor = DragMonitor::new();
//!
//! monitor.arm(Point::new(10.0, 10.0));
//! assert!(!monitor.track(Point::new(11.0, 10.0))); // within threshold
//! assert!(monitor.track(Point::new(20.0, 10.0))); // drag detected
//! assert!(!monitor.track(Point::new(30.0, 10.0))); // reported only once
//!
//! monitor.disarm();
//! ```

use kurbo::Point;

/// Fires once per press when pointer travel exceeds a threshold.
#[derive(Clone, Copy, Debug)]
pub struct DragMonitor {
    /// Minimum pointer travel before a press counts as a drag, in pixels.
    pub threshold: f64,
    armed: Option<Armed>,
}

#[derive(Clone, Copy, Debug)]
struct Armed {
    origin: Point,
    fired: bool,
}

impl DragMonitor {
    /// Create a monitor with the default 4 px threshold.
    pub const fn new() -> Self {
        Self {
            threshold: 4.0,
            armed: None,
        }
    }

    /// Create a monitor with a custom threshold in pixels.
    pub const fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            armed: None,
        }
    }

    /// Arm the monitor at the press position.
    ///
    /// Re-arming while armed restarts measurement from the new origin.
    pub fn arm(&mut self, origin: Point) {
        self.armed = Some(Armed {
            origin,
            fired: false,
        });
    }

    /// Feed a pointer position; returns `true` exactly once per press, when
    /// travel from the origin first exceeds the threshold.
    ///
    /// Distances are compared squared, so no square root is taken per move.
    pub fn track(&mut self, position: Point) -> bool {
        let Some(armed) = self.armed.as_mut() else {
            return false;
        };
        if armed.fired {
            return false;
        }
        if (position - armed.origin).hypot2() > self.threshold * self.threshold {
            armed.fired = true;
            return true;
        }
        false
    }

    /// Release the press; the monitor goes idle.
    pub fn disarm(&mut self) {
        self.armed = None;
    }

    /// Returns `true` between [`DragMonitor::arm`] and [`DragMonitor::disarm`].
    pub const fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Returns `true` once the threshold has been crossed for this press.
    pub fn has_fired(&self) -> bool {
        self.armed.is_some_and(|a| a.fired)
    }

    /// The press origin while armed.
    pub fn origin(&self) -> Option<Point> {
        self.armed.map(|a| a.origin)
    }
}

impl Default for DragMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_past_the_threshold() {
        let mut m = DragMonitor::with_threshold(3.0);
        m.arm(Point::new(0.0, 0.0));
        assert!(!m.track(Point::new(2.0, 0.0)));
        assert!(m.track(Point::new(4.0, 0.0)));
        assert!(m.has_fired());
        assert!(!m.track(Point::new(50.0, 50.0)));
    }

    #[test]
    fn exact_threshold_does_not_fire() {
        let mut m = DragMonitor::with_threshold(4.0);
        m.arm(Point::new(0.0, 0.0));
        assert!(!m.track(Point::new(4.0, 0.0)));
        assert!(!m.has_fired());
    }

    #[test]
    fn unarmed_tracking_is_inert() {
        let mut m = DragMonitor::new();
        assert!(!m.track(Point::new(100.0, 100.0)));
        assert!(!m.is_armed());
    }

    #[test]
    fn disarm_resets_for_the_next_press() {
        let mut m = DragMonitor::with_threshold(1.0);
        m.arm(Point::new(0.0, 0.0));
        assert!(m.track(Point::new(5.0, 0.0)));
        m.disarm();
        assert!(!m.is_armed());
        m.arm(Point::new(5.0, 0.0));
        assert!(!m.has_fired());
        assert!(m.track(Point::new(10.0, 0.0)));
    }

    #[test]
    fn rearming_moves_the_origin() {
        let mut m = DragMonitor::with_threshold(3.0);
        m.arm(Point::new(0.0, 0.0));
        m.arm(Point::new(10.0, 0.0));
        assert!(!m.track(Point::new(11.0, 0.0)));
        assert!(m.track(Point::new(14.0, 0.0)));
    }
}
