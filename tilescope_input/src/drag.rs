// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pointer drag tracking for panning the view.
//!
//! A drag begins on a left-button press inside the view area and ends on
//! release. Each pointer move while dragging yields the screen-space delta
//! since the previous move; the viewer feeds that straight into
//! `Viewport::pan_by_view`.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use tilescope_input::drag::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(100.0, 100.0));
//!
//! assert_eq!(drag.update(Point::new(104.0, 97.0)), Some(Vec2::new(4.0, -3.0)));
//! assert_eq!(drag.update(Point::new(110.0, 97.0)), Some(Vec2::new(6.0, 0.0)));
//! assert_eq!(drag.total_offset(Point::new(110.0, 97.0)), Some(Vec2::new(10.0, -3.0)));
//!
//! drag.end();
//! assert_eq!(drag.update(Point::new(0.0, 0.0)), None);
//! ```

use kurbo::{Point, Vec2};

/// Start and last pointer position of an active drag.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    origin: Option<Point>,
    last: Option<Point>,
}

impl DragState {
    /// Begins a drag at `pos`, replacing any drag in progress.
    pub fn start(&mut self, pos: Point) {
        self.origin = Some(pos);
        self.last = Some(pos);
    }

    /// Records a pointer move and returns the delta since the previous one.
    ///
    /// Returns `None` when no drag is active.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        self.origin?;
        let delta = self.last.map(|last| pos - last);
        self.last = Some(pos);
        delta
    }

    /// Offset of `pos` from where the drag began.
    #[must_use]
    pub fn total_offset(&self, pos: Point) -> Option<Vec2> {
        self.origin.map(|origin| pos - origin)
    }

    /// Returns `true` once the pointer has strayed more than `threshold`
    /// pixels from the drag origin.
    ///
    /// Front ends use this to tell a click from a pan.
    #[must_use]
    pub fn has_moved(&self, threshold: f64) -> bool {
        match (self.origin, self.last) {
            (Some(origin), Some(last)) => (last - origin).hypot() > threshold,
            _ => false,
        }
    }

    /// Ends the drag.
    pub fn end(&mut self) {
        self.origin = None;
        self.last = None;
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_state_reports_nothing() {
        let mut drag = DragState::default();
        assert!(!drag.is_dragging());
        assert_eq!(drag.update(Point::new(3.0, 4.0)), None);
        assert_eq!(drag.total_offset(Point::new(3.0, 4.0)), None);
        assert!(!drag.has_moved(0.0));
    }

    #[test]
    fn deltas_are_incremental() {
        let mut drag = DragState::default();
        drag.start(Point::ZERO);
        assert_eq!(drag.update(Point::new(5.0, 3.0)), Some(Vec2::new(5.0, 3.0)));
        assert_eq!(drag.update(Point::new(8.0, 7.0)), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(drag.update(Point::new(8.0, 7.0)), Some(Vec2::ZERO));
    }

    #[test]
    fn restart_moves_origin() {
        let mut drag = DragState::default();
        drag.start(Point::ZERO);
        drag.update(Point::new(10.0, 10.0));

        drag.start(Point::new(50.0, 60.0));
        assert_eq!(
            drag.total_offset(Point::new(55.0, 65.0)),
            Some(Vec2::new(5.0, 5.0))
        );
    }

    #[test]
    fn movement_threshold() {
        let mut drag = DragState::default();
        drag.start(Point::new(10.0, 10.0));
        drag.update(Point::new(12.0, 10.0));
        assert!(!drag.has_moved(3.0));
        drag.update(Point::new(13.0, 14.0));
        assert!(drag.has_moved(3.0));
    }

    #[test]
    fn end_resets() {
        let mut drag = DragState::default();
        drag.start(Point::new(1.0, 2.0));
        drag.end();
        assert_eq!(drag, DragState::default());
    }
}
