// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

use kurbo::Point;

/// Smallest window width accepted on resize.
pub const MIN_WINDOW_WIDTH: u32 = 600;
/// Smallest window height accepted on resize.
pub const MIN_WINDOW_HEIGHT: u32 = 400;

bitflags::bitflags! {
    /// Keyboard modifiers held during an input event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Either Shift key.
        const SHIFT = 0b0000_0001;
        /// Either Control key (Command on macOS front ends).
        const CTRL  = 0b0000_0010;
        /// Either Alt/Option key.
        const ALT   = 0b0000_0100;
    }
}

impl Modifiers {
    /// Returns `true` if a click with these modifiers should toggle the tile
    /// instead of replacing the selection.
    #[must_use]
    pub fn is_multi_select(self) -> bool {
        self.intersects(Self::SHIFT | Self::CTRL)
    }
}

/// A key, as far as viewer shortcuts are concerned.
///
/// Printable keys are carried as the character they produce; front ends
/// should report the unshifted character where they can, though `+` and `_`
/// are bound alongside `=` and `-` for layouts that report shifted ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable key.
    Char(char),
    /// The F1 function key.
    F1,
    /// Escape.
    Escape,
    /// Enter/Return.
    Enter,
    /// Any other key, identified by a toolkit-specific code.
    Other(u32),
}

/// Mouse buttons distinguished by the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Primary button: select and drag.
    Left,
    /// Middle button.
    Middle,
    /// Secondary button.
    Right,
}

/// Toolkit-neutral input event.
///
/// Positions are in window pixels with the origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A button was pressed.
    PointerDown {
        /// Pointer position.
        pos: Point,
        /// Button pressed.
        button: PointerButton,
        /// Modifiers held.
        modifiers: Modifiers,
    },
    /// A button was released.
    PointerUp {
        /// Pointer position.
        pos: Point,
        /// Button released.
        button: PointerButton,
    },
    /// The pointer moved.
    PointerMove {
        /// New pointer position.
        pos: Point,
    },
    /// The pointer left the window.
    PointerLeave,
    /// Wheel scrolled; positive `delta` is away from the user (zoom in).
    Wheel {
        /// Pointer position during the scroll.
        pos: Point,
        /// Scroll amount in notches.
        delta: f64,
    },
    /// A key was pressed.
    Key {
        /// The key.
        key: Key,
        /// Modifiers held.
        modifiers: Modifiers,
    },
    /// The window was resized.
    Resize {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
    /// The window is closing.
    Quit,
}

/// Applies the minimum window size to a requested size.
#[must_use]
pub fn clamp_window_size(width: u32, height: u32) -> (u32, u32) {
    (width.max(MIN_WINDOW_WIDTH), height.max(MIN_WINDOW_HEIGHT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_select_modifiers() {
        assert!(Modifiers::SHIFT.is_multi_select());
        assert!(Modifiers::CTRL.is_multi_select());
        assert!((Modifiers::CTRL | Modifiers::ALT).is_multi_select());
        assert!(!Modifiers::ALT.is_multi_select());
        assert!(!Modifiers::empty().is_multi_select());
    }

    #[test]
    fn window_size_minimum() {
        assert_eq!(clamp_window_size(320, 200), (600, 400));
        assert_eq!(clamp_window_size(1280, 300), (1280, 400));
        assert_eq!(clamp_window_size(1280, 720), (1280, 720));
    }
}
