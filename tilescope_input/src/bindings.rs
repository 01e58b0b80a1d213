// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

use alloc::vec::Vec;

use crate::{Key, Modifiers};

/// Viewer action triggered by a keyboard shortcut or a panel button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Zoom in about the view centre.
    ZoomIn,
    /// Zoom out about the view centre.
    ZoomOut,
    /// Restore the home zoom and centre the tileset.
    ResetView,
    /// Show or hide the UI panel.
    TogglePanel,
    /// Show or hide grid lines.
    ToggleGrid,
    /// Show or hide tile number labels.
    ToggleNumbers,
    /// Show or hide the background dim overlay.
    ToggleOverlay,
    /// Copy the selected tile IDs to the clipboard.
    CopyIds,
    /// Prompt for a tile ID and jump to it.
    Search,
    /// Prompt for an image and load it.
    OpenImage,
    /// Prompt for a destination and export the tileset.
    Export,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Binding {
    key: Key,
    modifiers: Modifiers,
    command: Command,
}

/// Table from key chords to [`Command`]s.
///
/// Letters match case-insensitively and Shift is ignored, so `+` typed as
/// Shift+`=` still zooms in. Ctrl and Alt must match exactly.
#[derive(Clone, Debug)]
pub struct KeyBindings {
    bindings: Vec<Binding>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let none = Modifiers::empty();
        let ctrl = Modifiers::CTRL;
        let mut table = Self::empty();
        table.bind(Key::Char('+'), none, Command::ZoomIn);
        table.bind(Key::Char('='), none, Command::ZoomIn);
        table.bind(Key::Char('-'), none, Command::ZoomOut);
        table.bind(Key::Char('_'), none, Command::ZoomOut);
        table.bind(Key::Char('r'), none, Command::ResetView);
        table.bind(Key::F1, none, Command::TogglePanel);
        table.bind(Key::Char('g'), none, Command::ToggleGrid);
        table.bind(Key::Char('n'), none, Command::ToggleNumbers);
        table.bind(Key::Char('b'), none, Command::ToggleOverlay);
        table.bind(Key::Char('c'), ctrl, Command::CopyIds);
        table.bind(Key::Char('f'), ctrl, Command::Search);
        table.bind(Key::Char('o'), ctrl, Command::OpenImage);
        table.bind(Key::Char('e'), ctrl, Command::Export);
        table
    }
}

impl KeyBindings {
    /// Creates a table with no bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Binds a chord to `command`, replacing any previous binding of the chord.
    pub fn bind(&mut self, key: Key, modifiers: Modifiers, command: Command) {
        let key = normalize(key);
        let modifiers = significant(modifiers);
        self.bindings
            .retain(|b| !(b.key == key && b.modifiers == modifiers));
        self.bindings.push(Binding {
            key,
            modifiers,
            command,
        });
    }

    /// Removes every chord bound to `command`.
    pub fn unbind(&mut self, command: Command) {
        self.bindings.retain(|b| b.command != command);
    }

    /// Looks up the command for a key press.
    #[must_use]
    pub fn command_for(&self, key: Key, modifiers: Modifiers) -> Option<Command> {
        let key = normalize(key);
        let modifiers = significant(modifiers);
        self.bindings
            .iter()
            .find(|b| b.key == key && b.modifiers == modifiers)
            .map(|b| b.command)
    }
}

fn normalize(key: Key) -> Key {
    match key {
        Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

fn significant(modifiers: Modifiers) -> Modifiers {
    modifiers & (Modifiers::CTRL | Modifiers::ALT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_viewer_shortcuts() {
        let keys = KeyBindings::default();
        let none = Modifiers::empty();
        assert_eq!(keys.command_for(Key::Char('='), none), Some(Command::ZoomIn));
        assert_eq!(keys.command_for(Key::Char('_'), none), Some(Command::ZoomOut));
        assert_eq!(keys.command_for(Key::Char('R'), none), Some(Command::ResetView));
        assert_eq!(keys.command_for(Key::F1, none), Some(Command::TogglePanel));
        assert_eq!(keys.command_for(Key::Char('n'), none), Some(Command::ToggleNumbers));
        assert_eq!(keys.command_for(Key::Char('b'), none), Some(Command::ToggleOverlay));
        assert_eq!(keys.command_for(Key::Char('F'), Modifiers::CTRL), Some(Command::Search));
        assert_eq!(keys.command_for(Key::Escape, none), None);
    }

    #[test]
    fn shift_is_ignored_ctrl_is_not() {
        let keys = KeyBindings::default();
        assert_eq!(
            keys.command_for(Key::Char('+'), Modifiers::SHIFT),
            Some(Command::ZoomIn)
        );
        assert_eq!(
            keys.command_for(Key::Char('c'), Modifiers::CTRL | Modifiers::SHIFT),
            Some(Command::CopyIds)
        );
        assert_eq!(keys.command_for(Key::Char('g'), Modifiers::CTRL), None);
    }

    #[test]
    fn rebinding_replaces_chord() {
        let mut keys = KeyBindings::default();
        keys.bind(Key::Char('g'), Modifiers::empty(), Command::ToggleNumbers);
        assert_eq!(
            keys.command_for(Key::Char('g'), Modifiers::empty()),
            Some(Command::ToggleNumbers)
        );

        keys.unbind(Command::ToggleNumbers);
        assert_eq!(keys.command_for(Key::Char('g'), Modifiers::empty()), None);
        assert_eq!(keys.command_for(Key::Char('n'), Modifiers::empty()), None);
    }
}
