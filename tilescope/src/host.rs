// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Services the embedding toolkit provides to a [`Session`](crate::Session).

use std::path::{Path, PathBuf};
use std::time::Instant;

use tilescope_render::ProgressBar;

/// The clipboard could not be written.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ClipboardError(pub String);

/// Dialogs, clipboard and clock supplied by the front end.
///
/// Every dialog may be cancelled by returning `None`.
pub trait Host {
    /// Asks for an image to open, starting in `initial_dir`.
    fn pick_open_path(&mut self, initial_dir: &Path) -> Option<PathBuf>;

    /// Asks where to save an export, suggesting `file_name` in `initial_dir`.
    fn pick_save_path(&mut self, initial_dir: &Path, file_name: &str) -> Option<PathBuf>;

    /// Asks for a line of text, showing `prompt`.
    fn prompt(&mut self, prompt: &str) -> Option<String>;

    /// Replaces the clipboard text.
    fn set_clipboard(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Current time, used to expire toasts.
    fn now(&self) -> Instant {
        Instant::now()
    }

    /// Called while an export renders, with the bar to show over the last
    /// frame.
    fn export_progress(&mut self, _bar: &ProgressBar) {}
}
