// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! The JSON UI theme.
//!
//! A theme file is an object keyed by element id (`defaults`, `button`,
//! `#ui_panel`, ...). Each element may carry `colours`, `font` and `misc`
//! objects; only colours are interpreted here, the rest is kept for the
//! embedding toolkit.
//!
//! ```json
//! {
//!     "defaults": { "colours": { "normal_text": "#DCDCDC" } },
//!     "#ui_panel": { "colours": { "dark_bg": "#1E2832" } }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Rgba;

/// Errors loading a theme file.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// The file could not be read.
    #[error("{}: {source}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The file is not a valid theme.
    #[error("{}: {source}", path.display())]
    Json {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// No candidate location holds the file.
    #[error("theme file `{0}` not found next to the executable or in the working directory")]
    NotFound(String),
}

/// Styling block for one element id.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ThemeElement {
    /// Colour name to `#RRGGBB[AA]`.
    #[serde(default)]
    pub colours: BTreeMap<String, String>,
    /// Font description, passed through.
    #[serde(default)]
    pub font: serde_json::Map<String, serde_json::Value>,
    /// Miscellaneous element parameters, passed through.
    #[serde(default)]
    pub misc: serde_json::Map<String, serde_json::Value>,
}

/// A parsed UI theme.
///
/// An empty theme (no elements) is what the viewer uses when the file is
/// missing; every lookup then falls through to the caller's fallback.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct Theme {
    elements: BTreeMap<String, ThemeElement>,
}

impl Theme {
    /// A theme with no elements.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses theme JSON.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Loads a theme file.
    pub fn load(path: &Path) -> Result<Self, ThemeError> {
        let text = fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ThemeError::Json {
            path: path.to_owned(),
            source,
        })
    }

    /// Finds `file_name` next to the running executable, then in the
    /// working directory. Absolute names are used as given.
    pub fn resolve(file_name: &str) -> Result<PathBuf, ThemeError> {
        let candidate = Path::new(file_name);
        if candidate.is_absolute() {
            return if candidate.is_file() {
                Ok(candidate.to_owned())
            } else {
                Err(ThemeError::NotFound(file_name.to_owned()))
            };
        }
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_owned));
        let cwd = std::env::current_dir().ok();
        exe_dir
            .into_iter()
            .chain(cwd)
            .map(|dir| dir.join(file_name))
            .find(|path| path.is_file())
            .ok_or_else(|| ThemeError::NotFound(file_name.to_owned()))
    }

    /// Resolves and loads `file_name`, or returns an empty theme with a
    /// warning. The file is never created.
    pub fn load_or_empty(file_name: &str) -> Self {
        match Self::resolve(file_name).and_then(|path| {
            let theme = Self::load(&path)?;
            log::info!("using theme {}", path.display());
            Ok(theme)
        }) {
            Ok(theme) => theme,
            Err(err) => {
                log::warn!("{err}; using built-in theme colours");
                Self::empty()
            }
        }
    }

    /// Element ids present in the theme.
    pub fn element_ids(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    /// Styling block of one element id.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&ThemeElement> {
        self.elements.get(id)
    }

    /// Looks up colour `name`, trying each of `ids` in order, then
    /// `defaults`.
    ///
    /// Pass the most specific id first, e.g. `["#ui_panel", "panel"]`.
    /// Values that are not plain hex colours are skipped with a debug log.
    #[must_use]
    pub fn colour(&self, name: &str, ids: &[&str]) -> Option<Rgba> {
        ids.iter()
            .copied()
            .chain(core::iter::once("defaults"))
            .filter_map(|id| self.elements.get(id).map(|el| (id, el)))
            .find_map(|(id, el)| {
                let raw = el.colours.get(name)?;
                match Rgba::from_hex(raw) {
                    Ok(c) => Some(c),
                    Err(err) => {
                        log::debug!("theme element {id}: {err}");
                        None
                    }
                }
            })
    }
}
