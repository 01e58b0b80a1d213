// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! TileScope Config: settings file and UI theme.
//!
//! Settings live in a commented INI file (`tilescope_config.ini` by default).
//! [`ConfigFile::load_or_create`] reads it, fills in anything missing and
//! writes it back; a missing file is created with every key documented.
//! Typed values are exposed as [`Settings`], passed explicitly to whoever
//! needs them.
//!
//! The UI theme is a JSON file looked up next to the executable, then in
//! the working directory ([`Theme::load_or_empty`]). Colour lookups fall back
//! from an object id to its element type to `defaults`.
//!
//! ## Minimal example
//!
//! ```rust
//! use tilescope_config::ini::IniDocument;
//! use tilescope_config::{Rgba, Settings};
//!
//! let doc = IniDocument::parse("[DisplayColors]\ngrid_color = (90, 90, 90) ; lighter\n").unwrap();
//! let settings = Settings::from_document(&doc);
//! assert_eq!(settings.display.grid_color, Rgba::rgb(90, 90, 90));
//! // Keys that are not in the file keep their defaults.
//! assert_eq!(settings.display.background, Rgba::rgb(25, 30, 40));
//! ```

pub mod ini;

mod colour;
mod settings;
mod store;
mod theme;

pub use colour::{ParseColourError, Rgba};
pub use settings::{
    DisplayColors, ExportScope, ExportSettings, FontSettings, HighlightColors,
    ParseExportScopeError, Settings, TextColors, ThemeFile, TilesetSettings, Toggles,
    TooltipAppearance, UiAppearance,
};
pub use store::{ConfigError, ConfigFile, LoadStatus};
pub use theme::{Theme, ThemeElement, ThemeError};

/// File name used when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "tilescope_config.ini";
