// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! TileScope: inspect tileset images.
//!
//! A [`Session`] ties the building blocks together: it loads settings and
//! a [`Tileset`], keeps the pan/zoom view, the selection, hover and toggles,
//! reacts to [`InputEvent`](tilescope_input::InputEvent)s, and renders frames
//! and exports. Dialogs and the clipboard belong to the embedding toolkit and
//! are reached through the [`Host`] trait.
//!
//! ## Minimal example
//!
//! ```rust
//! use tilescope::{Session, Tileset};
//! use tilescope_config::{ConfigFile, Theme};
//!
//! let dir = std::env::temp_dir().join("tilescope_doc");
//! std::fs::create_dir_all(&dir).unwrap();
//! let config = ConfigFile::load_or_create(dir.join("tilescope_config.ini"));
//! let placeholder = Tileset::placeholder(&config.settings().tileset).unwrap();
//! let mut session = Session::new(config, Theme::empty(), placeholder, (1000, 700));
//!
//! let coord = session.find_tile(529).unwrap();
//! assert_eq!((coord.col, coord.row), (17, 1));
//! assert_eq!(session.selected_ids_text(), "529");
//! ```

mod export;
mod host;
mod session;
mod tileset;
mod toast;
mod tooltip;

pub use export::{ExportError, ExportFormat, ParseExportFormatError, write_image};
pub use host::{ClipboardError, Host};
pub use session::{
    ControlFlow, DEFAULT_WINDOW_SIZE, KEY_ZOOM_STEP, PANEL_HEIGHT, PROGRESS_BAR_SIZE,
    SEARCH_MIN_ZOOM, SearchError, Session, ViewToggles, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT,
};
pub use tileset::{PLACEHOLDER_SIZE, Tileset, TilesetError};
pub use toast::{TOAST_LIFETIME, Toast, ToastLevel};
pub use tooltip::{lines as tooltip_lines, place as place_tooltip, tooltip};
