// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! TileScope Render: CPU rasterization of tileset views and exports.
//!
//! Frames are drawn with [`vello_cpu`] in a fixed order:
//!
//! 1. background colour;
//! 2. the tileset image, nearest-neighbour sampled through the view transform;
//! 3. the dim overlay, when enabled;
//! 4. grid lines, when enabled and tiles are more than one pixel on screen;
//! 5. two-digit tile labels, when enabled and tiles are at least four pixels;
//! 6. selection highlights, then the hover highlight;
//! 7. chrome items (tooltip, toast, progress bar).
//!
//! Only tiles in the visible range are visited. Text is drawn from font
//! outlines ([`Font`]); the configured font is looked up by name or path and
//! a bundled DejaVu Sans Mono stands in when it cannot be loaded.
//!
//! [`render_view`] produces a window frame; [`render_tileset`] produces a
//! 1:1 image of the whole tileset for export. Both return straight-alpha
//! [`image::RgbaImage`]s.
//!
//! ## Minimal example
//!
//! ```rust
//! use tilescope_grid::{IdScheme, TileGrid};
//! use tilescope_render::{Font, Overlays, Palette, SourceImage, TileScene, render_tileset};
//!
//! let font = Font::bundled();
//! let image = SourceImage::from_rgba8(32, 16, vec![200; 32 * 16 * 4]).unwrap();
//! let grid = TileGrid::new(32, 16, 16, 16, IdScheme::default()).unwrap();
//! let scene = TileScene {
//!     image: &image,
//!     grid: &grid,
//!     overlays: Overlays::ALL,
//!     palette: Palette::default(),
//!     font: &font,
//!     label_size: 10.0,
//!     label_antialias: true,
//!     selection: &[],
//!     hover: None,
//! };
//! let out = render_tileset(&scene, &mut |_| {}).unwrap();
//! assert_eq!(out.dimensions(), (32, 16));
//! ```

mod canvas;
mod chrome;
mod scene;
mod text;

pub use canvas::{RenderError, SourceImage};
pub use chrome::{CHROME_FONT_SIZE, ChromeItem, ProgressBar, TextBox, text_box_size};
pub use scene::{
    GRID_MIN_TILE_PX, LABEL_MIN_TILE_PX, LABEL_SIZE_RANGE, Overlays, PROGRESS_INTERVAL, Palette,
    TileScene, label_font_size, render_tileset, render_view, to_color,
};
pub use text::{BUNDLED_FONT_NAME, Font, FontError};
