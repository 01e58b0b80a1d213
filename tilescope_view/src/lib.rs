// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! TileScope View: the pan/zoom transform between screen and image space.
//!
//! [`Viewport`] is a small, headless model of the tileset viewing area:
//! - Pan offset + uniform zoom, limited to a configurable zoom range.
//! - Coordinate conversion between image (world) space and screen (view) space.
//! - Zoom anchored at a screen point, so the pixel under the cursor stays put.
//! - Reset to the home zoom with the image centered.
//! - Clamping that keeps the image in view (see [`ClampMode`]).
//!
//! It does **not** know about tiles, input devices or rendering. Callers map
//! pointer and keyboard events to [`Viewport::pan_by_view`] and
//! [`Viewport::zoom_about_view_point`], and feed
//! [`Viewport::visible_world_rect`] into tile-range queries to cull work.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use tilescope_view::Viewport;
//!
//! // A 1000x615 drawing area showing a 2048x512 tileset.
//! let mut view = Viewport::new(Rect::new(0.0, 0.0, 1000.0, 615.0));
//! view.set_world_bounds(Some(Rect::new(0.0, 0.0, 2048.0, 512.0)));
//! view.reset();
//!
//! // Zoom in around the cursor; the image pixel under it does not move.
//! let cursor = Point::new(400.0, 300.0);
//! view.set_zoom(2.0);
//! let before = view.view_to_world_point(cursor);
//! view.zoom_about_view_point(cursor, 1.1);
//! let after = view.view_to_world_point(cursor);
//! assert!((before - after).hypot() < 1e-9);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod modes;
mod viewport;

pub use modes::ClampMode;
pub use viewport::{Viewport, ViewportDebugInfo};
