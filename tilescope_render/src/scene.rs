// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

use image::RgbaImage;
use kurbo::{Affine, Point, Rect};
use peniko::Color;
use tilescope_config::{Rgba, Settings};
use tilescope_grid::{TileCoord, TileGrid};
use tilescope_view::Viewport;

use crate::canvas::{Canvas, RenderError, SourceImage};
use crate::chrome::{self, ChromeItem};
use crate::text::Font;

/// Smallest on-screen tile size, in pixels, that still gets grid lines.
/// Tiles must be strictly larger.
pub const GRID_MIN_TILE_PX: f64 = 1.0;
/// Smallest on-screen tile size, in pixels, that still gets labels.
pub const LABEL_MIN_TILE_PX: f64 = 4.0;
/// Label font size range in pixels per em, after scaling by zoom.
pub const LABEL_SIZE_RANGE: (f64, f64) = (4.0, 40.0);
/// Labels drawn between two progress reports during a full export.
pub const PROGRESS_INTERVAL: u32 = 100;

/// Which overlays are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Overlays {
    /// Grid lines between tiles.
    pub grid: bool,
    /// Two-digit ID labels.
    pub numbers: bool,
    /// Dim layer over the tileset.
    pub background_overlay: bool,
}

impl Overlays {
    /// Everything on.
    pub const ALL: Self = Self {
        grid: true,
        numbers: true,
        background_overlay: true,
    };

    /// Everything off.
    pub const NONE: Self = Self {
        grid: false,
        numbers: false,
        background_overlay: false,
    };
}

/// Colours of the tileset view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Area behind the image.
    pub background: Color,
    /// Grid lines.
    pub grid: Color,
    /// Dim layer.
    pub overlay: Color,
    /// Tile labels.
    pub label: Color,
    /// Hovered tile fill.
    pub hover: Color,
    /// Selected tile fill.
    pub select: Color,
}

impl Palette {
    /// Colours configured in `settings`.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            background: to_color(settings.display.background),
            grid: to_color(settings.display.grid_color),
            overlay: to_color(settings.display.overlay_color),
            label: to_color(settings.text.tile_number_text),
            hover: to_color(settings.highlight.tile_hover),
            select: to_color(settings.highlight.tile_select),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Converts a settings colour to a paint colour.
#[must_use]
pub fn to_color(c: Rgba) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.a)
}

/// Everything needed to draw the tileset and its overlays.
#[derive(Clone, Copy, Debug)]
pub struct TileScene<'a> {
    /// Tileset pixels.
    pub image: &'a SourceImage,
    /// Tile layout over `image`.
    pub grid: &'a TileGrid,
    /// Which overlays to draw.
    pub overlays: Overlays,
    /// Colours.
    pub palette: Palette,
    /// Font for labels and chrome text.
    pub font: &'a Font,
    /// Label font size at zoom 1, in pixels per em.
    pub label_size: f64,
    /// Anti-alias labels in views. Exports always anti-alias.
    pub label_antialias: bool,
    /// Selected tiles.
    pub selection: &'a [TileCoord],
    /// Tile under the pointer.
    pub hover: Option<TileCoord>,
}

/// Renders a full window frame: the tileset through `view`, then `chrome`.
///
/// The canvas is `width`×`height`; tileset drawing is clipped to
/// [`Viewport::view_rect`], chrome is not. Chrome text uses the scene font.
pub fn render_view(
    scene: &TileScene<'_>,
    view: &Viewport,
    width: u32,
    height: u32,
    chrome_items: &[ChromeItem],
) -> Result<RgbaImage, RenderError> {
    let mut canvas = Canvas::new(width, height)?;
    let bounds = canvas.bounds();
    canvas.fill(bounds, scene.palette.background);
    canvas.set_clip(view.view_rect());
    draw_tileset(
        &mut canvas,
        scene,
        view.world_to_view(),
        view.zoom(),
        view.visible_world_rect(),
        false,
        &mut |_| {},
    );
    chrome::draw(&mut canvas, scene.font, chrome_items);
    canvas.finish()
}

/// Renders the whole tileset at its native resolution with overlays.
///
/// Labels are drawn anti-aliased for every tile regardless of size at the
/// zoom 1 label size; `progress` receives
/// the completed fraction every [`PROGRESS_INTERVAL`] labels and `1.0` at
/// the end.
pub fn render_tileset(
    scene: &TileScene<'_>,
    progress: &mut dyn FnMut(f64),
) -> Result<RgbaImage, RenderError> {
    let mut canvas = Canvas::new(scene.image.width(), scene.image.height())?;
    let bounds = canvas.bounds();
    canvas.fill(bounds, scene.palette.background);
    draw_tileset(
        &mut canvas,
        scene,
        Affine::IDENTITY,
        1.0,
        bounds,
        true,
        progress,
    );
    progress(1.0);
    canvas.finish()
}

fn draw_tileset(
    canvas: &mut Canvas,
    scene: &TileScene<'_>,
    world_to_view: Affine,
    zoom: f64,
    visible_world: Rect,
    export: bool,
    progress: &mut dyn FnMut(f64),
) {
    let image_rect = Rect::new(
        0.0,
        0.0,
        f64::from(scene.image.width()),
        f64::from(scene.image.height()),
    );
    canvas.image(
        scene.image,
        world_to_view,
        image_rect.intersect(visible_world),
    );

    let image_on_screen = world_to_view.transform_rect_bbox(image_rect);
    if scene.overlays.background_overlay {
        canvas.fill(image_on_screen, scene.palette.overlay);
    }

    let tile = scene.grid.tile_size();
    let tile_px = tile.width.min(tile.height) * zoom;
    let range = scene.grid.tiles_in_world_rect(visible_world);

    if range.is_empty() {
        return;
    }

    if scene.overlays.grid && tile_px.round() > GRID_MIN_TILE_PX {
        let grid_rect = world_to_view.transform_rect_bbox(scene.grid.bounds());
        for col in range.cols().start..=range.cols().end {
            let x = world_to_view * Point::new(f64::from(col) * tile.width, 0.0);
            let x = x.x.floor();
            canvas.fill(
                Rect::new(x, grid_rect.y0, x + 1.0, grid_rect.y1),
                scene.palette.grid,
            );
        }
        for row in range.rows().start..=range.rows().end {
            let y = world_to_view * Point::new(0.0, f64::from(row) * tile.height);
            let y = y.y.floor();
            canvas.fill(
                Rect::new(grid_rect.x0, y, grid_rect.x1, y + 1.0),
                scene.palette.grid,
            );
        }
    }

    if scene.overlays.numbers && (export || tile_px >= LABEL_MIN_TILE_PX) {
        let size = label_font_size(scene.label_size, zoom);
        let antialias = export || scene.label_antialias;
        let half_cap = scene.font.cap_height(size) / 2.0;
        let total = u32::try_from(range.len()).unwrap_or(u32::MAX).max(1);
        let mut drawn = 0_u32;
        for coord in &range {
            if let Some(id) = scene.grid.id_of(coord) {
                let label = id.label();
                let text = core::str::from_utf8(&label).unwrap_or("??");
                let width = scene.font.measure(text, size).width;
                let center = world_to_view * scene.grid.tile_center(coord);
                let origin = Point::new(
                    (center.x - width / 2.0).round(),
                    (center.y + half_cap).round(),
                );
                canvas.text(scene.font, size, text, origin, scene.palette.label, antialias);
            }
            drawn += 1;
            if drawn % PROGRESS_INTERVAL == 0 {
                progress(f64::from(drawn) / f64::from(total));
            }
        }
    }

    for coord in scene.selection {
        if range.contains(*coord) {
            let rect = world_to_view.transform_rect_bbox(scene.grid.tile_rect(*coord));
            canvas.fill(rect, scene.palette.select);
        }
    }
    if let Some(coord) = scene.hover.filter(|c| range.contains(*c)) {
        let rect = world_to_view.transform_rect_bbox(scene.grid.tile_rect(coord));
        canvas.fill(rect, scene.palette.hover);
    }
}

/// Label font size at `zoom`: `label_size × zoom` in whole pixels,
/// clamped to [`LABEL_SIZE_RANGE`].
#[must_use]
pub fn label_font_size(label_size: f64, zoom: f64) -> f64 {
    (label_size * zoom)
        .floor()
        .clamp(LABEL_SIZE_RANGE.0, LABEL_SIZE_RANGE.1)
}

#[cfg(test)]
mod tests {
    use super::label_font_size;

    #[test]
    fn label_size_follows_zoom_within_range() {
        assert_eq!(label_font_size(10.0, 1.0), 10.0);
        assert_eq!(label_font_size(10.0, 2.55), 25.0);
        assert_eq!(label_font_size(10.0, 0.05), 4.0);
        assert_eq!(label_font_size(10.0, 100.0), 40.0);
    }
}
