// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pixel checks over rendered views and exports.

use std::collections::HashSet;
use std::sync::LazyLock;

use image::RgbaImage;
use kurbo::Rect;
use peniko::Color;
use tilescope_grid::{IdScheme, TileCoord, TileGrid};
use tilescope_render::{
    ChromeItem, Font, Overlays, Palette, ProgressBar, RenderError, SourceImage, TileScene,
    render_tileset, render_view,
};
use tilescope_view::Viewport;

const GREY: [u8; 4] = [100, 100, 100, 255];
const LABEL: [u8; 4] = [220, 220, 220, 255];

static FONT: LazyLock<Font> = LazyLock::new(Font::bundled);

fn flat_image(width: u32, height: u32) -> SourceImage {
    let pixels = GREY.repeat((width * height) as usize);
    SourceImage::from_rgba8(width, height, pixels).unwrap()
}

fn scene<'a>(
    image: &'a SourceImage,
    grid: &'a TileGrid,
    overlays: Overlays,
    selection: &'a [TileCoord],
) -> TileScene<'a> {
    TileScene {
        image,
        grid,
        overlays,
        palette: Palette::default(),
        font: &FONT,
        label_size: 10.0,
        label_antialias: true,
        selection,
        hover: None,
    }
}

fn distinct_colours(img: &RgbaImage) -> usize {
    img.pixels().map(|p| p.0).collect::<HashSet<_>>().len()
}

fn close(actual: [u8; 4], expected: [u8; 4]) -> bool {
    actual
        .iter()
        .zip(expected)
        .all(|(a, e)| a.abs_diff(e) <= 2)
}

#[test]
fn overlays_add_colours_to_an_export() {
    let image = flat_image(64, 32);
    let grid = TileGrid::new(64, 32, 16, 16, IdScheme::RowMajor).unwrap();

    let plain = render_tileset(&scene(&image, &grid, Overlays::NONE, &[]), &mut |_| {}).unwrap();
    let annotated = render_tileset(
        &scene(
            &image,
            &grid,
            Overlays {
                grid: true,
                numbers: true,
                background_overlay: false,
            },
            &[],
        ),
        &mut |_| {},
    )
    .unwrap();

    assert_eq!(plain.dimensions(), (64, 32));
    assert_eq!(distinct_colours(&plain), 1, "flat image stays flat");
    assert!(
        distinct_colours(&annotated) > distinct_colours(&plain),
        "grid and labels add colours"
    );
}

#[test]
fn plain_export_reproduces_the_image() {
    let image = flat_image(32, 32);
    let grid = TileGrid::new(32, 32, 16, 16, IdScheme::default()).unwrap();
    let out = render_tileset(&scene(&image, &grid, Overlays::NONE, &[]), &mut |_| {}).unwrap();
    assert!(close(out.get_pixel(5, 5).0, GREY), "{:?}", out.get_pixel(5, 5));
    assert!(close(out.get_pixel(31, 31).0, GREY), "{:?}", out.get_pixel(31, 31));
}

#[test]
fn grid_lines_sit_on_tile_edges() {
    let image = flat_image(64, 32);
    let grid = TileGrid::new(64, 32, 16, 16, IdScheme::RowMajor).unwrap();
    let overlays = Overlays {
        grid: true,
        ..Overlays::NONE
    };
    let out = render_tileset(&scene(&image, &grid, overlays, &[]), &mut |_| {}).unwrap();
    let line = [60, 70, 90, 255];
    assert!(close(out.get_pixel(16, 5).0, line), "{:?}", out.get_pixel(16, 5));
    assert!(close(out.get_pixel(5, 16).0, line), "{:?}", out.get_pixel(5, 16));
    assert!(close(out.get_pixel(8, 8).0, GREY), "{:?}", out.get_pixel(8, 8));
}

#[test]
fn every_tile_gets_a_label_on_export() {
    let image = flat_image(64, 32);
    let grid = TileGrid::new(64, 32, 16, 16, IdScheme::RowMajor).unwrap();
    let overlays = Overlays {
        numbers: true,
        ..Overlays::NONE
    };
    let out = render_tileset(&scene(&image, &grid, overlays, &[]), &mut |_| {}).unwrap();
    for coord in grid.all_tiles().iter() {
        let rect = grid.tile_rect(coord);
        let lit = (rect.x0 as u32..rect.x1 as u32)
            .flat_map(|x| (rect.y0 as u32..rect.y1 as u32).map(move |y| (x, y)))
            .filter(|&(x, y)| out.get_pixel(x, y).0[0] > 130)
            .count();
        assert!(lit > 0, "tile {coord:?} has no label");
    }
}

#[test]
fn label_antialiasing_can_be_turned_off() {
    let image = flat_image(64, 32);
    let grid = TileGrid::new(64, 32, 16, 16, IdScheme::RowMajor).unwrap();
    let view = Viewport::new(Rect::new(0.0, 0.0, 64.0, 32.0));
    let overlays = Overlays {
        numbers: true,
        ..Overlays::NONE
    };
    let mut s = scene(&image, &grid, overlays, &[]);
    s.label_size = 14.0;

    s.label_antialias = true;
    let smooth = render_view(&s, &view, 64, 32, &[]).unwrap();
    s.label_antialias = false;
    let sharp = render_view(&s, &view, 64, 32, &[]).unwrap();

    assert_ne!(smooth, sharp);
    let two_tone = |p: &image::Rgba<u8>| close(p.0, GREY) || close(p.0, LABEL);
    assert!(sharp.pixels().all(two_tone), "aliased labels only use full coverage");
    assert!(sharp.pixels().any(|p| close(p.0, LABEL)), "labels are drawn");
    assert!(!smooth.pixels().all(two_tone), "anti-aliased edges blend");
}

#[test]
fn exports_always_antialias_labels() {
    let image = flat_image(64, 32);
    let grid = TileGrid::new(64, 32, 16, 16, IdScheme::RowMajor).unwrap();
    let overlays = Overlays {
        numbers: true,
        ..Overlays::NONE
    };
    let mut s = scene(&image, &grid, overlays, &[]);
    let smooth = render_tileset(&s, &mut |_| {}).unwrap();
    s.label_antialias = false;
    let same = render_tileset(&s, &mut |_| {}).unwrap();
    assert_eq!(smooth, same);
}

#[test]
fn progress_is_monotonic_and_finishes() {
    // 32x32 tiles of 8x8 pixels: 1024 labels.
    let image = flat_image(256, 256);
    let grid = TileGrid::new(256, 256, 8, 8, IdScheme::RowMajor).unwrap();
    let mut seen = Vec::new();
    render_tileset(&scene(&image, &grid, Overlays::ALL, &[]), &mut |p| {
        seen.push(p);
    })
    .unwrap();

    assert_eq!(seen.len(), 11, "ten interval reports plus completion");
    assert!(seen.windows(2).all(|w| w[0] <= w[1]), "{seen:?}");
    assert!(seen.iter().all(|p| (0.0..=1.0).contains(p)), "{seen:?}");
    assert_eq!(seen.last().copied(), Some(1.0));
}

#[test]
fn progress_finishes_without_labels() {
    let image = flat_image(32, 32);
    let grid = TileGrid::new(32, 32, 16, 16, IdScheme::RowMajor).unwrap();
    let mut seen = Vec::new();
    render_tileset(&scene(&image, &grid, Overlays::NONE, &[]), &mut |p| {
        seen.push(p);
    })
    .unwrap();
    assert_eq!(seen, [1.0]);
}

#[test]
fn view_shows_background_beyond_the_image() {
    let image = flat_image(64, 32);
    let grid = TileGrid::new(64, 32, 16, 16, IdScheme::RowMajor).unwrap();
    let view = Viewport::new(Rect::new(0.0, 0.0, 100.0, 50.0));
    let out = render_view(&scene(&image, &grid, Overlays::NONE, &[]), &view, 100, 50, &[]).unwrap();
    assert_eq!(out.dimensions(), (100, 50));
    assert!(close(out.get_pixel(10, 10).0, GREY), "{:?}", out.get_pixel(10, 10));
    assert!(
        close(out.get_pixel(90, 40).0, [25, 30, 40, 255]),
        "{:?}",
        out.get_pixel(90, 40)
    );
}

#[test]
fn selection_and_hover_tint_their_tiles() {
    let image = flat_image(64, 32);
    let grid = TileGrid::new(64, 32, 16, 16, IdScheme::RowMajor).unwrap();
    let view = Viewport::new(Rect::new(0.0, 0.0, 64.0, 32.0));
    let selection = [TileCoord::new(1, 0)];
    let mut s = scene(&image, &grid, Overlays::NONE, &selection);
    s.hover = Some(TileCoord::new(3, 1));
    let out = render_view(&s, &view, 64, 32, &[]).unwrap();

    let selected = out.get_pixel(24, 8).0;
    assert!(selected[1] > selected[0] + 30, "green tint, got {selected:?}");
    let hovered = out.get_pixel(56, 24).0;
    assert!(hovered[0] > hovered[2] + 60, "yellow tint, got {hovered:?}");
    assert!(close(out.get_pixel(8, 8).0, GREY), "{:?}", out.get_pixel(8, 8));
}

#[test]
fn view_is_clipped_but_chrome_is_not() {
    let image = flat_image(64, 64);
    let grid = TileGrid::new(64, 64, 16, 16, IdScheme::RowMajor).unwrap();
    // Canvas is taller than the view rect; the strip below is panel space.
    let view = Viewport::new(Rect::new(0.0, 0.0, 400.0, 40.0));
    let bar = ProgressBar {
        rect: Rect::new(10.0, 45.0, 310.0, 75.0),
        fraction: 1.0,
        background: Color::from_rgb8(30, 40, 50),
        fill: Color::from_rgb8(0, 120, 215),
        border: Color::from_rgb8(70, 100, 130),
        text: Color::from_rgb8(220, 220, 220),
    };
    let out = render_view(
        &scene(&image, &grid, Overlays::NONE, &[]),
        &view,
        400,
        80,
        &[ChromeItem::Progress(bar)],
    )
    .unwrap();

    // Image rows below the view rect are not drawn.
    assert!(
        close(out.get_pixel(5, 42).0, [25, 30, 40, 255]),
        "{:?}",
        out.get_pixel(5, 42)
    );
    assert!(
        close(out.get_pixel(11, 60).0, [70, 100, 130, 255]),
        "border, got {:?}",
        out.get_pixel(11, 60)
    );
    assert!(
        close(out.get_pixel(15, 60).0, [0, 120, 215, 255]),
        "fill, got {:?}",
        out.get_pixel(15, 60)
    );
}

#[test]
fn canvas_size_is_validated() {
    let image = flat_image(16, 16);
    let grid = TileGrid::new(16, 16, 16, 16, IdScheme::RowMajor).unwrap();
    let s = scene(&image, &grid, Overlays::NONE, &[]);
    let view = Viewport::new(Rect::new(0.0, 0.0, 10.0, 10.0));

    assert_eq!(
        render_view(&s, &view, 0, 10, &[]).unwrap_err(),
        RenderError::Empty {
            width: 0,
            height: 10
        }
    );
    assert!(matches!(
        render_view(&s, &view, 70_000, 10, &[]),
        Err(RenderError::TooLarge { max: 65_535, .. })
    ));
}

#[test]
fn pixel_buffers_must_match_their_size() {
    assert!(matches!(
        SourceImage::from_rgba8(4, 4, vec![0; 10]),
        Err(RenderError::BufferSize {
            expected: 64,
            actual: 10,
            ..
        })
    ));
}
