// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! View transform properties checked against tile hit testing.

use kurbo::{Point, Rect, Vec2};
use tilescope_grid::{IdScheme, TileGrid};
use tilescope_view::{ClampMode, Viewport};

fn sheet() -> (TileGrid, Viewport) {
    let grid = TileGrid::new(2048, 512, 16, 16, IdScheme::default()).unwrap();
    let mut view = Viewport::new(Rect::new(0.0, 0.0, 1000.0, 615.0));
    view.set_world_bounds(Some(grid.bounds()));
    view.reset();
    (grid, view)
}

#[test]
fn reset_is_independent_of_history() {
    let (_, fresh) = sheet();
    let (_, mut used) = sheet();
    used.zoom_about_view_point(Point::new(10.0, 10.0), 3.0);
    used.pan_by_view(Vec2::new(-333.0, 71.0));
    used.zoom_about_center(0.4);
    used.reset();

    assert_eq!(used.zoom(), fresh.zoom());
    assert!((used.pan() - fresh.pan()).hypot() < 1e-9);
}

#[test]
fn anchored_zoom_keeps_tile_under_cursor() {
    let (grid, mut view) = sheet();
    view.set_zoom(2.0);
    for anchor in [
        Point::new(10.0, 10.0),
        Point::new(500.0, 300.0),
        Point::new(990.0, 600.0),
    ] {
        for factor in [1.1, 1.2, 0.9] {
            let before_world = view.view_to_world_point(anchor);
            let before_tile = grid.tile_at(before_world);
            view.zoom_about_view_point(anchor, factor);
            let after_world = view.view_to_world_point(anchor);
            assert!(
                (after_world - before_world).hypot() < 1e-6,
                "anchor {anchor:?} drifted at factor {factor}"
            );
            assert_eq!(grid.tile_at(after_world), before_tile);
        }
    }
}

#[test]
fn anchored_zoom_is_exact_without_clamping() {
    let (grid, mut view) = sheet();
    view.set_clamp_mode(ClampMode::None);
    let anchor = Point::new(123.0, 456.0);
    let tile = grid.tile_at(view.view_to_world_point(anchor));
    for _ in 0..10 {
        view.zoom_about_view_point(anchor, 0.8);
    }
    assert_eq!(grid.tile_at(view.view_to_world_point(anchor)), tile);
}

#[test]
fn visible_rect_drives_tile_culling() {
    let (grid, mut view) = sheet();
    let all = grid.tiles_in_world_rect(view.visible_world_rect());
    view.set_zoom(4.0);
    let zoomed = grid.tiles_in_world_rect(view.visible_world_rect());
    assert!(zoomed.len() < all.len());
    assert!(!zoomed.is_empty());
}
