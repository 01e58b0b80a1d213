// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tooltip for the tile under the pointer.

use kurbo::{Point, Rect, Size};
use tilescope_config::Settings;
use tilescope_grid::{TileCoord, TileGrid};
use tilescope_render::{Font, TextBox, text_box_size, to_color};

/// Horizontal distance from the pointer, and vertical distance when the
/// tooltip flips below it.
pub(crate) const POINTER_OFFSET: f64 = 15.0;
/// Minimum gap between the tooltip and the view edges.
pub(crate) const EDGE_MARGIN: f64 = 5.0;
/// Space between the tooltip border and its text.
pub(crate) const PADDING: f64 = 8.0;

/// Text lines shown for `coord`, or `None` when it is outside the grid.
#[must_use]
pub fn lines(grid: &TileGrid, coord: TileCoord) -> Option<Vec<String>> {
    let id = grid.id_of(coord)?;
    Some(vec![
        format!("ID: {id}"),
        format!("Pos: ({}, {})", coord.col, coord.row),
    ])
}

/// Places a `size` box near `pointer`, inside `view`.
///
/// The box sits 15 px to the right of the pointer and just above it; if that
/// would cross the top margin it moves below the pointer. Either way it is
/// then pushed 5 px inside the view, preferring the top-left edges when the
/// view is too small.
#[must_use]
pub fn place(size: Size, pointer: Point, view: Rect) -> Rect {
    let min_x = view.x0 + EDGE_MARGIN;
    let min_y = view.y0 + EDGE_MARGIN;
    let max_x = view.x1 - size.width - EDGE_MARGIN;
    let max_y = view.y1 - size.height - EDGE_MARGIN;

    let x = (pointer.x + POINTER_OFFSET).min(max_x).max(min_x);
    let mut y = pointer.y - size.height - EDGE_MARGIN;
    if y < min_y {
        y = pointer.y + POINTER_OFFSET;
    }
    let y = y.min(max_y).max(min_y);
    Rect::from_origin_size((x, y), size)
}

/// Tooltip box for the hovered tile, sized for `font` and styled from
/// `settings`.
#[must_use]
pub fn tooltip(
    grid: &TileGrid,
    coord: TileCoord,
    pointer: Point,
    view: Rect,
    font: &Font,
    settings: &Settings,
) -> Option<TextBox> {
    let lines = lines(grid, coord)?;
    let padding = Size::new(PADDING, PADDING);
    let rect = place(text_box_size(font, &lines, padding), pointer, view);
    Some(TextBox {
        rect,
        lines,
        padding,
        fill: to_color(settings.tooltip.tooltip_background),
        border: Some((to_color(settings.tooltip.tooltip_border), 1.0)),
        text: to_color(settings.text.tooltip_text),
        centered: false,
    })
}

#[cfg(test)]
mod tests {
    use tilescope_grid::IdScheme;

    use super::*;

    const VIEW: Rect = Rect::new(0.0, 0.0, 800.0, 515.0);

    #[test]
    fn lines_show_id_and_position() {
        let grid = TileGrid::new(2048, 512, 16, 16, IdScheme::default()).unwrap();
        assert_eq!(
            lines(&grid, TileCoord::new(17, 1)).unwrap(),
            ["ID: 529", "Pos: (17, 1)"]
        );
        assert!(lines(&grid, TileCoord::new(128, 0)).is_none());
    }

    #[test]
    fn sits_above_and_right_of_the_pointer() {
        let r = place(Size::new(100.0, 40.0), Point::new(200.0, 200.0), VIEW);
        assert_eq!(r, Rect::new(215.0, 155.0, 315.0, 195.0));
    }

    #[test]
    fn flips_below_near_the_top() {
        let r = place(Size::new(100.0, 40.0), Point::new(200.0, 20.0), VIEW);
        assert_eq!(r.origin(), Point::new(215.0, 35.0));
    }

    #[test]
    fn stays_inside_the_view() {
        let r = place(Size::new(100.0, 40.0), Point::new(790.0, 510.0), VIEW);
        assert_eq!(r.x1, VIEW.x1 - EDGE_MARGIN);
        assert!(r.y1 <= VIEW.y1 - EDGE_MARGIN, "{r:?}");

        let r = place(Size::new(900.0, 600.0), Point::new(10.0, 10.0), VIEW);
        assert_eq!(r.origin(), Point::new(5.0, 5.0));
    }
}
