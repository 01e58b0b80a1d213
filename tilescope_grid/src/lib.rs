// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! TileScope Grid: tile geometry for tileset images.
//!
//! A tileset is an image cut into a grid of equally sized tiles. This crate
//! owns the arithmetic around that grid:
//! - [`TileGrid`] derives the column/row counts from image and tile sizes.
//! - [`IdScheme`] maps tile coordinates to integer tile IDs and back.
//! - Hit testing turns an image-space point into the [`TileCoord`] under it.
//! - [`TileRange`] describes the tiles intersecting a rectangle, which is
//!   what renderers use to skip tiles outside the visible region.
//!
//! All positions are in image space: one unit is one source pixel, the
//! origin is the top-left corner of the image. Converting screen positions
//! into image space is the job of a view transform (see `tilescope_view`).
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use tilescope_grid::{IdScheme, TileCoord, TileGrid, TileId};
//!
//! let grid = TileGrid::new(2048, 512, 16, 16, IdScheme::default()).unwrap();
//! assert_eq!((grid.cols(), grid.rows()), (128, 32));
//!
//! // The pixel at (40, 20) lies in column 2, row 1.
//! let coord = grid.tile_at(Point::new(40.0, 20.0)).unwrap();
//! assert_eq!(coord, TileCoord::new(2, 1));
//!
//! // IDs run row-major inside 16-column strips.
//! let id = grid.id_of(coord).unwrap();
//! assert_eq!(id, TileId(18));
//! assert_eq!(grid.coord_of(id), Some(coord));
//! ```

mod range;
mod scheme;

pub use range::{TileRange, TileRangeIter};
pub use scheme::{IdScheme, ParseIdSchemeError};

use core::fmt;

use kurbo::{Point, Rect, Size};

/// Zero-based column/row position of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TileCoord {
    /// Column index, counted from the left edge.
    pub col: u32,
    /// Row index, counted from the top edge.
    pub row: u32,
}

impl TileCoord {
    /// Creates a coordinate from a column and a row.
    #[must_use]
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Integer identifier of a tile, as produced by an [`IdScheme`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TileId(pub u32);

impl TileId {
    /// Returns the two-digit label drawn on top of the tile.
    ///
    /// Labels only carry the last two decimal digits of the ID, zero padded.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "both digits are below 10"
    )]
    pub fn label(self) -> [u8; 2] {
        let last = self.0 % 100;
        [b'0' + (last / 10) as u8, b'0' + (last % 10) as u8]
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Errors produced when building a [`TileGrid`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Tile width or height is zero.
    #[error("tile size must be non-zero, got {width}x{height}")]
    ZeroTileSize {
        /// Requested tile width.
        width: u32,
        /// Requested tile height.
        height: u32,
    },
    /// The image cannot hold a single whole tile.
    #[error("image {image_width}x{image_height} is smaller than one {tile_width}x{tile_height} tile")]
    ImageSmallerThanTile {
        /// Image width in pixels.
        image_width: u32,
        /// Image height in pixels.
        image_height: u32,
        /// Tile width in pixels.
        tile_width: u32,
        /// Tile height in pixels.
        tile_height: u32,
    },
    /// A column-block scheme was configured with zero columns per block.
    #[error("column block width must be non-zero")]
    ZeroBlockColumns,
    /// The grid holds more tiles than a [`TileId`] can address.
    #[error("{cols}x{rows} tiles overflow the tile ID range")]
    TooManyTiles {
        /// Column count.
        cols: u32,
        /// Row count.
        rows: u32,
    },
}

/// Grid of equally sized tiles laid over an image.
///
/// Trailing pixels that do not make up a whole tile on the right or bottom
/// edge are not part of the grid; see [`TileGrid::has_partial_tiles`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileGrid {
    image_width: u32,
    image_height: u32,
    tile_width: u32,
    tile_height: u32,
    cols: u32,
    rows: u32,
    scheme: IdScheme,
}

impl TileGrid {
    /// Lays a grid of `tile_width` x `tile_height` tiles over an image.
    pub fn new(
        image_width: u32,
        image_height: u32,
        tile_width: u32,
        tile_height: u32,
        scheme: IdScheme,
    ) -> Result<Self, GridError> {
        if tile_width == 0 || tile_height == 0 {
            return Err(GridError::ZeroTileSize {
                width: tile_width,
                height: tile_height,
            });
        }
        if let IdScheme::ColumnBlocks { block_cols: 0 } = scheme {
            return Err(GridError::ZeroBlockColumns);
        }
        let cols = image_width / tile_width;
        let rows = image_height / tile_height;
        if cols == 0 || rows == 0 {
            return Err(GridError::ImageSmallerThanTile {
                image_width,
                image_height,
                tile_width,
                tile_height,
            });
        }
        if cols.checked_mul(rows).is_none() {
            return Err(GridError::TooManyTiles { cols, rows });
        }
        Ok(Self {
            image_width,
            image_height,
            tile_width,
            tile_height,
            cols,
            rows,
            scheme,
        })
    }

    /// Number of tile columns.
    #[must_use]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of tile rows.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of tiles; valid IDs are `0..tile_count()`.
    #[must_use]
    pub fn tile_count(&self) -> u32 {
        self.cols * self.rows
    }

    /// Width and height of the underlying image in pixels.
    #[must_use]
    pub fn image_size(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }

    /// Width and height of one tile in pixels.
    #[must_use]
    pub fn tile_size(&self) -> Size {
        Size::new(f64::from(self.tile_width), f64::from(self.tile_height))
    }

    /// The ID scheme used by [`TileGrid::id_of`] and [`TileGrid::coord_of`].
    #[must_use]
    pub fn scheme(&self) -> IdScheme {
        self.scheme
    }

    /// Returns a copy of this grid using another ID scheme.
    pub fn with_scheme(self, scheme: IdScheme) -> Result<Self, GridError> {
        Self::new(
            self.image_width,
            self.image_height,
            self.tile_width,
            self.tile_height,
            scheme,
        )
    }

    /// Rectangle covered by whole tiles, in image space.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            f64::from(self.cols * self.tile_width),
            f64::from(self.rows * self.tile_height),
        )
    }

    /// Returns `true` if the image has pixels outside the whole-tile area.
    #[must_use]
    pub fn has_partial_tiles(&self) -> bool {
        self.image_width % self.tile_width != 0 || self.image_height % self.tile_height != 0
    }

    /// Returns `true` if `coord` addresses a tile of this grid.
    #[must_use]
    pub fn contains(&self, coord: TileCoord) -> bool {
        coord.col < self.cols && coord.row < self.rows
    }

    /// Computes the ID of the tile at `coord`.
    #[must_use]
    pub fn id_of(&self, coord: TileCoord) -> Option<TileId> {
        if !self.contains(coord) {
            return None;
        }
        Some(self.scheme.id_of(coord, self.cols, self.rows))
    }

    /// Locates the tile carrying `id`, or `None` if the ID is out of range.
    #[must_use]
    pub fn coord_of(&self, id: TileId) -> Option<TileCoord> {
        if id.0 >= self.tile_count() {
            return None;
        }
        Some(self.scheme.coord_of(id, self.cols, self.rows))
    }

    /// Returns the tile under an image-space point.
    #[must_use]
    pub fn tile_at(&self, pt: Point) -> Option<TileCoord> {
        if !pt.x.is_finite() || !pt.y.is_finite() || pt.x < 0.0 || pt.y < 0.0 {
            return None;
        }
        let col = (pt.x / f64::from(self.tile_width)).floor();
        let row = (pt.y / f64::from(self.tile_height)).floor();
        if col >= f64::from(self.cols) || row >= f64::from(self.rows) {
            return None;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "both values are checked against u32 column/row counts above"
        )]
        let coord = TileCoord::new(col as u32, row as u32);
        Some(coord)
    }

    /// Image-space rectangle covered by the tile at `coord`.
    #[must_use]
    pub fn tile_rect(&self, coord: TileCoord) -> Rect {
        let x0 = f64::from(coord.col) * f64::from(self.tile_width);
        let y0 = f64::from(coord.row) * f64::from(self.tile_height);
        Rect::new(
            x0,
            y0,
            x0 + f64::from(self.tile_width),
            y0 + f64::from(self.tile_height),
        )
    }

    /// Image-space center of the tile at `coord`.
    #[must_use]
    pub fn tile_center(&self, coord: TileCoord) -> Point {
        self.tile_rect(coord).center()
    }

    /// Tiles intersecting an image-space rectangle, clipped to the grid.
    #[must_use]
    pub fn tiles_in_world_rect(&self, rect: Rect) -> TileRange {
        let rect = rect.abs();
        let tw = f64::from(self.tile_width);
        let th = f64::from(self.tile_height);
        let clamp = |v: f64, max: u32| -> u32 {
            if v.is_nan() || v <= 0.0 {
                0
            } else if v >= f64::from(max) {
                max
            } else {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "v lies in 0..max, which fits in u32"
                )]
                let v = v as u32;
                v
            }
        };
        let col0 = clamp((rect.x0 / tw).floor(), self.cols);
        let col1 = clamp((rect.x1 / tw).ceil(), self.cols);
        let row0 = clamp((rect.y0 / th).floor(), self.rows);
        let row1 = clamp((rect.y1 / th).ceil(), self.rows);
        TileRange::new(col0..col1, row0..row1)
    }

    /// Tiles in the inclusive rectangle spanned by two coordinates.
    ///
    /// The corners may be given in any order; both are clipped to the grid.
    #[must_use]
    pub fn tiles_between(&self, a: TileCoord, b: TileCoord) -> TileRange {
        let col0 = a.col.min(b.col).min(self.cols);
        let col1 = a.col.max(b.col).saturating_add(1).min(self.cols);
        let row0 = a.row.min(b.row).min(self.rows);
        let row1 = a.row.max(b.row).saturating_add(1).min(self.rows);
        TileRange::new(col0..col1, row0..row1)
    }

    /// Every tile of the grid.
    #[must_use]
    pub fn all_tiles(&self) -> TileRange {
        TileRange::new(0..self.cols, 0..self.rows)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::{GridError, IdScheme, TileCoord, TileGrid, TileId};

    fn sheet() -> TileGrid {
        TileGrid::new(2048, 512, 16, 16, IdScheme::default()).unwrap()
    }

    #[test]
    fn dimensions_follow_tile_size() {
        let grid = sheet();
        assert_eq!(grid.cols(), 128);
        assert_eq!(grid.rows(), 32);
        assert_eq!(grid.tile_count(), 4096);
        assert!(!grid.has_partial_tiles());
        assert_eq!(grid.bounds(), Rect::new(0.0, 0.0, 2048.0, 512.0));
    }

    #[test]
    fn partial_tiles_are_dropped() {
        let grid = TileGrid::new(100, 50, 16, 16, IdScheme::RowMajor).unwrap();
        assert_eq!((grid.cols(), grid.rows()), (6, 3));
        assert!(grid.has_partial_tiles());
        assert_eq!(grid.tile_at(Point::new(97.0, 10.0)), None);
    }

    #[test]
    fn invalid_layouts_are_rejected() {
        assert_eq!(
            TileGrid::new(64, 64, 0, 16, IdScheme::RowMajor),
            Err(GridError::ZeroTileSize {
                width: 0,
                height: 16
            })
        );
        assert!(matches!(
            TileGrid::new(8, 8, 16, 16, IdScheme::RowMajor),
            Err(GridError::ImageSmallerThanTile { .. })
        ));
        assert_eq!(
            TileGrid::new(64, 64, 16, 16, IdScheme::ColumnBlocks { block_cols: 0 }),
            Err(GridError::ZeroBlockColumns)
        );
    }

    #[test]
    fn hit_testing_maps_pixels_to_tiles() {
        let grid = sheet();
        assert_eq!(grid.tile_at(Point::new(0.0, 0.0)), Some(TileCoord::new(0, 0)));
        assert_eq!(
            grid.tile_at(Point::new(15.999, 16.0)),
            Some(TileCoord::new(0, 1))
        );
        assert_eq!(
            grid.tile_at(Point::new(2047.5, 511.5)),
            Some(TileCoord::new(127, 31))
        );
        assert_eq!(grid.tile_at(Point::new(-0.1, 4.0)), None);
        assert_eq!(grid.tile_at(Point::new(2048.0, 4.0)), None);
        assert_eq!(grid.tile_at(Point::new(f64::NAN, 4.0)), None);
    }

    #[test]
    fn column_block_ids_match_the_sheet_layout() {
        let grid = sheet();
        let id = |col, row| grid.id_of(TileCoord::new(col, row)).unwrap().0;
        assert_eq!(id(0, 0), 0);
        assert_eq!(id(15, 0), 15);
        assert_eq!(id(0, 1), 16);
        assert_eq!(id(16, 0), 512);
        assert_eq!(id(17, 2), 512 + 1 + 32);
        assert_eq!(id(127, 31), 4095);
        assert_eq!(grid.id_of(TileCoord::new(128, 0)), None);
    }

    #[test]
    fn out_of_range_ids_have_no_coordinate() {
        let grid = sheet();
        assert_eq!(grid.coord_of(TileId(4096)), None);
        assert_eq!(grid.coord_of(TileId(u32::MAX)), None);
        assert_eq!(grid.coord_of(TileId(512)), Some(TileCoord::new(16, 0)));
    }

    #[test]
    fn labels_use_last_two_digits() {
        assert_eq!(&TileId(7).label(), b"07");
        assert_eq!(&TileId(512).label(), b"12");
        assert_eq!(&TileId(4095).label(), b"95");
    }

    #[test]
    fn world_rect_query_clips_to_grid() {
        let grid = sheet();
        let range = grid.tiles_in_world_rect(Rect::new(-50.0, 8.0, 40.0, 33.0));
        assert_eq!(range.cols(), 0..3);
        assert_eq!(range.rows(), 0..3);

        let outside = grid.tiles_in_world_rect(Rect::new(3000.0, 0.0, 4000.0, 10.0));
        assert!(outside.is_empty());
    }

    #[test]
    fn tiles_between_is_inclusive_and_order_free() {
        let grid = sheet();
        let range = grid.tiles_between(TileCoord::new(3, 4), TileCoord::new(1, 2));
        assert_eq!(range.len(), 9);
        assert!(range.contains(TileCoord::new(1, 2)));
        assert!(range.contains(TileCoord::new(3, 4)));
        assert!(!range.contains(TileCoord::new(4, 4)));
    }
}
