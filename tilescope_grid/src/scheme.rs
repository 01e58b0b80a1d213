// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

use core::fmt;
use core::str::FromStr;

use crate::{TileCoord, TileId};

/// How tile coordinates are numbered.
///
/// Every scheme is a bijection between the coordinates of a grid and the IDs
/// `0..cols * rows`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdScheme {
    /// `id = row * cols + col`.
    RowMajor,
    /// The sheet is cut into vertical strips of `block_cols` columns. IDs run
    /// row-major inside a strip, strip after strip.
    ///
    /// When the column count is not a multiple of `block_cols`, the last strip
    /// is narrower and IDs stay dense.
    ColumnBlocks {
        /// Width of one strip in tiles.
        block_cols: u32,
    },
}

impl Default for IdScheme {
    fn default() -> Self {
        Self::ColumnBlocks { block_cols: 16 }
    }
}

impl IdScheme {
    /// Name used in configuration files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::RowMajor => "row_major",
            Self::ColumnBlocks { .. } => "column_blocks",
        }
    }

    /// Computes the ID of `coord`; the caller guarantees it lies in the grid.
    pub(crate) fn id_of(self, coord: TileCoord, cols: u32, rows: u32) -> TileId {
        match self {
            Self::RowMajor => TileId(coord.row * cols + coord.col),
            Self::ColumnBlocks { block_cols } => {
                let strip = coord.col / block_cols;
                let within = coord.col % block_cols;
                let width = strip_width(strip, block_cols, cols);
                TileId(strip * block_cols * rows + coord.row * width + within)
            }
        }
    }

    /// Inverse of [`IdScheme::id_of`]; the caller guarantees `id` is in range.
    pub(crate) fn coord_of(self, id: TileId, cols: u32, rows: u32) -> TileCoord {
        match self {
            Self::RowMajor => TileCoord::new(id.0 % cols, id.0 / cols),
            Self::ColumnBlocks { block_cols } => {
                // Every strip before the last one is full width.
                let per_strip = block_cols * rows;
                let strip = id.0 / per_strip;
                let rem = id.0 % per_strip;
                let width = strip_width(strip, block_cols, cols);
                TileCoord::new(strip * block_cols + rem % width, rem / width)
            }
        }
    }
}

fn strip_width(strip: u32, block_cols: u32, cols: u32) -> u32 {
    (cols - strip * block_cols).min(block_cols)
}

impl fmt::Display for IdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowMajor => f.write_str("row_major"),
            Self::ColumnBlocks { block_cols } => write!(f, "column_blocks({block_cols})"),
        }
    }
}

/// Error returned when an ID scheme name is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown tile ID scheme `{0}` (expected `row_major` or `column_blocks`)")]
pub struct ParseIdSchemeError(pub String);

impl FromStr for IdScheme {
    type Err = ParseIdSchemeError;

    /// Parses a scheme name. `column_blocks` uses the default strip width;
    /// callers with a configured width replace it afterwards.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "row_major" | "row-major" | "rows" => Ok(Self::RowMajor),
            "column_blocks" | "column-blocks" | "blocks" => Ok(Self::default()),
            _ => Err(ParseIdSchemeError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IdScheme;
    use crate::{TileCoord, TileId};

    #[test]
    fn narrow_last_strip_stays_dense() {
        // 20 columns with 16-wide strips: the second strip is 4 wide.
        let scheme = IdScheme::ColumnBlocks { block_cols: 16 };
        let (cols, rows) = (20, 3);
        assert_eq!(scheme.id_of(TileCoord::new(16, 0), cols, rows), TileId(48));
        assert_eq!(scheme.id_of(TileCoord::new(19, 0), cols, rows), TileId(51));
        assert_eq!(scheme.id_of(TileCoord::new(16, 1), cols, rows), TileId(52));
        assert_eq!(scheme.id_of(TileCoord::new(19, 2), cols, rows), TileId(59));
        assert_eq!(scheme.coord_of(TileId(52), cols, rows), TileCoord::new(16, 1));
    }

    #[test]
    fn names_parse_back() {
        assert_eq!("row_major".parse(), Ok(IdScheme::RowMajor));
        assert_eq!(" Column_Blocks ".parse(), Ok(IdScheme::default()));
        assert!("diagonal".parse::<IdScheme>().is_err());
        assert_eq!(IdScheme::RowMajor.name(), "row_major");
    }
}
