// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

use core::ops::Range;

use crate::TileCoord;

/// Axis-aligned block of tiles given as half-open column and row ranges.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TileRange {
    cols: Range<u32>,
    rows: Range<u32>,
}

impl TileRange {
    /// Creates a range; inverted ranges are treated as empty.
    #[must_use]
    pub fn new(cols: Range<u32>, rows: Range<u32>) -> Self {
        let cols = cols.start..cols.end.max(cols.start);
        let rows = rows.start..rows.end.max(rows.start);
        Self { cols, rows }
    }

    /// Columns covered by the range.
    #[must_use]
    pub fn cols(&self) -> Range<u32> {
        self.cols.clone()
    }

    /// Rows covered by the range.
    #[must_use]
    pub fn rows(&self) -> Range<u32> {
        self.rows.clone()
    }

    /// Returns `true` if the range covers no tile.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cols.is_empty() || self.rows.is_empty()
    }

    /// Number of tiles in the range.
    #[must_use]
    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.cols.end - self.cols.start) as usize * (self.rows.end - self.rows.start) as usize
    }

    /// Returns `true` if `coord` lies inside the range.
    #[must_use]
    pub fn contains(&self, coord: TileCoord) -> bool {
        self.cols.contains(&coord.col) && self.rows.contains(&coord.row)
    }

    /// Iterates the covered coordinates row by row.
    #[must_use]
    pub fn iter(&self) -> TileRangeIter {
        TileRangeIter {
            cols: self.cols.clone(),
            rows: self.rows.clone(),
            next: if self.is_empty() {
                None
            } else {
                Some(TileCoord::new(self.cols.start, self.rows.start))
            },
        }
    }
}

impl IntoIterator for &TileRange {
    type Item = TileCoord;
    type IntoIter = TileRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row-major iterator over a [`TileRange`].
#[derive(Clone, Debug)]
pub struct TileRangeIter {
    cols: Range<u32>,
    rows: Range<u32>,
    next: Option<TileCoord>,
}

impl Iterator for TileRangeIter {
    type Item = TileCoord;

    fn next(&mut self) -> Option<TileCoord> {
        let current = self.next?;
        self.next = if current.col + 1 < self.cols.end {
            Some(TileCoord::new(current.col + 1, current.row))
        } else if current.row + 1 < self.rows.end {
            Some(TileCoord::new(self.cols.start, current.row + 1))
        } else {
            None
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::TileRange;
    use crate::TileCoord;

    #[test]
    fn iterates_row_by_row() {
        let range = TileRange::new(2..4, 5..7);
        let coords: Vec<_> = range.iter().collect();
        assert_eq!(
            coords,
            [
                TileCoord::new(2, 5),
                TileCoord::new(3, 5),
                TileCoord::new(2, 6),
                TileCoord::new(3, 6),
            ]
        );
        assert_eq!(range.len(), coords.len());
    }

    #[test]
    fn inverted_ranges_are_empty() {
        #[allow(clippy::reversed_empty_ranges, reason = "exercising normalization")]
        let range = TileRange::new(5..2, 0..3);
        assert!(range.is_empty());
        assert_eq!(range.len(), 0);
        assert_eq!(range.iter().next(), None);
    }
}
