//! Inclusive integer bounding box of the grid.
//!
//! [`GridBounds`] is derived from the extreme coordinates of the raw readings
//! for a floorplan, so it is not necessarily 0-based.
//!
//! # Usage
//!
//! ```
//! use feature_cache::core::{GridBounds, GridCoord};
//!
//! let bounds = GridBounds::from_coords([
//!     GridCoord::new(2, 5),
//!     GridCoord::new(4, 1),
//! ])
//! .unwrap();
//!
//! assert_eq!(bounds, GridBounds::new(2, 1, 4, 5));
//! assert_eq!(bounds.cell_count(), 15);
//! assert!(!bounds.contains(GridCoord::new(0, 0)));
//! ```

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::point::{Axis, GridCoord};

/// Axis-aligned inclusive bounding box in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridBounds {
    /// Smallest x (column)
    pub min_x: i32,
    /// Smallest y (row)
    pub min_y: i32,
    /// Largest x (column)
    pub max_x: i32,
    /// Largest y (row)
    pub max_y: i32,
}

impl GridBounds {
    /// Create bounds from the extreme coordinates (inclusive).
    ///
    /// Swapped extremes are normalized so `min <= max` always holds.
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: min_x.max(max_x),
            max_y: min_y.max(max_y),
        }
    }

    /// Smallest bounds containing every coordinate, or `None` if there are none.
    pub fn from_coords<I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = GridCoord>,
    {
        let mut iter = coords.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::new(first.x, first.y, first.x, first.y);
        for c in iter {
            bounds.expand_to_include(c);
        }
        Some(bounds)
    }

    /// Grow the bounds so they contain `coord`.
    #[inline]
    pub fn expand_to_include(&mut self, coord: GridCoord) {
        self.min_x = self.min_x.min(coord.x);
        self.min_y = self.min_y.min(coord.y);
        self.max_x = self.max_x.max(coord.x);
        self.max_y = self.max_y.max(coord.y);
    }

    /// Check if a coordinate lies inside (edges included).
    #[inline]
    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.x >= self.min_x
            && coord.x <= self.max_x
            && coord.y >= self.min_y
            && coord.y <= self.max_y
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        (i64::from(self.max_x) - i64::from(self.min_x)) as usize + 1
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        (i64::from(self.max_y) - i64::from(self.min_y)) as usize + 1
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width().saturating_mul(self.height())
    }

    /// Valid positions along `axis`.
    #[inline]
    pub fn range(&self, axis: Axis) -> RangeInclusive<i32> {
        match axis {
            Axis::X => self.min_x..=self.max_x,
            Axis::Y => self.min_y..=self.max_y,
        }
    }

    /// Every cell in row-major order (y outer, x inner).
    pub fn cells(self) -> impl Iterator<Item = GridCoord> {
        self.range(Axis::Y)
            .flat_map(move |y| self.range(Axis::X).map(move |x| GridCoord::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_extremes() {
        let b = GridBounds::new(5, 9, 1, 2);
        assert_eq!(b, GridBounds::new(1, 2, 5, 9));
        assert_eq!(b.width(), 5);
        assert_eq!(b.height(), 8);
    }

    #[test]
    fn test_extent_of_wide_bounds() {
        let b = GridBounds::new(i32::MIN, -1, i32::MAX, 1);
        assert_eq!(b.width() as u64, 1u64 << 32);
        assert_eq!(b.height(), 3);

        let all = GridBounds::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert!(all.cell_count() >= b.cell_count());
    }

    #[test]
    fn test_from_coords_empty() {
        assert!(GridBounds::from_coords(std::iter::empty()).is_none());
    }

    #[test]
    fn test_contains_edges() {
        let b = GridBounds::new(-1, 0, 2, 3);
        assert!(b.contains(GridCoord::new(-1, 0)));
        assert!(b.contains(GridCoord::new(2, 3)));
        assert!(!b.contains(GridCoord::new(3, 3)));
        assert!(!b.contains(GridCoord::new(0, -1)));
    }

    #[test]
    fn test_row_major_iteration() {
        let b = GridBounds::new(1, 1, 2, 2);
        let cells: Vec<_> = b.cells().collect();
        assert_eq!(
            cells,
            vec![
                GridCoord::new(1, 1),
                GridCoord::new(2, 1),
                GridCoord::new(1, 2),
                GridCoord::new(2, 2),
            ]
        );
        assert_eq!(cells.len(), b.cell_count());
    }
}
