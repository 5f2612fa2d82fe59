//! Cells excluded from the walkable floorplan.

use std::collections::HashSet;

use crate::core::GridCoord;

/// Set of cells that must never receive a value.
///
/// Immutable once the grid is built; an empty mask excludes nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExclusionMask {
    cells: HashSet<GridCoord>,
}

impl ExclusionMask {
    /// Mask that excludes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if a cell is excluded.
    #[inline]
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.cells.contains(&coord)
    }

    /// Number of excluded cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if nothing is excluded.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over excluded cells (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &GridCoord> {
        self.cells.iter()
    }
}

impl FromIterator<GridCoord> for ExclusionMask {
    fn from_iter<I: IntoIterator<Item = GridCoord>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Extend<GridCoord> for ExclusionMask {
    fn extend<I: IntoIterator<Item = GridCoord>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}
