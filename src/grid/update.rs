//! Buffered grid updates produced during the parallel phase.

use crate::core::{FeatureKey, GridCoord};

/// A value proposed for `(coord, key)` by a fill task, not yet in the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingUpdate {
    /// Target cell
    pub coord: GridCoord,
    /// Feature the value belongs to
    pub key: FeatureKey,
    /// Interpolated value (strictly positive)
    pub value: f32,
}

impl PendingUpdate {
    /// Create a pending update.
    pub fn new(coord: GridCoord, key: FeatureKey, value: f32) -> Self {
        Self { coord, key, value }
    }
}

/// Outcome of merging pending updates into a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Updates written to the grid
    pub applied: usize,
    /// Dropped because the cell is excluded
    pub excluded: usize,
    /// Dropped because the cell already had a value for that key
    pub existing: usize,
    /// Dropped because the value or coordinate was invalid
    pub rejected: usize,
}

impl MergeStats {
    /// Total updates considered.
    pub fn total(&self) -> usize {
        self.applied + self.excluded + self.existing + self.rejected
    }
}
