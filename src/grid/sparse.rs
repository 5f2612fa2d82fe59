//! Sparse grid storage.

use std::collections::{BTreeSet, HashMap};

use thiserror::Error;

use crate::core::{Axis, FeatureKey, GridBounds, GridCoord};

use super::exclusion::ExclusionMask;
use super::update::{MergeStats, PendingUpdate};

/// Feature values stored at one cell.
pub type FeatureMap = HashMap<FeatureKey, f32>;

/// Grid errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("Cell {coord} is outside grid bounds {bounds:?}")]
    OutOfBounds { coord: GridCoord, bounds: GridBounds },

    #[error("Cell {0} is excluded from the floorplan")]
    Excluded(GridCoord),

    #[error("Invalid value {value} for feature {key} at {coord}")]
    InvalidValue {
        coord: GridCoord,
        key: String,
        value: f32,
    },

    #[error("Value {value} for feature {key} at {coord} conflicts with {reversed} stored for the reversed pair")]
    Asymmetric {
        coord: GridCoord,
        key: String,
        value: f32,
        reversed: f32,
    },
}

/// Sparse 2-D map from cell to per-feature values.
///
/// Invariants maintained by every mutating method:
/// - every stored cell lies inside [`bounds`](Self::bounds)
/// - no excluded cell ever holds a value
/// - every stored value is finite and non-negative
/// - a pair stored in both orientations at a cell has one value
#[derive(Clone, Debug, PartialEq)]
pub struct SparseGrid {
    cells: HashMap<GridCoord, FeatureMap>,
    exclusions: ExclusionMask,
    bounds: GridBounds,
}

impl SparseGrid {
    /// Create an empty grid with no exclusions.
    pub fn new(bounds: GridBounds) -> Self {
        Self::with_exclusions(bounds, ExclusionMask::empty())
    }

    /// Create an empty grid with an exclusion mask.
    pub fn with_exclusions(bounds: GridBounds, exclusions: ExclusionMask) -> Self {
        Self {
            cells: HashMap::new(),
            exclusions,
            bounds,
        }
    }

    // === Basic Properties ===

    /// Bounding box of the grid.
    #[inline]
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Exclusion mask.
    #[inline]
    pub fn exclusions(&self) -> &ExclusionMask {
        &self.exclusions
    }

    /// Check if a cell must never receive a value.
    #[inline]
    pub fn is_excluded(&self, coord: GridCoord) -> bool {
        self.exclusions.contains(coord)
    }

    /// Number of cells holding at least one value.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Number of stored (cell, feature) values.
    pub fn value_count(&self) -> usize {
        self.cells.values().map(HashMap::len).sum()
    }

    // === Cell Access ===

    /// Value of `key` at `coord`, if stored.
    #[inline]
    pub fn get(&self, coord: GridCoord, key: &FeatureKey) -> Option<f32> {
        self.cells.get(&coord).and_then(|m| m.get(key)).copied()
    }

    /// Check if `coord` stores a value for `key`.
    #[inline]
    pub fn contains(&self, coord: GridCoord, key: &FeatureKey) -> bool {
        self.cells.get(&coord).is_some_and(|m| m.contains_key(key))
    }

    /// All values stored at a cell.
    #[inline]
    pub fn cell(&self, coord: GridCoord) -> Option<&FeatureMap> {
        self.cells.get(&coord)
    }

    /// Iterate over occupied cells (unordered).
    pub fn cells(&self) -> impl Iterator<Item = (&GridCoord, &FeatureMap)> {
        self.cells.iter()
    }

    /// Known `(position, value)` pairs of `key` on the line through `across`
    /// along `axis`, in increasing position order.
    pub fn line_values<'a>(
        &'a self,
        key: &'a FeatureKey,
        axis: Axis,
        across: i32,
    ) -> impl Iterator<Item = (i32, f32)> + 'a {
        let origin = GridCoord::new(0, 0).with_along(axis.perpendicular(), across);
        self.bounds.range(axis).filter_map(move |pos| {
            self.get(origin.with_along(axis, pos), key)
                .map(|value| (pos, value))
        })
    }

    /// Canonical feature keys present anywhere in the grid.
    ///
    /// One key per unordered access-point pair; this is the unit of work for
    /// interpolation.
    pub fn feature_keys(&self) -> BTreeSet<FeatureKey> {
        self.cells
            .values()
            .flat_map(|m| m.keys())
            .map(FeatureKey::canonical)
            .collect()
    }

    // === Mutation ===

    /// Store a direct value, replacing any previous value for that key.
    ///
    /// Fails with [`GridError::Asymmetric`] if the reversed key already holds
    /// a different value at `coord`. Returns the previous value.
    pub fn insert(
        &mut self,
        coord: GridCoord,
        key: FeatureKey,
        value: f32,
    ) -> Result<Option<f32>, GridError> {
        self.check_writable(coord, &key, value)?;
        if !key.is_self_pair()
            && let Some(reversed) = self.get(coord, &key.reversed())
            && reversed != value
        {
            return Err(GridError::Asymmetric {
                coord,
                key: key.to_string(),
                value,
                reversed,
            });
        }
        Ok(self.cells.entry(coord).or_default().insert(key, value))
    }

    /// Apply pending updates without overwriting existing values.
    ///
    /// A pair already stored in either orientation counts as existing.
    /// Excluded cells, out-of-bounds cells and invalid values are dropped.
    pub fn apply_updates<I>(&mut self, updates: I) -> MergeStats
    where
        I: IntoIterator<Item = PendingUpdate>,
    {
        let mut stats = MergeStats::default();
        for update in updates {
            match self.check_writable(update.coord, &update.key, update.value) {
                Ok(()) => {}
                Err(GridError::Excluded(_)) => {
                    stats.excluded += 1;
                    continue;
                }
                Err(e) => {
                    log::debug!("Dropping update: {}", e);
                    stats.rejected += 1;
                    continue;
                }
            }

            let cell = self.cells.entry(update.coord).or_default();
            if cell.contains_key(&update.key) || cell.contains_key(&update.key.reversed()) {
                stats.existing += 1;
            } else {
                cell.insert(update.key, update.value);
                stats.applied += 1;
            }
        }
        stats
    }

    /// Store every value under its reversed key where that key is missing.
    ///
    /// Existing values are never replaced. Returns the number of values
    /// written.
    pub fn symmetrize(&mut self) -> usize {
        let mut written = 0;
        for cell in self.cells.values_mut() {
            let mirrored: Vec<(FeatureKey, f32)> = cell
                .iter()
                .filter(|(key, _)| !key.is_self_pair())
                .map(|(key, &value)| (key.reversed(), value))
                .filter(|(reversed, _)| !cell.contains_key(reversed))
                .collect();

            written += mirrored.len();
            cell.extend(mirrored);
        }
        written
    }

    /// Check that every value equals the value under its reversed key.
    pub fn is_symmetric(&self) -> bool {
        self.cells.values().all(|cell| {
            cell.iter()
                .all(|(key, value)| cell.get(&key.reversed()) == Some(value))
        })
    }

    fn check_writable(
        &self,
        coord: GridCoord,
        key: &FeatureKey,
        value: f32,
    ) -> Result<(), GridError> {
        if !self.bounds.contains(coord) {
            return Err(GridError::OutOfBounds {
                coord,
                bounds: self.bounds,
            });
        }
        if self.is_excluded(coord) {
            return Err(GridError::Excluded(coord));
        }
        if !value.is_finite() || value < 0.0 {
            return Err(GridError::InvalidValue {
                coord,
                key: key.to_string(),
                value,
            });
        }
        Ok(())
    }
}
