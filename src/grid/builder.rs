//! Build a sparse feature grid from raw per-access-point readings.
//!
//! Every pair of access points observed at the same cell (including each
//! access point with itself) yields one feature in each orientation whose
//! value is the absolute difference of their filtered signal levels.

use std::collections::{BTreeMap, HashMap};

use crate::core::{ApId, FeatureKey, GridBounds, GridCoord};

use super::exclusion::ExclusionMask;
use super::sparse::{GridError, SparseGrid};

/// One filtered signal reading for an access point at a cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Reading {
    /// Cell the reading was taken at
    pub coord: GridCoord,
    /// Access point the reading belongs to
    pub ap_id: ApId,
    /// Filtered signal level
    pub value: f32,
}

impl Reading {
    /// Create a reading.
    pub fn new(x: i32, y: i32, ap_id: impl Into<ApId>, value: f32) -> Self {
        Self {
            coord: GridCoord::new(x, y),
            ap_id: ap_id.into(),
            value,
        }
    }
}

/// Counters collected while building a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Readings accepted
    pub readings: usize,
    /// Readings replaced by a later reading for the same cell and access point
    pub duplicates: usize,
    /// Readings on excluded cells
    pub excluded: usize,
    /// Readings outside the bounds or with a non-finite value
    pub rejected: usize,
}

/// Collects readings, then produces the pairwise feature grid.
#[derive(Debug)]
pub struct SparseGridBuilder {
    bounds: GridBounds,
    exclusions: ExclusionMask,
    /// Per cell, per access point: latest reading.
    readings: HashMap<GridCoord, BTreeMap<ApId, f32>>,
    stats: BuildStats,
}

impl SparseGridBuilder {
    /// Start a grid covering `bounds`.
    pub fn new(bounds: GridBounds) -> Self {
        Self {
            bounds,
            exclusions: ExclusionMask::empty(),
            readings: HashMap::new(),
            stats: BuildStats::default(),
        }
    }

    /// Set the exclusion mask.
    pub fn exclusions(mut self, exclusions: ExclusionMask) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Add one reading.
    pub fn push(&mut self, reading: Reading) {
        if !self.bounds.contains(reading.coord) || !reading.value.is_finite() {
            log::debug!(
                "Skipping reading {} at {} = {}",
                reading.ap_id,
                reading.coord,
                reading.value
            );
            self.stats.rejected += 1;
            return;
        }
        if self.exclusions.contains(reading.coord) {
            self.stats.excluded += 1;
            return;
        }

        let cell = self.readings.entry(reading.coord).or_default();
        if cell.insert(reading.ap_id, reading.value).is_some() {
            self.stats.duplicates += 1;
        } else {
            self.stats.readings += 1;
        }
    }

    /// Add many readings.
    pub fn readings<I>(mut self, readings: I) -> Self
    where
        I: IntoIterator<Item = Reading>,
    {
        for r in readings {
            self.push(r);
        }
        self
    }

    /// Counters so far.
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Produce the grid.
    pub fn build(self) -> Result<SparseGrid, GridError> {
        let mut grid = SparseGrid::with_exclusions(self.bounds, self.exclusions);

        for (coord, aps) in self.readings {
            for (a, &va) in &aps {
                for (b, &vb) in &aps {
                    grid.insert(coord, FeatureKey::new(a.clone(), b.clone()), (va - vb).abs())?;
                }
            }
        }

        log::debug!(
            "Built grid: {} readings, {} cells, {} values",
            self.stats.readings,
            grid.occupied_cells(),
            grid.value_count()
        );
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pairwise_features_at_shared_cell() {
        let grid = SparseGridBuilder::new(GridBounds::new(0, 0, 1, 1))
            .readings([
                Reading::new(0, 0, "ap1", -40.0),
                Reading::new(0, 0, "ap2", -65.5),
                Reading::new(1, 1, "ap1", -50.0),
            ])
            .build()
            .unwrap();

        let c = GridCoord::new(0, 0);
        let ab = FeatureKey::new("ap1", "ap2");
        assert_relative_eq!(grid.get(c, &ab).unwrap(), 25.5);
        assert_relative_eq!(grid.get(c, &ab.reversed()).unwrap(), 25.5);
        assert_eq!(grid.get(c, &FeatureKey::new("ap1", "ap1")), Some(0.0));

        // A lone reading only pairs with itself
        let lone = grid.cell(GridCoord::new(1, 1)).unwrap();
        assert_eq!(lone.len(), 1);
        assert!(grid.is_symmetric());
    }

    #[test]
    fn test_duplicate_reading_keeps_last() {
        let mut builder = SparseGridBuilder::new(GridBounds::new(0, 0, 0, 0));
        builder.push(Reading::new(0, 0, "a", -10.0));
        builder.push(Reading::new(0, 0, "b", -20.0));
        builder.push(Reading::new(0, 0, "a", -30.0));
        assert_eq!(builder.stats().duplicates, 1);

        let grid = builder.build().unwrap();
        assert_eq!(
            grid.get(GridCoord::new(0, 0), &FeatureKey::new("a", "b")),
            Some(10.0)
        );
    }

    #[test]
    fn test_excluded_and_invalid_readings_dropped() {
        let mask: ExclusionMask = [GridCoord::new(1, 0)].into_iter().collect();
        let mut builder = SparseGridBuilder::new(GridBounds::new(0, 0, 1, 0)).exclusions(mask);
        builder.push(Reading::new(1, 0, "a", -10.0));
        builder.push(Reading::new(5, 0, "a", -10.0));
        builder.push(Reading::new(0, 0, "a", f32::NAN));

        let stats = builder.stats();
        assert_eq!(stats.excluded, 1);
        assert_eq!(stats.rejected, 2);

        let grid = builder.build().unwrap();
        assert_eq!(grid.occupied_cells(), 0);
    }
}
