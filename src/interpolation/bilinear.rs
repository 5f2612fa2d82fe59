//! Bilinear fill of every feature across the grid.
//!
//! One [`fill_feature`] task per canonical feature key runs on the worker
//! pool against a shared read-only grid. After the join, every pending
//! update is merged (never overwriting) and the grid is symmetrized.

use crate::core::FeatureKey;
use crate::grid::{MergeStats, PendingUpdate, SparseGrid};

use super::fill::fill_feature;
use super::pool::WorkerPool;
use super::{InterpolationError, Interpolator};

/// Neighbor-search interpolation with regression fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct BilinearInterpolator {
    pool: WorkerPool,
}

impl BilinearInterpolator {
    /// Create an interpolator running on `pool`.
    pub fn new(pool: WorkerPool) -> Self {
        Self { pool }
    }

    /// Worker pool in use.
    pub fn pool(&self) -> WorkerPool {
        self.pool
    }

    /// Run every fill task and return the updates, without merging.
    pub fn pending_updates(
        &self,
        grid: &SparseGrid,
    ) -> Result<Vec<PendingUpdate>, InterpolationError> {
        let keys: Vec<FeatureKey> = grid
            .feature_keys()
            .into_iter()
            .filter(|key| !key.is_self_pair())
            .collect();

        log::info!(
            "Interpolating {} features over {} cells with {} workers",
            keys.len(),
            grid.bounds().cell_count(),
            self.pool.workers().min(keys.len().max(1))
        );

        let per_feature = self.pool.run(keys, |key| fill_feature(grid, &key))?;
        Ok(per_feature.into_iter().flatten().collect())
    }
}

impl Interpolator for BilinearInterpolator {
    fn name(&self) -> &'static str {
        "bilinear"
    }

    fn interpolate(&self, mut grid: SparseGrid) -> Result<SparseGrid, InterpolationError> {
        // Tasks only read the canonical orientation
        grid.symmetrize();

        let updates = self.pending_updates(&grid)?;
        let proposed = updates.len();

        let stats: MergeStats = grid.apply_updates(updates);
        let mirrored = grid.symmetrize();

        log::info!(
            "Merged {} of {} updates ({} excluded, {} existing, {} rejected), mirrored {}",
            stats.applied,
            proposed,
            stats.excluded,
            stats.existing,
            stats.rejected,
            mirrored
        );
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GridBounds, GridCoord};
    use approx::assert_relative_eq;

    #[test]
    fn test_interpolate_fills_both_orientations() {
        let key = FeatureKey::new("a", "b");
        let mut grid = SparseGrid::new(GridBounds::new(0, 0, 0, 4));
        grid.insert(GridCoord::new(0, 0), key.clone(), 10.0).unwrap();
        grid.insert(GridCoord::new(0, 4), key.reversed(), 20.0).unwrap();

        let dense = BilinearInterpolator::new(WorkerPool::new(2))
            .interpolate(grid)
            .unwrap();

        assert!(dense.is_symmetric());
        assert_eq!(dense.get(GridCoord::new(0, 0), &key.reversed()), Some(10.0));
        assert_eq!(dense.get(GridCoord::new(0, 4), &key), Some(20.0));
        assert_relative_eq!(dense.get(GridCoord::new(0, 2), &key).unwrap(), 15.0);
        assert_relative_eq!(
            dense.get(GridCoord::new(0, 2), &key.reversed()).unwrap(),
            15.0
        );
    }

    #[test]
    fn test_self_pairs_are_not_tasks() {
        let mut grid = SparseGrid::new(GridBounds::new(0, 0, 0, 2));
        grid.insert(GridCoord::new(0, 0), FeatureKey::new("a", "a"), 0.0)
            .unwrap();

        let updates = BilinearInterpolator::default()
            .pending_updates(&grid)
            .unwrap();
        assert!(updates.is_empty());
    }

    #[test]
    fn test_pending_updates_cover_column() {
        let key = FeatureKey::new("a", "b");
        let mut grid = SparseGrid::new(GridBounds::new(0, 0, 0, 4));
        grid.insert(GridCoord::new(0, 0), key.clone(), 10.0).unwrap();
        grid.insert(GridCoord::new(0, 4), key.clone(), 20.0).unwrap();

        let updates = BilinearInterpolator::new(WorkerPool::new(1))
            .pending_updates(&grid)
            .unwrap();

        assert_eq!(updates.len(), 3);
        let at_two = updates
            .iter()
            .find(|u| u.coord == GridCoord::new(0, 2))
            .unwrap();
        assert_relative_eq!(at_two.value, 15.0);
    }
}
