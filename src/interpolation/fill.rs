//! Per-feature fill task.
//!
//! For one feature key, visits every cell of the bounding box in row-major
//! order and proposes a value for each cell that is neither excluded nor
//! already holding that feature. The value is interpolated along the cell's
//! column between the nearest bound above and below; a missing bound falls
//! back to the column trend one row past the target.
//!
//! The task never writes to the grid. Its output is a list of
//! [`PendingUpdate`]s merged after every task has finished.

use crate::core::{Direction, FeatureKey};
use crate::grid::{PendingUpdate, SparseGrid};

use super::search::{NeighborSearch, PRIMARY_AXIS, interpolate};

/// Compute every pending update needed to fill `key` across `grid`.
pub fn fill_feature(grid: &SparseGrid, key: &FeatureKey) -> Vec<PendingUpdate> {
    let search = NeighborSearch::new(grid, key);
    let mut updates = Vec::new();

    for coord in grid.bounds().cells() {
        if grid.is_excluded(coord) || grid.contains(coord, key) {
            continue;
        }

        let low = search
            .find(coord, PRIMARY_AXIS, Direction::TowardLow)
            .or_else(|| search.extrapolate(coord, PRIMARY_AXIS, Direction::TowardLow));
        let Some(low) = low else {
            continue;
        };

        let high = search
            .find(coord, PRIMARY_AXIS, Direction::TowardHigh)
            .or_else(|| search.extrapolate(coord, PRIMARY_AXIS, Direction::TowardHigh));
        let Some(high) = high else {
            continue;
        };

        let value = interpolate(low, high, coord.along(PRIMARY_AXIS));
        if value.is_finite() && value > 0.0 {
            updates.push(PendingUpdate::new(coord, key.clone(), value));
        }
    }

    log::debug!("Feature {}: {} pending updates", key, updates.len());
    updates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GridBounds, GridCoord};
    use approx::assert_relative_eq;

    fn key() -> FeatureKey {
        FeatureKey::new("a", "b")
    }

    fn value_at(updates: &[PendingUpdate], x: i32, y: i32) -> Option<f32> {
        updates
            .iter()
            .find(|u| u.coord == GridCoord::new(x, y))
            .map(|u| u.value)
    }

    #[test]
    fn test_fill_between_two_rows() {
        let mut grid = SparseGrid::new(GridBounds::new(3, 0, 3, 4));
        grid.insert(GridCoord::new(3, 0), key(), 10.0).unwrap();
        grid.insert(GridCoord::new(3, 4), key(), 20.0).unwrap();

        let updates = fill_feature(&grid, &key());

        assert_eq!(updates.len(), 3);
        assert_relative_eq!(value_at(&updates, 3, 1).unwrap(), 12.5);
        assert_relative_eq!(value_at(&updates, 3, 2).unwrap(), 15.0);
        assert_relative_eq!(value_at(&updates, 3, 3).unwrap(), 17.5);
    }

    #[test]
    fn test_fill_does_not_touch_grid() {
        let mut grid = SparseGrid::new(GridBounds::new(0, 0, 0, 2));
        grid.insert(GridCoord::new(0, 0), key(), 1.0).unwrap();
        grid.insert(GridCoord::new(0, 2), key(), 3.0).unwrap();
        let before = grid.clone();

        let updates = fill_feature(&grid, &key());

        assert_eq!(updates.len(), 1);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_fill_skips_existing_and_excluded() {
        let mask = [GridCoord::new(0, 1)].into_iter().collect();
        let mut grid = SparseGrid::with_exclusions(GridBounds::new(0, 0, 0, 3), mask);
        grid.insert(GridCoord::new(0, 0), key(), 2.0).unwrap();
        grid.insert(GridCoord::new(0, 3), key(), 8.0).unwrap();

        let updates = fill_feature(&grid, &key());

        assert!(updates.iter().all(|u| u.coord != GridCoord::new(0, 0)));
        assert!(updates.iter().all(|u| u.coord != GridCoord::new(0, 3)));
        assert!(value_at(&updates, 0, 1).is_none());
        assert_relative_eq!(value_at(&updates, 0, 2).unwrap(), 6.0, epsilon = 1e-5);
    }

    #[test]
    fn test_fill_rejects_non_positive() {
        // Falling trend: extrapolating past y=2 goes negative
        let mut grid = SparseGrid::new(GridBounds::new(0, 0, 0, 4));
        grid.insert(GridCoord::new(0, 0), key(), 4.0).unwrap();
        grid.insert(GridCoord::new(0, 1), key(), 2.0).unwrap();

        let updates = fill_feature(&grid, &key());

        assert!(updates.iter().all(|u| u.value > 0.0));
        assert!(value_at(&updates, 0, 4).is_none());
    }

    #[test]
    fn test_fill_unknown_feature_produces_nothing() {
        let mut grid = SparseGrid::new(GridBounds::new(0, 0, 4, 4));
        grid.insert(GridCoord::new(2, 2), key(), 5.0).unwrap();

        assert!(fill_feature(&grid, &FeatureKey::new("x", "y")).is_empty());
    }
}
