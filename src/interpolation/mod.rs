//! Grid interpolation.
//!
//! Turns a sparse feature grid into a dense one. The method is chosen at
//! construction time through [`InterpolationMethod`]:
//!
//! - **None**: [`PassThrough`] returns the grid unchanged (apart from
//!   symmetrization)
//! - **Bilinear**: [`BilinearInterpolator`] fills every non-excluded cell per
//!   feature using neighbor search, linear interpolation and least-squares
//!   extrapolation
//!
//! # Pipeline
//!
//! ```text
//! feature keys ──► WorkerPool ──► fill_feature (per key, read-only grid)
//!                                     │
//!                                     ▼
//!                     Vec<PendingUpdate> (all keys, after join)
//!                                     │
//!                     apply_updates ──► symmetrize ──► dense grid
//! ```
//!
//! # Example
//!
//! ```
//! use feature_cache::core::{FeatureKey, GridBounds, GridCoord};
//! use feature_cache::grid::SparseGrid;
//! use feature_cache::interpolation::{DynInterpolator, InterpolationMethod, Interpolator};
//!
//! let key = FeatureKey::new("ap1", "ap2");
//! let mut grid = SparseGrid::new(GridBounds::new(0, 0, 0, 2));
//! grid.insert(GridCoord::new(0, 0), key.clone(), 4.0).unwrap();
//! grid.insert(GridCoord::new(0, 2), key.clone(), 8.0).unwrap();
//!
//! let interpolator = DynInterpolator::new(InterpolationMethod::Bilinear, 2);
//! let dense = interpolator.interpolate(grid).unwrap();
//!
//! assert_eq!(dense.get(GridCoord::new(0, 1), &key), Some(6.0));
//! ```

mod bilinear;
mod fill;
mod pool;
mod regression;
mod search;

pub use bilinear::BilinearInterpolator;
pub use fill::fill_feature;
pub use pool::{PoolError, WorkerPool};
pub use regression::LineFit;
pub use search::{Neighbor, NeighborSearch, PRIMARY_AXIS, interpolate};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::SparseGrid;

/// Interpolation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterpolationError {
    #[error("Worker pool failed: {0}")]
    Pool(#[from] PoolError),
}

/// Capability to densify a sparse grid.
pub trait Interpolator: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Consume a sparse grid and return the densified grid.
    ///
    /// On error no partially filled grid is returned.
    fn interpolate(&self, grid: SparseGrid) -> Result<SparseGrid, InterpolationError>;
}

/// Leaves every cell as built.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassThrough;

impl Interpolator for PassThrough {
    fn name(&self) -> &'static str {
        "none"
    }

    fn interpolate(&self, mut grid: SparseGrid) -> Result<SparseGrid, InterpolationError> {
        grid.symmetrize();
        Ok(grid)
    }
}

/// Available interpolation methods.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    /// No interpolation
    None,
    /// Neighbor search with regression fallback
    #[default]
    Bilinear,
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterpolationMethod::None => write!(f, "none"),
            InterpolationMethod::Bilinear => write!(f, "bilinear"),
        }
    }
}

/// Runtime-selected interpolator.
#[derive(Clone, Copy, Debug)]
pub enum DynInterpolator {
    /// Pass-through
    None(PassThrough),
    /// Bilinear fill
    Bilinear(BilinearInterpolator),
}

impl DynInterpolator {
    /// Create the interpolator for `method`.
    ///
    /// `workers` sizes the pool for methods that use one (0 = host parallelism).
    pub fn new(method: InterpolationMethod, workers: usize) -> Self {
        match method {
            InterpolationMethod::None => DynInterpolator::None(PassThrough),
            InterpolationMethod::Bilinear => {
                DynInterpolator::Bilinear(BilinearInterpolator::new(WorkerPool::new(workers)))
            }
        }
    }

    /// Method this interpolator implements.
    pub fn method(&self) -> InterpolationMethod {
        match self {
            DynInterpolator::None(_) => InterpolationMethod::None,
            DynInterpolator::Bilinear(_) => InterpolationMethod::Bilinear,
        }
    }
}

impl Interpolator for DynInterpolator {
    fn name(&self) -> &'static str {
        match self {
            DynInterpolator::None(i) => i.name(),
            DynInterpolator::Bilinear(i) => i.name(),
        }
    }

    fn interpolate(&self, grid: SparseGrid) -> Result<SparseGrid, InterpolationError> {
        match self {
            DynInterpolator::None(i) => i.interpolate(grid),
            DynInterpolator::Bilinear(i) => i.interpolate(grid),
        }
    }
}
