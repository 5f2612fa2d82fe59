//! End-to-end cache construction.
//!
//! ```text
//! ReadingStore ──► bounds, layouts, readings
//!                       │
//!                       ▼
//!              SparseGridBuilder ──► SparseGrid
//!                                        │
//!                              Interpolator (optional)
//!                                        │
//!                                        ▼
//!                                  FeatureCache ──► JSON file
//! ```
//!
//! Nothing is written unless every stage succeeds.

use std::path::Path;

use crate::config::CacheConfig;
use crate::error::Result;
use crate::grid::{SparseGrid, SparseGridBuilder};
use crate::interpolation::{DynInterpolator, InterpolationMethod, Interpolator};
use crate::io::{FeatureCache, ReadingStore, exclusions_from_layouts};

/// Builds feature caches from a reading store.
pub struct CacheBuilder<'a, S: ReadingStore> {
    store: &'a S,
    interpolator: DynInterpolator,
}

impl<'a, S: ReadingStore> CacheBuilder<'a, S> {
    /// Create a builder that interpolates with the configured method.
    pub fn new(store: &'a S, config: &CacheConfig) -> Self {
        Self {
            store,
            interpolator: DynInterpolator::new(
                config.interpolation.method,
                config.interpolation.workers,
            ),
        }
    }

    /// Disable interpolation.
    pub fn without_interpolation(mut self) -> Self {
        self.interpolator = DynInterpolator::new(InterpolationMethod::None, 0);
        self
    }

    /// Interpolator in use.
    pub fn interpolator(&self) -> &DynInterpolator {
        &self.interpolator
    }

    /// Load the sparse grid for a floorplan.
    ///
    /// Missing or malformed layout data means no exclusions.
    pub fn load_grid(&self, fp_id: &str) -> Result<SparseGrid> {
        let bounds = self.store.bounds(fp_id)?;

        let layouts = self.store.layouts(fp_id).unwrap_or_else(|e| {
            log::warn!("No layout for floorplan {}: {}", fp_id, e);
            Vec::new()
        });
        let exclusions = exclusions_from_layouts(layouts, bounds);

        let readings = self.store.readings(fp_id)?;
        let builder = SparseGridBuilder::new(bounds)
            .exclusions(exclusions)
            .readings(readings);
        let stats = builder.stats();
        let grid = builder.build()?;

        log::info!(
            "Floorplan {}: {}x{} cells, {} excluded, {} readings ({} dropped), {} features",
            fp_id,
            bounds.width(),
            bounds.height(),
            grid.exclusions().len(),
            stats.readings,
            stats.excluded + stats.rejected,
            grid.feature_keys().len()
        );
        Ok(grid)
    }

    /// Build the cache for a floorplan.
    pub fn build(&self, fp_id: &str) -> Result<FeatureCache> {
        let grid = self.load_grid(fp_id)?;
        let grid = self.interpolator.interpolate(grid)?;
        Ok(FeatureCache::from_grid(&grid))
    }

    /// Build the cache for a floorplan and write it to `output`.
    pub fn build_to_file(&self, fp_id: &str, output: &Path, pretty: bool) -> Result<FeatureCache> {
        let cache = self.build(fp_id)?;
        cache.write(output, pretty)?;
        Ok(cache)
    }
}
