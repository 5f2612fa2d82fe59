//! Serialized feature cache.
//!
//! The cache maps `"x_y"` cell keys to feature-key strings and their values.
//! Both levels are ordered, so the JSON output is stable across runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::SparseGrid;

/// Output errors
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Feature values of one cell, keyed by feature-key string.
pub type CellFeatures = BTreeMap<String, f32>;

/// Dense per-cell feature cache ready for serialization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureCache {
    cells: BTreeMap<String, CellFeatures>,
}

impl FeatureCache {
    /// Snapshot every occupied cell of `grid`.
    pub fn from_grid(grid: &SparseGrid) -> Self {
        let cells = grid
            .cells()
            .filter(|(_, features)| !features.is_empty())
            .map(|(coord, features)| {
                let features = features
                    .iter()
                    .map(|(key, &value)| (key.to_string(), value))
                    .collect();
                (coord.cell_key(), features)
            })
            .collect();
        Self { cells }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if no cell has a value.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Features of a cell by its `"x_y"` key.
    pub fn cell(&self, cell_key: &str) -> Option<&CellFeatures> {
        self.cells.get(cell_key)
    }

    /// Value of one feature at one cell.
    pub fn get(&self, cell_key: &str, feature: &str) -> Option<f32> {
        self.cells.get(cell_key)?.get(feature).copied()
    }

    /// Iterate over cells in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CellFeatures)> {
        self.cells.iter()
    }

    /// Total number of stored values.
    pub fn value_count(&self) -> usize {
        self.cells.values().map(BTreeMap::len).sum()
    }

    /// Serialize to JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String, OutputError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Serialize and write to `path`.
    ///
    /// Serialization completes before the file is touched.
    pub fn write(&self, path: impl AsRef<Path>, pretty: bool) -> Result<(), OutputError> {
        let path = path.as_ref();
        let json = self.to_json(pretty)?;
        fs::write(path, json)?;
        log::info!(
            "Wrote {} cells ({} values) to {}",
            self.len(),
            self.value_count(),
            path.display()
        );
        Ok(())
    }

    /// Read a previously written cache.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OutputError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
