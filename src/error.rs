//! Crate-level error type.

use thiserror::Error;

use crate::config::ConfigLoadError;
use crate::grid::GridError;
use crate::interpolation::InterpolationError;
use crate::io::{OutputError, StoreError};

/// Any failure that aborts building a feature cache.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Storage: {0}")]
    Store(#[from] StoreError),

    #[error("Grid: {0}")]
    Grid(#[from] GridError),

    #[error("Interpolation: {0}")]
    Interpolation(#[from] InterpolationError),

    #[error("Output: {0}")]
    Output(#[from] OutputError),

    #[error("Config: {0}")]
    Config(#[from] ConfigLoadError),
}

pub type Result<T> = std::result::Result<T, CacheError>;
