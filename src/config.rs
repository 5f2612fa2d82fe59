//! TOML configuration.
//!
//! Every section and field is optional:
//!
//! ```toml
//! [interpolation]
//! method = "bilinear"   # or "none"
//! workers = 0           # 0 = one per available core
//!
//! [output]
//! pretty = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::interpolation::InterpolationMethod;

/// Searched, in order, when no config path is given.
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["feature-cache.toml", "/etc/feature-cache.toml"];

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: basic_toml::Error,
    },
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub interpolation: InterpolationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[interpolation]` section.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct InterpolationConfig {
    /// Method used when interpolation is enabled
    pub method: InterpolationMethod,
    /// Worker threads (0 = host parallelism)
    pub workers: usize,
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self {
            method: InterpolationMethod::Bilinear,
            workers: 0,
        }
    }
}

/// `[output]` section.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Indent the JSON output
    pub pretty: bool,
}

impl CacheConfig {
    /// Parse a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self, basic_toml::Error> {
        basic_toml::from_str(contents)
    }

    /// Load from an explicit path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents).map_err(|source| ConfigLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `path` if given, else from the first readable default path,
    /// else defaults.
    ///
    /// An explicitly given path must load; default paths that fail to parse
    /// are skipped with a warning.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        for candidate in DEFAULT_CONFIG_PATHS {
            let candidate = Path::new(candidate);
            if !candidate.is_file() {
                continue;
            }
            match Self::load(candidate) {
                Ok(config) => return Ok(config),
                Err(e) => log::warn!("{}", e),
            }
        }
        Ok(Self::default())
    }
}
