//! Feature cache - dense per-cell signal features for indoor positioning
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    main.rs                          │  ← CLI
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │              pipeline / config                      │  ← Orchestration
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                      io/                            │  ← Infrastructure
//! │           (SQLite store, layout, JSON cache)        │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                 interpolation/                      │  ← Core algorithms
//! │   (neighbor search, regression, fill, worker pool)  │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     grid/                           │  ← Data structure
//! │          (sparse grid, exclusions, builder)         │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │          (coordinates, bounds, feature keys)        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Features
//!
//! Each surveyed cell stores filtered signal levels per access point. The
//! grid turns those into features: for every ordered pair of access points
//! seen at a cell, the absolute difference of their levels. Interpolation
//! then fills every cell that is not excluded by the floorplan layout.
//!
//! # Example
//!
//! ```
//! use feature_cache::grid::{Reading, SparseGridBuilder};
//! use feature_cache::core::GridBounds;
//! use feature_cache::interpolation::{BilinearInterpolator, Interpolator, WorkerPool};
//! use feature_cache::io::FeatureCache;
//!
//! let grid = SparseGridBuilder::new(GridBounds::new(0, 0, 0, 2))
//!     .readings([
//!         Reading::new(0, 0, "a", -40.0),
//!         Reading::new(0, 0, "b", -50.0),
//!         Reading::new(0, 2, "a", -40.0),
//!         Reading::new(0, 2, "b", -70.0),
//!     ])
//!     .build()
//!     .unwrap();
//!
//! let dense = BilinearInterpolator::new(WorkerPool::new(2))
//!     .interpolate(grid)
//!     .unwrap();
//! let cache = FeatureCache::from_grid(&dense);
//!
//! assert_eq!(cache.get("0_1", "ab"), Some(20.0));
//! assert_eq!(cache.get("0_1", "ba"), Some(20.0));
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod grid;
pub mod interpolation;
pub mod io;
pub mod pipeline;

pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use io::FeatureCache;
pub use pipeline::CacheBuilder;
