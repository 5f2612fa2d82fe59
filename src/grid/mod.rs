//! Sparse per-cell feature grid.
//!
//! The grid holds, for each cell that has at least one value, a map from
//! [`FeatureKey`](crate::core::FeatureKey) to the signal-difference magnitude.
//! Cells that have never been observed are simply absent.
//!
//! ## Lifecycle
//!
//! ```text
//!   raw readings ──► SparseGridBuilder ──► SparseGrid (sparse)
//!                                              │
//!                          parallel phase: read-only, workers produce PendingUpdate
//!                                              │
//!                          merge phase: apply_updates() then symmetrize()
//!                                              ▼
//!                                       SparseGrid (dense)
//! ```
//!
//! ## Key Components
//!
//! - [`SparseGrid`]: Cell storage, exclusion mask and bounding box
//! - [`ExclusionMask`]: Cells that must never hold a value
//! - [`SparseGridBuilder`]: Turns raw per-AP readings into pairwise features
//! - [`PendingUpdate`]: A value proposed by a fill task, applied during merge

mod builder;
mod exclusion;
mod sparse;
mod update;

pub use builder::{BuildStats, Reading, SparseGridBuilder};
pub use exclusion::ExclusionMask;
pub use sparse::{FeatureMap, GridError, SparseGrid};
pub use update::{MergeStats, PendingUpdate};
