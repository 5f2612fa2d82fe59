//! Core types shared by every layer of the feature cache.
//!
//! ## Type Categories
//!
//! ### Coordinates
//! - [`GridCoord`]: Integer cell indices (x = column, y = row)
//! - [`GridBounds`]: Inclusive bounding box derived from observed readings
//! - [`Axis`] / [`Direction`]: Which coordinate a search walks along, and which way
//!
//! ### Features
//! - [`ApId`]: Access-point identifier
//! - [`FeatureKey`]: Ordered access-point pair whose signal difference is tracked per cell
//!
//! ## Example
//!
//! ```
//! use feature_cache::core::{Axis, Direction, FeatureKey, GridBounds, GridCoord};
//!
//! let bounds = GridBounds::new(0, 0, 4, 4);
//! let coord = GridCoord::new(2, 2);
//!
//! let up = coord.stepped(Axis::Y, Direction::TowardLow);
//! assert_eq!(up, Some(GridCoord::new(2, 1)));
//! assert!(up.is_some_and(|c| bounds.contains(c)));
//!
//! let key = FeatureKey::new("aa:aa", "bb:bb");
//! assert_eq!(key.to_string(), "aa:aabb:bb");
//! assert_eq!(key.reversed().to_string(), "bb:bbaa:aa");
//! ```

mod bounds;
mod feature;
mod point;

pub use bounds::GridBounds;
pub use feature::{ApId, FeatureKey};
pub use point::{Axis, Direction, GridCoord};
