//! I/O layer.
//!
//! Everything that touches the outside world: the reading database, layout
//! metadata and the serialized cache.
//!
//! # Contents
//!
//! - [`store`]: [`ReadingStore`] boundary and the SQLite implementation
//! - [`layout`]: Lenient floorplan layout parsing into an exclusion mask
//! - [`cache`]: [`FeatureCache`] JSON output

pub mod cache;
pub mod layout;
pub mod store;

pub use cache::{CellFeatures, FeatureCache, OutputError};
pub use layout::{LayoutError, exclusions_from_layouts, parse_exclusions};
pub use store::{ReadingStore, SqliteStore, StoreError};
