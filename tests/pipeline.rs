//! Database-to-JSON pipeline tests.
//!
//! Builds a small survey database in a temp directory and checks the cache
//! written for it, with and without interpolation and layout exclusions.
//!
//! Run with: `cargo test --test pipeline`

use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use feature_cache::grid::Reading;
use feature_cache::io::{SqliteStore, StoreError};
use feature_cache::{CacheBuilder, CacheConfig, CacheError, FeatureCache};
use rusqlite::Connection;
use tempfile::TempDir;

const FLOORPLAN: &str = "fp-1";

/// Two surveyed columns, rows 0 and 4 only:
///
/// | cell  | a     | b     | ab |
/// |-------|-------|-------|----|
/// | (0,0) | -40.0 | -50.0 | 10 |
/// | (0,4) | -40.0 | -60.0 | 20 |
/// | (1,0) | -45.0 | -50.0 |  5 |
/// | (1,4) | -45.0 | -60.0 | 15 |
fn survey_readings() -> Vec<Reading> {
    vec![
        Reading::new(0, 0, "a", -40.0),
        Reading::new(0, 0, "b", -50.0),
        Reading::new(0, 4, "a", -40.0),
        Reading::new(0, 4, "b", -60.0),
        Reading::new(1, 0, "a", -45.0),
        Reading::new(1, 0, "b", -50.0),
        Reading::new(1, 4, "a", -45.0),
        Reading::new(1, 4, "b", -60.0),
    ]
}

fn create_db(dir: &TempDir, layout: Option<&str>) -> PathBuf {
    let path = dir.path().join("survey.db");
    let store = SqliteStore::from_connection(Connection::open(&path).unwrap());
    store.create_schema().unwrap();
    for reading in survey_readings() {
        store.insert_reading(FLOORPLAN, &reading).unwrap();
    }
    if let Some(layout) = layout {
        store.insert_layout(FLOORPLAN, layout).unwrap();
    }
    path
}

fn build(db: &Path, out: &Path, interpolate: bool) -> Result<FeatureCache, CacheError> {
    let store = SqliteStore::open(db)?;
    let mut builder = CacheBuilder::new(&store, &CacheConfig::default());
    if !interpolate {
        builder = builder.without_interpolation();
    }
    builder.build_to_file(FLOORPLAN, out, false)
}

#[test]
fn test_interpolated_cache_respects_layout() {
    let dir = tempfile::tempdir().unwrap();
    let db = create_db(&dir, Some(r#"{"ignore": [[1, 2]]}"#));
    let out = dir.path().join("cache.json");

    let cache = build(&db, &out, true).unwrap();

    assert_relative_eq!(cache.get("0_2", "ab").unwrap(), 15.0);
    assert_relative_eq!(cache.get("0_2", "ba").unwrap(), 15.0);
    assert_relative_eq!(cache.get("1_1", "ab").unwrap(), 7.5);
    assert!(cache.cell("1_2").is_none());

    // Observed cells keep their readings, self pairs included
    assert_eq!(cache.get("0_0", "ab"), Some(10.0));
    assert_eq!(cache.get("0_0", "aa"), Some(0.0));

    assert_eq!(FeatureCache::load(&out).unwrap(), cache);
}

#[test]
fn test_without_interpolation_only_observed_cells() {
    let dir = tempfile::tempdir().unwrap();
    let db = create_db(&dir, None);
    let out = dir.path().join("cache.json");

    let cache = build(&db, &out, false).unwrap();

    let cells: Vec<_> = cache.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(cells, vec!["0_0", "0_4", "1_0", "1_4"]);
    assert_eq!(cache.cell("0_0").unwrap().len(), 4);
}

#[test]
fn test_malformed_layout_means_no_exclusions() {
    let dir = tempfile::tempdir().unwrap();
    let db = create_db(&dir, Some("{not json"));
    let out = dir.path().join("cache.json");

    let cache = build(&db, &out, true).unwrap();

    assert_relative_eq!(cache.get("1_2", "ab").unwrap(), 10.0);
}

#[test]
fn test_missing_layout_table_means_no_exclusions() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("survey.db");
    let conn = Connection::open(&db).unwrap();
    conn.execute_batch(
        "CREATE TABLE kalman_estimates (fp_id TEXT, x INTEGER, y INTEGER, ap_id TEXT, kalman REAL);",
    )
    .unwrap();
    let store = SqliteStore::from_connection(conn);
    for reading in survey_readings() {
        store.insert_reading(FLOORPLAN, &reading).unwrap();
    }
    drop(store);
    let out = dir.path().join("cache.json");

    let cache = build(&db, &out, true).unwrap();

    assert!(cache.cell("1_2").is_some());
}

#[test]
fn test_unknown_floorplan_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let db = create_db(&dir, None);
    let out = dir.path().join("cache.json");

    let store = SqliteStore::open(&db).unwrap();
    let result = CacheBuilder::new(&store, &CacheConfig::default()).build_to_file(
        "no-such-floorplan",
        &out,
        false,
    );

    assert!(matches!(
        result,
        Err(CacheError::Store(StoreError::NoReadings(_)))
    ));
    assert!(!out.exists());
}

#[test]
fn test_missing_database_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("cache.json");

    let result = build(&dir.path().join("absent.db"), &out, true);

    assert!(matches!(result, Err(CacheError::Store(StoreError::Sqlite(_)))));
    assert!(!out.exists());
}
