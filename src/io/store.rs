//! Reading storage.
//!
//! [`ReadingStore`] is the boundary to wherever raw readings and floorplan
//! layouts live. [`SqliteStore`] reads them from the survey database:
//!
//! ```text
//! kalman_estimates(fp_id TEXT, x INTEGER, y INTEGER, ap_id TEXT, kalman REAL)
//! layout_images(id TEXT, layout_image TEXT)
//! ```

use std::path::Path;

use rusqlite::{Connection, OpenFlags, params};
use thiserror::Error;

use crate::core::GridBounds;
use crate::grid::Reading;

const BOUNDS_QUERY: &str = "SELECT MIN(x), MIN(y), MAX(x), MAX(y) \
     FROM kalman_estimates WHERE fp_id = ?1";

const READINGS_QUERY: &str = "SELECT x, y, ap_id, kalman \
     FROM kalman_estimates WHERE fp_id = ?1";

const LAYOUT_QUERY: &str = "SELECT layout_image FROM layout_images WHERE id = ?1";

/// Storage errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("No readings for floorplan {0}")]
    NoReadings(String),
}

/// Source of raw readings and layout metadata for a floorplan.
pub trait ReadingStore {
    /// Extreme coordinates of the floorplan's readings.
    fn bounds(&self, fp_id: &str) -> Result<GridBounds, StoreError>;

    /// Every reading for the floorplan.
    fn readings(&self, fp_id: &str) -> Result<Vec<Reading>, StoreError>;

    /// Raw layout documents for the floorplan (possibly none).
    fn layouts(&self, fp_id: &str) -> Result<Vec<String>, StoreError>;
}

/// SQLite-backed [`ReadingStore`].
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open an existing database read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        log::debug!("Opened database {}", path.display());
        Ok(Self { conn })
    }

    /// Wrap an already open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Create the tables this store reads, if missing.
    pub fn create_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kalman_estimates (
                 fp_id TEXT NOT NULL,
                 x INTEGER NOT NULL,
                 y INTEGER NOT NULL,
                 ap_id TEXT NOT NULL,
                 kalman REAL NOT NULL
             );
             CREATE TABLE IF NOT EXISTS layout_images (
                 id TEXT NOT NULL,
                 layout_image TEXT
             );",
        )?;
        Ok(())
    }

    /// Store one reading.
    pub fn insert_reading(&self, fp_id: &str, reading: &Reading) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO kalman_estimates (fp_id, x, y, ap_id, kalman) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                fp_id,
                reading.coord.x,
                reading.coord.y,
                reading.ap_id.as_str(),
                reading.value as f64
            ],
        )?;
        Ok(())
    }

    /// Store one layout document.
    pub fn insert_layout(&self, fp_id: &str, layout: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO layout_images (id, layout_image) VALUES (?1, ?2)",
            params![fp_id, layout],
        )?;
        Ok(())
    }
}

impl ReadingStore for SqliteStore {
    fn bounds(&self, fp_id: &str) -> Result<GridBounds, StoreError> {
        let extremes = self.conn.query_row(BOUNDS_QUERY, params![fp_id], |row| {
            Ok((
                row.get::<_, Option<i32>>(0)?,
                row.get::<_, Option<i32>>(1)?,
                row.get::<_, Option<i32>>(2)?,
                row.get::<_, Option<i32>>(3)?,
            ))
        })?;

        match extremes {
            (Some(min_x), Some(min_y), Some(max_x), Some(max_y)) => {
                Ok(GridBounds::new(min_x, min_y, max_x, max_y))
            }
            _ => Err(StoreError::NoReadings(fp_id.to_string())),
        }
    }

    fn readings(&self, fp_id: &str) -> Result<Vec<Reading>, StoreError> {
        let mut stmt = self.conn.prepare(READINGS_QUERY)?;
        let rows = stmt.query_map(params![fp_id], |row| {
            Ok(Reading::new(
                row.get(0)?,
                row.get(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, f64>(3)? as f32,
            ))
        })?;

        let readings = rows.collect::<Result<Vec<_>, _>>()?;
        log::debug!("Loaded {} readings for floorplan {}", readings.len(), fp_id);
        Ok(readings)
    }

    fn layouts(&self, fp_id: &str) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare(LAYOUT_QUERY)?;
        let rows = stmt.query_map(params![fp_id], |row| row.get::<_, Option<String>>(0))?;

        let mut layouts = Vec::new();
        for row in rows {
            if let Some(layout) = row? {
                layouts.push(layout);
            }
        }
        Ok(layouts)
    }
}
