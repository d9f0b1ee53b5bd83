//! Statically declared schema for the climate dataset.
//!
//! The service never creates or alters tables in the dataset it serves.
//! [`verify_schema`] checks at startup that the database carries every
//! column the queries read, and [`CREATE_TABLES`] lets test fixtures and
//! tooling build an empty dataset with the same shape.

use sqlx::SqlitePool;
use tracing::{debug, error, info, instrument};

use crate::db::DbError;

pub const STATION_TABLE: &str = "station";
pub const MEASUREMENT_TABLE: &str = "measurement";

/// Columns read from `station`
pub const STATION_COLUMNS: &[&str] = &["id", "station", "name", "latitude", "longitude", "elevation"];

/// Columns read from `measurement`
pub const MEASUREMENT_COLUMNS: &[&str] = &["id", "station", "date", "prcp", "tobs"];

pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS station (
    id INTEGER PRIMARY KEY,
    station TEXT NOT NULL,
    name TEXT,
    latitude REAL,
    longitude REAL,
    elevation REAL
);

CREATE TABLE IF NOT EXISTS measurement (
    id INTEGER PRIMARY KEY,
    station TEXT NOT NULL,
    date TEXT NOT NULL,
    prcp REAL,
    tobs REAL
);
"#;

/// Verify both tables exist with the expected columns
#[instrument(skip(pool))]
pub async fn verify_schema(pool: &SqlitePool) -> Result<(), DbError> {
    verify_table(pool, STATION_TABLE, STATION_COLUMNS).await?;
    verify_table(pool, MEASUREMENT_TABLE, MEASUREMENT_COLUMNS).await?;
    info!("Dataset schema verified");
    Ok(())
}

async fn verify_table(
    pool: &SqlitePool,
    table: &'static str,
    expected: &[&str],
) -> Result<(), DbError> {
    let columns: Vec<String> =
        sqlx::query_scalar(&format!("SELECT name FROM pragma_table_info('{table}')"))
            .fetch_all(pool)
            .await?;

    debug!("Table {} has columns {:?}", table, columns);

    for column in expected {
        if !columns.iter().any(|c| c.eq_ignore_ascii_case(column)) {
            error!(table = %table, column = %column, "Dataset is missing an expected column");
            return Err(DbError::SchemaMismatch {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
    }

    Ok(())
}
