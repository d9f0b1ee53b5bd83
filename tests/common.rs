#![allow(dead_code)]

use climate_api::db::schema::CREATE_TABLES;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Executor, SqlitePool};

/// In-memory dataset with the static schema and no rows.
/// A single long-lived connection keeps the database alive for the test.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    pool.execute(CREATE_TABLES)
        .await
        .expect("Failed to create tables");

    pool
}

pub async fn insert_station(pool: &SqlitePool, code: &str) {
    sqlx::query(
        r#"
        INSERT INTO station (station, name, latitude, longitude, elevation)
        VALUES (?1, ?2, 21.3, -157.8, 3.0)
        "#,
    )
    .bind(code)
    .bind(format!("Test Station {code}"))
    .execute(pool)
    .await
    .expect("Failed to insert station");
}

pub async fn insert_measurement(
    pool: &SqlitePool,
    station: &str,
    date: &str,
    prcp: Option<f64>,
    tobs: Option<f64>,
) {
    sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
        .bind(station)
        .bind(date)
        .bind(prcp)
        .bind(tobs)
        .execute(pool)
        .await
        .expect("Failed to insert measurement");
}

/// Temperature-only reading
pub async fn insert_tobs(pool: &SqlitePool, station: &str, date: &str, tobs: f64) {
    insert_measurement(pool, station, date, None, Some(tobs)).await;
}

/// Precipitation-only reading
pub async fn insert_prcp(pool: &SqlitePool, station: &str, date: &str, prcp: f64) {
    insert_measurement(pool, station, date, Some(prcp), None).await;
}
