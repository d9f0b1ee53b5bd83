use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::db::DbError;

/// Open the dataset read-only; the service never writes to it.
pub async fn connect_read_only(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, DbError> {
    info!("Opening dataset {} (read-only)", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .read_only(true)
        .create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}
