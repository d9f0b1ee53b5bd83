use sqlx::SqlitePool;
use tracing::{debug, instrument};

use crate::db::{DbError, Station};

#[derive(Clone)]
pub struct StationRepository {
    pool: SqlitePool,
}

impl StationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Station codes in table order
    #[instrument(skip(self))]
    pub async fn find_all_codes(&self) -> Result<Vec<String>, DbError> {
        debug!("Querying station codes");

        let codes: Vec<String> = sqlx::query_scalar("SELECT station FROM station ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        debug!("Found {} stations", codes.len());
        Ok(codes)
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<Station>, DbError> {
        let stations = sqlx::query_as::<_, Station>(
            r#"
            SELECT id, station, name, latitude, longitude, elevation
            FROM station
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!("Found {} stations", stations.len());
        Ok(stations)
    }
}
