use sqlx::SqlitePool;
use tracing::{debug, instrument};

use crate::db::{DailyPrecipitation, DailyTemperature, DbError, StationActivity, TemperatureStats};

#[derive(Clone)]
pub struct MeasurementRepository {
    pool: SqlitePool,
}

impl MeasurementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Latest observation date in the dataset, `None` when it holds no measurements
    #[instrument(skip(self))]
    pub async fn find_most_recent_date(&self) -> Result<Option<String>, DbError> {
        debug!("Querying for most recent measurement date");

        let date: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;

        match &date {
            Some(date) => debug!("Most recent measurement date is {}", date),
            None => debug!("No measurements found in database"),
        }

        Ok(date)
    }

    /// Highest precipitation per date on or after `start`, ascending by date.
    /// Business logic for the trailing-year window belongs in the service layer.
    #[instrument(skip(self))]
    pub async fn find_daily_max_precipitation_since(
        &self,
        start: &str,
    ) -> Result<Vec<DailyPrecipitation>, DbError> {
        debug!("Querying daily precipitation from {}", start);

        let rows = sqlx::query_as::<_, DailyPrecipitation>(
            r#"
            SELECT date, CAST(MAX(prcp) AS REAL) AS prcp
            FROM measurement
            WHERE date >= ?1
            GROUP BY date
            ORDER BY date
            "#,
        )
        .bind(start)
        .fetch_all(&self.pool)
        .await?;

        debug!("Found {} dates", rows.len());
        Ok(rows)
    }

    /// Station with the most non-null temperature observations.
    /// Equal counts resolve to the lowest station code.
    #[instrument(skip(self))]
    pub async fn find_most_active_station(&self) -> Result<Option<StationActivity>, DbError> {
        debug!("Querying for most active station");

        let activity = sqlx::query_as::<_, StationActivity>(
            r#"
            SELECT station, COUNT(tobs) AS observation_count
            FROM measurement
            WHERE tobs IS NOT NULL
            GROUP BY station
            ORDER BY observation_count DESC, station ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        if let Some(activity) = &activity {
            debug!(
                "Most active station is {} with {} observations",
                activity.station, activity.observation_count
            );
        }

        Ok(activity)
    }

    /// Highest temperature per date for one station on or after `start`,
    /// ascending by date. Dates without a temperature observation are skipped.
    #[instrument(skip(self), fields(station = %station))]
    pub async fn find_daily_max_temperature_since(
        &self,
        station: &str,
        start: &str,
    ) -> Result<Vec<DailyTemperature>, DbError> {
        debug!("Querying daily temperatures for {} from {}", station, start);

        let rows = sqlx::query_as::<_, DailyTemperature>(
            r#"
            SELECT date, CAST(MAX(tobs) AS REAL) AS tobs
            FROM measurement
            WHERE station = ?1 AND date >= ?2 AND tobs IS NOT NULL
            GROUP BY date
            ORDER BY date
            "#,
        )
        .bind(station)
        .bind(start)
        .fetch_all(&self.pool)
        .await?;

        debug!("Found {} dates", rows.len());
        Ok(rows)
    }

    /// Temperature min/avg/max over all measurements dated on or after `start`
    #[instrument(skip(self))]
    pub async fn temperature_stats_since(&self, start: &str) -> Result<TemperatureStats, DbError> {
        debug!("Aggregating temperatures from {}", start);

        let stats = sqlx::query_as::<_, TemperatureStats>(
            r#"
            SELECT CAST(MIN(tobs) AS REAL) AS tmin,
                   CAST(AVG(tobs) AS REAL) AS tavg,
                   CAST(MAX(tobs) AS REAL) AS tmax
            FROM measurement
            WHERE date >= ?1
            "#,
        )
        .bind(start)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    /// Temperature min/avg/max over measurements dated within `[start, end]`
    #[instrument(skip(self))]
    pub async fn temperature_stats_between(
        &self,
        start: &str,
        end: &str,
    ) -> Result<TemperatureStats, DbError> {
        debug!("Aggregating temperatures from {} to {}", start, end);

        let stats = sqlx::query_as::<_, TemperatureStats>(
            r#"
            SELECT CAST(MIN(tobs) AS REAL) AS tmin,
                   CAST(AVG(tobs) AS REAL) AS tavg,
                   CAST(MAX(tobs) AS REAL) AS tmax
            FROM measurement
            WHERE date >= ?1 AND date <= ?2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
