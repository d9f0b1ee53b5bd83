use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

use crate::db::{DbError, MeasurementRepository, PrecipitationSeries, StationActivity, TemperatureStats};
use crate::utils::{format_iso_date, one_year_prior, parse_iso_date};

/// Error types for measurement queries
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Dataset contains no measurements")]
    EmptyDataset,

    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDateFormat { value: String },

    #[error("Stored measurement date '{value}' is not a valid YYYY-MM-DD date")]
    MalformedStoredDate { value: String },
}

/// Trailing one-year window ending at the dataset's latest observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub most_recent: NaiveDate,
}

impl DateWindow {
    /// Window starting one calendar year before `most_recent`, inclusive
    pub fn trailing_year(most_recent: NaiveDate) -> Option<Self> {
        one_year_prior(most_recent).map(|start| Self { start, most_recent })
    }

    pub fn start_key(&self) -> String {
        format_iso_date(self.start)
    }
}

#[derive(Clone)]
pub struct MeasurementService {
    measurement_repo: MeasurementRepository,
}

impl MeasurementService {
    pub fn new(measurement_repo: MeasurementRepository) -> Self {
        Self { measurement_repo }
    }

    /// Highest precipitation per date over the trailing year
    #[instrument(skip(self))]
    pub async fn get_precipitation_last_year(&self) -> Result<PrecipitationSeries, ServiceError> {
        let window = self.trailing_year_window().await?;

        let rows = self
            .measurement_repo
            .find_daily_max_precipitation_since(&window.start_key())
            .await?;

        info!(
            "Collected precipitation for {} dates since {}",
            rows.len(),
            window.start
        );
        Ok(rows.into_iter().collect())
    }

    /// Station with the most temperature observations, if any exist
    pub async fn get_most_active_station(&self) -> Result<Option<StationActivity>, ServiceError> {
        Ok(self.measurement_repo.find_most_active_station().await?)
    }

    /// Daily high temperatures of the most active station over the trailing year
    #[instrument(skip(self))]
    pub async fn get_most_active_station_temps_last_year(&self) -> Result<Vec<f64>, ServiceError> {
        let window = self.trailing_year_window().await?;

        let Some(activity) = self.get_most_active_station().await? else {
            warn!("No station has temperature observations");
            return Ok(Vec::new());
        };

        let temps: Vec<f64> = self
            .measurement_repo
            .find_daily_max_temperature_since(&activity.station, &window.start_key())
            .await?
            .into_iter()
            .map(|row| row.tobs)
            .collect();

        info!(
            "Collected {} daily temperatures for station {} since {}",
            temps.len(),
            activity.station,
            window.start
        );
        Ok(temps)
    }

    /// Temperature min/avg/max for every measurement dated on or after `start`
    #[instrument(skip(self))]
    pub async fn get_temperature_stats_from(
        &self,
        start: &str,
    ) -> Result<TemperatureStats, ServiceError> {
        let start = Self::parse_date_param(start)?;
        let stats = self
            .measurement_repo
            .temperature_stats_since(&format_iso_date(start))
            .await?;

        if stats.tavg.is_none() {
            debug!("No temperature observations in range");
        }
        Ok(stats)
    }

    /// Temperature min/avg/max for measurements dated within `[start, end]`.
    /// A reversed range matches nothing and yields null fields.
    #[instrument(skip(self))]
    pub async fn get_temperature_stats_between(
        &self,
        start: &str,
        end: &str,
    ) -> Result<TemperatureStats, ServiceError> {
        let start = Self::parse_date_param(start)?;
        let end = Self::parse_date_param(end)?;

        if end < start {
            debug!("End date {} precedes start date {}", end, start);
        }

        let stats = self
            .measurement_repo
            .temperature_stats_between(&format_iso_date(start), &format_iso_date(end))
            .await?;

        if stats.tavg.is_none() {
            debug!("No temperature observations in range");
        }
        Ok(stats)
    }

    /// Derive the trailing-year window from the current data
    pub async fn trailing_year_window(&self) -> Result<DateWindow, ServiceError> {
        let raw = self
            .measurement_repo
            .find_most_recent_date()
            .await?
            .ok_or(ServiceError::EmptyDataset)?;

        let most_recent =
            parse_iso_date(&raw).ok_or_else(|| ServiceError::MalformedStoredDate { value: raw.clone() })?;

        let window = DateWindow::trailing_year(most_recent)
            .ok_or(ServiceError::MalformedStoredDate { value: raw })?;

        debug!(
            "Trailing year window {} .. {}",
            window.start, window.most_recent
        );
        Ok(window)
    }

    // Business logic helpers (private)

    fn parse_date_param(value: &str) -> Result<NaiveDate, ServiceError> {
        parse_iso_date(value).ok_or_else(|| ServiceError::InvalidDateFormat {
            value: value.to_string(),
        })
    }
}
