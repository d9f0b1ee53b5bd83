use serde::Serialize;
use sqlx::FromRow;
use std::collections::BTreeMap;
use utoipa::ToSchema;

// Database entity models
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Station {
    pub id: i64,
    pub station: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

// Aggregate rows returned by the measurement queries
#[derive(Debug, Clone, FromRow)]
pub struct DailyPrecipitation {
    pub date: String,
    pub prcp: Option<f64>,
}

#[derive(Debug, Clone, FromRow)]
pub struct DailyTemperature {
    pub date: String,
    pub tobs: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct StationActivity {
    pub station: String,
    pub observation_count: i64,
}

// API response DTOs (to avoid circular dependency between services and api modules)

/// Highest precipitation per date, keyed by `YYYY-MM-DD` in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct PrecipitationSeries(pub BTreeMap<String, Option<f64>>);

impl PrecipitationSeries {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, date: &str) -> Option<Option<f64>> {
        self.0.get(date).copied()
    }
}

impl FromIterator<DailyPrecipitation> for PrecipitationSeries {
    fn from_iter<I: IntoIterator<Item = DailyPrecipitation>>(rows: I) -> Self {
        Self(rows.into_iter().map(|row| (row.date, row.prcp)).collect())
    }
}

/// Temperature aggregates over a date range. Every field is null when no
/// temperature observation falls inside the range.
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, ToSchema)]
pub struct TemperatureStats {
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,
    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
}
