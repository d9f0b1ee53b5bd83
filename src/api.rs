use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};
use utoipa::{OpenApi, ToSchema};

use crate::db::{DbError, PrecipitationSeries, TemperatureStats};
use crate::services::{MeasurementService, ServiceError, StationService};

#[derive(Clone)]
pub struct AppState {
    pub measurement_service: MeasurementService,
    pub station_service: StationService,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(home, health, get_precipitation, get_stations, get_tobs, get_temps_from, get_temps_between),
    components(schemas(HealthResponse, ErrorResponse, PrecipitationSeries, TemperatureStats)),
    tags((name = "climate", description = "Precipitation and temperature reports"))
)]
pub struct ApiDoc;

pub fn generate_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Errors surfaced by the HTTP handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Service(ServiceError::InvalidDateFormat { .. }) => {
                (StatusCode::BAD_REQUEST, "invalid_date_format")
            }
            ApiError::Service(ServiceError::EmptyDataset) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "empty_dataset")
            }
            ApiError::Service(ServiceError::MalformedStoredDate { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "malformed_stored_date")
            }
            ApiError::Service(ServiceError::Db(_)) | ApiError::Db(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();

        if status.is_client_error() {
            warn!("Rejected request: {}", self);
        } else {
            error!("Request failed: {}", self);
        }

        // Driver errors stay in the logs
        let message = match &self {
            ApiError::Db(_) | ApiError::Service(ServiceError::Db(_)) => {
                "Failed to query the climate dataset".to_string()
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            error: kind.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/precipitation", get(get_precipitation))
        .route("/stations", get(get_stations))
        .route("/tobs", get(get_tobs))
        .route("/{start}", get(get_temps_from))
        .route("/{start}/{end}", get(get_temps_between))
        .with_state(state);

    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .nest("/api/v1.0", api_routes)
}

/// List all available API routes
#[utoipa::path(
    get,
    path = "/",
    tag = "climate",
    responses((status = 200, description = "Available routes", content_type = "text/html", body = String))
)]
async fn home() -> Html<&'static str> {
    Html(
        "Available Routes:<br/>\
         /api/v1.0/precipitation<br/>\
         /api/v1.0/stations<br/>\
         /api/v1.0/tobs<br/>\
         /api/v1.0/{start}<br/>\
         /api/v1.0/{start}/{end}<br/>",
    )
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "climate",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
#[instrument]
async fn health() -> impl IntoResponse {
    debug!("Health check requested");
    let response = HealthResponse {
        status: "healthy".to_string(),
    };
    (StatusCode::OK, Json(response))
}

/// Highest precipitation per date over the last year of data
#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    tag = "climate",
    responses(
        (status = 200, description = "Date to precipitation mapping", body = PrecipitationSeries),
        (status = 500, description = "Dataset empty or unreadable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
async fn get_precipitation(
    State(state): State<AppState>,
) -> Result<Json<PrecipitationSeries>, ApiError> {
    debug!("Fetching trailing-year precipitation");
    let series = state.measurement_service.get_precipitation_last_year().await?;

    info!("Retrieved precipitation for {} dates", series.len());
    Ok(Json(series))
}

/// Station codes in the dataset
#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    tag = "climate",
    responses(
        (status = 200, description = "Station codes", body = [String]),
        (status = 500, description = "Dataset unreadable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
async fn get_stations(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    debug!("Fetching station codes");
    let stations = state.station_service.list_station_codes().await?;

    info!("Retrieved {} stations", stations.len());
    Ok(Json(stations))
}

/// Daily high temperatures of the most active station over the last year of data
#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    tag = "climate",
    responses(
        (status = 200, description = "Temperatures in date order", body = [f64]),
        (status = 500, description = "Dataset empty or unreadable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
async fn get_tobs(State(state): State<AppState>) -> Result<Json<Vec<f64>>, ApiError> {
    debug!("Fetching temperatures for most active station");
    let temps = state
        .measurement_service
        .get_most_active_station_temps_last_year()
        .await?;

    info!("Retrieved {} temperature observations", temps.len());
    Ok(Json(temps))
}

/// Temperature summary for all dates on or after `start`
#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    tag = "climate",
    params(("start" = String, Path, description = "Start date, YYYY-MM-DD")),
    responses(
        (status = 200, description = "TMIN, TAVG and TMAX", body = TemperatureStats),
        (status = 400, description = "Malformed date", body = ErrorResponse)
    )
)]
#[instrument(skip(state), fields(start = %start))]
async fn get_temps_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStats>, ApiError> {
    debug!("Fetching temperature summary from {}", start);
    let stats = state
        .measurement_service
        .get_temperature_stats_from(&start)
        .await?;

    info!("Retrieved temperature summary from {}", start);
    Ok(Json(stats))
}

/// Temperature summary for dates between `start` and `end`, inclusive
#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    tag = "climate",
    params(
        ("start" = String, Path, description = "Start date, YYYY-MM-DD"),
        ("end" = String, Path, description = "End date, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "TMIN, TAVG and TMAX", body = TemperatureStats),
        (status = 400, description = "Malformed date", body = ErrorResponse)
    )
)]
#[instrument(skip(state), fields(start = %start, end = %end))]
async fn get_temps_between(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStats>, ApiError> {
    debug!("Fetching temperature summary from {} to {}", start, end);
    let stats = state
        .measurement_service
        .get_temperature_stats_between(&start, &end)
        .await?;

    info!("Retrieved temperature summary from {} to {}", start, end);
    Ok(Json(stats))
}
