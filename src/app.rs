use sqlx::SqlitePool;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::db::{MeasurementRepository, StationRepository};
use crate::services::{MeasurementService, StationService};

/// Running HTTP server
pub struct Application {
    pub server_handle: JoinHandle<Result<(), std::io::Error>>,
}

impl Application {
    /// Wire repositories and services around the dataset pool
    pub fn state(pool: SqlitePool) -> AppState {
        let measurement_repo = MeasurementRepository::new(pool.clone());
        let station_repo = StationRepository::new(pool);

        AppState {
            measurement_service: MeasurementService::new(measurement_repo),
            station_service: StationService::new(station_repo),
        }
    }

    /// Build the router and spawn the HTTP server
    pub async fn build(config: Config, pool: SqlitePool) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Initializing application components");

        let app = create_router(Self::state(pool)).layer(TraceLayer::new_for_http());

        let addr = config.server_addr();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("Server listening on {}", addr);

        let server_handle = tokio::spawn(async move { axum::serve(listener, app).await });

        info!("Application initialized successfully");
        Ok(Self { server_handle })
    }

    /// Run until the server stops
    pub async fn run_until_stopped(self) -> Result<(), Box<dyn std::error::Error>> {
        self.server_handle.await??;
        Ok(())
    }
}
