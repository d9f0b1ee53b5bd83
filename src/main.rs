use tracing::{info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use climate_api::app::Application;
use climate_api::config::Config;
use climate_api::db::{connect_read_only, schema};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with environment filter support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,climate_api=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    info!("Starting climate API with config: {:?}", config);

    let pool = connect_read_only(&config.database_url, config.database_max_connections).await?;
    info!("Database connection established");

    schema::verify_schema(&pool).await?;

    let application = Application::build(config, pool).await?;
    application.run_until_stopped().await
}
