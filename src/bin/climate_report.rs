/// Print climate reports from the dataset as JSON, without starting the server
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use climate_api::app::Application;
use climate_api::config::DEFAULT_DATABASE_URL;
use climate_api::db::{connect_read_only, schema};

#[derive(Parser, Debug)]
#[command(name = "climate-report", about = "Query the climate dataset from the command line")]
struct Args {
    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,

    #[command(subcommand)]
    report: Report,
}

#[derive(Subcommand, Debug)]
enum Report {
    /// Highest precipitation per date over the last year of data
    Precipitation,
    /// Station codes, or full station records with --details
    Stations {
        #[arg(long)]
        details: bool,
    },
    /// Daily high temperatures of the most active station over the last year
    Tobs,
    /// Station with the most temperature observations
    MostActive,
    /// Temperature min/avg/max from a start date, optionally up to an end date
    Temps {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: Option<String>,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();
    let args = Args::parse();

    let pool = connect_read_only(&args.database_url, 1).await?;
    schema::verify_schema(&pool).await?;
    let state = Application::state(pool);

    match args.report {
        Report::Precipitation => {
            print_json(&state.measurement_service.get_precipitation_last_year().await?)
        }
        Report::Stations { details: false } => {
            print_json(&state.station_service.list_station_codes().await?)
        }
        Report::Stations { details: true } => {
            print_json(&state.station_service.list_stations().await?)
        }
        Report::Tobs => print_json(
            &state
                .measurement_service
                .get_most_active_station_temps_last_year()
                .await?,
        ),
        Report::MostActive => {
            print_json(&state.measurement_service.get_most_active_station().await?)
        }
        Report::Temps { start, end: None } => print_json(
            &state
                .measurement_service
                .get_temperature_stats_from(&start)
                .await?,
        ),
        Report::Temps {
            start,
            end: Some(end),
        } => print_json(
            &state
                .measurement_service
                .get_temperature_stats_between(&start, &end)
                .await?,
        ),
    }
}
