use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use kenya_weather_api::{AppConfig, AppState, OpenMeteoClient, logging, web};

/// Backend proxy serving Open-Meteo locations and forecasts to the weather frontend
#[derive(Debug, Parser)]
#[command(name = "kenya-weather-api", version, about)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on, overrides the config file
    #[arg(short, long)]
    port: Option<u16>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from_path(cli.config)?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    config.validate()?;

    logging::init(&config.logging)?;
    tracing::info!(
        geocoding = %config.upstream.geocoding_url,
        forecast = %config.upstream.forecast_url,
        timeout_seconds = config.upstream.timeout_seconds,
        "Starting kenya-weather-api {}",
        kenya_weather_api::VERSION
    );

    let client = OpenMeteoClient::new(&config.upstream)?;
    let state = AppState::new(Arc::new(client));

    web::run(&config.server, state).await
}
