use std::sync::Arc;

use anyhow::{Context, Result};
use dotenv::dotenv;
use weather_aggregator::{AppConfig, OpenWeatherClient, WeatherAggregator, logging, web};

#[tokio::main]
async fn main() -> Result<()> {
    let env_file = dotenv().ok();

    let config = AppConfig::load().with_context(|| "Failed to load configuration")?;
    logging::init(&config.logging)?;

    if let Some(path) = env_file {
        tracing::info!(path = %path.display(), "loaded .env");
    }

    let provider = OpenWeatherClient::new(&config.weather)?;
    let aggregator = WeatherAggregator::new(
        Arc::new(provider),
        config.weather.fetch_mode,
        config.display_zone()?,
    );

    tracing::info!(
        fetch_mode = ?config.weather.fetch_mode,
        base_url = %config.weather.base_url,
        "weather provider configured"
    );

    web::run(&config.bind_address(), Arc::new(aggregator)).await
}
