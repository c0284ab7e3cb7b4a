//! Weather aggregator - one consolidated weather report per city
//!
//! This library resolves a city name through the provider's geocoding
//! endpoint, fetches current conditions, forecast and UV index for the
//! coordinates, and reshapes them into a single response served over HTTP.

pub mod aggregator;
pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use aggregator::WeatherAggregator;
pub use config::{AppConfig, FetchMode};
pub use error::AggregatorError;
pub use models::{CityWeather, DisplayZone, Location, WeatherReport};
pub use weather::{OpenWeatherClient, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AggregatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
