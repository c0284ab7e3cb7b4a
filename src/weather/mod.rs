//! Weather provider abstraction
//!
//! The aggregator talks to the upstream weather service only through
//! [`WeatherProvider`], so tests can substitute an in-process fake.

use async_trait::async_trait;

use crate::Result;
use crate::models::{CurrentObservation, ForecastEntry, Location};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// The four capabilities consumed from the upstream provider
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Resolve a free-text place name; at most one candidate is requested
    async fn geocode(&self, city: &str) -> Result<Vec<Location>>;

    /// Current conditions in metric units
    async fn current_conditions(&self, location: &Location) -> Result<CurrentObservation>;

    /// Forecast samples in metric units, in provider order
    async fn forecast(&self, location: &Location) -> Result<Vec<ForecastEntry>>;

    /// UV index, `None` when the provider reports no value
    async fn uv_index(&self, location: &Location) -> Result<Option<f64>>;
}
