//! Data models for the weather aggregator
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geocoded coordinates and names
//! - Weather: Current conditions and UV index
//! - Forecast: Forecast samples and the per-weekday summary
//! - Report: The consolidated response and the city lookup outcome

pub mod forecast;
pub mod location;
pub mod report;
pub mod weather;

// Re-export all public types for convenient access
pub use forecast::{DailyForecastSummary, ForecastEntry, round_to_tenth};
pub use location::Location;
pub use report::{CityWeather, DisplayZone, WeatherReport};
pub use weather::{CurrentConditions, CurrentObservation, UvIndex};
