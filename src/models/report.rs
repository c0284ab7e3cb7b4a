//! Consolidated weather report and its composition from provider data

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;

use super::{CurrentConditions, CurrentObservation, DailyForecastSummary, ForecastEntry, Location, UvIndex};
use crate::{AggregatorError, Result};

/// Time zone in which the report's `day` and `time` are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayZone {
    /// The server's local zone
    Local,
    Utc,
    Named(chrono_tz::Tz),
}

impl DisplayZone {
    /// English weekday name and `HH:MM:SS` (24-hour) for a Unix timestamp
    #[must_use]
    pub fn day_and_time(&self, timestamp: i64) -> Option<(String, String)> {
        let utc = DateTime::<Utc>::from_timestamp(timestamp, 0)?;
        Some(match self {
            DisplayZone::Local => format_day_and_time(&utc.with_timezone(&Local)),
            DisplayZone::Utc => format_day_and_time(&utc),
            DisplayZone::Named(tz) => format_day_and_time(&utc.with_timezone(tz)),
        })
    }
}

fn format_day_and_time<Tz: TimeZone>(dt: &DateTime<Tz>) -> (String, String)
where
    Tz::Offset: std::fmt::Display,
{
    (dt.format("%A").to_string(), dt.format("%H:%M:%S").to_string())
}

/// The consolidated response for one city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub day: String,
    pub time: String,
    pub feels_like: f64,
    pub humidity: u32,
    pub wind_speed: f64,
    pub rain_probability: f64,
    pub uv_index: UvIndex,
    pub temp_min: f64,
    pub temp_max: f64,
    pub next_days_temperature: DailyForecastSummary,
}

impl WeatherReport {
    /// Reshape provider data into the report.
    ///
    /// Pure: no I/O, so it can be fed fixed provider payloads. Fails only when
    /// the observation timestamp cannot be represented.
    pub fn compose(
        location: &Location,
        observation: &CurrentObservation,
        forecast: &[ForecastEntry],
        uv_reading: Option<f64>,
        zone: DisplayZone,
    ) -> Result<Self> {
        let conditions = CurrentConditions::from_observation(observation, uv_reading);

        let (day, time) = zone.day_and_time(conditions.timestamp).ok_or_else(|| {
            AggregatorError::upstream(format!(
                "Observation timestamp {} is out of range",
                conditions.timestamp
            ))
        })?;

        let next_days_temperature = DailyForecastSummary::from_entries(forecast, &day);

        Ok(Self {
            city: location.name.clone(),
            country: location.country.clone(),
            day,
            time,
            feels_like: conditions.feels_like,
            humidity: conditions.humidity,
            wind_speed: conditions.wind_speed,
            rain_probability: conditions.rain_probability,
            uv_index: conditions.uv_index,
            temp_min: conditions.temp_min,
            temp_max: conditions.temp_max,
            next_days_temperature,
        })
    }
}

/// Outcome of a city lookup
#[derive(Debug, Clone, PartialEq)]
pub enum CityWeather {
    Found(Box<WeatherReport>),
    /// Geocoding returned no match; a normal result, not an error
    NotFound,
}
