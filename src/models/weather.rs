//! Current weather data and measurements

use serde::{Deserialize, Serialize, Serializer};

/// Current-conditions snapshot as returned by the provider, in metric units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentObservation {
    /// Observation time, seconds since the Unix epoch
    pub timestamp: i64,
    /// Perceived temperature in Celsius
    pub feels_like: f64,
    /// Relative humidity in percent
    pub humidity: u32,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Minimum temperature in Celsius
    pub temp_min: f64,
    /// Maximum temperature in Celsius
    pub temp_max: f64,
    /// Rain volume over the last hour, if the provider reported any
    pub rain_last_hour: Option<f64>,
}

/// UV index value, or `"N/A"` when the provider has none
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UvIndex {
    Value(f64),
    Unavailable,
}

impl From<Option<f64>> for UvIndex {
    /// Missing and zero readings are both treated as unavailable.
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) if v != 0.0 && !v.is_nan() => UvIndex::Value(v),
            _ => UvIndex::Unavailable,
        }
    }
}

impl Serialize for UvIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            UvIndex::Value(v) => serializer.serialize_f64(*v),
            UvIndex::Unavailable => serializer.serialize_str("N/A"),
        }
    }
}

/// Scalar fields extracted for the report
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub timestamp: i64,
    pub feels_like: f64,
    pub humidity: u32,
    pub wind_speed: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub rain_probability: f64,
    pub uv_index: UvIndex,
}

impl CurrentConditions {
    /// Combine the current observation with the separately fetched UV reading
    #[must_use]
    pub fn from_observation(observation: &CurrentObservation, uv_index: Option<f64>) -> Self {
        Self {
            timestamp: observation.timestamp,
            feels_like: observation.feels_like,
            humidity: observation.humidity,
            wind_speed: observation.wind_speed,
            temp_min: observation.temp_min,
            temp_max: observation.temp_max,
            rain_probability: observation.rain_last_hour.unwrap_or(0.0),
            uv_index: UvIndex::from(uv_index),
        }
    }
}
