//! OpenWeatherMap client
//!
//! Talks to the geocoding, current weather, 5-day forecast and UV index
//! endpoints and converts their payloads into the domain models.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use super::WeatherProvider;
use crate::config::WeatherConfig;
use crate::models::{CurrentObservation, ForecastEntry, Location};
use crate::{AggregatorError, Result};

const GEOCODING_PATH: &str = "/geo/1.0/direct";
const CURRENT_PATH: &str = "/data/2.5/weather";
const FORECAST_PATH: &str = "/data/2.5/forecast";
const UV_PATH: &str = "/data/2.5/uvi";

const FORECAST_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// HTTP client for the OpenWeatherMap API
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    /// Create a new client from the weather configuration
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AggregatorError::config("Weather API key is required"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("weather-aggregator/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AggregatorError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn coordinate_params(location: &Location) -> Vec<(&'static str, String)> {
        vec![
            ("lat", location.latitude.to_string()),
            ("lon", location.longitude.to_string()),
        ]
    }

    /// GET `path` with `params` plus the API key and decode the JSON body
    #[instrument(skip(self, params))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let query = params
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        // Logged before the key is appended
        debug!("OpenWeatherMap request: {}{}?{}", self.base_url, path, query);

        let url = format!(
            "{}{}?{}&appid={}",
            self.base_url,
            path,
            query,
            urlencoding::encode(&self.api_key)
        );

        let start_time = Instant::now();

        let response = self.client.get(&url).send().await.map_err(|e| {
            let kind = if e.is_timeout() { "timed out" } else { "failed" };
            AggregatorError::upstream(format!("Request to {path} {kind}: {}", e.without_url()))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AggregatorError::upstream(format!(
                "Failed to read response body from {path}: {}",
                e.without_url()
            ))
        })?;

        let elapsed = start_time.elapsed();
        if elapsed.as_secs() > 5 {
            warn!("Slow OpenWeatherMap response from {}: {:.3}s", path, elapsed.as_secs_f64());
        }

        if !status.is_success() {
            error!("OpenWeatherMap {} returned {}", path, status);
            return Err(AggregatorError::upstream(format!(
                "{path} returned status {status}: {}",
                truncate_body(&body)
            )));
        }

        info!("OpenWeatherMap {} answered in {:.3}s", path, elapsed.as_secs_f64());

        serde_json::from_str(&body).map_err(|e| {
            AggregatorError::upstream(format!("Failed to parse {path} response: {e}"))
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn geocode(&self, city: &str) -> Result<Vec<Location>> {
        let params = [("q", city.to_string()), ("limit", "1".to_string())];
        let results: Vec<OwGeocodingResult> = self.get_json(GEOCODING_PATH, &params).await?;

        if results.is_empty() {
            warn!("No geocoding results for '{}'", city);
        }

        Ok(results.into_iter().map(Location::from).collect())
    }

    async fn current_conditions(&self, location: &Location) -> Result<CurrentObservation> {
        let mut params = Self::coordinate_params(location);
        params.push(("units", "metric".to_string()));
        let response: OwCurrentResponse = self.get_json(CURRENT_PATH, &params).await?;
        Ok(response.into())
    }

    async fn forecast(&self, location: &Location) -> Result<Vec<ForecastEntry>> {
        let mut params = Self::coordinate_params(location);
        params.push(("units", "metric".to_string()));
        let response: OwForecastResponse = self.get_json(FORECAST_PATH, &params).await?;
        response.into_entries()
    }

    async fn uv_index(&self, location: &Location) -> Result<Option<f64>> {
        let params = Self::coordinate_params(location);
        let response: OwUvResponse = self.get_json(UV_PATH, &params).await?;
        Ok(response.value)
    }
}

#[derive(Debug, Deserialize)]
struct OwGeocodingResult {
    name: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    country: String,
}

impl From<OwGeocodingResult> for Location {
    fn from(result: OwGeocodingResult) -> Self {
        Location::new(result.lat, result.lon, result.name, result.country)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    feels_like: f64,
    humidity: u32,
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    dt: i64,
    main: OwMain,
    wind: OwWind,
    rain: Option<OwRain>,
}

impl From<OwCurrentResponse> for CurrentObservation {
    fn from(response: OwCurrentResponse) -> Self {
        Self {
            timestamp: response.dt,
            feels_like: response.main.feels_like,
            humidity: response.main.humidity,
            wind_speed: response.wind.speed,
            temp_min: response.main.temp_min,
            temp_max: response.main.temp_max,
            rain_last_hour: response.rain.and_then(|rain| rain.one_hour),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastItem {
    dt_txt: String,
    main: OwForecastMain,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    list: Vec<OwForecastItem>,
}

impl OwForecastResponse {
    fn into_entries(self) -> Result<Vec<ForecastEntry>> {
        self.list
            .into_iter()
            .map(|item| {
                let time = NaiveDateTime::parse_from_str(&item.dt_txt, FORECAST_TIME_FORMAT)
                    .map_err(|e| {
                        AggregatorError::upstream(format!(
                            "Invalid forecast timestamp '{}': {e}",
                            item.dt_txt
                        ))
                    })?;
                Ok(ForecastEntry::new(time, item.main.temp))
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct OwUvResponse {
    value: Option<f64>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
