//! City weather aggregation
//!
//! Validates the city name, resolves it to coordinates and then fetches
//! current conditions, forecast and UV index before composing one
//! [`WeatherReport`]. Any provider failure fails the whole lookup; there are
//! no retries and no partial results.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::config::FetchMode;
use crate::models::{CityWeather, CurrentObservation, DisplayZone, ForecastEntry, Location, WeatherReport};
use crate::weather::WeatherProvider;
use crate::{AggregatorError, Result};

/// Message of the validation error for a missing or empty city
pub const CITY_REQUIRED: &str = "City is required";

/// Aggregates the provider's endpoints into one report per city
pub struct WeatherAggregator {
    provider: Arc<dyn WeatherProvider>,
    fetch_mode: FetchMode,
    zone: DisplayZone,
}

impl WeatherAggregator {
    #[must_use]
    pub fn new(provider: Arc<dyn WeatherProvider>, fetch_mode: FetchMode, zone: DisplayZone) -> Self {
        Self {
            provider,
            fetch_mode,
            zone,
        }
    }

    /// Look up the consolidated weather for a city name.
    ///
    /// A missing or empty name is rejected before any provider call. A name
    /// that geocodes to nothing yields [`CityWeather::NotFound`] and skips the
    /// remaining calls.
    #[instrument(skip(self))]
    pub async fn get_weather_by_city(&self, city: Option<&str>) -> Result<CityWeather> {
        let city = match city {
            Some(city) if !city.is_empty() => city,
            _ => return Err(AggregatorError::validation(CITY_REQUIRED)),
        };

        let Some(location) = self.provider.geocode(city).await?.into_iter().next() else {
            info!("City '{}' not found", city);
            return Ok(CityWeather::NotFound);
        };

        debug!(
            "Resolved '{}' to {} ({})",
            city,
            location.name,
            location.format_coordinates()
        );

        let (observation, forecast, uv_reading) = self.fetch_facets(&location).await?;

        let report = WeatherReport::compose(&location, &observation, &forecast, uv_reading, self.zone)?;

        info!(
            "Weather for {}, {}: {} forecast days",
            report.city,
            report.country,
            report.next_days_temperature.len()
        );

        Ok(CityWeather::Found(Box::new(report)))
    }

    async fn fetch_facets(
        &self,
        location: &Location,
    ) -> Result<(CurrentObservation, Vec<ForecastEntry>, Option<f64>)> {
        match self.fetch_mode {
            FetchMode::Sequential => {
                let observation = self.provider.current_conditions(location).await?;
                let forecast = self.provider.forecast(location).await?;
                let uv_reading = self.provider.uv_index(location).await?;
                Ok((observation, forecast, uv_reading))
            }
            FetchMode::Concurrent => futures::try_join!(
                self.provider.current_conditions(location),
                self.provider.forecast(location),
                self.provider.uv_index(location),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UvIndex;
    use async_trait::async_trait;
    use chrono::NaiveDateTime;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeProvider {
        unknown_city: bool,
        fail_forecast: bool,
        uv: Option<f64>,
        calls: AtomicUsize,
        geocode_calls: AtomicUsize,
    }

    impl FakeProvider {
        fn record(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn geocode(&self, city: &str) -> Result<Vec<Location>> {
            self.geocode_calls.fetch_add(1, Ordering::SeqCst);
            if self.unknown_city {
                return Ok(Vec::new());
            }
            Ok(vec![Location::new(52.52, 13.405, city.to_string(), "DE".to_string())])
        }

        async fn current_conditions(&self, _location: &Location) -> Result<CurrentObservation> {
            self.record();
            Ok(CurrentObservation {
                // Thursday 2024-05-02 12:00:00 UTC
                timestamp: 1_714_651_200,
                feels_like: 20.1,
                humidity: 40,
                wind_speed: 3.2,
                temp_min: 18.0,
                temp_max: 22.5,
                rain_last_hour: None,
            })
        }

        async fn forecast(&self, _location: &Location) -> Result<Vec<ForecastEntry>> {
            self.record();
            if self.fail_forecast {
                return Err(AggregatorError::upstream("forecast unavailable"));
            }
            let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
            Ok(vec![
                ForecastEntry::new(at("2024-05-02 12:00:00"), 21.26),
                ForecastEntry::new(at("2024-05-02 15:00:00"), 23.7),
                ForecastEntry::new(at("2024-05-03 12:00:00"), 19.0),
            ])
        }

        async fn uv_index(&self, _location: &Location) -> Result<Option<f64>> {
            self.record();
            Ok(self.uv)
        }
    }

    fn aggregator(provider: Arc<FakeProvider>, fetch_mode: FetchMode) -> WeatherAggregator {
        WeatherAggregator::new(provider, fetch_mode, DisplayZone::Utc)
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[tokio::test]
    async fn test_missing_city_makes_no_calls(#[case] city: Option<&str>) {
        let provider = Arc::new(FakeProvider::default());
        let result = aggregator(provider.clone(), FetchMode::Sequential)
            .get_weather_by_city(city)
            .await;

        assert!(matches!(result, Err(AggregatorError::Validation { ref message }) if message == CITY_REQUIRED));
        assert_eq!(provider.geocode_calls.load(Ordering::SeqCst), 0);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_city_skips_weather_calls() {
        let provider = Arc::new(FakeProvider {
            unknown_city: true,
            ..Default::default()
        });
        let result = aggregator(provider.clone(), FetchMode::Sequential)
            .get_weather_by_city(Some("Nowhere123"))
            .await
            .unwrap();

        assert_eq!(result, CityWeather::NotFound);
        assert_eq!(provider.geocode_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[rstest]
    #[case(FetchMode::Sequential)]
    #[case(FetchMode::Concurrent)]
    #[tokio::test]
    async fn test_report_is_composed(#[case] fetch_mode: FetchMode) {
        let provider = Arc::new(FakeProvider {
            uv: Some(6.5),
            ..Default::default()
        });
        let result = aggregator(provider.clone(), fetch_mode)
            .get_weather_by_city(Some("Berlin"))
            .await
            .unwrap();

        let CityWeather::Found(report) = result else {
            panic!("expected a report");
        };
        assert_eq!(report.city, "Berlin");
        assert_eq!(report.country, "DE");
        assert_eq!(report.day, "Thursday");
        assert_eq!(report.time, "12:00:00");
        assert_eq!(report.uv_index, UvIndex::Value(6.5));
        assert_eq!(report.rain_probability, 0.0);
        assert_eq!(report.next_days_temperature.len(), 1);
        assert_eq!(report.next_days_temperature.get("Friday"), Some(19.0));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[rstest]
    #[case(FetchMode::Sequential)]
    #[case(FetchMode::Concurrent)]
    #[tokio::test]
    async fn test_any_upstream_failure_fails_lookup(#[case] fetch_mode: FetchMode) {
        let provider = Arc::new(FakeProvider {
            fail_forecast: true,
            ..Default::default()
        });
        let result = aggregator(provider, fetch_mode)
            .get_weather_by_city(Some("Berlin"))
            .await;

        assert!(matches!(result, Err(AggregatorError::Upstream { .. })));
    }

    #[tokio::test]
    async fn test_sequential_stops_after_failure() {
        let provider = Arc::new(FakeProvider {
            fail_forecast: true,
            ..Default::default()
        });
        let _ = aggregator(provider.clone(), FetchMode::Sequential)
            .get_weather_by_city(Some("Berlin"))
            .await;

        // current conditions and forecast, never the UV index
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_uv_is_sentinel() {
        let provider = Arc::new(FakeProvider::default());
        let result = aggregator(provider, FetchMode::Sequential)
            .get_weather_by_city(Some("Berlin"))
            .await
            .unwrap();

        let CityWeather::Found(report) = result else {
            panic!("expected a report");
        };
        assert_eq!(report.uv_index, UvIndex::Unavailable);
    }
}
