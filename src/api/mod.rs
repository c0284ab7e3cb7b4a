use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::AggregatorError;
use crate::aggregator::WeatherAggregator;
use crate::models::CityWeather;

const CITY_NOT_FOUND: &str = "City not found";

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    pub city: Option<String>,
}

/// `{"error": "..."}` body shared by every non-report response
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            error: message.into(),
        })
    }
}

impl IntoResponse for AggregatorError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            return (StatusCode::BAD_REQUEST, ErrorBody::new(self.user_message())).into_response();
        }

        // Detail stays in the server log
        tracing::error!("Weather lookup failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::new(self.user_message()),
        )
            .into_response()
    }
}

pub fn router(aggregator: Arc<WeatherAggregator>) -> Router {
    Router::new()
        .route("/weather/city", get(get_weather_by_city))
        .with_state(aggregator)
}

async fn get_weather_by_city(
    State(aggregator): State<Arc<WeatherAggregator>>,
    query: Result<Query<CityQuery>, QueryRejection>,
) -> Result<Response, AggregatorError> {
    // Malformed query strings, such as a repeated `city`, get the JSON error body too
    let Query(query) = query.map_err(|rejection| AggregatorError::validation(rejection.body_text()))?;

    // Not-found is a 200 carrying an error field, as existing clients expect
    match aggregator.get_weather_by_city(query.city.as_deref()).await? {
        CityWeather::Found(report) => Ok(Json(report).into_response()),
        CityWeather::NotFound => Ok(ErrorBody::new(CITY_NOT_FOUND).into_response()),
    }
}
