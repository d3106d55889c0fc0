//! HTTP handlers mounted under `/api`

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::forecast::{self, Coordinates, WeatherReport};
use crate::search::{self, LocationSearchResponse};
use crate::upstream::OpenMeteoApi;
use crate::{Result, WeatherApiError, weather_codes};

/// Shared handler state; the upstream client is the only collaborator
#[derive(Clone)]
pub struct AppState {
    api: Arc<dyn OpenMeteoApi>,
}

impl AppState {
    pub fn new(api: Arc<dyn OpenMeteoApi>) -> Self {
        Self { api }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeatherDescription {
    pub code: i64,
    pub description: String,
}

/// Raw query pairs; a repeated key resolves to its first value
#[derive(Debug)]
struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    fn from_extracted(
        query: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
    ) -> Result<Self> {
        let Query(pairs) =
            query.map_err(|rejection| WeatherApiError::invalid_request(rejection.body_text()))?;
        Ok(Self(pairs))
    }

    fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/search-location", get(search_location))
        .route("/weather", get(get_weather))
        .route("/weather-description/{code}", get(get_weather_description))
        .fallback(not_found)
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Weather API is running".to_string(),
    })
}

async fn search_location(
    State(state): State<AppState>,
    query: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<LocationSearchResponse>> {
    let params = QueryParams::from_extracted(query)?;
    let response = search::search(state.api.as_ref(), params.first("location")).await?;
    Ok(Json(response))
}

async fn get_weather(
    State(state): State<AppState>,
    query: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<WeatherReport>> {
    let params = QueryParams::from_extracted(query)?;
    let coordinates = Coordinates::from_params(params.first("lat"), params.first("lon"))?;
    let report = forecast::fetch(state.api.as_ref(), &coordinates).await?;
    Ok(Json(report))
}

/// Plain decimal integer, optionally negative; no sign prefix or whitespace
fn parse_code(segment: &str) -> Option<i64> {
    let digits = segment.strip_prefix('-').unwrap_or(segment);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

// Non-integer codes do not match the route, same as an unknown path.
async fn get_weather_description(Path(code): Path<String>) -> Result<Json<WeatherDescription>> {
    let code = parse_code(&code).ok_or_else(|| WeatherApiError::not_found("Not Found"))?;

    Ok(Json(WeatherDescription {
        code,
        description: weather_codes::describe(code).to_string(),
    }))
}

async fn not_found() -> WeatherApiError {
    WeatherApiError::not_found("Not Found")
}
