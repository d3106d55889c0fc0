//! reqwest-backed Open-Meteo client

use std::time::{Duration, Instant};

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, info, instrument, warn};

use super::{ForecastQuery, ForecastResponse, GeocodingQuery, GeocodingResponse, OpenMeteoApi};
use crate::config::UpstreamConfig;
use crate::{Result, WeatherApiError};

/// Error body Open-Meteo sends with 4xx responses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    reason: Option<String>,
}

/// HTTP client for the Open-Meteo geocoding and forecast APIs
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteoClient {
    /// Create a new client from the upstream configuration
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
        })
    }

    fn build_url(base: &str, pairs: &[(&'static str, String)]) -> String {
        let query = pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{base}?{query}")
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("Open-Meteo request URL: {}", url);
        let start_time = Instant::now();

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Open-Meteo request failed: {}", e);
            WeatherApiError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let reason = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.reason)
                .unwrap_or(body);
            warn!("Open-Meteo returned {}: {}", status, reason);
            return Err(WeatherApiError::upstream(format!(
                "Open-Meteo returned {status}: {reason}"
            )));
        }

        let parsed = serde_json::from_str(&body)?;

        let total_duration = start_time.elapsed();
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow Open-Meteo response: {:.3}s",
                total_duration.as_secs_f64()
            );
        }
        Ok(parsed)
    }
}

#[async_trait]
impl OpenMeteoApi for OpenMeteoClient {
    #[instrument(skip(self, query), fields(location = %query.name))]
    async fn search(&self, query: &GeocodingQuery) -> Result<GeocodingResponse> {
        let url = Self::build_url(&self.geocoding_url, &query.query_pairs());
        let response: GeocodingResponse = self.get_json(&url).await?;

        info!(
            "Geocoding '{}' returned {} results",
            query.name,
            response.results.as_ref().map_or(0, Vec::len)
        );
        Ok(response)
    }

    #[instrument(skip(self, query), fields(lat = %query.latitude, lon = %query.longitude))]
    async fn forecast(&self, query: &ForecastQuery) -> Result<ForecastResponse> {
        let url = Self::build_url(&self.forecast_url, &query.query_pairs());
        let response: ForecastResponse = self.get_json(&url).await?;

        info!(
            "Forecast retrieved (current: {}, daily: {})",
            response.current.is_some(),
            response.daily.is_some()
        );
        Ok(response)
    }
}
