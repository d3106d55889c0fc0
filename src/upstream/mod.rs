//! Upstream Open-Meteo collaborator
//!
//! Handlers never talk HTTP directly; they receive an [`OpenMeteoApi`]
//! implementation so tests can swap in canned responses. Every field of the
//! upstream records is optional here and defaulted by the translators.

use async_trait::async_trait;
use serde::Deserialize;

use crate::Result;

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Geocoding search parameters
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodingQuery {
    pub name: String,
    pub count: u8,
    pub language: String,
}

impl GeocodingQuery {
    /// Query string pairs in the order Open-Meteo documents them
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("count", self.count.to_string()),
            ("language", self.language.clone()),
            ("format", "json".to_string()),
        ]
    }
}

/// Forecast parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastQuery {
    pub latitude: String,
    pub longitude: String,
    pub current: Vec<&'static str>,
    pub daily: Vec<&'static str>,
    pub timezone: String,
    pub forecast_days: u8,
}

impl ForecastQuery {
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", self.latitude.clone()),
            ("longitude", self.longitude.clone()),
            ("current", self.current.join(",")),
            ("daily", self.daily.join(",")),
            ("timezone", self.timezone.clone()),
            ("forecast_days", self.forecast_days.to_string()),
        ]
    }
}

/// Geocoding response from Open-Meteo
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub results: Option<Vec<GeocodingRecord>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GeocodingRecord {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country: Option<String>,
    pub admin1: Option<String>,
}

/// Forecast response from Open-Meteo
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub current: Option<CurrentData>,
    #[serde(default)]
    pub daily: Option<DailyData>,
}

/// Instantaneous values from the `current` block
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurrentData {
    pub time: Option<String>,
    pub temperature_2m: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
    pub precipitation: Option<f64>,
    pub weather_code: Option<i64>,
    pub wind_speed_10m: Option<f64>,
}

/// Parallel daily arrays; `time` decides how many days there are
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DailyData {
    pub time: Option<Vec<Option<String>>>,
    pub temperature_2m_max: Option<Vec<Option<f64>>>,
    pub temperature_2m_min: Option<Vec<Option<f64>>>,
    pub precipitation_sum: Option<Vec<Option<f64>>>,
    pub weather_code: Option<Vec<Option<i64>>>,
}

/// Open-Meteo operations the translators depend on
#[async_trait]
pub trait OpenMeteoApi: Send + Sync {
    /// Look up places by free-text name
    async fn search(&self, query: &GeocodingQuery) -> Result<GeocodingResponse>;

    /// Fetch current conditions and daily aggregates for a point
    async fn forecast(&self, query: &ForecastQuery) -> Result<ForecastResponse>;
}
