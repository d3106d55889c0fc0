//! Current conditions and 7-day forecast
//!
//! Requests a fixed set of current and daily fields from Open-Meteo in East
//! Africa Time and flattens the parallel daily arrays into one record per day.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::upstream::{CurrentData, DailyData, ForecastQuery, OpenMeteoApi};
use crate::{Result, WeatherApiError};

/// Days requested from the upstream
pub const FORECAST_DAYS: u8 = 7;
/// Zone the daily aggregates are computed in (UTC+3)
pub const FORECAST_TIMEZONE: Tz = chrono_tz::Africa::Nairobi;

pub const CURRENT_FIELDS: [&str; 5] = [
    "temperature_2m",
    "relative_humidity_2m",
    "precipitation",
    "weather_code",
    "wind_speed_10m",
];

pub const DAILY_FIELDS: [&str; 4] = [
    "temperature_2m_max",
    "temperature_2m_min",
    "precipitation_sum",
    "weather_code",
];

/// Caller-supplied point, forwarded to the upstream as given
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

impl Coordinates {
    /// Both values must be present and non-empty
    pub fn from_params(lat: Option<&str>, lon: Option<&str>) -> Result<Self> {
        match (lat, lon) {
            (Some(lat), Some(lon)) if !lat.is_empty() && !lon.is_empty() => Ok(Self {
                latitude: lat.to_string(),
                longitude: lon.to_string(),
            }),
            _ => Err(WeatherApiError::invalid_request(
                "Latitude and longitude are required",
            )),
        }
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
        }
    }
}

/// Conditions right now; any field may be missing upstream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Air temperature at 2 m, °C
    pub temperature: Option<f64>,
    /// Relative humidity at 2 m, %
    pub humidity: Option<f64>,
    /// mm
    pub precipitation: Option<f64>,
    /// Wind speed at 10 m, km/h
    pub wind_speed: Option<f64>,
    pub weather_code: Option<i64>,
    pub time: Option<String>,
}

impl From<CurrentData> for WeatherSnapshot {
    fn from(current: CurrentData) -> Self {
        Self {
            temperature: current.temperature_2m,
            humidity: current.relative_humidity_2m,
            precipitation: current.precipitation,
            wind_speed: current.wind_speed_10m,
            weather_code: current.weather_code,
            time: current.time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: Option<String>,
    pub temp_max: Option<f64>,
    pub temp_min: Option<f64>,
    pub precipitation: Option<f64>,
    pub weather_code: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: WeatherSnapshot,
    pub forecast: Vec<ForecastDay>,
}

/// Read `series[index]`, failing if the array is absent or too short
fn value_at<T: Copy>(series: Option<&Vec<Option<T>>>, name: &str, index: usize) -> Result<Option<T>> {
    let values = series.ok_or_else(|| {
        WeatherApiError::upstream(format!("Daily forecast is missing '{name}'"))
    })?;
    values.get(index).copied().ok_or_else(|| {
        WeatherApiError::upstream(format!(
            "Daily '{name}' has {} entries, expected at least {}",
            values.len(),
            index + 1
        ))
    })
}

/// Flatten the parallel daily arrays. `time` is the length authority.
fn build_forecast(daily: Option<DailyData>) -> Result<Vec<ForecastDay>> {
    let Some(daily) = daily else {
        return Ok(Vec::new());
    };
    let Some(dates) = daily.time.as_ref() else {
        return Ok(Vec::new());
    };

    dates
        .iter()
        .enumerate()
        .map(|(i, date)| -> Result<ForecastDay> {
            Ok(ForecastDay {
                date: date.clone(),
                temp_max: value_at(daily.temperature_2m_max.as_ref(), "temperature_2m_max", i)?,
                temp_min: value_at(daily.temperature_2m_min.as_ref(), "temperature_2m_min", i)?,
                precipitation: value_at(daily.precipitation_sum.as_ref(), "precipitation_sum", i)?,
                weather_code: value_at(daily.weather_code.as_ref(), "weather_code", i)?,
            })
        })
        .collect()
}

fn forecast_query(coordinates: &Coordinates) -> ForecastQuery {
    ForecastQuery {
        latitude: coordinates.latitude.clone(),
        longitude: coordinates.longitude.clone(),
        current: CURRENT_FIELDS.to_vec(),
        daily: DAILY_FIELDS.to_vec(),
        timezone: FORECAST_TIMEZONE.name().to_string(),
        forecast_days: FORECAST_DAYS,
    }
}

/// Fetch current conditions and the daily forecast for a point
pub async fn fetch(api: &dyn OpenMeteoApi, coordinates: &Coordinates) -> Result<WeatherReport> {
    let response = api.forecast(&forecast_query(coordinates)).await?;

    let current = response.current.map(WeatherSnapshot::from).unwrap_or_default();
    let forecast = build_forecast(response.daily)?;

    debug!(
        "Forecast for ({}, {}) has {} days",
        coordinates.latitude,
        coordinates.longitude,
        forecast.len()
    );

    Ok(WeatherReport { current, forecast })
}
