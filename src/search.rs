//! Location search
//!
//! Resolves a free-text place name through Open-Meteo geocoding, preferring
//! matches inside Kenya, and reshapes the records for the frontend.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::upstream::{GeocodingQuery, GeocodingRecord, OpenMeteoApi};
use crate::{Result, WeatherApiError};

/// Candidates requested from the geocoder
pub const MAX_RESULTS: u8 = 5;
pub const SEARCH_LANGUAGE: &str = "en";
/// Country whose matches win over everything else
pub const PREFERRED_COUNTRY: &str = "Kenya";

const UNKNOWN_COUNTRY: &str = "Unknown";

/// A resolved place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResult {
    pub name: String,
    pub country: String,
    /// First-level administrative area (county, state)
    pub admin1: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSearchResponse {
    pub locations: Vec<LocationResult>,
}

impl TryFrom<&GeocodingRecord> for LocationResult {
    type Error = WeatherApiError;

    fn try_from(record: &GeocodingRecord) -> Result<Self> {
        let missing = |field: &str| {
            WeatherApiError::upstream(format!("Geocoding result is missing '{field}'"))
        };

        Ok(Self {
            name: record.name.clone().ok_or_else(|| missing("name"))?,
            country: record
                .country
                .clone()
                .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string()),
            admin1: record.admin1.clone().unwrap_or_default(),
            latitude: record.latitude.ok_or_else(|| missing("latitude"))?,
            longitude: record.longitude.ok_or_else(|| missing("longitude"))?,
        })
    }
}

/// Pick the records to return: every preferred-country match if there is one,
/// otherwise the first [`MAX_RESULTS`] in upstream order.
fn select_candidates(records: &[GeocodingRecord]) -> Vec<&GeocodingRecord> {
    let preferred: Vec<&GeocodingRecord> = records
        .iter()
        .filter(|r| r.country.as_deref() == Some(PREFERRED_COUNTRY))
        .collect();

    if preferred.is_empty() {
        records.iter().take(MAX_RESULTS.into()).collect()
    } else {
        preferred
    }
}

/// Search for locations matching `location_name`
pub async fn search(
    api: &dyn OpenMeteoApi,
    location_name: Option<&str>,
) -> Result<LocationSearchResponse> {
    let name = match location_name {
        Some(name) if !name.is_empty() => name,
        _ => return Err(WeatherApiError::invalid_request("Location parameter is required")),
    };

    let query = GeocodingQuery {
        name: name.to_string(),
        count: MAX_RESULTS,
        language: SEARCH_LANGUAGE.to_string(),
    };
    let response = api.search(&query).await?;

    let records = response.results.unwrap_or_default();
    if records.is_empty() {
        return Err(WeatherApiError::not_found("Location not found"));
    }

    let selected = select_candidates(&records);
    debug!(
        "Selected {} of {} geocoding results for '{}'",
        selected.len(),
        records.len(),
        name
    );

    let locations = selected
        .into_iter()
        .map(LocationResult::try_from)
        .collect::<Result<Vec<_>>>()?;

    Ok(LocationSearchResponse { locations })
}
