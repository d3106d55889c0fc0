//! Kenya weather API
//!
//! Backend proxy for the weather frontend. It resolves place names and fetches
//! current conditions plus a 7-day forecast from Open-Meteo, reshaping the
//! upstream JSON into the small records the frontend consumes.

pub mod api;
pub mod config;
pub mod error;
pub mod forecast;
pub mod logging;
pub mod search;
pub mod upstream;
pub mod weather_codes;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::AppConfig;
pub use error::WeatherApiError;
pub use forecast::{Coordinates, ForecastDay, WeatherReport, WeatherSnapshot};
pub use search::{LocationResult, LocationSearchResponse};
pub use upstream::{OpenMeteoApi, OpenMeteoClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherApiError>;
