//! Error types and HTTP mapping for the weather API

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Main error type for the weather API
///
/// Every handler either succeeds completely or fails with one of these.
/// The display string is what the client sees in the `error` field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeatherApiError {
    /// A required query parameter is missing or empty
    #[error("{message}")]
    InvalidRequest { message: String },

    /// The request was valid but the upstream had nothing matching
    #[error("{message}")]
    NotFound { message: String },

    /// Network, status or decoding failure against Open-Meteo
    #[error("{message}")]
    Upstream { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl WeatherApiError {
    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status this error is surfaced with
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            WeatherApiError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            WeatherApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            WeatherApiError::Upstream { .. } | WeatherApiError::Config { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<reqwest::Error> for WeatherApiError {
    fn from(err: reqwest::Error) -> Self {
        WeatherApiError::upstream(err.to_string())
    }
}

impl From<serde_json::Error> for WeatherApiError {
    fn from(err: serde_json::Error) -> Self {
        WeatherApiError::upstream(err.to_string())
    }
}

/// JSON body sent for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for WeatherApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(%status, "Request failed: {}", self);
        } else {
            tracing::warn!(%status, "Request rejected: {}", self);
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
