//! Router tests driven through `tower::ServiceExt::oneshot`
//!
//! The upstream is replaced by an in-memory stub so every status mapping can
//! be exercised without the network.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use kenya_weather_api::upstream::{
    CurrentData, DailyData, ForecastQuery, ForecastResponse, GeocodingQuery, GeocodingRecord,
    GeocodingResponse, OpenMeteoApi,
};
use kenya_weather_api::{AppState, WeatherApiError, web};
use serde_json::{Value, json};
use tower::ServiceExt;

#[derive(Default)]
struct StubApi {
    geocoding: Option<Result<GeocodingResponse, WeatherApiError>>,
    forecast: Option<Result<ForecastResponse, WeatherApiError>>,
    calls: Mutex<u32>,
    seen_names: Mutex<Vec<String>>,
    seen_coordinates: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl OpenMeteoApi for StubApi {
    async fn search(&self, query: &GeocodingQuery) -> Result<GeocodingResponse, WeatherApiError> {
        *self.calls.lock().unwrap() += 1;
        self.seen_names.lock().unwrap().push(query.name.clone());
        self.geocoding
            .clone()
            .unwrap_or_else(|| Err(WeatherApiError::upstream("unexpected geocoding call")))
    }

    async fn forecast(&self, query: &ForecastQuery) -> Result<ForecastResponse, WeatherApiError> {
        *self.calls.lock().unwrap() += 1;
        self.seen_coordinates
            .lock()
            .unwrap()
            .push((query.latitude.clone(), query.longitude.clone()));
        self.forecast
            .clone()
            .unwrap_or_else(|| Err(WeatherApiError::upstream("unexpected forecast call")))
    }
}

fn app_with(stub: Arc<StubApi>) -> Router {
    web::app(AppState::new(stub), None)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn place(name: &str, country: &str) -> GeocodingRecord {
    GeocodingRecord {
        name: Some(name.to_string()),
        latitude: Some(-0.3031),
        longitude: Some(36.08),
        country: Some(country.to_string()),
        admin1: Some("Nakuru".to_string()),
    }
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app_with(Arc::default()), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": "healthy", "message": "Weather API is running"})
    );
}

#[tokio::test]
async fn test_search_location_success() {
    let stub = Arc::new(StubApi {
        geocoding: Some(Ok(GeocodingResponse {
            results: Some(vec![
                place("Nakuru", "Kenya"),
                place("Nakuru Hills", "Tanzania"),
            ]),
        })),
        ..StubApi::default()
    });

    let (status, body) = get(app_with(stub), "/api/search-location?location=Nakuru").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "locations": [{
                "name": "Nakuru",
                "country": "Kenya",
                "admin1": "Nakuru",
                "latitude": -0.3031,
                "longitude": 36.08
            }]
        })
    );
}

#[tokio::test]
async fn test_search_location_missing_param() {
    let stub = Arc::new(StubApi::default());

    let (status, body) = get(app_with(stub.clone()), "/api/search-location").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Location parameter is required"}));

    let (status, _) = get(app_with(stub.clone()), "/api/search-location?location=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(*stub.calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_search_location_repeated_param_uses_first() {
    let stub = Arc::new(StubApi {
        geocoding: Some(Ok(GeocodingResponse {
            results: Some(vec![place("Nakuru", "Kenya")]),
        })),
        ..StubApi::default()
    });

    let (status, body) = get(
        app_with(stub.clone()),
        "/api/search-location?location=Nakuru&location=Eldoret",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["locations"][0]["name"], "Nakuru");
    assert_eq!(*stub.seen_names.lock().unwrap(), vec!["Nakuru".to_string()]);
}

#[tokio::test]
async fn test_search_location_empty_first_value_is_invalid() {
    let stub = Arc::new(StubApi::default());

    let (status, body) = get(
        app_with(stub),
        "/api/search-location?location=&location=Nakuru",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Location parameter is required"}));
}

#[tokio::test]
async fn test_search_location_not_found() {
    let stub = Arc::new(StubApi {
        geocoding: Some(Ok(GeocodingResponse::default())),
        ..StubApi::default()
    });

    let (status, body) = get(app_with(stub), "/api/search-location?location=Zzyzx").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Location not found"}));
}

#[tokio::test]
async fn test_search_location_upstream_error() {
    let stub = Arc::new(StubApi {
        geocoding: Some(Err(WeatherApiError::upstream("dns error: no such host"))),
        ..StubApi::default()
    });

    let (status, body) = get(app_with(stub), "/api/search-location?location=Nairobi").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "dns error: no such host"}));
}

#[tokio::test]
async fn test_weather_success_shape() {
    let stub = Arc::new(StubApi {
        forecast: Some(Ok(ForecastResponse {
            current: Some(CurrentData {
                time: Some("2026-10-19T09:00".to_string()),
                temperature_2m: Some(19.5),
                relative_humidity_2m: Some(70.0),
                precipitation: Some(0.0),
                weather_code: Some(3),
                wind_speed_10m: None,
            }),
            daily: Some(DailyData {
                time: Some(vec![Some("2026-10-19".to_string())]),
                temperature_2m_max: Some(vec![Some(26.1)]),
                temperature_2m_min: Some(vec![Some(13.4)]),
                precipitation_sum: Some(vec![Some(2.5)]),
                weather_code: Some(vec![Some(61)]),
            }),
        })),
        ..StubApi::default()
    });

    let (status, body) = get(app_with(stub), "/api/weather?lat=-1.286&lon=36.817").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "current": {
                "temperature": 19.5,
                "humidity": 70.0,
                "precipitation": 0.0,
                "wind_speed": null,
                "weather_code": 3,
                "time": "2026-10-19T09:00"
            },
            "forecast": [{
                "date": "2026-10-19",
                "temp_max": 26.1,
                "temp_min": 13.4,
                "precipitation": 2.5,
                "weather_code": 61
            }]
        })
    );
}

#[tokio::test]
async fn test_weather_missing_coordinates() {
    let stub = Arc::new(StubApi::default());

    for uri in ["/api/weather", "/api/weather?lat=-1.286", "/api/weather?lon=36.817", "/api/weather?lat=&lon=36.8"] {
        let (status, body) = get(app_with(stub.clone()), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, json!({"error": "Latitude and longitude are required"}));
    }
    assert_eq!(*stub.calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_weather_repeated_params_use_first() {
    let stub = Arc::new(StubApi {
        forecast: Some(Ok(ForecastResponse::default())),
        ..StubApi::default()
    });

    let (status, body) = get(app_with(stub.clone()), "/api/weather?lat=1&lon=2&lat=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["forecast"], json!([]));
    assert_eq!(
        *stub.seen_coordinates.lock().unwrap(),
        vec![("1".to_string(), "2".to_string())]
    );
}

#[tokio::test]
async fn test_weather_null_date_passes_through() {
    let stub = Arc::new(StubApi {
        forecast: Some(Ok(serde_json::from_value(json!({
            "daily": {
                "time": ["2026-01-01", null],
                "temperature_2m_max": [27.0, 26.5],
                "temperature_2m_min": [14.0, 13.5],
                "precipitation_sum": [0.0, 1.1],
                "weather_code": [1, 61]
            }
        }))
        .unwrap())),
        ..StubApi::default()
    });

    let (status, body) = get(app_with(stub), "/api/weather?lat=-0.1&lon=34.76").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["forecast"][0]["date"], "2026-01-01");
    assert_eq!(body["forecast"][1]["date"], Value::Null);
    assert_eq!(body["forecast"][1]["weather_code"], 61);
}

#[tokio::test]
async fn test_weather_malformed_daily_is_server_error() {
    let stub = Arc::new(StubApi {
        forecast: Some(Ok(ForecastResponse {
            current: None,
            daily: Some(DailyData {
                time: Some(vec![
                    Some("2026-10-19".to_string()),
                    Some("2026-10-20".to_string()),
                ]),
                temperature_2m_max: Some(vec![Some(26.1), Some(25.0)]),
                temperature_2m_min: Some(vec![Some(13.4), Some(12.9)]),
                precipitation_sum: Some(vec![Some(2.5), Some(0.0)]),
                weather_code: Some(vec![Some(61)]),
            }),
        })),
        ..StubApi::default()
    });

    let (status, body) = get(app_with(stub), "/api/weather?lat=0.5&lon=35.3").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("weather_code"));
}

#[tokio::test]
async fn test_weather_description_known_and_unknown() {
    let (status, body) = get(app_with(Arc::default()), "/api/weather-description/95").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"code": 95, "description": "Thunderstorm"}));

    let (status, body) = get(app_with(Arc::default()), "/api/weather-description/42").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"code": 42, "description": "Unknown"}));
}

#[tokio::test]
async fn test_weather_description_non_integer_is_not_found() {
    let (status, body) = get(app_with(Arc::default()), "/api/weather-description/rain").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not Found"}));
}

#[tokio::test]
async fn test_weather_description_signed_code_is_not_found() {
    let (status, body) = get(app_with(Arc::default()), "/api/weather-description/+5").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not Found"}));

    let (status, body) = get(app_with(Arc::default()), "/api/weather-description/-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"code": -1, "description": "Unknown"}));
}

#[tokio::test]
async fn test_unknown_api_route() {
    let (status, body) = get(app_with(Arc::default()), "/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not Found"}));
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let response = app_with(Arc::default())
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/health")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
