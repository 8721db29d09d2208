use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::truncate_body,
    model::{CurrentConditions, CurrentUnits, WeatherRequest, WeatherResponse},
};

use super::WeatherProvider;

pub const DEFAULT_URL: &str = "https://api.open-meteo.com/v1/forecast";

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m";

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for Open-Meteo")?;

        Ok(Self { url: url.into(), http })
    }

    async fn fetch_current(&self, request: &WeatherRequest) -> Result<WeatherResponse> {
        let latitude = request.coordinates.latitude.to_string();
        let longitude = request.coordinates.longitude.to_string();

        tracing::debug!(%latitude, %longitude, "Requesting current conditions");

        let res = self
            .http
            .get(&self.url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", CURRENT_FIELDS),
                ("timezone", "auto"),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo (current weather)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Open-Meteo current response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo current request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: OmResponse =
            serde_json::from_str(&body).context("Failed to parse Open-Meteo current JSON")?;

        let observed_at = parsed.current.time.as_deref().and_then(parse_local_time);

        Ok(WeatherResponse {
            provider: "open-meteo".to_string(),
            current: CurrentConditions {
                temperature_c: parsed.current.temperature_2m,
                feels_like_c: parsed.current.apparent_temperature,
                humidity_pct: parsed.current.relative_humidity_2m,
                wind_speed: parsed.current.wind_speed_10m,
                weather_code: parsed.current.weather_code,
                observed_at,
            },
            units: CurrentUnits {
                temperature: parsed.current_units.temperature_2m,
                humidity: parsed.current_units.relative_humidity_2m,
                wind_speed: parsed.current_units.wind_speed_10m,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    #[serde(default)]
    time: Option<String>,
    temperature_2m: f64,
    relative_humidity_2m: f64,
    apparent_temperature: f64,
    #[serde(default)]
    weather_code: Option<i32>,
    wind_speed_10m: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OmUnits {
    #[serde(default)]
    temperature_2m: String,
    #[serde(default)]
    relative_humidity_2m: String,
    #[serde(default)]
    wind_speed_10m: String,
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    current: OmCurrent,
    #[serde(default)]
    current_units: OmUnits,
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherResponse> {
        self.fetch_current(request).await
    }
}

/// Open-Meteo reports local time without seconds, e.g. `2024-06-01T14:15`.
fn parse_local_time(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinates;
    use chrono::{Datelike, Timelike};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> OpenMeteoProvider {
        OpenMeteoProvider::new(format!("{}/v1/forecast", server.uri()), Duration::from_secs(5))
            .unwrap()
    }

    fn cebu() -> WeatherRequest {
        WeatherRequest { coordinates: Coordinates { latitude: 10.3157, longitude: 123.8854 } }
    }

    #[tokio::test]
    async fn parses_current_conditions_and_units() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("latitude", "10.3157"))
            .and(query_param("longitude", "123.8854"))
            .and(query_param("current", CURRENT_FIELDS))
            .and(query_param("timezone", "auto"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "latitude": 10.3,
                "longitude": 123.875,
                "current_units": {
                    "time": "iso8601",
                    "temperature_2m": "°C",
                    "relative_humidity_2m": "%",
                    "apparent_temperature": "°C",
                    "weather_code": "wmo code",
                    "wind_speed_10m": "km/h"
                },
                "current": {
                    "time": "2024-06-01T14:15",
                    "interval": 900,
                    "temperature_2m": 31.4,
                    "relative_humidity_2m": 66,
                    "apparent_temperature": 36.8,
                    "weather_code": 80,
                    "wind_speed_10m": 12.2
                }
            })))
            .mount(&server)
            .await;

        let res = provider(&server).get_weather(&cebu()).await.unwrap();

        assert_eq!(res.provider, "open-meteo");
        assert_eq!(res.current.temperature_c, 31.4);
        assert_eq!(res.current.feels_like_c, 36.8);
        assert_eq!(res.current.humidity_pct, 66.0);
        assert_eq!(res.current.weather_code, Some(80));
        assert_eq!(res.units.wind_speed, "km/h");
        assert_eq!(res.units.temperature, "°C");

        let at = res.current.observed_at.expect("time");
        assert_eq!((at.year(), at.month(), at.day()), (2024, 6, 1));
        assert_eq!((at.hour(), at.minute()), (14, 15));
    }

    #[tokio::test]
    async fn missing_weather_code_and_units_are_tolerated() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "current": {
                    "temperature_2m": 27.0,
                    "relative_humidity_2m": 80,
                    "apparent_temperature": 30.1,
                    "wind_speed_10m": 4.0
                }
            })))
            .mount(&server)
            .await;

        let res = provider(&server).get_weather(&cebu()).await.unwrap();

        assert_eq!(res.current.weather_code, None);
        assert_eq!(res.current.observed_at, None);
        assert_eq!(res.units, CurrentUnits::default());
    }

    #[tokio::test]
    async fn error_status_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": true,
                "reason": "Latitude must be in range of -90 to 90°."
            })))
            .mount(&server)
            .await;

        let err = provider(&server).get_weather(&cebu()).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("400"));
        assert!(msg.contains("Latitude must be in range"));
    }

    #[tokio::test]
    async fn payload_without_current_block_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "latitude": 10.3
            })))
            .mount(&server)
            .await;

        let err = provider(&server).get_weather(&cebu()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse Open-Meteo current JSON"));
    }

    #[test]
    fn local_time_formats() {
        assert!(parse_local_time("2024-06-01T14:15").is_some());
        assert!(parse_local_time("2024-06-01T14:15:30").is_some());
        assert!(parse_local_time("yesterday").is_none());
    }
}
