use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Used for places whose source entry carries no geocoding data (Manila).
pub const FALLBACK_COORDINATES: Coordinates = Coordinates { latitude: 14.5995, longitude: 120.9842 };

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Both halves must be present, otherwise the fallback pair is used.
    pub fn or_fallback(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Self { latitude, longitude },
            _ => FALLBACK_COORDINATES,
        }
    }
}

/// One resolvable place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Name exactly as the source returned it.
    pub original: String,
    /// `original` without its administrative prefix.
    pub cleaned: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    Exact,
    Partial,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedQuery {
    pub record: PlaceRecord,
    pub match_kind: MatchKind,
}

#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub coordinates: Coordinates,
}

/// Values of the `current` block of the weather source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: f64,
    pub wind_speed: f64,
    pub weather_code: Option<i32>,
    pub observed_at: Option<NaiveDateTime>,
}

/// Unit strings reported next to the values, e.g. `km/h`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurrentUnits {
    pub temperature: String,
    pub humidity: String,
    pub wind_speed: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub provider: String,
    pub current: CurrentConditions,
    pub units: CurrentUnits,
}
