//! Text rendering of lookups for the terminal.

use std::fmt::Write;

use ph_weather_core::{DirectoryStatus, IconCategory, MatchKind, Observation};

pub fn glyph(category: IconCategory) -> &'static str {
    match category {
        IconCategory::Clear => "☀",
        IconCategory::Cloud => "☁",
        IconCategory::Fog => "🌫",
        IconCategory::Rain => "🌧",
        IconCategory::Snow => "🌨",
        IconCategory::Thunderstorm => "⛈",
        IconCategory::GenericCloud | IconCategory::Unknown => "☁",
    }
}

/// Temperatures and wind are shown as whole numbers.
fn whole(value: f64) -> i64 {
    value.round() as i64
}

pub fn observation(obs: &Observation) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}  {}", obs.place.cleaned, glyph(obs.condition.category));
    if obs.place.original != obs.place.cleaned {
        let _ = writeln!(out, "   ({})", obs.place.original);
    }
    if obs.match_kind == MatchKind::Partial {
        let _ = writeln!(out, "   closest match for your query");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Temperature: {}°C", whole(obs.current.temperature_c));
    let _ = writeln!(out, "Feels like:  {}°C", whole(obs.current.feels_like_c));
    let _ = writeln!(out, "Humidity:    {}%", obs.current.humidity_pct);
    let _ = writeln!(out, "Wind:        {} {}", whole(obs.current.wind_speed), obs.units.wind_speed);
    let _ = writeln!(out);
    let _ = write!(out, "{}", obs.condition.description);

    if let Some(at) = obs.current.observed_at {
        let _ = write!(out, "\nAs of {}", at.format("%Y-%m-%d %H:%M"));
    }

    out
}

pub fn status(status: DirectoryStatus) -> &'static str {
    match (status.ready, status.using_fallback) {
        (false, _) => "place directory not loaded",
        (true, false) => "place directory loaded from registry",
        (true, true) => "registry unreachable; using built-in place list",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ph_weather_core::{
        Coordinates, PlaceRecord, classify,
        model::{CurrentConditions, CurrentUnits},
    };

    fn sample(match_kind: MatchKind) -> Observation {
        Observation {
            place: PlaceRecord {
                original: "City of Manila".into(),
                cleaned: "Manila".into(),
                coordinates: Coordinates { latitude: 14.5995, longitude: 120.9842 },
            },
            match_kind,
            provider: "open-meteo".into(),
            current: CurrentConditions {
                temperature_c: 31.5,
                feels_like_c: 36.4,
                humidity_pct: 66.0,
                wind_speed: 12.2,
                weather_code: Some(63),
                observed_at: NaiveDate::from_ymd_opt(2024, 6, 1).and_then(|d| d.and_hms_opt(14, 15, 0)),
            },
            units: CurrentUnits {
                temperature: "°C".into(),
                humidity: "%".into(),
                wind_speed: "km/h".into(),
            },
            condition: classify(Some(63)),
        }
    }

    #[test]
    fn renders_rounded_values_and_units() {
        let text = observation(&sample(MatchKind::Exact));

        assert!(text.starts_with("Manila  🌧"));
        assert!(text.contains("(City of Manila)"));
        assert!(text.contains("Temperature: 32°C"));
        assert!(text.contains("Feels like:  36°C"));
        assert!(text.contains("Humidity:    66%"));
        assert!(text.contains("Wind:        12 km/h"));
        assert!(text.contains("Moderate rain"));
        assert!(text.contains("As of 2024-06-01 14:15"));
        assert!(!text.contains("closest match"));
    }

    #[test]
    fn humidity_is_shown_as_reported() {
        let mut obs = sample(MatchKind::Exact);
        obs.current.humidity_pct = 66.5;

        let text = observation(&obs);
        assert!(text.contains("Humidity:    66.5%"));
    }

    #[test]
    fn partial_matches_are_flagged() {
        let text = observation(&sample(MatchKind::Partial));
        assert!(text.contains("closest match"));
    }

    #[test]
    fn every_category_has_a_glyph() {
        for category in [
            IconCategory::Clear,
            IconCategory::Cloud,
            IconCategory::Fog,
            IconCategory::Rain,
            IconCategory::Snow,
            IconCategory::Thunderstorm,
            IconCategory::GenericCloud,
            IconCategory::Unknown,
        ] {
            assert!(!glyph(category).is_empty());
        }
    }

    #[test]
    fn status_lines() {
        assert_eq!(status(DirectoryStatus::default()), "place directory not loaded");
        let degraded = DirectoryStatus { ready: true, using_fallback: true, loading: false };
        assert!(status(degraded).contains("built-in"));
    }
}
