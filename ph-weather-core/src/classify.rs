//! Weather code classification.
//!
//! Codes follow the WMO table used by Open-Meteo:
//! <https://open-meteo.com/en/docs#weathervariables>

use std::{collections::HashMap, sync::LazyLock};

use serde::{Deserialize, Serialize};

/// Icon category of a weather code. Rendering is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconCategory {
    Clear,
    Cloud,
    Fog,
    /// Drizzle, rain and rain showers share this category.
    Rain,
    Snow,
    Thunderstorm,
    /// A code outside every known band.
    GenericCloud,
    /// No code at all.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub category: IconCategory,
    pub description: &'static str,
}

const UNKNOWN: &str = "Unknown";

static DESCRIPTIONS: LazyLock<HashMap<i32, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (0, "Clear sky"),
        (1, "Mainly clear"),
        (2, "Partly cloudy"),
        (3, "Overcast"),
        (45, "Fog"),
        (48, "Depositing rime fog"),
        (51, "Light drizzle"),
        (53, "Moderate drizzle"),
        (55, "Dense drizzle"),
        (56, "Light freezing drizzle"),
        (57, "Dense freezing drizzle"),
        (61, "Slight rain"),
        (63, "Moderate rain"),
        (65, "Heavy rain"),
        (66, "Light freezing rain"),
        (67, "Heavy freezing rain"),
        (71, "Slight snow fall"),
        (73, "Moderate snow fall"),
        (75, "Heavy snow fall"),
        (77, "Snow grains"),
        (80, "Slight rain showers"),
        (81, "Moderate rain showers"),
        (82, "Violent rain showers"),
        (85, "Slight snow showers"),
        (86, "Heavy snow showers"),
        (95, "Thunderstorm"),
        (96, "Thunderstorm with slight hail"),
        (99, "Thunderstorm with heavy hail"),
    ])
});

impl IconCategory {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1..=3 => Self::Cloud,
            45 | 48 => Self::Fog,
            51..=57 | 61..=67 | 80..=82 => Self::Rain,
            71..=77 | 85..=86 => Self::Snow,
            95..=99 => Self::Thunderstorm,
            _ => Self::GenericCloud,
        }
    }
}

/// Description for an exact code, `"Unknown"` when the table has none.
pub fn describe(code: i32) -> &'static str {
    DESCRIPTIONS.get(&code).copied().unwrap_or(UNKNOWN)
}

/// Total: every input, including a missing code, yields a condition.
pub fn classify(code: Option<i32>) -> Condition {
    match code {
        None => Condition { category: IconCategory::Unknown, description: UNKNOWN },
        Some(code) => Condition { category: IconCategory::from_code(code), description: describe(code) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banded_codes() -> Vec<i32> {
        let mut codes = vec![0, 1, 2, 3, 45, 48];
        codes.extend(51..=57);
        codes.extend(61..=67);
        codes.extend(71..=77);
        codes.extend(80..=82);
        codes.extend(85..=86);
        codes.extend(95..=99);
        codes
    }

    #[test]
    fn missing_code_is_unknown() {
        let c = classify(None);
        assert_eq!(c.category, IconCategory::Unknown);
        assert_eq!(c.description, "Unknown");
    }

    #[test]
    fn every_banded_code_has_a_specific_category() {
        for code in banded_codes() {
            let c = classify(Some(code));
            assert_ne!(c.category, IconCategory::Unknown, "code {code}");
            assert_ne!(c.category, IconCategory::GenericCloud, "code {code}");
        }
    }

    #[test]
    fn codes_outside_bands_are_generic_cloud() {
        let banded = banded_codes();
        for code in (-20..=150).filter(|c| !banded.contains(c)) {
            let c = classify(Some(code));
            assert_eq!(c.category, IconCategory::GenericCloud, "code {code}");
            assert_eq!(c.description, "Unknown", "code {code}");
        }
        assert_eq!(classify(Some(i32::MAX)).category, IconCategory::GenericCloud);
        assert_eq!(classify(Some(i32::MIN)).category, IconCategory::GenericCloud);
    }

    #[test]
    fn exact_values_map_to_distinct_categories() {
        let clear = IconCategory::from_code(0);
        let cloud = IconCategory::from_code(2);
        let fog = IconCategory::from_code(48);
        let storm = IconCategory::from_code(96);
        assert_eq!(clear, IconCategory::Clear);
        assert_eq!(cloud, IconCategory::Cloud);
        assert_eq!(fog, IconCategory::Fog);
        assert_eq!(storm, IconCategory::Thunderstorm);
        assert_eq!(IconCategory::from_code(1), IconCategory::from_code(3));
        assert_eq!(IconCategory::from_code(45), fog);
    }

    #[test]
    fn drizzle_rain_and_showers_share_the_rain_icon() {
        let drizzle = classify(Some(53));
        let rain = classify(Some(63));
        let showers = classify(Some(81));
        assert_eq!(drizzle.category, IconCategory::Rain);
        assert_eq!(rain.category, IconCategory::Rain);
        assert_eq!(showers.category, IconCategory::Rain);
        assert_eq!(drizzle.description, "Moderate drizzle");
        assert_eq!(rain.description, "Moderate rain");
        assert_eq!(showers.description, "Moderate rain showers");
    }

    #[test]
    fn snow_bands() {
        assert_eq!(classify(Some(77)), Condition { category: IconCategory::Snow, description: "Snow grains" });
        assert_eq!(classify(Some(86)).category, IconCategory::Snow);
    }

    #[test]
    fn in_band_codes_without_description_are_unknown_text() {
        // 52 sits in the drizzle band but has no table entry.
        let c = classify(Some(52));
        assert_eq!(c.category, IconCategory::Rain);
        assert_eq!(c.description, "Unknown");

        let c = classify(Some(97));
        assert_eq!(c.category, IconCategory::Thunderstorm);
        assert_eq!(c.description, "Unknown");
    }

    #[test]
    fn described_codes_are_all_banded() {
        let banded = banded_codes();
        for code in DESCRIPTIONS.keys() {
            assert!(banded.contains(code), "code {code}");
        }
        assert_eq!(DESCRIPTIONS.len(), 28);
    }
}
