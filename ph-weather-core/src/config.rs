use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{directory::Country, provider::open_meteo, resolver::DEFAULT_SUGGESTION_LIMIT};

/// Open-Meteo geocoding search for Philippine cities. Results carry
/// coordinates, unlike the PSGC listing.
pub const DEFAULT_DIRECTORY_URL: &str =
    "https://geocoding-api.open-meteo.com/v1/search?name=city&count=100&language=en&format=json&countryCode=PH";
pub const DEFAULT_COUNTRY_CODE: &str = "PH";
pub const DEFAULT_COUNTRY_NAME: &str = "Philippines";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration stored on disk. Every field is optional.
///
/// Example TOML:
/// ```toml
/// directory_url = "https://psgc.gitlab.io/api/cities-municipalities/"
/// country_code = "PH"
/// suggestion_limit = 5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Place registry endpoint.
    pub directory_url: Option<String>,

    /// Current-conditions endpoint.
    pub weather_url: Option<String>,

    /// Registry entries tagged with another country are dropped.
    pub country_code: Option<String>,

    /// Matched against the `country` tag of registry entries.
    pub country_name: Option<String>,

    pub suggestion_limit: Option<usize>,

    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn directory_url(&self) -> &str {
        self.directory_url.as_deref().unwrap_or(DEFAULT_DIRECTORY_URL)
    }

    pub fn weather_url(&self) -> &str {
        self.weather_url.as_deref().unwrap_or(open_meteo::DEFAULT_URL)
    }

    pub fn country_code(&self) -> &str {
        self.country_code.as_deref().unwrap_or(DEFAULT_COUNTRY_CODE)
    }

    pub fn country_name(&self) -> &str {
        self.country_name.as_deref().unwrap_or(DEFAULT_COUNTRY_NAME)
    }

    pub fn country(&self) -> Country {
        Country { code: self.country_code().to_string(), name: self.country_name().to_string() }
    }

    pub fn suggestion_limit(&self) -> usize {
        self.suggestion_limit.unwrap_or(DEFAULT_SUGGESTION_LIMIT)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Reject values that would make lookups impossible.
    pub fn validate(&self) -> Result<()> {
        for (field, url) in [("directory_url", self.directory_url()), ("weather_url", self.weather_url())] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                bail!("Invalid {field} '{url}': expected an http:// or https:// URL");
            }
        }

        if self.suggestion_limit == Some(0) {
            bail!("suggestion_limit must be at least 1");
        }

        if self.timeout_secs == Some(0) {
            bail!("timeout_secs must be at least 1");
        }

        let code = self.country_code();
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            bail!("Invalid country_code '{code}': expected a two-letter ISO code such as PH");
        }

        if self.country_name().trim().is_empty() {
            bail!("country_name must not be blank");
        }

        Ok(())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.validate().with_context(|| {
            format!(
                "Invalid config file: {}\nHint: run `ph-weather configure` to fix it.",
                path.display()
            )
        })?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "ph-weather", "ph-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
