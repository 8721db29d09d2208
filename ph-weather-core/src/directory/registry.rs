use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{DirectoryError, truncate_body};

use super::{Country, DirectorySource, SourceEntry};

/// Place registry reachable over HTTP, e.g. an Open-Meteo geocoding search
/// or the PSGC cities/municipalities listing.
#[derive(Debug, Clone)]
pub struct RegistrySource {
    url: String,
    country: Country,
    http: Client,
}

/// Accepts a bare array or an object wrapping it in `results`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RegistryPayload {
    List(Vec<SourceEntry>),
    Wrapped {
        #[serde(default)]
        results: Option<Vec<SourceEntry>>,
    },
}

impl RegistrySource {
    pub fn new(
        url: impl Into<String>,
        country: Country,
        timeout: Duration,
    ) -> Result<Self, DirectoryError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self { url: url.into(), country, http })
    }
}

#[async_trait]
impl DirectorySource for RegistrySource {
    async fn fetch(&self) -> Result<Vec<SourceEntry>, DirectoryError> {
        tracing::debug!(url = %self.url, "Fetching place directory");

        let res = self.http.get(&self.url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(DirectoryError::Status { status, body: truncate_body(&body) });
        }

        let entries = match serde_json::from_str(&body)? {
            RegistryPayload::List(entries) => entries,
            RegistryPayload::Wrapped { results } => results.unwrap_or_default(),
        };

        let total = entries.len();
        let entries: Vec<SourceEntry> =
            entries.into_iter().filter(|e| e.belongs_to(&self.country)).collect();

        if entries.len() < total {
            tracing::debug!(dropped = total - entries.len(), "Dropped places outside {}", self.country.name);
        }

        Ok(entries)
    }
}
