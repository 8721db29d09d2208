//! The query pipeline: validate, resolve, fetch, classify.

use std::sync::Arc;

use anyhow::Context;

use crate::{
    classify::{Condition, classify},
    config::Config,
    directory::{Directory, DirectoryLoader, DirectoryStatus, registry::RegistrySource},
    error::LookupError,
    model::{CurrentConditions, CurrentUnits, MatchKind, PlaceRecord, ResolvedQuery, WeatherRequest},
    provider::{WeatherProvider, provider_from_config},
    resolver,
};

/// Everything the presentation layer needs for one answered query.
#[derive(Debug, Clone)]
pub struct Observation {
    pub place: PlaceRecord,
    pub match_kind: MatchKind,
    pub provider: String,
    pub current: CurrentConditions,
    pub units: CurrentUnits,
    pub condition: Condition,
}

#[derive(Debug)]
pub struct WeatherService {
    loader: DirectoryLoader,
    provider: Box<dyn WeatherProvider>,
    suggestion_limit: usize,
}

impl WeatherService {
    pub fn new(
        loader: DirectoryLoader,
        provider: Box<dyn WeatherProvider>,
        suggestion_limit: usize,
    ) -> Self {
        Self { loader, provider, suggestion_limit }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let source = RegistrySource::new(config.directory_url(), config.country(), config.timeout())
            .context("Failed to build HTTP client for the place registry")?;

        Ok(Self::new(
            DirectoryLoader::new(Box::new(source)),
            provider_from_config(config)?,
            config.suggestion_limit(),
        ))
    }

    pub fn directory_status(&self) -> DirectoryStatus {
        self.loader.status()
    }

    pub async fn directory(&self) -> Arc<Directory> {
        self.loader.get_or_load().await
    }

    /// Replace the cached directory with a fresh load.
    pub async fn reload_directory(&self) -> Arc<Directory> {
        self.loader.load().await
    }

    /// Resolve user input to one place without touching the weather source.
    pub async fn resolve(&self, query: &str) -> Result<ResolvedQuery, LookupError> {
        if query.trim().is_empty() {
            return Err(LookupError::EmptyQuery);
        }

        let directory = self.directory().await;

        resolver::resolve_exact(query, &directory)
            .ok_or_else(|| LookupError::PlaceNotFound(query.trim().to_string()))
    }

    pub async fn suggest(&self, query: &str) -> Vec<String> {
        let directory = self.directory().await;
        resolver::suggest(query, &directory, self.suggestion_limit)
    }

    /// Current conditions for the place `query` names.
    pub async fn lookup(&self, query: &str) -> Result<Observation, LookupError> {
        let resolved = self.resolve(query).await?;

        tracing::debug!(
            place = %resolved.record.original,
            match_kind = ?resolved.match_kind,
            "Resolved place"
        );

        let request = WeatherRequest { coordinates: resolved.record.coordinates };
        let response = self
            .provider
            .get_weather(&request)
            .await
            .map_err(|err| LookupError::WeatherFetchFailed(format!("{err:#}")))?;

        let condition = classify(response.current.weather_code);

        Ok(Observation {
            place: resolved.record,
            match_kind: resolved.match_kind,
            provider: response.provider,
            current: response.current,
            units: response.units,
            condition,
        })
    }
}
