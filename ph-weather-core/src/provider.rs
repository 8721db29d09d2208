use crate::{
    Config, WeatherRequest, WeatherResponse,
    provider::open_meteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, request: &WeatherRequest) -> anyhow::Result<WeatherResponse>;
}

/// Construct the weather provider described by the config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = OpenMeteoProvider::new(config.weather_url(), config.timeout())?;
    Ok(Box::new(provider))
}
