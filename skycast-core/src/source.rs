use crate::{
    Config,
    error::WeatherError,
    model::{WeatherQuery, WeatherReading},
    source::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// A backend capable of answering weather lookups.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_weather(&self, query: &WeatherQuery) -> Result<WeatherReading, WeatherError>;
}

/// Construct the lookup backend from config.
pub fn source_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherSource>> {
    let client = OpenWeatherClient::new(config.client_config()?)
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

    Ok(Box::new(client))
}
