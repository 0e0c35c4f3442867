use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{NetworkCause, WeatherError},
    model::{WeatherQuery, WeatherReading},
};

use super::WeatherSource;

/// Public current-weather endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for one client instance.
///
/// The endpoint is injectable so tests and alternate deployments can point
/// elsewhere; nothing in the client hardcodes it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Weather lookup against the OpenWeather current-conditions API.
///
/// Issues exactly one outbound GET per call; no retries, no caching.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    config: ClientConfig,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(config: ClientConfig) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    async fn fetch_current(&self, query: &WeatherQuery) -> Result<WeatherReading, WeatherError> {
        let request = self.http.get(&self.config.endpoint);
        let request = match query {
            WeatherQuery::Coordinates { latitude, longitude } => request.query(&[
                ("lat", latitude.to_string().as_str()),
                ("lon", longitude.to_string().as_str()),
            ]),
            WeatherQuery::City(name) => request.query(&[("q", name.as_str())]),
        };

        let response = request.query(&[("appid", self.config.api_key.as_str())]).send().await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(%status, bytes = body.len(), "weather endpoint responded");

        if !status.is_success() {
            return Err(NetworkCause::Status { status, body: truncate_body(&body) }.into());
        }

        let parsed: OwCurrent =
            serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;

        reading_from_payload(parsed)
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn fetch_weather(&self, query: &WeatherQuery) -> Result<WeatherReading, WeatherError> {
        self.fetch_current(query).await
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    #[serde(default)]
    id: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrent {
    main: Option<OwMain>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    weather: Vec<OwCondition>,
}

/// Normalize a decoded payload into a reading.
///
/// `main.temp` is the one field that gates success; every other field
/// degrades to a default so a sparse payload still yields a reading.
fn reading_from_payload(payload: OwCurrent) -> Result<WeatherReading, WeatherError> {
    let temperature_kelvin = payload
        .main
        .and_then(|main| main.temp)
        .ok_or(WeatherError::DataUnavailable)?;

    let condition_code = payload.weather.first().map_or(0, |w| w.id);

    Ok(WeatherReading {
        city_name: payload.name,
        temperature_kelvin,
        condition_code,
        fetched_at: Utc::now(),
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
