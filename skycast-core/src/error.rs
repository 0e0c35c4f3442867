//! Failure taxonomy for weather lookups.
//!
//! Every variant is recoverable at the UI boundary: it maps to a short
//! user-visible string and the caller simply waits for the next trigger.

use reqwest::StatusCode;
use thiserror::Error;

/// What can go wrong during one lookup.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("network error: {0}")]
    Network(#[from] NetworkCause),

    #[error("malformed weather response: {0}")]
    Parse(String),

    #[error("weather response is missing the temperature field")]
    DataUnavailable,
}

/// Transport-level cause behind [`WeatherError::Network`].
#[derive(Debug, Error)]
pub enum NetworkCause {
    /// Connection failure, timeout, or any other client-side transport error.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Network(NetworkCause::Transport(err))
    }
}

impl WeatherError {
    /// Short text shown in place of the city name when a lookup fails.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::Network(_) => "Connection Issues",
            WeatherError::Parse(_) | WeatherError::DataUnavailable => "Weather Unavailable",
        }
    }
}

/// Failure modes of the location collaborator.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location service unavailable")]
    ServiceUnavailable,

    #[error("location request timed out")]
    Timeout,

    #[error("location error: {0}")]
    Other(String),
}

impl LocationError {
    /// Short text shown in place of the city name when no fix is available.
    pub fn user_message(&self) -> &'static str {
        "Location Unavailable"
    }
}
