use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One weather lookup request: either a position or a free-text city name.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    Coordinates { latitude: f64, longitude: f64 },
    City(String),
}

impl WeatherQuery {
    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        WeatherQuery::Coordinates { latitude, longitude }
    }

    pub fn city(name: impl Into<String>) -> Self {
        WeatherQuery::City(name.into())
    }
}

/// Normalized result of one successful lookup.
///
/// Temperature is always carried in Kelvin; display conversion is a pure
/// presentation-time function (see [`crate::units`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReading {
    pub city_name: String,
    pub temperature_kelvin: f64,
    pub condition_code: i64,
    pub fetched_at: DateTime<Utc>,
}

/// One position event from a location source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Radius of the position estimate in meters. Non-positive means the
    /// source could not produce a usable estimate.
    pub accuracy_meters: f64,
}

impl LocationFix {
    pub fn is_valid(&self) -> bool {
        self.accuracy_meters > 0.0
    }
}
