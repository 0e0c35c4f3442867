//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather lookup client and its backend abstraction
//! - Shared domain models (queries, readings, units, condition bands)
//! - The event-driven lookup session tying location and city-entry events
//!   to display updates
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod condition;
pub mod config;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod source;
pub mod units;

pub use condition::{Condition, icon_for_condition};
pub use config::Config;
pub use error::{LocationError, NetworkCause, WeatherError};
pub use model::{LocationFix, WeatherQuery, WeatherReading};
pub use orchestrator::{DisplayUpdate, LookupEvent, LookupSession};
pub use source::{WeatherSource, openweather::{ClientConfig, OpenWeatherClient}, source_from_config};
pub use units::{TemperatureUnit, convert, display_temperature, to_kelvin};
