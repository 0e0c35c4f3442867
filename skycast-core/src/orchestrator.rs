//! Event-driven lookup session.
//!
//! The location collaborator and the city-entry screen feed [`LookupEvent`]s
//! into a channel; the session turns them into lookups against a
//! [`WeatherSource`] and pushes [`DisplayUpdate`]s to the presentation layer.
//!
//! Lookups run concurrently with the event loop and their results are applied
//! in completion order. In-flight requests are never cancelled, so an older
//! request that finishes after a newer one overwrites it on the display.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::LocationError;
use crate::model::{LocationFix, WeatherQuery, WeatherReading};
use crate::source::WeatherSource;

/// Input events feeding a lookup session.
#[derive(Debug)]
pub enum LookupEvent {
    /// A position event from the location source.
    Fix(LocationFix),
    /// The location source failed outright.
    LocationFailed(LocationError),
    /// The user submitted a city name.
    CityEntered(String),
}

/// What the presentation layer should show next.
#[derive(Debug)]
pub enum DisplayUpdate {
    Reading(WeatherReading),
    /// Short error text shown in place of the city name.
    Message(&'static str),
}

pub struct LookupSession {
    source: Arc<dyn WeatherSource>,
    events: mpsc::Receiver<LookupEvent>,
    display: mpsc::Sender<DisplayUpdate>,
    /// Only the first valid fix per session triggers a lookup.
    location_consumed: bool,
}

impl LookupSession {
    pub fn new(
        source: Arc<dyn WeatherSource>,
        events: mpsc::Receiver<LookupEvent>,
        display: mpsc::Sender<DisplayUpdate>,
    ) -> Self {
        Self { source, events, display, location_consumed: false }
    }

    /// Drain events until the input channel closes.
    ///
    /// Each event issues at most one request. The loop itself never blocks on
    /// a lookup; it only awaits channel operations.
    pub async fn run(mut self) {
        while let Some(event) = self.events.recv().await {
            match event {
                LookupEvent::Fix(fix) => {
                    if self.location_consumed || !fix.is_valid() {
                        tracing::debug!(?fix, "ignoring location fix");
                        continue;
                    }
                    self.location_consumed = true;
                    self.spawn_lookup(WeatherQuery::coordinates(fix.latitude, fix.longitude));
                }
                LookupEvent::LocationFailed(err) => {
                    tracing::warn!(error = %err, "location source failed");
                    let _ = self.display.send(DisplayUpdate::Message(err.user_message())).await;
                }
                LookupEvent::CityEntered(city) => {
                    self.spawn_lookup(WeatherQuery::City(city));
                }
            }
        }
    }

    fn spawn_lookup(&self, query: WeatherQuery) {
        let source = Arc::clone(&self.source);
        let display = self.display.clone();

        tokio::spawn(async move {
            let update = match source.fetch_weather(&query).await {
                Ok(reading) => DisplayUpdate::Reading(reading),
                Err(err) => {
                    tracing::warn!(error = %err, ?query, "weather lookup failed");
                    DisplayUpdate::Message(err.user_message())
                }
            };
            // Receiver may already be gone; nothing left to display then.
            let _ = display.send(update).await;
        });
    }
}
