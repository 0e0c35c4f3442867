use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;

use skycast_core::{
    Config, DisplayUpdate, LocationFix, LookupEvent, LookupSession, TemperatureUnit, WeatherQuery,
    WeatherReading, WeatherSource, display_temperature, icon_for_condition, source_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather for a city or your coordinates")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weather API key.
    Configure,

    /// Show current weather once.
    Show {
        /// City name, e.g. "Paris". Omit when using --lat/--lon.
        city: Option<String>,

        /// Latitude in degrees; requires --lon.
        #[arg(long, requires = "lon", conflicts_with = "city")]
        lat: Option<f64>,

        /// Longitude in degrees; requires --lat.
        #[arg(long, requires = "lat", conflicts_with = "city")]
        lon: Option<f64>,

        /// Display unit: "celsius" or "fahrenheit".
        #[arg(long)]
        unit: Option<String>,
    },

    /// Repeated city lookups, optionally seeded with an initial position.
    Interactive {
        /// Latitude in degrees; requires --lon.
        #[arg(long, requires = "lon")]
        lat: Option<f64>,

        /// Longitude in degrees; requires --lat.
        #[arg(long, requires = "lat")]
        lon: Option<f64>,

        /// Display unit: "celsius" or "fahrenheit".
        #[arg(long)]
        unit: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, lat, lon, unit } => show(city, lat, lon, unit).await,
            Command::Interactive { lat, lon, unit } => interactive(lat, lon, unit).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(
    city: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    unit: Option<String>,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let unit = resolve_unit(unit.as_deref(), &config)?;

    let query = match (city, lat, lon) {
        (Some(city), None, None) => WeatherQuery::City(city),
        (None, Some(lat), Some(lon)) => WeatherQuery::coordinates(lat, lon),
        _ => anyhow::bail!("Provide a city name or --lat/--lon coordinates."),
    };

    let source = source_from_config(&config)?;
    match source.fetch_weather(&query).await {
        Ok(reading) => print_reading(&reading, unit),
        // Lookup failures are display states, not process failures.
        Err(err) => println!("{}", err.user_message()),
    }

    Ok(())
}

async fn interactive(
    lat: Option<f64>,
    lon: Option<f64>,
    unit: Option<String>,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let unit = resolve_unit(unit.as_deref(), &config)?;
    let source: Arc<dyn WeatherSource> = Arc::from(source_from_config(&config)?);

    let (event_tx, event_rx) = mpsc::channel(8);
    let (display_tx, mut display_rx) = mpsc::channel(8);

    let session = tokio::spawn(LookupSession::new(source, event_rx, display_tx).run());
    let printer = tokio::spawn(async move {
        while let Some(update) = display_rx.recv().await {
            match update {
                DisplayUpdate::Reading(reading) => print_reading(&reading, unit),
                DisplayUpdate::Message(text) => println!("{text}"),
            }
        }
    });

    if let (Some(latitude), Some(longitude)) = (lat, lon) {
        // User-supplied coordinates count as an exact fix.
        let fix = LocationFix { latitude, longitude, accuracy_meters: 1.0 };
        event_tx.send(LookupEvent::Fix(fix)).await?;
    }

    loop {
        let entry = tokio::task::spawn_blocking(|| {
            inquire::Text::new("City (empty to quit):").prompt_skippable()
        })
        .await?
        .context("Failed to read city name")?;

        match entry {
            Some(city) if !city.trim().is_empty() => {
                event_tx.send(LookupEvent::CityEntered(city)).await?;
            }
            _ => break,
        }
    }

    drop(event_tx);
    session.await?;
    printer.await?;

    Ok(())
}

fn resolve_unit(flag: Option<&str>, config: &Config) -> anyhow::Result<TemperatureUnit> {
    match flag {
        Some(s) => TemperatureUnit::try_from(s),
        None => Ok(config.display_unit()),
    }
}

fn print_reading(reading: &WeatherReading, unit: TemperatureUnit) {
    let city = if reading.city_name.is_empty() {
        "Unknown location"
    } else {
        reading.city_name.as_str()
    };

    println!(
        "{city}  {}  {}",
        display_temperature(reading.temperature_kelvin, unit),
        icon_for_condition(reading.condition_code)
    );
}
