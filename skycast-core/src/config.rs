use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::source::openweather::{ClientConfig, DEFAULT_ENDPOINT};
use crate::units::TemperatureUnit;

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeather API key.
    pub api_key: Option<String>,

    /// Override for the current-weather endpoint. Defaults to the public API.
    pub endpoint: Option<String>,

    /// Preferred display unit, e.g. "celsius".
    pub unit: Option<TemperatureUnit>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Display unit, falling back to the default when unset.
    pub fn display_unit(&self) -> TemperatureUnit {
        self.unit.unwrap_or_default()
    }

    /// Build client settings from this config.
    ///
    /// Errors with a configure hint when no API key is stored.
    pub fn client_config(&self) -> Result<ClientConfig> {
        // An empty key is as useless as a missing one.
        let api_key = self.api_key.as_deref().filter(|key| !key.is_empty()).ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `skycast configure` and enter your API key."
            )
        })?;

        let endpoint = self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);

        Ok(ClientConfig::new(api_key).with_endpoint(endpoint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_config_errors_when_not_configured() {
        let cfg = Config::default();
        let err = cfg.client_config().unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured"));
        assert!(msg.contains("Hint: run `skycast configure`"));
    }

    #[test]
    fn empty_api_key_counts_as_unconfigured() {
        let mut cfg = Config::default();
        cfg.set_api_key(String::new());

        let err = cfg.client_config().unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn set_api_key_enables_client_config() {
        let mut cfg = Config::default();
        assert!(!cfg.is_configured());

        cfg.set_api_key("OPEN_KEY".into());

        assert!(cfg.is_configured());
        let client_cfg = cfg.client_config().expect("key is set");
        assert_eq!(client_cfg.api_key, "OPEN_KEY");
        assert_eq!(client_cfg.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn endpoint_override_is_honored() {
        let mut cfg = Config::default();
        cfg.set_api_key("OPEN_KEY".into());
        cfg.endpoint = Some("http://localhost:8080/weather".to_string());

        let client_cfg = cfg.client_config().expect("key is set");
        assert_eq!(client_cfg.endpoint, "http://localhost:8080/weather");
    }

    #[test]
    fn display_unit_defaults_when_unset() {
        let cfg = Config::default();
        assert_eq!(cfg.display_unit(), TemperatureUnit::Fahrenheit);

        let cfg = Config { unit: Some(TemperatureUnit::Celsius), ..Config::default() };
        assert_eq!(cfg.display_unit(), TemperatureUnit::Celsius);
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let mut cfg = Config::default();
        cfg.set_api_key("OPEN_KEY".into());
        cfg.unit = Some(TemperatureUnit::Celsius);

        let serialized = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&serialized).expect("parse");

        assert_eq!(parsed.api_key.as_deref(), Some("OPEN_KEY"));
        assert_eq!(parsed.unit, Some(TemperatureUnit::Celsius));
        assert_eq!(parsed.endpoint, None);
    }
}
