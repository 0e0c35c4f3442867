//! Display-time temperature conversion.
//!
//! Readings carry Kelvin; nothing here mutates a reading. Toggling the
//! display unit back and forth always re-derives from the stored Kelvin
//! value, so repeated toggles cannot drift.

use serde::{Deserialize, Serialize};

const KELVIN_OFFSET: f64 = 273.15;

/// Session-scoped display preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    #[default]
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    /// The other unit, for a display toggle.
    pub fn toggled(&self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TemperatureUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "celsius" | "c" => Ok(TemperatureUnit::Celsius),
            "fahrenheit" | "f" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown unit '{value}'. Supported units: celsius, fahrenheit."
            )),
        }
    }
}

/// Convert a Kelvin temperature to the given display unit.
pub fn convert(temperature_kelvin: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => temperature_kelvin - KELVIN_OFFSET,
        TemperatureUnit::Fahrenheit => (temperature_kelvin - KELVIN_OFFSET) * 1.8 + 32.0,
    }
}

/// Inverse of [`convert`]: take a value in the given unit back to Kelvin.
pub fn to_kelvin(value: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => value + KELVIN_OFFSET,
        TemperatureUnit::Fahrenheit => (value - 32.0) / 1.8 + KELVIN_OFFSET,
    }
}

/// Whole-degree display string, rounded toward zero.
pub fn display_temperature(temperature_kelvin: f64, unit: TemperatureUnit) -> String {
    format!("{}\u{b0}", convert(temperature_kelvin, unit).trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 0.01;

    #[test]
    fn unit_as_str_roundtrip() {
        for unit in [TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit] {
            let parsed = TemperatureUnit::try_from(unit.as_str()).expect("roundtrip should succeed");
            assert_eq!(unit, parsed);
        }
    }

    #[test]
    fn unit_parses_short_forms() {
        assert_eq!(TemperatureUnit::try_from("C").unwrap(), TemperatureUnit::Celsius);
        assert_eq!(TemperatureUnit::try_from("f").unwrap(), TemperatureUnit::Fahrenheit);
    }

    #[test]
    fn unknown_unit_error() {
        let err = TemperatureUnit::try_from("kelvin").unwrap_err();
        assert!(err.to_string().contains("Unknown unit"));
    }

    #[test]
    fn converts_to_celsius() {
        assert!((convert(300.0, TemperatureUnit::Celsius) - 26.85).abs() < TOLERANCE);
        assert!((convert(273.15, TemperatureUnit::Celsius) - 0.0).abs() < TOLERANCE);
    }

    #[test]
    fn converts_to_fahrenheit() {
        assert!((convert(300.0, TemperatureUnit::Fahrenheit) - 80.33).abs() < TOLERANCE);
        assert!((convert(273.15, TemperatureUnit::Fahrenheit) - 32.0).abs() < TOLERANCE);
    }

    #[test]
    fn conversion_roundtrips_through_kelvin() {
        for unit in [TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit] {
            let converted = convert(300.0, unit);
            let back = to_kelvin(converted, unit);
            assert!((back - 300.0).abs() < 1e-9, "{unit}: {back}");
        }
    }

    #[test]
    fn double_toggle_restores_display_value() {
        let base_kelvin = 295.372;
        let unit = TemperatureUnit::Celsius;

        let shown = display_temperature(base_kelvin, unit);
        let toggled_twice = unit.toggled().toggled();
        assert_eq!(shown, display_temperature(base_kelvin, toggled_twice));
    }

    #[test]
    fn display_truncates_toward_zero() {
        // 294.15 K = 21.0 C = 69.8 F
        assert_eq!(display_temperature(294.95, TemperatureUnit::Celsius), "21\u{b0}");
        assert_eq!(display_temperature(294.15, TemperatureUnit::Fahrenheit), "69\u{b0}");
        // -4.6 C truncates to -4, not -5
        assert_eq!(display_temperature(268.55, TemperatureUnit::Celsius), "-4\u{b0}");
    }
}
