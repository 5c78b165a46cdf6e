//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;

use crate::forecast::SyntheticPrices;
use crate::sim::controller::DEFAULT_GAMMA_MAX;
use crate::sim::types::{ChargeParams, StopRule};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Vehicle battery state.
    #[serde(default)]
    pub vehicle: VehicleConfig,
    /// Charger rating.
    #[serde(default)]
    pub charger: ChargerConfig,
    /// Horizon length and resolution.
    #[serde(default)]
    pub horizon: HorizonConfig,
    /// Real-time controller selection and tuning.
    #[serde(default)]
    pub controller: ControllerConfig,
    /// Price source.
    #[serde(default)]
    pub prices: PricesConfig,
}

/// Vehicle battery state.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VehicleConfig {
    /// State of charge at plug-in (0.0–1.0).
    pub initial_soc: f64,
    /// Usable battery capacity (kWh).
    pub capacity_kwh: f64,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            initial_soc: 0.5,
            capacity_kwh: 80.0,
        }
    }
}

/// Charger rating.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChargerConfig {
    /// Charging power (kW).
    pub power_kw: f64,
    /// Charging efficiency (0.0–1.0].
    pub efficiency: f64,
}

impl Default for ChargerConfig {
    fn default() -> Self {
        Self {
            power_kw: 10.0,
            efficiency: 0.85,
        }
    }
}

/// Horizon length and resolution.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HorizonConfig {
    /// Number of intervals (must be > 0).
    pub intervals: usize,
    /// Interval duration in minutes (must be > 0).
    pub interval_minutes: f64,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            intervals: 132,
            interval_minutes: 5.0,
        }
    }
}

/// Real-time controller choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ControllerKind {
    /// Adaptive threshold override on top of the day-ahead plan.
    #[default]
    Threshold,
    /// Day-ahead plan only.
    Plan,
}

/// Real-time controller selection and tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    /// Controller type: `"threshold"` or `"plan"`.
    pub kind: ControllerKind,
    /// Initial band width in standard deviations (>= 0).
    pub gamma_max: f64,
    /// Early termination rule: `"accumulated"` or `"absolute"`.
    pub stop_rule: StopRule,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            kind: ControllerKind::Threshold,
            gamma_max: DEFAULT_GAMMA_MAX,
            stop_rule: StopRule::Accumulated,
        }
    }
}

/// Price source: a CSV file, or the synthetic generator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricesConfig {
    /// CSV with `forecast_price,realized_price` columns; overrides the generator.
    pub file: Option<PathBuf>,
    /// Generator seed.
    pub seed: u64,
    /// Generator base price.
    pub base_price: f64,
    /// Generator drift per interval.
    pub trend_per_interval: f64,
    /// Generator seasonal amplitude.
    pub seasonal_amplitude: f64,
    /// Generator seasonal period in intervals (must be > 0).
    pub seasonal_period: f64,
    /// Forecast noise standard deviation (>= 0).
    pub forecast_noise_std: f64,
    /// Realized-versus-forecast noise standard deviation (>= 0).
    pub realized_noise_std: f64,
}

impl Default for PricesConfig {
    fn default() -> Self {
        let model = SyntheticPrices::default();
        Self {
            file: None,
            seed: model.seed,
            base_price: model.base_price,
            trend_per_interval: model.trend_per_interval,
            seasonal_amplitude: model.seasonal_amplitude,
            seasonal_period: model.seasonal_period,
            forecast_noise_std: model.forecast_noise_std,
            realized_noise_std: model.realized_noise_std,
        }
    }
}

impl PricesConfig {
    /// Synthetic generator configured by this section.
    pub fn synthetic(&self) -> SyntheticPrices {
        SyntheticPrices {
            seed: self.seed,
            base_price: self.base_price,
            trend_per_interval: self.trend_per_interval,
            seasonal_amplitude: self.seasonal_amplitude,
            seasonal_period: self.seasonal_period,
            forecast_noise_std: self.forecast_noise_std,
            realized_noise_std: self.realized_noise_std,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"horizon.intervals"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: a half-full 80 kWh vehicle on a
    /// 10 kW charger over 132 five-minute intervals.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the nearly-full preset: little energy needed, early stop likely
    /// under the absolute stop rule.
    pub fn nearly_full() -> Self {
        Self {
            vehicle: VehicleConfig {
                initial_soc: 0.9,
                ..VehicleConfig::default()
            },
            controller: ControllerConfig {
                stop_rule: StopRule::Absolute,
                ..ControllerConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the volatile preset: small pack, noisy realized prices,
    /// narrower starting band.
    pub fn volatile() -> Self {
        Self {
            vehicle: VehicleConfig {
                initial_soc: 0.2,
                capacity_kwh: 40.0,
            },
            charger: ChargerConfig {
                power_kw: 7.4,
                efficiency: 0.9,
            },
            horizon: HorizonConfig {
                intervals: 96,
                interval_minutes: 15.0,
            },
            controller: ControllerConfig {
                gamma_max: 2.0,
                ..ControllerConfig::default()
            },
            prices: PricesConfig {
                seed: 7,
                seasonal_period: 96.0,
                seasonal_amplitude: 3.0,
                realized_noise_std: 1.5,
                ..PricesConfig::default()
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "nearly_full", "volatile"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "nearly_full" => Ok(Self::nearly_full()),
            "volatile" => Ok(Self::volatile()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// A relative `prices.file` is resolved against the scenario's directory.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        let mut cfg = Self::from_toml_str(&content)?;
        if let Some(dir) = path.parent() {
            cfg.prices.file = cfg
                .prices
                .file
                .take()
                .map(|file| if file.is_relative() { dir.join(file) } else { file });
        }
        Ok(cfg)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Core run parameters described by this scenario.
    pub fn charge_params(&self) -> ChargeParams {
        ChargeParams {
            soc_initial: self.vehicle.initial_soc,
            capacity_kwh: self.vehicle.capacity_kwh,
            power_kw: self.charger.power_kw,
            efficiency: self.charger.efficiency,
            interval_hours: self.horizon.interval_minutes / 60.0,
            horizon: self.horizon.intervals,
        }
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let v = &self.vehicle;
        if !(0.0..=1.0).contains(&v.initial_soc) {
            errors.push(ConfigError::new("vehicle.initial_soc", "must be in [0.0, 1.0]"));
        }
        if !(v.capacity_kwh > 0.0) {
            errors.push(ConfigError::new("vehicle.capacity_kwh", "must be > 0"));
        }

        let c = &self.charger;
        if !(c.power_kw > 0.0) {
            errors.push(ConfigError::new("charger.power_kw", "must be > 0"));
        }
        if !(c.efficiency > 0.0 && c.efficiency <= 1.0) {
            errors.push(ConfigError::new("charger.efficiency", "must be in (0.0, 1.0]"));
        }

        let h = &self.horizon;
        if h.intervals == 0 {
            errors.push(ConfigError::new("horizon.intervals", "must be > 0"));
        }
        if !(h.interval_minutes > 0.0) {
            errors.push(ConfigError::new("horizon.interval_minutes", "must be > 0"));
        }

        if !(self.controller.gamma_max >= 0.0) {
            errors.push(ConfigError::new("controller.gamma_max", "must be >= 0"));
        }

        let p = &self.prices;
        if !(p.seasonal_period > 0.0) {
            errors.push(ConfigError::new("prices.seasonal_period", "must be > 0"));
        }
        if !(p.forecast_noise_std >= 0.0) {
            errors.push(ConfigError::new("prices.forecast_noise_std", "must be >= 0"));
        }
        if !(p.realized_noise_std >= 0.0) {
            errors.push(ConfigError::new("prices.realized_noise_std", "must be >= 0"));
        }

        errors
    }
}
