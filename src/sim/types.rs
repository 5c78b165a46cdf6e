//! Core simulation types: run parameters, price inputs, and per-interval records.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ChargeError;

/// Vehicle and charger parameters for one charging run.
///
/// # Examples
///
/// ```
/// use ev_charge_sim::sim::types::ChargeParams;
///
/// let params = ChargeParams {
///     soc_initial: 0.5,
///     capacity_kwh: 80.0,
///     power_kw: 10.0,
///     efficiency: 0.85,
///     interval_hours: 5.0 / 60.0,
///     horizon: 132,
/// };
/// assert!(params.validate().is_ok());
/// assert!((params.charge_per_interval() - 0.008854).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargeParams {
    /// State of charge at the start of the horizon (fraction of capacity).
    pub soc_initial: f64,
    /// Usable battery capacity (kWh).
    pub capacity_kwh: f64,
    /// Charger power while charging (kW).
    pub power_kw: f64,
    /// Charging efficiency in `(0, 1]`.
    pub efficiency: f64,
    /// Duration of one interval (hours).
    pub interval_hours: f64,
    /// Number of intervals in the horizon.
    pub horizon: usize,
}

impl ChargeParams {
    /// Checks every parameter before a run.
    ///
    /// `soc_initial` above 1.0 is accepted: an already full vehicle simply
    /// plans zero intervals.
    ///
    /// # Errors
    ///
    /// Returns the first [`ChargeError::InvalidParameter`] found.
    pub fn validate(&self) -> Result<(), ChargeError> {
        if self.horizon == 0 {
            return Err(ChargeError::invalid("horizon", "must be > 0"));
        }
        if !(self.capacity_kwh.is_finite() && self.capacity_kwh > 0.0) {
            return Err(ChargeError::invalid("capacity_kwh", "must be > 0"));
        }
        if !(self.power_kw.is_finite() && self.power_kw > 0.0) {
            return Err(ChargeError::invalid("power_kw", "must be > 0"));
        }
        if !(self.efficiency > 0.0 && self.efficiency <= 1.0) {
            return Err(ChargeError::invalid("efficiency", "must be in (0, 1]"));
        }
        if !(self.interval_hours.is_finite() && self.interval_hours > 0.0) {
            return Err(ChargeError::invalid("interval_hours", "must be > 0"));
        }
        if !self.soc_initial.is_finite() {
            return Err(ChargeError::invalid("soc_initial", "must be finite"));
        }
        Ok(())
    }

    /// Energy stored per interval (kWh): `efficiency * power_kw * interval_hours`.
    pub fn energy_per_interval_kwh(&self) -> f64 {
        self.efficiency * self.power_kw * self.interval_hours
    }

    /// SoC fraction added by one charged interval.
    pub fn charge_per_interval(&self) -> f64 {
        self.energy_per_interval_kwh() / self.capacity_kwh
    }
}

/// Forecast and realized prices, one value per interval.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    /// Price known before execution starts.
    pub forecast: Vec<f64>,
    /// Price observed at each interval during execution.
    pub realized: Vec<f64>,
}

impl PriceSeries {
    pub fn new(forecast: Vec<f64>, realized: Vec<f64>) -> Self {
        Self { forecast, realized }
    }

    /// Checks that both series span `horizon` intervals with finite values.
    ///
    /// # Errors
    ///
    /// [`ChargeError::LengthMismatch`] or [`ChargeError::NonFinitePrice`].
    pub fn validate(&self, horizon: usize) -> Result<(), ChargeError> {
        for (series, values) in [("forecast", &self.forecast), ("realized", &self.realized)] {
            if values.len() != horizon {
                return Err(ChargeError::LengthMismatch {
                    series,
                    expected: horizon,
                    actual: values.len(),
                });
            }
            if let Some(interval) = values.iter().position(|p| !p.is_finite()) {
                return Err(ChargeError::NonFinitePrice { series, interval });
            }
        }
        Ok(())
    }

    /// Horizon covered by the forecast.
    pub fn len(&self) -> usize {
        self.forecast.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forecast.is_empty()
    }
}

/// Real-time decision for one interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Executed flag equals the day-ahead flag.
    FollowPlan,
    /// Planned interval skipped because the realized price spiked.
    SkipSpike,
    /// Unplanned interval charged because the realized price dipped.
    ChargeDip,
}

impl Decision {
    /// Resolves the executed flag from the planned one.
    pub fn apply(self, planned: bool) -> bool {
        match self {
            Self::FollowPlan => planned,
            Self::SkipSpike => false,
            Self::ChargeDip => true,
        }
    }

    pub fn is_override(self) -> bool {
        !matches!(self, Self::FollowPlan)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FollowPlan => "follow_plan",
            Self::SkipSpike => "skip_spike",
            Self::ChargeDip => "charge_dip",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When the controller stops walking the horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopRule {
    /// Stop once the energy added during the run reaches a full battery.
    #[default]
    Accumulated,
    /// Stop once initial SoC plus added energy reaches a full battery.
    Absolute,
}

impl StopRule {
    /// Returns `true` when charging should stop after the current interval.
    pub fn is_met(self, soc_initial: f64, soc_added: f64) -> bool {
        match self {
            Self::Accumulated => soc_added >= 1.0,
            Self::Absolute => soc_initial + soc_added >= 1.0,
        }
    }
}

/// Complete record of one visited interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    /// Interval index.
    pub interval: usize,
    /// Start of the interval in hours from the beginning of the horizon.
    pub time_hr: f64,
    pub forecast_price: f64,
    pub realized_price: f64,
    /// Day-ahead flag.
    pub planned: bool,
    pub decision: Decision,
    /// Executed flag after the real-time decision.
    pub executed: bool,
    /// Running mean of realized price including this interval.
    pub mean: f64,
    /// Running standard deviation including this interval.
    pub std_dev: f64,
    /// Band multiplier, `None` when the controller uses no band.
    pub gamma: Option<f64>,
    /// `gamma * std_dev`, `None` when the controller uses no band.
    pub threshold: Option<f64>,
    /// SoC added since the run started, after this interval.
    pub soc_added: f64,
    /// Initial SoC plus `soc_added`.
    pub soc: f64,
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |b: bool| if b { 1 } else { 0 };
        write!(
            f,
            "k={:>3} ({:>5.2}h) | forecast={:>6.3}  realized={:>6.3} | \
             mean={:>6.3}  std={:>5.3}  thr=",
            self.interval,
            self.time_hr,
            self.forecast_price,
            self.realized_price,
            self.mean,
            self.std_dev,
        )?;
        match self.threshold {
            Some(thr) => write!(f, "{thr:>6.3}")?,
            None => write!(f, "{:>6}", "-")?,
        }
        write!(
            f,
            " | plan={} exec={} ({}) | SoC={:.1}%",
            flag(self.planned),
            flag(self.executed),
            self.decision,
            self.soc * 100.0,
        )
    }
}
