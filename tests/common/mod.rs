//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use ev_charge_sim::forecast::SyntheticPrices;
use ev_charge_sim::sim::types::{ChargeParams, PriceSeries};

/// Reference vehicle: 50% of 80 kWh, 10 kW at 85%, 132 five-minute intervals.
pub fn default_params() -> ChargeParams {
    ChargeParams {
        soc_initial: 0.5,
        capacity_kwh: 80.0,
        power_kw: 10.0,
        efficiency: 0.85,
        interval_hours: 5.0 / 60.0,
        horizon: 132,
    }
}

/// Reference vehicle with a different horizon.
pub fn params_with_horizon(horizon: usize) -> ChargeParams {
    ChargeParams {
        horizon,
        ..default_params()
    }
}

/// Each charged interval adds exactly 0.25 SoC (2.5 kWh into 10 kWh).
pub fn quarter_params(soc_initial: f64, horizon: usize) -> ChargeParams {
    ChargeParams {
        soc_initial,
        capacity_kwh: 10.0,
        power_kw: 10.0,
        efficiency: 1.0,
        interval_hours: 0.25,
        horizon,
    }
}

/// Seeded synthetic prices for `horizon` intervals.
pub fn seeded_prices(seed: u64, horizon: usize) -> PriceSeries {
    SyntheticPrices {
        seed,
        ..SyntheticPrices::default()
    }
    .generate(horizon)
}

/// Same series for forecast and realized.
pub fn perfect_forecast(prices: &[f64]) -> PriceSeries {
    PriceSeries::new(prices.to_vec(), prices.to_vec())
}
