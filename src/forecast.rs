//! Synthetic price series for driving the simulator.
//!
//! The charging core accepts any price sequence; this module produces a
//! reproducible one when no recorded prices are supplied.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::sim::types::PriceSeries;

/// Trend plus daily seasonality plus Gaussian noise.
///
/// ```text
/// forecast[k] = base + trend * k + amplitude * sin(2πk / period) + N(0, forecast_noise_std)
/// realized[k] = forecast[k] + N(0, realized_noise_std)
/// ```
///
/// All forecast noise is drawn before any realized noise, from one RNG seeded
/// with `seed`.
///
/// # Examples
///
/// ```
/// use ev_charge_sim::forecast::SyntheticPrices;
///
/// let prices = SyntheticPrices::default().generate(132);
/// assert_eq!(prices.forecast.len(), 132);
/// assert_eq!(prices.realized.len(), 132);
/// assert_eq!(prices, SyntheticPrices::default().generate(132));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticPrices {
    /// Master random seed.
    pub seed: u64,
    /// Price at interval 0 before seasonality and noise.
    pub base_price: f64,
    /// Linear drift added per interval.
    pub trend_per_interval: f64,
    /// Amplitude of the sinusoidal daily cycle.
    pub seasonal_amplitude: f64,
    /// Length of one seasonal cycle in intervals.
    pub seasonal_period: f64,
    /// Noise standard deviation of the forecast around the clean curve.
    pub forecast_noise_std: f64,
    /// Noise standard deviation of realized prices around the forecast.
    pub realized_noise_std: f64,
}

impl Default for SyntheticPrices {
    fn default() -> Self {
        Self {
            seed: 0,
            base_price: 5.0,
            trend_per_interval: 0.02,
            seasonal_amplitude: 2.0,
            seasonal_period: 48.0,
            forecast_noise_std: 0.5,
            realized_noise_std: 0.3,
        }
    }
}

impl SyntheticPrices {
    /// Noise-free price curve at interval `k`.
    pub fn clean_price(&self, k: usize) -> f64 {
        let k = k as f64;
        let phase = 2.0 * std::f64::consts::PI * k / self.seasonal_period;
        self.base_price + self.trend_per_interval * k + self.seasonal_amplitude * phase.sin()
    }

    /// Produces forecast and realized series of length `horizon`.
    pub fn generate(&self, horizon: usize) -> PriceSeries {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let forecast: Vec<f64> = (0..horizon)
            .map(|k| self.clean_price(k) + gaussian_noise(&mut rng, self.forecast_noise_std))
            .collect();
        let realized = forecast
            .iter()
            .map(|p| p + gaussian_noise(&mut rng, self.realized_noise_std))
            .collect();

        PriceSeries::new(forecast, realized)
    }
}

/// Gaussian noise via the Box-Muller transform.
///
/// # Arguments
///
/// * `rng` - Random number generator
/// * `std_dev` - Standard deviation of the noise; non-positive yields 0
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev
}
