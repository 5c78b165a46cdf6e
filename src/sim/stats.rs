//! Online mean and variance of realized price.

/// Running price statistics, updated once per interval in index order.
///
/// The variance recurrence is the simulator's own simplified form, not
/// Welford's algorithm:
///
/// ```text
/// mean_k = (mean_{k-1} * k + x_k) / (k + 1)
/// var_k  = ((var_{k-1} * (k - 1) if k > 1 else 0) + (x_k - mean_k)^2) / (k if k > 0 else 1)
/// ```
///
/// # Examples
///
/// ```
/// use ev_charge_sim::sim::stats::RunningStats;
///
/// let mut stats = RunningStats::new();
/// for price in [2.0, 4.0, 6.0] {
///     stats.update(price);
/// }
/// assert_eq!(stats.mean(), 4.0);
/// assert_eq!(stats.variance(), 2.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningStats {
    count: usize,
    mean: f64,
    variance: f64,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds the realized price of interval `count` into the statistics.
    pub fn update(&mut self, price: f64) {
        let k = self.count as f64;
        self.mean = (self.mean * k + price) / (k + 1.0);

        let carried = if self.count > 1 {
            self.variance * (k - 1.0)
        } else {
            0.0
        };
        let divisor = if self.count > 0 { k } else { 1.0 };
        let deviation = price - self.mean;
        self.variance = (carried + deviation * deviation) / divisor;

        self.count += 1;
    }

    /// Number of prices folded in so far.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}
