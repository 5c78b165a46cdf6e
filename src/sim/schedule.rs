use super::types::ChargeParams;

/// Day-ahead schedule generation utilities.
#[derive(Debug, Default, Clone, Copy)]
pub struct DayAheadSchedule;

impl DayAheadSchedule {
    /// Number of intervals needed to fill the battery from `soc_initial`.
    ///
    /// `ceil((1 - soc_initial) * capacity / (efficiency * power * interval))`,
    /// clamped to `[0, horizon]`. A vehicle at or above full charge, or a
    /// non-finite intermediate, needs zero intervals.
    pub fn required_intervals(params: &ChargeParams) -> usize {
        let needed_kwh = (1.0 - params.soc_initial) * params.capacity_kwh;
        let raw = needed_kwh / params.energy_per_interval_kwh();
        if !raw.is_finite() || raw <= 0.0 {
            return 0;
        }

        let intervals = raw.ceil();
        if intervals >= params.horizon as f64 {
            params.horizon
        } else {
            intervals as usize
        }
    }

    /// Flags the `count` intervals with the lowest forecast price.
    ///
    /// Intervals are ranked by price with a stable sort, so equal prices are
    /// taken in index order. The returned flags are in original time order
    /// and exactly `min(count, forecast.len())` of them are set.
    pub fn cheapest_intervals(forecast: &[f64], count: usize) -> Vec<bool> {
        let mut ranked: Vec<(usize, f64)> = forecast.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

        let mut flags = vec![false; forecast.len()];
        for &(index, _) in ranked.iter().take(count) {
            flags[index] = true;
        }
        flags
    }

    /// Builds the day-ahead flags for a run.
    pub fn plan(params: &ChargeParams, forecast: &[f64]) -> Vec<bool> {
        Self::cheapest_intervals(forecast, Self::required_intervals(params))
    }
}
