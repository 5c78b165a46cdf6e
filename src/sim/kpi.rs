//! Post-hoc charging metrics computed from a finished run.

use std::fmt;

use serde::Serialize;

use super::engine::{RunOutcome, Termination};
use super::types::{ChargeParams, Decision, StepResult};

/// Charge-weighted average price, or the explicit marker for a run that never charged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutedCost {
    /// Mean realized price over the charged intervals.
    Average(f64),
    /// No interval was charged; there is no average to report.
    NoCharging,
}

impl ExecutedCost {
    /// Averages `price` over the intervals where `charged` is set.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (bool, f64)>) -> Self {
        let (count, total) = pairs
            .into_iter()
            .filter(|(charged, _)| *charged)
            .fold((0_usize, 0.0_f64), |(n, sum), (_, price)| (n + 1, sum + price));
        if count == 0 {
            Self::NoCharging
        } else {
            Self::Average(total / count as f64)
        }
    }

    /// The average, if any interval was charged.
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Average(v) => Some(v),
            Self::NoCharging => None,
        }
    }
}

impl fmt::Display for ExecutedCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Average(v) => write!(f, "{v:.3}/kWh"),
            Self::NoCharging => f.write_str("undefined (no charging occurred)"),
        }
    }
}

/// Aggregate results of one charging run.
///
/// Computed post-hoc from a [`RunOutcome`] so the report always agrees with
/// the step records.
#[derive(Debug, Clone, Serialize)]
pub struct ChargeReport {
    /// Charge-weighted average realized price.
    pub executed_cost: ExecutedCost,
    /// Same average for the day-ahead flags over the visited intervals.
    pub planned_cost: ExecutedCost,
    /// Initial SoC plus the charge added during the run.
    pub final_soc: f64,
    /// `100 * (1 - final_soc)`; negative when overcharged.
    pub soc_error_pct: f64,
    /// Number of intervals actually charged.
    pub charged_intervals: usize,
    /// Number of intervals the day-ahead schedule asked for.
    pub planned_intervals: usize,
    /// Energy stored in the battery (kWh).
    pub energy_added_kwh: f64,
    /// Planned intervals skipped on a price spike.
    pub spike_skips: usize,
    /// Unplanned intervals charged on a price dip.
    pub dip_charges: usize,
    /// Intervals processed before the run ended.
    pub visited_intervals: usize,
    pub termination: Termination,
}

impl ChargeReport {
    /// Computes all metrics from a finished run.
    ///
    /// # Arguments
    ///
    /// * `outcome` - Record of the run
    /// * `params` - Parameters the run was made with
    pub fn from_outcome(outcome: &RunOutcome, params: &ChargeParams) -> Self {
        let steps = &outcome.steps;
        let charged_intervals = outcome.execution_flags.iter().filter(|f| **f).count();
        let final_soc = params.soc_initial + charged_intervals as f64 * params.charge_per_interval();

        Self {
            executed_cost: ExecutedCost::from_pairs(
                steps.iter().map(|s| (s.executed, s.realized_price)),
            ),
            planned_cost: ExecutedCost::from_pairs(
                steps.iter().map(|s| (s.planned, s.realized_price)),
            ),
            final_soc,
            soc_error_pct: 100.0 * (1.0 - final_soc),
            charged_intervals,
            planned_intervals: outcome.schedule.iter().filter(|f| **f).count(),
            energy_added_kwh: charged_intervals as f64 * params.energy_per_interval_kwh(),
            spike_skips: count_decisions(steps, Decision::SkipSpike),
            dip_charges: count_decisions(steps, Decision::ChargeDip),
            visited_intervals: steps.len(),
            termination: outcome.termination,
        }
    }

    /// Plan-only cost minus executed cost, when both are defined.
    pub fn savings_vs_plan(&self) -> Option<f64> {
        Some(self.planned_cost.value()? - self.executed_cost.value()?)
    }
}

fn count_decisions(steps: &[StepResult], decision: Decision) -> usize {
    steps.iter().filter(|s| s.decision == decision).count()
}

impl fmt::Display for ChargeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Charging Report ---")?;
        writeln!(f, "Executed cost:         {}", self.executed_cost)?;
        writeln!(f, "Plan-only cost:        {}", self.planned_cost)?;
        if let Some(savings) = self.savings_vs_plan() {
            writeln!(f, "Savings vs plan:       {savings:.3}/kWh")?;
        }
        writeln!(f, "Final SoC:             {:.4}", self.final_soc)?;
        writeln!(f, "SoC error:             {:.2}%", self.soc_error_pct)?;
        writeln!(
            f,
            "Charged intervals:     {} (planned {}, {:.2} kWh)",
            self.charged_intervals, self.planned_intervals, self.energy_added_kwh
        )?;
        writeln!(
            f,
            "Overrides:             {} spike skips, {} dip charges",
            self.spike_skips, self.dip_charges
        )?;
        match self.termination {
            Termination::Completed => write!(
                f,
                "Termination:           horizon completed ({} intervals)",
                self.visited_intervals
            ),
            Termination::TargetReached { interval } => write!(
                f,
                "Termination:           target reached at interval {interval}"
            ),
        }
    }
}
