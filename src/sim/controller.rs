//! Real-time charging controllers.
//!
//! A controller sees one interval at a time: the day-ahead flag, the realized
//! price just revealed, and the running statistics that already include it.

use super::stats::RunningStats;
use super::types::Decision;

/// Starting width of the threshold band, in running standard deviations.
pub const DEFAULT_GAMMA_MAX: f64 = 4.5;

/// Inputs available to the controller at interval `interval`.
#[derive(Debug, Clone, Copy)]
pub struct StepInput<'a> {
    /// Current interval index.
    pub interval: usize,
    /// Horizon length.
    pub horizon: usize,
    /// Day-ahead flag for this interval.
    pub planned: bool,
    /// Realized price for this interval.
    pub price: f64,
    /// Statistics updated with `price`.
    pub stats: &'a RunningStats,
}

/// Controller decision for one interval, with the band it was taken against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepDispatch {
    pub decision: Decision,
    /// Band multiplier at this interval, if the controller uses one.
    pub gamma: Option<f64>,
    /// Deviation from the mean needed to override, if the controller uses one.
    pub threshold: Option<f64>,
}

/// Per-interval dispatch policy.
pub trait Controller {
    /// Decides whether to follow or override the day-ahead flag.
    fn dispatch(&self, input: &StepInput<'_>) -> StepDispatch;
}

/// Follows the day-ahead schedule unconditionally.
///
/// Serves as the reference run when reporting what the plan alone would cost.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlanFollower;

impl Controller for PlanFollower {
    fn dispatch(&self, _input: &StepInput<'_>) -> StepDispatch {
        StepDispatch {
            decision: Decision::FollowPlan,
            gamma: None,
            threshold: None,
        }
    }
}

/// Overrides the plan when the realized price leaves a shrinking band
/// around its running mean.
///
/// The band half-width is `gamma(k) * std`, with
/// `gamma(k) = gamma_max - (gamma_max / horizon) * k`, so the controller
/// grows more willing to deviate from the plan as the horizon runs out.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdController {
    /// Band multiplier at the first interval.
    pub gamma_max: f64,
}

impl Default for ThresholdController {
    fn default() -> Self {
        Self {
            gamma_max: DEFAULT_GAMMA_MAX,
        }
    }
}

impl ThresholdController {
    pub fn new(gamma_max: f64) -> Self {
        Self { gamma_max }
    }

    /// Band multiplier at interval `interval` of a `horizon`-long run.
    pub fn gamma(&self, interval: usize, horizon: usize) -> f64 {
        self.gamma_max - (self.gamma_max / horizon as f64) * interval as f64
    }
}

impl Controller for ThresholdController {
    fn dispatch(&self, input: &StepInput<'_>) -> StepDispatch {
        let gamma = self.gamma(input.interval, input.horizon);
        let threshold = gamma * input.stats.std_dev();
        let mean = input.stats.mean();

        let decision = if input.planned && input.price > mean + threshold {
            Decision::SkipSpike
        } else if !input.planned && input.price < mean - threshold {
            Decision::ChargeDip
        } else {
            Decision::FollowPlan
        };

        StepDispatch {
            decision,
            gamma: Some(gamma),
            threshold: Some(threshold),
        }
    }
}
