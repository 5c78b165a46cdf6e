//! Charging engine that walks the horizon, applying the controller to the day-ahead plan.

use serde::Serialize;
use tracing::{debug, info};

use super::clock::Clock;
use super::controller::{Controller, StepInput};
use super::error::ChargeError;
use super::schedule::DayAheadSchedule;
use super::stats::RunningStats;
use super::types::{ChargeParams, PriceSeries, StepResult, StopRule};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Termination {
    /// Every interval of the horizon was processed.
    Completed,
    /// The stop rule fired after `interval`; later intervals were never visited.
    TargetReached { interval: usize },
}

/// Lifecycle of an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Plan built, no interval processed yet.
    Init,
    /// At least one interval processed, more remain.
    Running,
    /// No further interval will be processed.
    Done(Termination),
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Day-ahead flags, one per interval.
    pub schedule: Vec<bool>,
    /// Executed flags, one per interval; unvisited intervals are `false`.
    pub execution_flags: Vec<bool>,
    /// One record per visited interval, in order.
    pub steps: Vec<StepResult>,
    pub termination: Termination,
}

/// Charging engine owning the inputs, the plan, and the running state of one run.
///
/// Generic over `C: Controller` for static dispatch. Statistics and SoC are
/// plain fields reset by construction, so each engine is one independent run.
#[derive(Debug)]
pub struct Engine<C: Controller> {
    params: ChargeParams,
    prices: PriceSeries,
    schedule: Vec<bool>,
    controller: C,
    stop_rule: StopRule,
    clock: Clock,
    stats: RunningStats,
    soc_added: f64,
    execution_flags: Vec<bool>,
    phase: RunPhase,
}

impl<C: Controller> Engine<C> {
    /// Validates the inputs and builds the day-ahead plan.
    ///
    /// # Arguments
    ///
    /// * `params` - Vehicle, charger and horizon parameters
    /// * `prices` - Forecast and realized prices, `params.horizon` each
    /// * `controller` - Real-time dispatch policy
    ///
    /// # Errors
    ///
    /// Returns a [`ChargeError`] for invalid parameters or price series.
    pub fn new(
        params: ChargeParams,
        prices: PriceSeries,
        controller: C,
    ) -> Result<Self, ChargeError> {
        params.validate()?;
        prices.validate(params.horizon)?;

        let schedule = DayAheadSchedule::plan(&params, &prices.forecast);
        debug!(
            horizon = params.horizon,
            planned = schedule.iter().filter(|f| **f).count(),
            "day-ahead schedule built"
        );

        Ok(Self {
            clock: Clock::new(params.horizon),
            execution_flags: vec![false; params.horizon],
            params,
            prices,
            schedule,
            controller,
            stop_rule: StopRule::default(),
            stats: RunningStats::new(),
            soc_added: 0.0,
            phase: RunPhase::Init,
        })
    }

    /// Replaces the stop rule. Only meaningful before the first step.
    #[must_use]
    pub fn with_stop_rule(mut self, stop_rule: StopRule) -> Self {
        self.stop_rule = stop_rule;
        self
    }

    /// Processes the next interval.
    ///
    /// Returns `None` once the horizon is exhausted or the stop rule fired.
    pub fn step(&mut self) -> Option<StepResult> {
        let k = self.clock.tick()?;
        self.phase = RunPhase::Running;

        let price = self.prices.realized[k];
        let planned = self.schedule[k];
        self.stats.update(price);

        let dispatch = self.controller.dispatch(&StepInput {
            interval: k,
            horizon: self.params.horizon,
            planned,
            price,
            stats: &self.stats,
        });
        let executed = dispatch.decision.apply(planned);
        if dispatch.decision.is_override() {
            debug!(
                interval = k,
                price,
                mean = self.stats.mean(),
                threshold = ?dispatch.threshold,
                decision = %dispatch.decision,
                "real-time override"
            );
        }

        if executed {
            self.execution_flags[k] = true;
            self.soc_added += self.params.charge_per_interval();
        }

        if self.stop_rule.is_met(self.params.soc_initial, self.soc_added) {
            self.clock.halt();
            self.phase = RunPhase::Done(Termination::TargetReached { interval: k });
            info!(
                interval = k,
                soc_added = self.soc_added,
                "charge target reached, stopping early"
            );
        } else if self.clock.is_finished() {
            self.phase = RunPhase::Done(Termination::Completed);
            info!(soc_added = self.soc_added, "horizon completed");
        }

        Some(StepResult {
            interval: k,
            time_hr: k as f64 * self.params.interval_hours,
            forecast_price: self.prices.forecast[k],
            realized_price: price,
            planned,
            decision: dispatch.decision,
            executed,
            mean: self.stats.mean(),
            std_dev: self.stats.std_dev(),
            gamma: dispatch.gamma,
            threshold: dispatch.threshold,
            soc_added: self.soc_added,
            soc: self.params.soc_initial + self.soc_added,
        })
    }

    /// Processes every remaining interval and returns the run record.
    pub fn run(&mut self) -> RunOutcome {
        let mut steps = Vec::with_capacity(self.params.horizon - self.clock.elapsed());
        while let Some(step) = self.step() {
            steps.push(step);
        }

        RunOutcome {
            schedule: self.schedule.clone(),
            execution_flags: self.execution_flags.clone(),
            steps,
            termination: self.termination(),
        }
    }

    fn termination(&self) -> Termination {
        match self.phase {
            RunPhase::Done(termination) => termination,
            RunPhase::Init | RunPhase::Running => Termination::Completed,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Day-ahead flags.
    pub fn schedule(&self) -> &[bool] {
        &self.schedule
    }

    /// SoC added so far in this run.
    pub fn soc_added(&self) -> f64 {
        self.soc_added
    }

    pub fn params(&self) -> &ChargeParams {
        &self.params
    }

    pub fn stats(&self) -> &RunningStats {
        &self.stats
    }
}
