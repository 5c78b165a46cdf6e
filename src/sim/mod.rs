//! Charging decision core: day-ahead planning and real-time execution.
//!
//! Everything in this module is a pure, single-threaded computation over the
//! supplied price series. No randomness, I/O or global state.

/// Interval clock with early halt.
pub mod clock;
pub mod controller;
pub mod engine;
pub mod error;
pub mod kpi;
/// Day-ahead interval selection.
pub mod schedule;
/// Running price statistics.
pub mod stats;
pub mod types;

use controller::Controller;
use engine::{Engine, RunOutcome};
use error::ChargeError;
use kpi::ChargeReport;
use types::{ChargeParams, PriceSeries, StopRule};

/// Plans, executes and summarizes one charging run.
///
/// # Errors
///
/// Returns a [`ChargeError`] when the parameters or price series are invalid.
///
/// # Examples
///
/// ```
/// use ev_charge_sim::sim::controller::ThresholdController;
/// use ev_charge_sim::sim::kpi::ExecutedCost;
/// use ev_charge_sim::sim::simulate;
/// use ev_charge_sim::sim::types::{ChargeParams, PriceSeries, StopRule};
///
/// let params = ChargeParams {
///     soc_initial: 0.5,
///     capacity_kwh: 10.0,
///     power_kw: 10.0,
///     efficiency: 1.0,
///     interval_hours: 0.25,
///     horizon: 4,
/// };
/// let prices = PriceSeries::new(vec![3.0, 1.0, 4.0, 2.0], vec![3.0, 1.0, 4.0, 2.0]);
/// let (outcome, report) =
///     simulate(params, prices, ThresholdController::default(), StopRule::Accumulated)?;
///
/// assert_eq!(outcome.schedule, vec![false, true, false, true]);
/// assert_eq!(report.final_soc, 1.0);
/// assert_eq!(report.executed_cost, ExecutedCost::Average(1.5));
/// # Ok::<(), ev_charge_sim::sim::error::ChargeError>(())
/// ```
pub fn simulate<C: Controller>(
    params: ChargeParams,
    prices: PriceSeries,
    controller: C,
    stop_rule: StopRule,
) -> Result<(RunOutcome, ChargeReport), ChargeError> {
    let mut engine = Engine::new(params, prices, controller)?.with_stop_rule(stop_rule);
    let outcome = engine.run();
    let report = ChargeReport::from_outcome(&outcome, engine.params());
    Ok((outcome, report))
}
