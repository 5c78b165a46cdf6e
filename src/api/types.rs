//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::sim::kpi::ChargeReport;
use crate::sim::types::{ChargeParams, StepResult};

/// Combined state response: parameters, report, and latest step record.
#[derive(Debug, Serialize)]
pub struct StateResponse<'a> {
    pub params: &'a ChargeParams,
    pub report: &'a ChargeReport,
    /// Last visited interval; `null` if the run visited none.
    pub latest_step: Option<&'a StepResult>,
}

/// Optional range query parameters for the steps endpoint.
#[derive(Debug, Deserialize)]
pub struct StepsQuery {
    /// First interval (inclusive).
    pub from: Option<usize>,
    /// Last interval (inclusive).
    pub to: Option<usize>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::engine::Termination;
    use crate::sim::kpi::ExecutedCost;
    use crate::sim::types::Decision;

    #[test]
    fn state_response_serializes_decision_and_cost() {
        let params = ChargeParams {
            soc_initial: 0.5,
            capacity_kwh: 10.0,
            power_kw: 10.0,
            efficiency: 1.0,
            interval_hours: 0.25,
            horizon: 1,
        };
        let step = StepResult {
            interval: 0,
            time_hr: 0.0,
            forecast_price: 2.0,
            realized_price: 2.0,
            planned: false,
            decision: Decision::ChargeDip,
            executed: true,
            mean: 2.0,
            std_dev: 0.0,
            gamma: Some(4.5),
            threshold: Some(0.0),
            soc_added: 0.25,
            soc: 0.75,
        };
        let report = ChargeReport {
            executed_cost: ExecutedCost::NoCharging,
            planned_cost: ExecutedCost::Average(2.0),
            final_soc: 0.75,
            soc_error_pct: 25.0,
            charged_intervals: 1,
            planned_intervals: 0,
            energy_added_kwh: 2.5,
            spike_skips: 0,
            dip_charges: 1,
            visited_intervals: 1,
            termination: Termination::Completed,
        };
        let response = StateResponse {
            params: &params,
            report: &report,
            latest_step: Some(&step),
        };

        let json = serde_json::to_value(&response).expect("serializable");
        assert_eq!(json["latest_step"]["decision"], "charge_dip");
        assert_eq!(json["report"]["executed_cost"], "no_charging");
        assert_eq!(json["report"]["planned_cost"]["average"], 2.0);
        assert_eq!(json["report"]["termination"]["kind"], "completed");
        assert_eq!(json["params"]["horizon"], 1);
    }
}
