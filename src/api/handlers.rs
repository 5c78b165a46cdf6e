//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::AppState;
use super::types::{ErrorResponse, StateResponse, StepsQuery};
use crate::sim::types::StepResult;

/// Returns run parameters, charging report, and the latest step record.
///
/// `GET /state` → 200 + `StateResponse` JSON
pub async fn get_state(State(state): State<Arc<AppState>>) -> Response {
    Json(StateResponse {
        params: &state.params,
        report: &state.report,
        latest_step: state.steps.last(),
    })
    .into_response()
}

/// Returns step records, optionally filtered by interval range.
///
/// `GET /steps` → 200 + `Vec<StepResult>` JSON
/// `GET /steps?from=N&to=M` → filtered range (inclusive)
/// `GET /steps?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_steps(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StepsQuery>,
) -> Response {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        )
            .into_response();
    }

    let steps: Vec<&StepResult> = state
        .steps
        .iter()
        .filter(|s| (from..=to).contains(&s.interval))
        .collect();

    Json(steps).into_response()
}
