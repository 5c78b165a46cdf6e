//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use ev_charge_sim::api::{AppState, router};
use ev_charge_sim::sim::controller::ThresholdController;
use ev_charge_sim::sim::simulate;
use ev_charge_sim::sim::types::StopRule;

/// Run the reference scenario and return the API state.
fn build_api_state() -> Arc<AppState> {
    let params = common::default_params();
    let (outcome, report) = simulate(
        params.clone(),
        common::seeded_prices(42, 132),
        ThresholdController::default(),
        StopRule::Accumulated,
    )
    .expect("reference inputs are valid");

    Arc::new(AppState {
        params,
        report,
        steps: outcome.steps,
    })
}

async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
    let app = router(build_api_state());
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn state_reports_params_and_latest_step() {
    let (status, json) = get("/state").await;
    let visited = build_api_state().steps.len();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["params"]["horizon"], 132);
    assert_eq!(json["params"]["capacity_kwh"], 80.0);
    assert_eq!(json["report"]["planned_intervals"], 57);
    assert_eq!(json["latest_step"]["interval"], visited - 1);
}

#[tokio::test]
async fn steps_serialize_decisions_in_snake_case() {
    let (status, json) = get("/steps").await;

    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().cloned().unwrap_or_default();
    assert!(!rows.is_empty());
    for row in &rows {
        let decision = row["decision"].as_str().unwrap_or_default();
        assert!(
            ["follow_plan", "skip_spike", "charge_dip"].contains(&decision),
            "unexpected decision {decision}"
        );
    }
}

#[tokio::test]
async fn steps_range_is_inclusive() {
    let (status, json) = get("/steps?from=0&to=0").await;

    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().cloned().unwrap_or_default();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["interval"], 0);
    assert_eq!(rows[0]["time_hr"], 0.0);
}

#[tokio::test]
async fn steps_past_the_run_are_empty() {
    let (status, json) = get("/steps?from=500").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn inverted_range_is_rejected() {
    let (status, json) = get("/steps?from=9&to=3").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().is_some_and(|e| e.contains("from")));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = router(build_api_state());
    let req = Request::builder().uri("/telemetry").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
