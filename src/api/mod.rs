//! REST API for a finished charging run.
//!
//! Provides two GET endpoints:
//! - `/state`: run parameters, charging report, and latest step
//! - `/steps`: per-interval step records with optional range filtering

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::sim::kpi::ChargeReport;
use crate::sim::types::{ChargeParams, StepResult};

pub use types::{ErrorResponse, StateResponse, StepsQuery};

/// Immutable application state shared across all request handlers.
///
/// Built once after the run completes and wrapped in `Arc`; read-only, so
/// handlers take no locks.
pub struct AppState {
    /// Parameters the run was made with.
    pub params: ChargeParams,
    /// Aggregate charging report.
    pub report: ChargeReport,
    /// One record per visited interval.
    pub steps: Vec<StepResult>,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/state", get(handlers::get_state))
        .route("/steps", get(handlers::get_steps))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
