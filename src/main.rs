//! EV charging simulator entry point: CLI wiring and config-driven run.

mod cli;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ev_charge_sim::config::{ControllerKind, ScenarioConfig};
use ev_charge_sim::io::export::export_csv;
use ev_charge_sim::io::import::read_prices_from_path;
use ev_charge_sim::sim::controller::{PlanFollower, ThresholdController};
use ev_charge_sim::sim::engine::RunOutcome;
use ev_charge_sim::sim::kpi::ChargeReport;
use ev_charge_sim::sim::simulate;
use ev_charge_sim::sim::types::{ChargeParams, PriceSeries};

use cli::Cli;

fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "ev_charge_sim=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// `--scenario` takes priority, then `--preset`, then the baseline default.
fn load_scenario(cli: &Cli) -> anyhow::Result<ScenarioConfig> {
    let scenario = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path)?
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name)?
    } else {
        ScenarioConfig::baseline()
    };
    Ok(scenario)
}

fn load_prices(scenario: &ScenarioConfig, horizon: usize) -> anyhow::Result<PriceSeries> {
    match scenario.prices.file {
        Some(ref path) => {
            let prices = read_prices_from_path(path)
                .with_context(|| format!("reading prices from \"{}\"", path.display()))?;
            info!(path = %path.display(), intervals = prices.len(), "loaded price series");
            Ok(prices)
        }
        None => Ok(scenario.prices.synthetic().generate(horizon)),
    }
}

/// Runs the simulation with the configured controller.
fn run_simulation(
    scenario: &ScenarioConfig,
    params: ChargeParams,
    prices: PriceSeries,
) -> anyhow::Result<(RunOutcome, ChargeReport)> {
    let c = &scenario.controller;
    let run = match c.kind {
        ControllerKind::Threshold => simulate(
            params,
            prices,
            ThresholdController::new(c.gamma_max),
            c.stop_rule,
        ),
        ControllerKind::Plan => simulate(params, prices, PlanFollower, c.stop_rule),
    };
    Ok(run?)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let mut scenario = load_scenario(&cli)?;
    cli.apply_overrides(&mut scenario);

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        bail!("scenario has {} invalid field(s)", errors.len());
    }

    let params = scenario.charge_params();
    let prices = load_prices(&scenario, params.horizon)?;
    let (outcome, report) = run_simulation(&scenario, params.clone(), prices)?;

    if !cli.quiet {
        for step in &outcome.steps {
            println!("{step}");
        }
        println!();
    }
    println!("{report}");

    if let Some(ref path) = cli.telemetry_out {
        export_csv(&outcome.steps, path)
            .with_context(|| format!("failed to write CSV to \"{}\"", path.display()))?;
        eprintln!("Telemetry written to {}", path.display());
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(ev_charge_sim::api::AppState {
            params,
            report,
            steps: outcome.steps,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
        rt.block_on(ev_charge_sim::api::serve(state, addr))?;
    }

    Ok(())
}
