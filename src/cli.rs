//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use ev_charge_sim::config::{ControllerKind, ScenarioConfig};

#[derive(Debug, Parser)]
#[command(name = "ev-charge-sim")]
#[command(version, about = "Day-ahead plus real-time threshold EV charging simulator")]
#[command(
    long_about = "Plans a single EV charging session against a forecast price series, then \
    executes it interval by interval against realized prices, overriding the plan on \
    price spikes and dips.\n\
    \nIf neither --scenario nor --preset is given, the baseline preset is used.\n\
    \nExamples:\n  \
    ev-charge-sim\n  \
    ev-charge-sim --preset volatile --seed 3\n  \
    ev-charge-sim --prices day.csv --controller plan --telemetry-out run.csv"
)]
pub struct Cli {
    /// Load scenario from a TOML file
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Built-in preset (baseline, nearly_full, volatile)
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Override the price generator seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Read forecast and realized prices from CSV instead of generating them
    #[arg(long, value_name = "PATH")]
    pub prices: Option<PathBuf>,

    /// Override the initial state of charge (0.0-1.0)
    #[arg(long)]
    pub initial_soc: Option<f64>,

    /// Override the battery capacity in kWh
    #[arg(long)]
    pub capacity_kwh: Option<f64>,

    /// Override the number of intervals
    #[arg(long)]
    pub intervals: Option<usize>,

    /// Real-time controller
    #[arg(long, value_enum)]
    pub controller: Option<ControllerKind>,

    /// Export per-interval telemetry to CSV
    #[arg(long, value_name = "PATH")]
    pub telemetry_out: Option<PathBuf>,

    /// Print only the final report
    #[arg(long, short)]
    pub quiet: bool,

    /// Start the REST API server after the run
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// API server port
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    pub port: u16,
}

impl Cli {
    /// Writes the command-line overrides into `scenario`.
    pub fn apply_overrides(&self, scenario: &mut ScenarioConfig) {
        if let Some(seed) = self.seed {
            scenario.prices.seed = seed;
        }
        if let Some(ref path) = self.prices {
            scenario.prices.file = Some(path.clone());
        }
        if let Some(soc) = self.initial_soc {
            scenario.vehicle.initial_soc = soc;
        }
        if let Some(capacity) = self.capacity_kwh {
            scenario.vehicle.capacity_kwh = capacity;
        }
        if let Some(intervals) = self.intervals {
            scenario.horizon.intervals = intervals;
        }
        if let Some(kind) = self.controller {
            scenario.controller.kind = kind;
        }
    }
}
