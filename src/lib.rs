//! Single-vehicle EV charging simulator: a day-ahead price plan plus a
//! real-time threshold controller that overrides it on price spikes and dips.

#[cfg(feature = "api")]
pub mod api;
/// TOML scenario configuration and presets.
pub mod config;
pub mod forecast;
/// CSV price import and telemetry export.
pub mod io;
/// Planning, real-time control, and run metrics.
pub mod sim;
