//! CSV export of per-interval charging telemetry.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::StepResult;

/// Column header for telemetry export.
const HEADER: &str = "interval,time_hr,forecast_price,realized_price,planned,decision,\
                      executed,mean,std,gamma,threshold,soc_added,soc";

/// Exports step records to a CSV file at the given path.
///
/// Writes a header row followed by one data row per visited interval.
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(steps: &[StepResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(steps, buf)
}

/// Writes step records as CSV to any writer.
///
/// `gamma` and `threshold` are left empty for controllers without a band.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(steps: &[StepResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for s in steps {
        wtr.write_record(&[
            s.interval.to_string(),
            format!("{:.4}", s.time_hr),
            format!("{:.6}", s.forecast_price),
            format!("{:.6}", s.realized_price),
            s.planned.to_string(),
            s.decision.as_str().to_string(),
            s.executed.to_string(),
            format!("{:.6}", s.mean),
            format!("{:.6}", s.std_dev),
            optional(s.gamma),
            optional(s.threshold),
            format!("{:.6}", s.soc_added),
            format!("{:.6}", s.soc),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.6}")).unwrap_or_default()
}
