//! CSV import of recorded forecast and realized price series.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::sim::types::PriceSeries;

/// Failure while reading a price CSV.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot open price file: {0}")]
    Io(#[from] io::Error),
    #[error("malformed price CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: interval column is {found}, expected {row}")]
    IntervalOutOfOrder { row: usize, found: usize },
    #[error("price CSV contains no rows")]
    Empty,
}

/// One interval of recorded prices.
#[derive(Debug, Deserialize)]
struct PriceRecord {
    #[serde(default)]
    interval: Option<usize>,
    forecast_price: f64,
    realized_price: f64,
}

/// Reads a price series from CSV with `forecast_price` and `realized_price`
/// columns.
///
/// An `interval` column is optional; when present it must count up from 0.
/// Extra columns are ignored. Length against the horizon is checked later by
/// the engine.
///
/// # Errors
///
/// Returns an [`ImportError`] for unreadable input, missing columns,
/// non-numeric prices, out-of-order intervals, or an empty file.
pub fn read_prices(reader: impl Read) -> Result<PriceSeries, ImportError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut forecast = Vec::new();
    let mut realized = Vec::new();
    for (row, result) in rdr.deserialize().enumerate() {
        let record: PriceRecord = result?;
        match record.interval {
            Some(found) if found != row => {
                return Err(ImportError::IntervalOutOfOrder { row, found });
            }
            _ => {}
        }
        forecast.push(record.forecast_price);
        realized.push(record.realized_price);
    }

    if forecast.is_empty() {
        return Err(ImportError::Empty);
    }
    Ok(PriceSeries::new(forecast, realized))
}

/// Reads a price series from a CSV file.
///
/// # Errors
///
/// See [`read_prices`].
pub fn read_prices_from_path(path: &Path) -> Result<PriceSeries, ImportError> {
    let file = File::open(path)?;
    read_prices(io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_two_column_file() {
        let data = "forecast_price,realized_price\n3.0,3.5\n1.0,0.5\n";
        let prices = read_prices(data.as_bytes()).expect("valid CSV");
        assert_eq!(prices.forecast, vec![3.0, 1.0]);
        assert_eq!(prices.realized, vec![3.5, 0.5]);
    }

    #[test]
    fn accepts_interval_column_and_whitespace() {
        let data = "interval, forecast_price, realized_price\n0, 2.0, 2.5\n1, 4.0, 3.0\n";
        let prices = read_prices(data.as_bytes()).expect("valid CSV");
        assert_eq!(prices.len(), 2);
        assert_eq!(prices.realized[1], 3.0);
    }

    #[test]
    fn rejects_out_of_order_intervals() {
        let data = "interval,forecast_price,realized_price\n0,1.0,1.0\n2,1.0,1.0\n";
        let err = read_prices(data.as_bytes()).err();
        assert!(matches!(
            err,
            Some(ImportError::IntervalOutOfOrder { row: 1, found: 2 })
        ));
    }

    #[test]
    fn rejects_missing_column() {
        let data = "forecast_price\n1.0\n";
        assert!(matches!(
            read_prices(data.as_bytes()),
            Err(ImportError::Csv(_))
        ));
    }

    #[test]
    fn rejects_non_numeric_price() {
        let data = "forecast_price,realized_price\n1.0,cheap\n";
        assert!(matches!(
            read_prices(data.as_bytes()),
            Err(ImportError::Csv(_))
        ));
    }

    #[test]
    fn rejects_header_only_file() {
        let data = "forecast_price,realized_price\n";
        assert!(matches!(
            read_prices(data.as_bytes()),
            Err(ImportError::Empty)
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_prices_from_path(Path::new("/nonexistent/prices.csv")).err();
        assert!(matches!(err, Some(ImportError::Io(_))));
    }
}
