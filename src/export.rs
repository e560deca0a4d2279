//! CSV and JSON export of results
//!
//! Rendering currency for display is left to the caller; exported figures
//! are plain numbers.

use std::io::Write;

use serde::Serialize;
use thiserror::Error;

use crate::amortization::AmortizationResult;
use crate::projection::ProjectionResult;

/// Errors raised while writing results out
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write one CSV row per schedule period
pub fn write_schedule_csv<W: Write>(
    schedule: &AmortizationResult,
    writer: W,
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in &schedule.rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Write one CSV row per simulated month
pub fn write_trajectory_csv<W: Write>(
    projection: &ProjectionResult,
    writer: W,
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    for point in &projection.trajectory {
        csv.serialize(point)?;
    }
    csv.flush()?;
    Ok(())
}

/// Pretty-printed JSON for any result type
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(value)?)
}
