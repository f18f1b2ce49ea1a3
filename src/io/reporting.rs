// src/io/reporting.rs

use crate::error::ReportError;
use crate::model::order::OrderRecord;
use crate::simulation::metrics::TickRecord;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Writes the per-tick history to a CSV file.
///
/// # Arguments
/// * `file_path` - Where to save the file (e.g., "results/ticks.csv").
/// * `data` - The tick records from the simulation engine.
pub fn write_tick_log(file_path: impl AsRef<Path>, data: &[TickRecord]) -> Result<(), ReportError> {
    write_file(file_path.as_ref(), data)
}

/// Writes one row per completed order to a CSV file.
pub fn write_order_log(
    file_path: impl AsRef<Path>,
    data: &[OrderRecord],
) -> Result<(), ReportError> {
    write_file(file_path.as_ref(), data)
}

/// Serializes `data` as CSV (with a header row) into any writer.
pub fn write_records<W: Write, T: Serialize>(writer: W, data: &[T]) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in data {
        wtr.serialize(record)?;
    }
    // Flush the buffer to ensure all data is written
    wtr.flush()?;
    Ok(())
}

fn write_file<T: Serialize>(path: &Path, data: &[T]) -> Result<(), ReportError> {
    let file = std::fs::File::create(path)?;
    write_records(file, data)?;
    info!(rows = data.len(), path = %path.display(), "exported csv");
    Ok(())
}
