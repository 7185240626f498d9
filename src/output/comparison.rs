//! Comparison file (`<trial>_comparison.csv`).

use crate::compare::ComparisonRow;
use crate::constants::columns;
use crate::error::Result;
use crate::output::table::write_table;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct ComparisonRecord {
    start_time_sec: f64,
    reference_count: Option<f64>,
    model_count: Option<f64>,
}

/// Write aligned comparison rows; a side without data is an empty cell.
pub fn write_comparison(path: &Path, rows: &[ComparisonRow]) -> Result<()> {
    let records: Vec<ComparisonRecord> = rows
        .iter()
        .map(|row| ComparisonRecord {
            start_time_sec: row.start_time_sec,
            reference_count: row.reference_count,
            model_count: row.model_count,
        })
        .collect();
    write_table(
        path,
        &[
            columns::START_TIME,
            columns::REFERENCE_COUNT,
            columns::MODEL_COUNT,
        ],
        &records,
    )
}
