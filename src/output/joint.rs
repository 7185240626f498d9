//! Joint file (`<trial>_joint.csv`).

use crate::aggregation::JointRow;
use crate::constants::columns;
use crate::error::Result;
use crate::output::table::{check_non_negative, open_reader, read_records, write_table};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
struct JointRecord {
    start_time_sec: f64,
    event_count: Option<u64>,
    #[serde(default)]
    segment: String,
}

/// Write a joint timeline. Null counts are written as empty cells.
pub fn write_joint(path: &Path, rows: &[JointRow]) -> Result<()> {
    let records: Vec<JointRecord> = rows
        .iter()
        .map(|row| JointRecord {
            start_time_sec: row.start_time_sec,
            event_count: row.event_count,
            segment: row.segment.clone(),
        })
        .collect();
    write_table(
        path,
        &[columns::START_TIME, columns::EVENT_COUNT, columns::SEGMENT],
        &records,
    )
}

/// Read a joint timeline. The `segment` column is optional.
pub fn read_joint(path: &Path) -> Result<Vec<JointRow>> {
    let mut reader = open_reader(path, &[columns::START_TIME, columns::EVENT_COUNT])?;
    let records: Vec<JointRecord> = read_records(&mut reader, path)?;

    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            check_non_negative(path, i + 2, columns::START_TIME, record.start_time_sec)?;
            Ok(JointRow {
                start_time_sec: record.start_time_sec,
                event_count: record.event_count,
                segment: record.segment,
            })
        })
        .collect()
}
