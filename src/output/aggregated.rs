//! Aggregated file (`<stem>_aggregated.csv`).

use crate::aggregation::AggregatedBin;
use crate::constants::columns;
use crate::error::Result;
use crate::output::table::{check_non_negative, open_reader, read_records, write_table};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
struct AggregatedRecord {
    start_time_sec: f64,
    event_count: u64,
}

/// Write bins as `start_time_sec,event_count` rows.
pub fn write_aggregated(path: &Path, bins: &[AggregatedBin]) -> Result<()> {
    let records: Vec<AggregatedRecord> = bins
        .iter()
        .map(|bin| AggregatedRecord {
            start_time_sec: bin.start_time_sec,
            event_count: bin.event_count,
        })
        .collect();
    write_table(
        path,
        &[columns::START_TIME, columns::EVENT_COUNT],
        &records,
    )
}

/// Read bins back. Files are gap-free, so a row's position is its window index.
pub fn read_aggregated(path: &Path) -> Result<Vec<AggregatedBin>> {
    let mut reader = open_reader(path, &[columns::START_TIME, columns::EVENT_COUNT])?;
    let records: Vec<AggregatedRecord> = read_records(&mut reader, path)?;

    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            check_non_negative(path, i + 2, columns::START_TIME, record.start_time_sec)?;
            Ok(AggregatedBin {
                window_index: i as u64,
                start_time_sec: record.start_time_sec,
                event_count: record.event_count,
            })
        })
        .collect()
}
