//! Events file (`<stem>_events.csv`) and its duration metadata sibling.

use crate::constants::{DURATION_KEY, columns, suffixes};
use crate::error::{Error, Result};
use crate::output::table::{check_non_negative, open_reader, read_records, write_table};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
struct EventRecord {
    #[serde(rename = "Event_Time_Seconds")]
    event_time: f64,
}

/// Events file path for an audio file stem inside `dir`.
pub fn events_path(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{stem}{}", suffixes::EVENTS))
}

/// Metadata file path that sits next to an events file.
pub fn meta_path(events_path: &Path) -> PathBuf {
    sibling_with_suffix(events_path, suffixes::EVENTS, suffixes::META)
}

/// Aggregated file path that sits next to an events file.
pub fn aggregated_path(events_path: &Path) -> PathBuf {
    sibling_with_suffix(events_path, suffixes::EVENTS, suffixes::AGGREGATED)
}

/// Write event timestamps, one per row. No events gives a header-only file.
pub fn write_events(path: &Path, events: &[f64]) -> Result<()> {
    let records: Vec<EventRecord> = events
        .iter()
        .map(|&event_time| EventRecord { event_time })
        .collect();
    write_table(path, &[columns::EVENT_TIME], &records)
}

/// Read event timestamps.
///
/// # Errors
///
/// Fails if the file is missing, lacks the `Event_Time_Seconds` column, or
/// holds a negative or non-finite timestamp.
pub fn read_events(path: &Path) -> Result<Vec<f64>> {
    let mut reader = open_reader(path, &[columns::EVENT_TIME])?;
    let records: Vec<EventRecord> = read_records(&mut reader, path)?;

    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            check_non_negative(path, i + 2, columns::EVENT_TIME, record.event_time)?;
            Ok(record.event_time)
        })
        .collect()
}

/// Write the `Duration_Seconds: <secs>` metadata line.
pub fn write_duration_meta(path: &Path, duration_secs: f64) -> Result<()> {
    std::fs::write(path, format!("{DURATION_KEY}: {duration_secs:.3}\n"))?;
    Ok(())
}

/// Read the duration back from a metadata file.
pub fn read_duration_meta(path: &Path) -> Result<f64> {
    let contents = std::fs::read_to_string(path)?;
    contents
        .lines()
        .find_map(|line| line.strip_prefix(DURATION_KEY)?.strip_prefix(':'))
        .and_then(|value| value.trim().parse::<f64>().ok())
        .ok_or_else(|| Error::InvalidRecord {
            path: path.to_path_buf(),
            message: format!("no '{DURATION_KEY}' line"),
        })
}

fn sibling_with_suffix(path: &Path, from: &str, to: &str) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = name.strip_suffix(from).unwrap_or(&name);
    path.with_file_name(format!("{base}{to}"))
}
