//! Batch aggregation of events files into windowed counts.

use crate::aggregation::{AggregatedBin, aggregate_events};
use crate::constants::suffixes;
use crate::error::{Error, Result};
use crate::output::{aggregated_path, read_events, write_aggregated};
use crate::pipeline::DetectionSource;
use crate::pipeline::files::find_files_with_suffix;
use std::path::Path;
use tracing::{error, info, warn};

/// Outcome of an aggregation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationSummary {
    /// Events files aggregated.
    pub processed: usize,
    /// Events files skipped because they could not be read.
    pub failed: usize,
}

/// Aggregate one events file and write the result.
///
/// The output defaults to the `_aggregated.csv` sibling of `events_path`;
/// the parent of an explicit output path is created when missing. Nothing is
/// written when the events file cannot be read or spans too many windows.
pub fn aggregate_event_file(
    events_path: &Path,
    window_size: f64,
    output_path: Option<&Path>,
) -> Result<Vec<AggregatedBin>> {
    let events = read_events(events_path)?;
    let bins = aggregate_events(&events, window_size).map_err(|e| Error::InvalidRecord {
        path: events_path.to_path_buf(),
        message: e.to_string(),
    })?;

    let output = output_path.map_or_else(|| aggregated_path(events_path), Path::to_path_buf);
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| Error::OutputDirCreateFailed {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    write_aggregated(&output, &bins)?;
    Ok(bins)
}

/// Aggregate every `*_events.csv` below `metadata_root/<source>`.
pub fn aggregate_source(
    metadata_root: &Path,
    source: DetectionSource,
    window_size: f64,
) -> Result<AggregationSummary> {
    let source_root = source.root(metadata_root);
    let files = find_files_with_suffix(&source_root, suffixes::EVENTS)?;

    let mut summary = AggregationSummary::default();
    if files.is_empty() {
        warn!("No *{} files found in {}", suffixes::EVENTS, source_root.display());
        return Ok(summary);
    }

    info!("Found {} event file(s) in {source}", files.len());

    for path in &files {
        match aggregate_event_file(path, window_size, None) {
            Ok(bins) => {
                info!("Aggregated {} into {} bin(s)", path.display(), bins.len());
                summary.processed += 1;
            }
            Err(e) => {
                error!("Failed to aggregate {}: {e}", path.display());
                summary.failed += 1;
            }
        }
    }

    info!(
        "Aggregation complete for {source}: {} processed, {} errors",
        summary.processed, summary.failed
    );
    Ok(summary)
}
