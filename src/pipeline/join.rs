//! Batch joining of per-segment aggregates into per-trial timelines.

use crate::aggregation::{JointRow, Segment, join_segments, segment_name};
use crate::constants::suffixes;
use crate::error::Result;
use crate::output::{read_aggregated, write_joint};
use crate::pipeline::DetectionSource;
use crate::pipeline::files::{file_name_lossy, find_files_with_suffix, trial_dirs};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Outcome of a join run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinSummary {
    /// Trials whose joint timeline was written.
    pub trials: usize,
    /// Aggregated files skipped because they could not be read.
    pub failed_segments: usize,
}

/// A trial timeline written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedTrial {
    /// Path of the `<trial>_joint.csv` file.
    pub output: PathBuf,
    /// Rows of the timeline.
    pub rows: Vec<JointRow>,
    /// Aggregated files left out because they could not be read.
    pub failed_segments: usize,
}

/// Join the aggregated segments of one trial and write `<trial>_joint.csv`.
///
/// Returns `None` when the trial holds no aggregated files. Unreadable
/// segments are logged and left out of the timeline.
pub fn join_trial(trial_dir: &Path, window_size: f64) -> Result<Option<JoinedTrial>> {
    let mut files = find_files_with_suffix(trial_dir, suffixes::AGGREGATED)?;
    files.retain(|path| path.parent() == Some(trial_dir));
    if files.is_empty() {
        return Ok(None);
    }

    let mut failed = 0;
    let mut segments = Vec::with_capacity(files.len());
    for path in &files {
        let name = file_name_lossy(path);
        match read_aggregated(path) {
            Ok(bins) => {
                if bins.is_empty() {
                    warn!("{} has no bins; it contributes nothing to the timeline", path.display());
                }
                segments.push(Segment::new(segment_name(&name), bins));
            }
            Err(e) => {
                error!("Skipping segment {}: {e}", path.display());
                failed += 1;
            }
        }
    }

    let trial_name = file_name_lossy(trial_dir);
    info!("Joining {} file(s) in {trial_name}", segments.len());

    let rows = join_segments(&segments, window_size);
    let output = trial_dir.join(format!("{trial_name}{}", suffixes::JOINT));
    write_joint(&output, &rows)?;
    Ok(Some(JoinedTrial {
        output,
        rows,
        failed_segments: failed,
    }))
}

/// Join every trial directory of a detection source.
pub fn join_source(
    metadata_root: &Path,
    source: DetectionSource,
    window_size: f64,
) -> Result<JoinSummary> {
    let source_root = source.root(metadata_root);
    let mut summary = JoinSummary::default();

    for trial_dir in trial_dirs(&source_root)? {
        match join_trial(&trial_dir, window_size) {
            Ok(Some(joined)) => {
                info!("Saved {} row(s) to {}", joined.rows.len(), joined.output.display());
                summary.trials += 1;
                summary.failed_segments += joined.failed_segments;
            }
            Ok(None) => {}
            Err(e) => error!("Failed to join {}: {e}", trial_dir.display()),
        }
    }

    if summary.trials == 0 {
        warn!("No aggregated files found under {}", source_root.display());
    }
    Ok(summary)
}
