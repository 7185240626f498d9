//! Pairing of reference and model timelines into comparison files.

use crate::compare::compare_timelines;
use crate::constants::{COMPARISON_DIR, suffixes};
use crate::error::{Error, Result};
use crate::output::{read_joint, write_comparison};
use crate::pipeline::DetectionSource;
use crate::pipeline::files::{file_name_lossy, find_files_with_suffix};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Outcome of a comparison run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComparisonSummary {
    /// Trials with both timelines whose comparison was written.
    pub compared: usize,
    /// Reference trials without a model timeline.
    pub unmatched: usize,
    /// Trials whose timelines could not be read or written.
    pub failed: usize,
}

/// Compare every reference trial timeline with the model timeline of the
/// same name, writing `metadata_root/comparison/<trial>_comparison.csv`.
pub fn compare_sources(metadata_root: &Path, smoothing_window: usize) -> Result<ComparisonSummary> {
    let reference = joint_files_by_trial(&DetectionSource::Reference.root(metadata_root))?;
    let model = joint_files_by_trial(&DetectionSource::Model.root(metadata_root))?;
    info!(
        "Found {} reference and {} model timeline(s)",
        reference.len(),
        model.len()
    );

    let output_dir = metadata_root.join(COMPARISON_DIR);
    std::fs::create_dir_all(&output_dir).map_err(|source| Error::OutputDirCreateFailed {
        path: output_dir.clone(),
        source,
    })?;

    let mut summary = ComparisonSummary::default();
    for (trial, reference_path) in &reference {
        let Some(model_path) = model.get(trial) else {
            warn!("No matching model timeline for {trial}");
            summary.unmatched += 1;
            continue;
        };

        let output = output_dir.join(format!("{trial}{}", suffixes::COMPARISON));
        match compare_trial(reference_path, model_path, &output, smoothing_window) {
            Ok(rows) => {
                info!("Compared {trial}: {rows} row(s) saved to {}", output.display());
                summary.compared += 1;
            }
            Err(e) => {
                error!("Failed to compare {trial}: {e}");
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Compare one pair of joint files. Returns the number of rows written.
pub fn compare_trial(
    reference_path: &Path,
    model_path: &Path,
    output_path: &Path,
    smoothing_window: usize,
) -> Result<usize> {
    let reference = read_joint(reference_path)?;
    let model = read_joint(model_path)?;
    let rows = compare_timelines(&reference, &model, smoothing_window);
    write_comparison(output_path, &rows)?;
    Ok(rows.len())
}

fn joint_files_by_trial(root: &Path) -> Result<BTreeMap<String, PathBuf>> {
    let mut by_trial = BTreeMap::new();
    for path in find_files_with_suffix(root, suffixes::JOINT)? {
        let name = file_name_lossy(&path);
        let trial = name.strip_suffix(suffixes::JOINT).unwrap_or(&name).to_string();
        if let Some(previous) = by_trial.insert(trial, path) {
            warn!("Duplicate trial timeline ignored: {}", previous.display());
        }
    }
    Ok(by_trial)
}
