//! End-to-end pipeline: detect, aggregate, join and compare.

use crate::config::Config;
use crate::error::Result;
use crate::pipeline::{
    AggregationSummary, ComparisonSummary, DetectOptions, DetectionSource, DetectionSummary,
    aggregate_source, compare_sources, detect_experiment, join_source,
};
use std::path::Path;
use tracing::{info, warn};

/// Results of every stage of a full run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Detection over the experiment.
    pub detection: DetectionSummary,
    /// Aggregation of model detections.
    pub model_aggregation: AggregationSummary,
    /// Aggregation of reference detections, if that source exists.
    pub reference_aggregation: Option<AggregationSummary>,
    /// Comparison, if reference detections exist.
    pub comparison: Option<ComparisonSummary>,
}

/// Run every stage for one experiment, stopping at the first structural error.
///
/// Detection output goes to `metadata_root/model_detections`. Stages that
/// need reference detections are skipped when that directory is absent.
pub fn run_pipeline(
    experiment_root: &Path,
    config: &Config,
    jobs: Option<usize>,
    progress: bool,
) -> Result<PipelineSummary> {
    let metadata_root = config.paths.metadata_root.as_path();
    let window_size = config.aggregation.window_size;
    let reference_present = DetectionSource::Reference.root(metadata_root).is_dir();

    info!("[1/4] Detecting clicks in {}", experiment_root.display());
    let detection = detect_experiment(
        experiment_root,
        config,
        &DetectOptions {
            output_root: DetectionSource::Model.root(metadata_root),
            jobs,
            progress,
        },
    )?;

    info!("[2/4] Aggregating detections");
    let reference_aggregation = if reference_present {
        Some(aggregate_source(metadata_root, DetectionSource::Reference, window_size)?)
    } else {
        warn!("No reference detections under {}; skipping reference stages", metadata_root.display());
        None
    };
    let model_aggregation = aggregate_source(metadata_root, DetectionSource::Model, window_size)?;

    info!("[3/4] Joining aggregated results with time continuity");
    if reference_present {
        join_source(metadata_root, DetectionSource::Reference, window_size)?;
    }
    join_source(metadata_root, DetectionSource::Model, window_size)?;

    let comparison = if reference_present {
        info!("[4/4] Comparing model with reference detections");
        Some(compare_sources(metadata_root, config.compare.smoothing_window)?)
    } else {
        None
    };

    Ok(PipelineSummary {
        detection,
        model_aggregation,
        reference_aggregation,
        comparison,
    })
}
