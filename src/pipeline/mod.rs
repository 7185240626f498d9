//! Batch drivers for each pipeline stage.
//!
//! Stages communicate only through files under the metadata root:
//!
//! ```text
//! <metadata_root>/
//!   model_detections/<experiment>/<trial>/<stem>_events.csv
//!   model_detections/<experiment>/<trial>/<stem>_aggregated.csv
//!   model_detections/<experiment>/<trial>/<trial>_joint.csv
//!   reference_detections/...           (same layout, produced elsewhere)
//!   comparison/<trial>_comparison.csv
//! ```

mod aggregate;
mod compare;
mod detect;
mod files;
mod join;
mod run;

pub use aggregate::{AggregationSummary, aggregate_event_file, aggregate_source};
pub use compare::{ComparisonSummary, compare_sources, compare_trial};
pub use detect::{DetectOptions, DetectionSummary, detect_experiment, detect_file};
pub use files::{collect_experiment_audio, find_files_with_suffix, is_audio_file, trial_dirs};
pub use join::{JoinSummary, JoinedTrial, join_source, join_trial};
pub use run::{PipelineSummary, run_pipeline};

use std::path::{Path, PathBuf};

/// Producer of a detection tree under the metadata root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum DetectionSource {
    /// Output of this tool's detector.
    #[value(name = "model_detections", alias = "model")]
    Model,
    /// Independent reference annotations.
    #[value(name = "reference_detections", alias = "reference")]
    Reference,
}

impl DetectionSource {
    /// Directory name under the metadata root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Model => "model_detections",
            Self::Reference => "reference_detections",
        }
    }

    /// Root directory of this source.
    pub fn root(self, metadata_root: &Path) -> PathBuf {
        metadata_root.join(self.dir_name())
    }
}

impl std::fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_roots() {
        let root = Path::new("data/metadata");
        assert_eq!(
            DetectionSource::Model.root(root),
            PathBuf::from("data/metadata/model_detections")
        );
        assert_eq!(DetectionSource::Reference.to_string(), "reference_detections");
    }
}
