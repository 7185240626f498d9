//! Batch click detection over an experiment tree.

use crate::audio::AudioSegmentReader;
use crate::config::Config;
use crate::detection::detect_clicks;
use crate::error::{Error, Result};
use crate::output::{
    create_progress, events_path, finish_progress, inc_progress, meta_path, write_duration_meta,
    write_events,
};
use crate::pipeline::files::{collect_experiment_audio, file_name_lossy, file_stem_lossy};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn};

/// Options for a detection run.
#[derive(Debug, Clone)]
pub struct DetectOptions {
    /// Root that receives `<experiment>/<trial>/<stem>_events.csv`.
    pub output_root: PathBuf,
    /// Worker threads (`None` = one per CPU core).
    pub jobs: Option<usize>,
    /// Show a progress bar.
    pub progress: bool,
}

/// Outcome of a detection run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionSummary {
    /// Files whose events were written.
    pub processed: usize,
    /// Files that failed and were skipped.
    pub failed: usize,
    /// Events written across all files.
    pub total_events: usize,
}

/// Detect clicks in one audio file and write its events and metadata.
///
/// Returns the number of events written.
pub fn detect_file(audio_path: &Path, output_dir: &Path, config: &Config) -> Result<usize> {
    let events = detect_clicks(audio_path, config)?;

    std::fs::create_dir_all(output_dir).map_err(|source| Error::OutputDirCreateFailed {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let events_file = events_path(output_dir, &file_stem_lossy(audio_path));
    write_events(&events_file, &events)?;

    let meta_file = meta_path(&events_file);
    if let Err(e) = AudioSegmentReader::open(audio_path)
        .and_then(|reader| write_duration_meta(&meta_file, reader.duration_secs()))
    {
        warn!("Could not write metadata for {}: {e}", audio_path.display());
    }

    Ok(events.len())
}

/// Run detection over every `<trial>/*.wav` of an experiment.
///
/// Per-file failures are logged and counted; only a missing experiment
/// directory or an empty experiment aborts the run.
pub fn detect_experiment(
    experiment_root: &Path,
    config: &Config,
    options: &DetectOptions,
) -> Result<DetectionSummary> {
    let start = Instant::now();
    let files = collect_experiment_audio(experiment_root)?;
    if files.is_empty() {
        return Err(Error::NoAudioFiles {
            path: experiment_root.to_path_buf(),
        });
    }

    let experiment_dir = options
        .output_root
        .join(file_name_lossy(experiment_root));

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs.unwrap_or(0))
        .build()
        .map_err(|e| Error::WorkerPool {
            reason: e.to_string(),
        })?;

    info!(
        "Found {} audio file(s) in {}; detecting with {} worker(s)",
        files.len(),
        experiment_root.display(),
        pool.current_num_threads()
    );

    let progress = create_progress(files.len(), "files", options.progress);
    let results: Vec<Result<usize>> = pool.install(|| {
        files
            .par_iter()
            .map(|(trial, path)| {
                let result = detect_file(path, &experiment_dir.join(trial), config);
                inc_progress(progress.as_ref());
                result
            })
            .collect()
    });
    finish_progress(progress, "Complete");

    let mut summary = DetectionSummary::default();
    for ((_, path), result) in files.iter().zip(results) {
        match result {
            Ok(events) => {
                info!("{}: {events} event(s)", path.display());
                summary.processed += 1;
                summary.total_events += events;
            }
            Err(e) => {
                error!("Failed to process {}: {e}", path.display());
                summary.failed += 1;
            }
        }
    }

    info!(
        "Detection complete: {} processed, {} errors, {} total events in {:.2}s",
        summary.processed,
        summary.failed,
        summary.total_events,
        start.elapsed().as_secs_f64()
    );
    if summary.failed > 0 {
        warn!("{} file(s) had errors", summary.failed);
    }

    Ok(summary)
}
