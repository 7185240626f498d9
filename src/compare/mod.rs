//! Model versus reference timeline comparison.
//!
//! Both joint timelines are imputed over their nulled seam bins, smoothed
//! with a zero-phase moving average and aligned row by row. Rendering the
//! result is left to external plotting tools.

mod series;

pub use series::{impute_gaps, smooth_zero_phase};

use crate::aggregation::JointRow;

/// One aligned row of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    /// Window start on the trial clock.
    pub start_time_sec: f64,
    /// Smoothed reference count, `None` past the end of the reference timeline.
    pub reference_count: Option<f64>,
    /// Smoothed model count, `None` past the end of the model timeline.
    pub model_count: Option<f64>,
}

/// Impute and smooth the counts of one joint timeline.
///
/// A timeline without any defined count yields all `None`.
pub fn prepare_counts(rows: &[JointRow], smoothing_window: usize) -> Vec<Option<f64>> {
    #[allow(clippy::cast_precision_loss)]
    let counts: Vec<Option<f64>> = rows
        .iter()
        .map(|row| row.event_count.map(|c| c as f64))
        .collect();

    match impute_gaps(&counts) {
        Some(filled) => smooth_zero_phase(&filled, smoothing_window)
            .into_iter()
            .map(Some)
            .collect(),
        None => counts,
    }
}

/// Pair a reference and a model timeline of the same trial.
///
/// Rows are aligned by index; the longer timeline sets the row count and
/// supplies `start_time_sec`.
pub fn compare_timelines(
    reference: &[JointRow],
    model: &[JointRow],
    smoothing_window: usize,
) -> Vec<ComparisonRow> {
    let reference_counts = prepare_counts(reference, smoothing_window);
    let model_counts = prepare_counts(model, smoothing_window);
    let longer = if reference.len() >= model.len() {
        reference
    } else {
        model
    };

    longer
        .iter()
        .enumerate()
        .map(|(i, row)| ComparisonRow {
            start_time_sec: row.start_time_sec,
            reference_count: reference_counts.get(i).copied().flatten(),
            model_count: model_counts.get(i).copied().flatten(),
        })
        .collect()
}
