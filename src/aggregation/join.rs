//! Continuity joining of a trial's segment timelines.
//!
//! Each audio segment restarts its clock at zero. The joiner shifts every
//! segment by a running offset so a trial reads as one continuous timeline,
//! and nulls the last bin of each segment: that bin usually covers less than
//! a full window of audio and would otherwise read as a dip at every seam.

use crate::aggregation::AggregatedBin;
use crate::constants::suffixes;
use tracing::debug;

/// Aggregated bins of one audio segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Segment name, the aggregated file name without its suffix.
    pub name: String,
    /// Gap-free bins starting at window 0.
    pub bins: Vec<AggregatedBin>,
}

impl Segment {
    /// Create a segment from its name and bins.
    pub fn new(name: impl Into<String>, bins: Vec<AggregatedBin>) -> Self {
        Self {
            name: name.into(),
            bins,
        }
    }
}

/// One row of a joint timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct JointRow {
    /// Window start on the trial clock.
    pub start_time_sec: f64,
    /// Event count, `None` for the final bin of a segment.
    pub event_count: Option<u64>,
    /// Segment the row came from.
    pub segment: String,
}

/// Concatenate segments in the given order onto one trial clock.
///
/// Segments without bins are skipped and leave the offset unchanged.
pub fn join_segments(segments: &[Segment], window_size: f64) -> Vec<JointRow> {
    let mut rows = Vec::with_capacity(segments.iter().map(|s| s.bins.len()).sum());
    let mut time_offset = 0.0;

    for segment in segments {
        let Some(last) = segment.bins.len().checked_sub(1) else {
            debug!("Segment {} has no bins; skipping", segment.name);
            continue;
        };

        rows.extend(segment.bins.iter().enumerate().map(|(i, bin)| JointRow {
            start_time_sec: bin.start_time_sec + time_offset,
            event_count: (i != last).then_some(bin.event_count),
            segment: segment.name.clone(),
        }));

        time_offset += segment.bins[last].start_time_sec + window_size;
    }

    rows
}

/// Segment name for an aggregated file name (`seg_01_aggregated.csv` → `seg_01`).
pub fn segment_name(file_name: &str) -> &str {
    file_name
        .strip_suffix(suffixes::AGGREGATED)
        .unwrap_or(file_name)
}
