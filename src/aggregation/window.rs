//! Fixed-width time-window event counting.

use crate::constants::MAX_AGGREGATION_WINDOWS;
use crate::error::{Error, Result};

/// Event count of one aggregation window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatedBin {
    /// Zero-based window number.
    pub window_index: u64,
    /// Window start, `window_index × window_size` seconds.
    pub start_time_sec: f64,
    /// Number of events inside `[start, start + window_size)`.
    pub event_count: u64,
}

/// Window that contains time `t`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn window_index(t: f64, window_size: f64) -> u64 {
    (t / window_size).floor() as u64
}

/// Count events per window over the full range `[0, max_index]`.
///
/// Windows without events are present with a count of zero, so the output
/// always starts at window 0 and has no gaps. An empty input has no highest
/// window and yields no bins.
///
/// # Errors
///
/// Returns [`Error::TooManyWindows`] when the latest event lies beyond
/// [`MAX_AGGREGATION_WINDOWS`] windows.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn aggregate_events(events: &[f64], window_size: f64) -> Result<Vec<AggregatedBin>> {
    let indices: Vec<u64> = events
        .iter()
        .map(|&t| window_index(t, window_size))
        .collect();

    let Some(&max_index) = indices.iter().max() else {
        return Ok(Vec::new());
    };

    let windows = max_index.saturating_add(1);
    if windows > MAX_AGGREGATION_WINDOWS {
        return Err(Error::TooManyWindows {
            windows,
            limit: MAX_AGGREGATION_WINDOWS,
        });
    }

    let mut counts = vec![0u64; windows as usize];
    for index in indices {
        counts[index as usize] += 1;
    }

    Ok(counts
        .into_iter()
        .zip(0u64..)
        .map(|(event_count, window_index)| AggregatedBin {
            window_index,
            start_time_sec: window_index as f64 * window_size,
            event_count,
        })
        .collect())
}
