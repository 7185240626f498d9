//! Windowed event counts and per-trial timelines.

mod join;
mod window;

pub use join::{JointRow, Segment, join_segments, segment_name};
pub use window::{AggregatedBin, aggregate_events, window_index};
