//! Readers and writers for the pipeline's CSV artifacts.
//!
//! Every stage hands its result to the next through one of these files:
//! events (+ duration metadata), aggregated bins, joint timelines and
//! comparisons. Writers always emit a header, even for empty tables.

mod aggregated;
mod comparison;
mod events;
mod joint;
mod progress;
mod table;

pub use aggregated::{read_aggregated, write_aggregated};
pub use comparison::write_comparison;
pub use events::{
    aggregated_path, events_path, meta_path, read_duration_meta, read_events,
    write_duration_meta, write_events,
};
pub use joint::{read_joint, write_joint};
pub use progress::{create_progress, finish_progress, inc_progress};
