//! Audio input.

mod reader;
mod source;

pub use reader::{AudioSegmentReader, probe_sample_rate};
pub use source::{MemorySource, SegmentSource};
