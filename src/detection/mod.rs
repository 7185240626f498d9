//! Onset-detection click detector.
//!
//! Audio is read in mid-term chunks, each chunk is split into
//! non-overlapping short-term frames, and a frame is a click when
//! `log10(SF × HFC + 1)` reaches the configured threshold.

mod detector;
pub mod features;
mod spectrum;

pub use detector::{ChunkDetections, ChunkScanner, ClickDetector, detect_clicks};
pub use spectrum::{BandSpectrum, bin_frequencies};
