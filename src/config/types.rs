//! Configuration type definitions.

use crate::constants::defaults;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete run configuration.
///
/// Loaded once per invocation and passed by reference to every stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Framing of the audio stream.
    pub processing: ProcessingConfig,

    /// Onset detection settings.
    pub detection: DetectionConfig,

    /// Time-window aggregation settings.
    pub aggregation: AggregationConfig,

    /// Filesystem layout.
    pub paths: PathsConfig,

    /// Model/reference comparison settings.
    pub compare: CompareConfig,
}

/// Short-term frame and mid-term chunk durations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Length of one spectral frame in seconds.
    pub short_term_duration: f64,

    /// Length of one chunk read into memory in seconds.
    pub mid_term_duration: f64,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            short_term_duration: defaults::SHORT_TERM_DURATION,
            mid_term_duration: defaults::MID_TERM_DURATION,
        }
    }
}

/// Onset detection settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// ODF decision boundary (inclusive).
    pub threshold: f64,

    /// Band the spectrum is restricted to.
    pub frequency_band: FrequencyBand,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            threshold: defaults::THRESHOLD,
            frequency_band: FrequencyBand::default(),
        }
    }
}

/// Inclusive frequency band in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyBand {
    /// Lower edge in Hz.
    pub low: f64,
    /// Upper edge in Hz.
    pub high: f64,
}

impl Default for FrequencyBand {
    fn default() -> Self {
        Self {
            low: defaults::BAND_LOW_HZ,
            high: defaults::BAND_HIGH_HZ,
        }
    }
}

impl FrequencyBand {
    /// Whether `freq` lies inside the band (both edges included).
    pub fn contains(&self, freq: f64) -> bool {
        (self.low..=self.high).contains(&freq)
    }
}

/// Aggregation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Window width in seconds.
    pub window_size: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            window_size: defaults::WINDOW_SIZE,
        }
    }
}

/// Filesystem layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root holding `model_detections/`, `reference_detections/` and `comparison/`.
    pub metadata_root: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            metadata_root: PathBuf::from(defaults::METADATA_ROOT),
        }
    }
}

/// Comparison settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Taps of the zero-phase moving-average filter.
    pub smoothing_window: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            smoothing_window: defaults::SMOOTHING_WINDOW,
        }
    }
}
