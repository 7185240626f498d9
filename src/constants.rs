//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "clicktally";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default detection parameters.
pub mod defaults {
    /// Length of one spectral frame in seconds.
    pub const SHORT_TERM_DURATION: f64 = 0.005;

    /// Length of one chunk read into memory in seconds.
    pub const MID_TERM_DURATION: f64 = 1.0;

    /// ODF decision boundary.
    pub const THRESHOLD: f64 = 0.005;

    /// Lower edge of the analysis band in Hz.
    pub const BAND_LOW_HZ: f64 = 5000.0;

    /// Upper edge of the analysis band in Hz.
    pub const BAND_HIGH_HZ: f64 = 22050.0;

    /// Aggregation window in seconds.
    pub const WINDOW_SIZE: f64 = 1.0;

    /// Root of the metadata tree holding detection sources.
    pub const METADATA_ROOT: &str = "data/metadata";

    /// Taps of the moving-average filter used by the comparison stage.
    pub const SMOOTHING_WINDOW: usize = 5;
}

/// Most windows one events file may be aggregated into.
///
/// About 115 days of recording at the default 1 s window.
pub const MAX_AGGREGATION_WINDOWS: u64 = 10_000_000;

/// File name suffixes of the pipeline artifacts.
pub mod suffixes {
    /// Per-file detected event timestamps.
    pub const EVENTS: &str = "_events.csv";
    /// Per-file duration metadata (sibling of the events file).
    pub const META: &str = "_events.meta";
    /// Per-file windowed counts.
    pub const AGGREGATED: &str = "_aggregated.csv";
    /// Per-trial continuous timeline.
    pub const JOINT: &str = "_joint.csv";
    /// Per-trial model/reference comparison.
    pub const COMPARISON: &str = "_comparison.csv";
}

/// CSV column names.
pub mod columns {
    /// Event timestamp column of the events file.
    pub const EVENT_TIME: &str = "Event_Time_Seconds";
    /// Bin start column.
    pub const START_TIME: &str = "start_time_sec";
    /// Bin count column.
    pub const EVENT_COUNT: &str = "event_count";
    /// Segment name column of the joint file.
    pub const SEGMENT: &str = "segment";
    /// Smoothed reference count column of the comparison file.
    pub const REFERENCE_COUNT: &str = "reference_count";
    /// Smoothed model count column of the comparison file.
    pub const MODEL_COUNT: &str = "model_count";
}

/// Key of the duration line in the metadata file.
pub const DURATION_KEY: &str = "Duration_Seconds";

/// Directory under the metadata root that receives comparison files.
pub const COMPARISON_DIR: &str = "comparison";

/// Supported audio file extensions, matched case-insensitively.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav"];
