//! Error types for clicktally.

use std::path::PathBuf;

/// Result type alias for clicktally operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for clicktally.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// A directory the stage depends on does not exist.
    #[error("directory not found: {path}")]
    DirectoryNotFound {
        /// Path to the missing directory.
        path: PathBuf,
    },

    /// No audio files found under the experiment directory.
    #[error("no audio files found under '{path}'")]
    NoAudioFiles {
        /// Experiment directory that was searched.
        path: PathBuf,
    },

    /// Failed to open audio file.
    #[error("failed to open audio file '{path}'")]
    AudioOpen {
        /// Path to the audio file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: hound::Error,
    },

    /// Failed to decode audio samples.
    #[error("failed to decode audio from '{path}'")]
    AudioDecode {
        /// Path to the audio file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: hound::Error,
    },

    /// Requested sample range extends past the end of the file.
    #[error(
        "insufficient audio in '{path}': requested {requested} samples at {start}, file has {available}"
    )]
    InsufficientAudio {
        /// Path to the audio file.
        path: PathBuf,
        /// First requested sample.
        start: u64,
        /// Number of requested samples.
        requested: usize,
        /// Total frames in the file.
        available: u64,
    },

    /// A sample source does not match the rate the detector was built for.
    #[error("sample rate mismatch: detector expects {expected} Hz, source has {actual} Hz")]
    SampleRateMismatch {
        /// Detector sample rate.
        expected: u32,
        /// Source sample rate.
        actual: u32,
    },

    /// Spectral transform failed.
    #[error("spectral transform failed: {reason}")]
    Spectrum {
        /// Description of the failure.
        reason: String,
    },

    /// Failed to read a CSV file.
    #[error("failed to read CSV file '{path}'")]
    CsvRead {
        /// Path to the CSV file.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Failed to write a CSV file.
    #[error("failed to write CSV file '{path}'")]
    CsvWrite {
        /// Path to the CSV file.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// A CSV file lacks a required column.
    #[error("column '{column}' not found in '{path}'")]
    MissingColumn {
        /// Path to the CSV file.
        path: PathBuf,
        /// Name of the missing column.
        column: &'static str,
    },

    /// A CSV record could not be interpreted.
    #[error("invalid record in '{path}': {message}")]
    InvalidRecord {
        /// Path to the CSV file.
        path: PathBuf,
        /// Description of the problem.
        message: String,
    },

    /// Events span more aggregation windows than can be counted.
    #[error("events span {windows} windows, more than the limit of {limit}")]
    TooManyWindows {
        /// Windows needed to cover the events.
        windows: u64,
        /// Largest supported window count.
        limit: u64,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to build the worker thread pool.
    #[error("failed to build worker pool: {reason}")]
    WorkerPool {
        /// Description of the failure.
        reason: String,
    },
}
