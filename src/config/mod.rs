//! Configuration loading and management.

mod file;
mod paths;
mod types;
mod validate;

pub use file::{
    load_config_file, load_config_or_default, load_runtime_config, resolve_config_path,
    save_config,
};
pub use paths::{config_dir, config_file_path};
pub use types::{
    AggregationConfig, CompareConfig, Config, DetectionConfig, FrequencyBand, PathsConfig,
    ProcessingConfig,
};
pub use validate::validate_config;
