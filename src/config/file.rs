//! Configuration file loading.

use crate::config::{Config, validate_config};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Load configuration from a TOML file.
///
/// Returns default config if the file does not exist. Keys absent from the
/// document take their default values.
pub fn load_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load and validate configuration, falling back to defaults on any failure.
///
/// A missing, unreadable, malformed or invalid document never aborts the
/// pipeline; the problem is logged and the default configuration is used.
pub fn load_config_or_default(path: &Path) -> Config {
    let config = match load_config_file(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("{e}: {}; using default configuration", source_chain(&e));
            return Config::default();
        }
    };

    if let Err(e) = validate_config(&config) {
        warn!("{e}; using default configuration");
        return Config::default();
    }

    debug!("Loaded configuration from {}", path.display());
    config
}

/// Resolve the config path (explicit or platform default) and load it.
pub fn load_runtime_config(explicit: Option<&Path>) -> Config {
    match resolve_config_path(explicit) {
        Ok(path) => load_config_or_default(&path),
        Err(e) => {
            warn!("{e}; using default configuration");
            Config::default()
        }
    }
}

/// Pick the explicit config path if given, else the platform default.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    explicit.map_or_else(super::config_file_path, |p| Ok(p.to_path_buf()))
}

/// Save configuration to a TOML file.
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::ConfigWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let contents =
        toml::to_string_pretty(config).map_err(|e| Error::ConfigSerialize { source: e })?;

    std::fs::write(path, contents).map_err(|e| Error::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn source_chain(e: &Error) -> String {
    use std::error::Error as _;
    e.source()
        .map_or_else(|| "no further detail".to_string(), ToString::to_string)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_nonexistent_file_returns_default() {
        let path = Path::new("/nonexistent/path/config.toml");
        let config = load_config_file(path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r"
[processing]
short_term_duration = 0.01

[detection]
threshold = 0.3

[detection.frequency_band]
low = 2000
high = 20000

[aggregation]
window_size = 60.0
"
        )
        .unwrap();

        let config = load_config_file(file.path()).unwrap();
        assert_eq!(config.processing.short_term_duration, 0.01);
        assert_eq!(config.processing.mid_term_duration, 1.0);
        assert_eq!(config.detection.threshold, 0.3);
        assert_eq!(config.detection.frequency_band.low, 2000.0);
        assert_eq!(config.aggregation.window_size, 60.0);
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not valid toml {{{{").unwrap();

        let config = load_config_file(file.path());
        assert!(matches!(config, Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn test_malformed_document_falls_back_to_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[processing\nshort_term_duration = ").unwrap();

        let config = load_config_or_default(file.path());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[aggregation]\nwindow_size = -3.0").unwrap();

        let config = load_config_or_default(file.path());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.detection.threshold = 0.42;

        save_config(&config, &path).unwrap();
        assert_eq!(load_config_file(&path).unwrap(), config);
    }
}
