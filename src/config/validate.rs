//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_processing(config)?;
    validate_detection(config)?;
    validate_aggregation(config)?;
    Ok(())
}

fn invalid(message: String) -> Error {
    Error::ConfigValidation { message }
}

fn validate_processing(config: &Config) -> Result<()> {
    let processing = &config.processing;

    if !(processing.short_term_duration > 0.0 && processing.short_term_duration.is_finite()) {
        return Err(invalid(format!(
            "processing.short_term_duration must be positive, got {}",
            processing.short_term_duration
        )));
    }

    if !(processing.mid_term_duration > 0.0 && processing.mid_term_duration.is_finite()) {
        return Err(invalid(format!(
            "processing.mid_term_duration must be positive, got {}",
            processing.mid_term_duration
        )));
    }

    if processing.mid_term_duration < processing.short_term_duration {
        return Err(invalid(format!(
            "processing.mid_term_duration ({}) must be at least short_term_duration ({})",
            processing.mid_term_duration, processing.short_term_duration
        )));
    }

    Ok(())
}

fn validate_detection(config: &Config) -> Result<()> {
    let detection = &config.detection;

    if !(detection.threshold >= 0.0 && detection.threshold.is_finite()) {
        return Err(invalid(format!(
            "detection.threshold must be non-negative, got {}",
            detection.threshold
        )));
    }

    let band = &detection.frequency_band;
    if !(band.low >= 0.0 && band.low < band.high && band.high.is_finite()) {
        return Err(invalid(format!(
            "detection.frequency_band requires 0 <= low < high, got [{}, {}]",
            band.low, band.high
        )));
    }

    Ok(())
}

fn validate_aggregation(config: &Config) -> Result<()> {
    let window_size = config.aggregation.window_size;
    if !(window_size > 0.0 && window_size.is_finite()) {
        return Err(invalid(format!(
            "aggregation.window_size must be positive, got {window_size}"
        )));
    }

    if config.compare.smoothing_window == 0 {
        return Err(invalid(
            "compare.smoothing_window must be at least 1".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_zero_short_term() {
        let mut config = Config::default();
        config.processing.short_term_duration = 0.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_chunk_shorter_than_frame() {
        let mut config = Config::default();
        config.processing.mid_term_duration = 0.001;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_negative_threshold() {
        let mut config = Config::default();
        config.detection.threshold = -0.1;
        assert!(matches!(
            validate_config(&config),
            Err(Error::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_validate_zero_threshold_allowed() {
        let mut config = Config::default();
        config.detection.threshold = 0.0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_inverted_band() {
        let mut config = Config::default();
        config.detection.frequency_band.low = 10_000.0;
        config.detection.frequency_band.high = 5_000.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_nan_window() {
        let mut config = Config::default();
        config.aggregation.window_size = f64::NAN;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_smoothing_window() {
        let mut config = Config::default();
        config.compare.smoothing_window = 0;
        assert!(validate_config(&config).is_err());
    }
}
