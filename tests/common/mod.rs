//! Shared fixtures for integration tests.

#![allow(dead_code, clippy::unwrap_used, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::path::Path;

/// Sample rate of every synthesised fixture.
pub const SAMPLE_RATE: u32 = 44_100;

/// Write a silent 16-bit mono WAV with full-scale single-sample impulses.
pub fn write_impulse_wav(path: &Path, seconds: f64, impulses: &[f64]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let rate = f64::from(SAMPLE_RATE);
    let len = (seconds * rate) as usize;
    let impulse_samples: Vec<usize> = impulses
        .iter()
        .map(|t| (t * rate).round() as usize)
        .collect();

    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..len {
        let value = if impulse_samples.contains(&i) { i16::MAX } else { 0 };
        writer.write_sample(value).unwrap();
    }
    writer.finalize().unwrap();
}
