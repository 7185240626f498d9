//! Band-limited short-time magnitude spectrum.

use crate::config::FrequencyBand;
use crate::error::{Error, Result};
use realfft::num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// Non-overlapping, Hann-windowed one-sided STFT restricted to a band.
///
/// The FFT length equals the hop, so frames never overlap. Frame `i` is
/// centred on sample `i * frame_len` of the chunk; the half window that
/// falls before the chunk start is zero.
pub struct BandSpectrum {
    frame_len: usize,
    fft: Arc<dyn RealToComplex<f64>>,
    window: Vec<f64>,
    band_bins: Vec<usize>,
    input: Vec<f64>,
    output: Vec<Complex<f64>>,
}

impl std::fmt::Debug for BandSpectrum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BandSpectrum")
            .field("frame_len", &self.frame_len)
            .field("band_bins", &self.band_bins.len())
            .finish_non_exhaustive()
    }
}

impl BandSpectrum {
    /// Plan a transform of `frame_len` points for audio at `sample_rate`.
    pub fn new(frame_len: usize, sample_rate: u32, band: FrequencyBand) -> Result<Self> {
        if frame_len == 0 {
            return Err(Error::Spectrum {
                reason: "frame length must be at least one sample".to_string(),
            });
        }

        let mut planner = RealFftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(frame_len);
        let band_bins = bin_frequencies(frame_len, sample_rate)
            .enumerate()
            .filter(|&(_, freq)| band.contains(freq))
            .map(|(bin, _)| bin)
            .collect();

        Ok(Self {
            frame_len,
            input: fft.make_input_vec(),
            output: fft.make_output_vec(),
            fft,
            window: hann_periodic(frame_len),
            band_bins,
        })
    }

    /// FFT size and hop in samples.
    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// Number of FFT bins inside the band.
    pub fn band_bin_count(&self) -> usize {
        self.band_bins.len()
    }

    /// Number of whole frames a chunk of `len` samples yields.
    pub fn frame_count(&self, len: usize) -> usize {
        len / self.frame_len
    }

    /// Band-restricted magnitudes of every frame of `chunk`, frame-major.
    pub fn magnitudes(&mut self, chunk: &[f64]) -> Result<Vec<Vec<f64>>> {
        let half = self.frame_len / 2;
        let frames = self.frame_count(chunk.len());
        let mut spectrogram = Vec::with_capacity(frames);

        for frame in 0..frames {
            let centre = frame * self.frame_len;
            for (j, slot) in self.input.iter_mut().enumerate() {
                *slot = (centre + j)
                    .checked_sub(half)
                    .and_then(|k| chunk.get(k))
                    .map_or(0.0, |s| s * self.window[j]);
            }

            self.fft
                .process(&mut self.input, &mut self.output)
                .map_err(|e| Error::Spectrum {
                    reason: e.to_string(),
                })?;

            spectrogram.push(
                self.band_bins
                    .iter()
                    .map(|&bin| self.output[bin].norm())
                    .collect(),
            );
        }

        Ok(spectrogram)
    }
}

/// Centre frequencies of the one-sided bins of a `frame_len`-point FFT.
#[allow(clippy::cast_precision_loss)]
pub fn bin_frequencies(frame_len: usize, sample_rate: u32) -> impl Iterator<Item = f64> {
    let resolution = f64::from(sample_rate) / frame_len as f64;
    (0..=frame_len / 2).map(move |bin| bin as f64 * resolution)
}

/// Periodic Hann window (the DFT-even form used for spectral analysis).
fn hann_periodic(len: usize) -> Vec<f64> {
    #[allow(clippy::cast_precision_loss)]
    let n = len as f64;
    (0..len)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let phase = 2.0 * std::f64::consts::PI * i as f64 / n;
            0.5 * (1.0 - phase.cos())
        })
        .collect()
}
