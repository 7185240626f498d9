//! Random-access mono sample reading using hound.

use crate::error::{Error, Result};
use hound::{SampleFormat, WavReader};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Reads arbitrary sample ranges from a WAV file without decoding all of it.
///
/// The file is opened once; every [`read_segment`](Self::read_segment) call
/// seeks to the requested frame. Multi-channel files are reduced to their
/// first channel.
pub struct AudioSegmentReader {
    path: PathBuf,
    reader: WavReader<BufReader<File>>,
}

impl std::fmt::Debug for AudioSegmentReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioSegmentReader")
            .field("path", &self.path)
            .field("spec", &self.reader.spec())
            .finish_non_exhaustive()
    }
}

impl AudioSegmentReader {
    /// Open an audio file for segment reads.
    pub fn open(path: &Path) -> Result<Self> {
        let reader = WavReader::open(path).map_err(|e| Error::AudioOpen {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            reader,
        })
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.reader.spec().sample_rate
    }

    /// Number of channels in the file.
    pub fn channels(&self) -> u16 {
        self.reader.spec().channels
    }

    /// Total number of frames (samples per channel).
    pub fn total_frames(&self) -> u64 {
        u64::from(self.reader.duration())
    }

    /// Duration in seconds, derived from the frame count and sample rate.
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_secs(&self) -> f64 {
        self.total_frames() as f64 / f64::from(self.sample_rate())
    }

    /// Read exactly `num_samples` mono samples starting at frame `start_sample`.
    ///
    /// The read is all-or-nothing: if the range extends past the end of the
    /// file, [`Error::InsufficientAudio`] is returned and nothing is read.
    /// Integer PCM is scaled to `[-1.0, 1.0)`.
    pub fn read_segment(&mut self, start_sample: u64, num_samples: usize) -> Result<Vec<f64>> {
        let available = self.total_frames();
        let end = start_sample.saturating_add(num_samples as u64);
        if end > available {
            return Err(self.insufficient(start_sample, num_samples));
        }

        // `end <= available`, and hound frame counts are u32.
        let start = u32::try_from(start_sample)
            .map_err(|_| self.insufficient(start_sample, num_samples))?;
        self.reader.seek(start)?;

        let spec = self.reader.spec();
        let channels = usize::from(spec.channels.max(1));
        let wanted = num_samples * channels;
        let mut samples = Vec::with_capacity(num_samples);

        match spec.sample_format {
            SampleFormat::Float => {
                for (i, sample) in self.reader.samples::<f32>().take(wanted).enumerate() {
                    let sample = sample.map_err(|e| Error::AudioDecode {
                        path: self.path.clone(),
                        source: e,
                    })?;
                    if i % channels == 0 {
                        samples.push(f64::from(sample));
                    }
                }
            }
            SampleFormat::Int => {
                let scale = 2f64.powi(i32::from(spec.bits_per_sample) - 1);
                for (i, sample) in self.reader.samples::<i32>().take(wanted).enumerate() {
                    let sample = sample.map_err(|e| Error::AudioDecode {
                        path: self.path.clone(),
                        source: e,
                    })?;
                    if i % channels == 0 {
                        samples.push(f64::from(sample) / scale);
                    }
                }
            }
        }

        // Truncated data chunk: the header promised more frames than exist.
        if samples.len() < num_samples {
            return Err(self.insufficient(start_sample, num_samples));
        }

        Ok(samples)
    }

    fn insufficient(&self, start: u64, requested: usize) -> Error {
        Error::InsufficientAudio {
            path: self.path.clone(),
            start,
            requested,
            available: self.total_frames(),
        }
    }
}

/// Read only the sample rate of an audio file.
pub fn probe_sample_rate(path: &Path) -> Result<u32> {
    AudioSegmentReader::open(path).map(|reader| reader.sample_rate())
}
