//! Sources of contiguous mono sample ranges.

use crate::audio::AudioSegmentReader;
use crate::error::{Error, Result};

/// Anything the click detector can pull fixed-size chunks from.
pub trait SegmentSource {
    /// Sample rate in Hz.
    fn sample_rate(&self) -> u32;

    /// Read `num_samples` samples starting at `start_sample`.
    ///
    /// Returns `Ok(None)` when fewer than `num_samples` remain.
    fn segment(&mut self, start_sample: u64, num_samples: usize) -> Result<Option<Vec<f64>>>;
}

impl SegmentSource for AudioSegmentReader {
    fn sample_rate(&self) -> u32 {
        Self::sample_rate(self)
    }

    fn segment(&mut self, start_sample: u64, num_samples: usize) -> Result<Option<Vec<f64>>> {
        match self.read_segment(start_sample, num_samples) {
            Ok(samples) => Ok(Some(samples)),
            Err(Error::InsufficientAudio { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// A signal already held in memory.
#[derive(Debug, Clone, Copy)]
pub struct MemorySource<'a> {
    samples: &'a [f64],
    sample_rate: u32,
}

impl<'a> MemorySource<'a> {
    /// Wrap a mono signal.
    pub fn new(samples: &'a [f64], sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }
}

impl SegmentSource for MemorySource<'_> {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn segment(&mut self, start_sample: u64, num_samples: usize) -> Result<Option<Vec<f64>>> {
        let Ok(start) = usize::try_from(start_sample) else {
            return Ok(None);
        };
        Ok(start
            .checked_add(num_samples)
            .and_then(|end| self.samples.get(start..end))
            .map(<[f64]>::to_vec))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_all_or_nothing() {
        let samples = [1.0, 2.0, 3.0, 4.0];
        let mut source = MemorySource::new(&samples, 10);
        assert_eq!(source.segment(1, 2).unwrap(), Some(vec![2.0, 3.0]));
        assert_eq!(source.segment(2, 2).unwrap(), Some(vec![3.0, 4.0]));
        assert_eq!(source.segment(3, 2).unwrap(), None);
        assert_eq!(source.sample_rate(), 10);
    }
}
