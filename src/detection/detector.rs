//! Chunked click detection over one audio stream.

use crate::audio::{AudioSegmentReader, MemorySource, SegmentSource};
use crate::config::Config;
use crate::detection::BandSpectrum;
use crate::detection::features::{
    click_frames, high_frequency_content, onset_detection_function, spectral_flux,
};
use crate::error::{Error, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Detections found in one mid-term chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkDetections {
    /// First sample of the chunk within the file.
    pub start_sample: u64,
    /// Onset detection function, one value per short-term frame.
    pub odf: Vec<f64>,
    /// Absolute times (seconds from file start) of frames at or above threshold.
    pub events: Vec<f64>,
}

/// Onset-detection click detector for audio at one sample rate.
///
/// Holds the planned transform so that every chunk of a file, and every file
/// sharing a sample rate, reuses it.
#[derive(Debug)]
pub struct ClickDetector {
    sample_rate: u32,
    chunk_len: usize,
    short_term_duration: f64,
    threshold: f64,
    spectrum: BandSpectrum,
}

impl ClickDetector {
    /// Build a detector from the run configuration.
    ///
    /// Frame and chunk lengths are `short_term_duration × fs` and
    /// `mid_term_duration × fs`, truncated to whole samples.
    pub fn new(config: &Config, sample_rate: u32) -> Result<Self> {
        let fs = f64::from(sample_rate);
        let frame_len = whole_samples(config.processing.short_term_duration * fs);
        let chunk_len = whole_samples(config.processing.mid_term_duration * fs);

        if frame_len == 0 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "short_term_duration {}s is shorter than one sample at {sample_rate} Hz",
                    config.processing.short_term_duration
                ),
            });
        }

        let band = config.detection.frequency_band;
        let spectrum = BandSpectrum::new(frame_len, sample_rate, band)?;
        if spectrum.band_bin_count() == 0 {
            warn!(
                "No FFT bins fall inside [{}, {}] Hz at {sample_rate} Hz; nothing can be detected",
                band.low, band.high
            );
        }

        debug!(
            "Detector: fs={sample_rate} Hz, frame={frame_len} samples, chunk={chunk_len} samples, {} band bins",
            spectrum.band_bin_count()
        );

        Ok(Self {
            sample_rate,
            chunk_len,
            short_term_duration: config.processing.short_term_duration,
            threshold: config.detection.threshold,
            spectrum,
        })
    }

    /// Sample rate this detector was built for.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Short-term frame length (FFT size and hop) in samples.
    pub fn frame_len(&self) -> usize {
        self.spectrum.frame_len()
    }

    /// Mid-term chunk length in samples.
    pub fn chunk_len(&self) -> usize {
        self.chunk_len
    }

    /// Transform and score one chunk that starts at `start_sample`.
    pub fn detect_chunk(&mut self, chunk: &[f64], start_sample: u64) -> Result<ChunkDetections> {
        let frames = self.spectrum.magnitudes(chunk)?;
        let odf = onset_detection_function(
            &spectral_flux(&frames),
            &high_frequency_content(&frames),
        );

        #[allow(clippy::cast_precision_loss)]
        let chunk_time = start_sample as f64 / f64::from(self.sample_rate);
        #[allow(clippy::cast_precision_loss)]
        let events = click_frames(&odf, self.threshold)
            .into_iter()
            .map(|frame| chunk_time + frame as f64 * self.short_term_duration)
            .collect();

        Ok(ChunkDetections {
            start_sample,
            odf,
            events,
        })
    }

    /// Iterate over the chunks of `source`, one set of detections per chunk.
    pub fn scan<'a, S: SegmentSource>(&'a mut self, source: &'a mut S) -> ChunkScanner<'a, S> {
        ChunkScanner {
            detector: self,
            source,
            state: ScanState::Init,
        }
    }

    /// Run the whole chunk loop and return the ascending event times.
    pub fn detect<S: SegmentSource>(&mut self, source: &mut S) -> Result<Vec<f64>> {
        let mut events = Vec::new();
        for chunk in self.scan(source) {
            events.extend(chunk?.events);
        }
        // Frame times use the nominal frame duration while chunks start at
        // exact sample offsets; the two can interleave when W was truncated.
        events.sort_by(f64::total_cmp);
        Ok(events)
    }

    /// Run the chunk loop over an in-memory signal at this detector's rate.
    pub fn detect_samples(&mut self, samples: &[f64]) -> Result<Vec<f64>> {
        let mut source = MemorySource::new(samples, self.sample_rate);
        self.detect(&mut source)
    }
}

/// Detect clicks in one audio file.
///
/// A file whose sample rate cannot be read yields no events and a warning
/// rather than an error, so one bad file never stops a batch.
pub fn detect_clicks(path: &Path, config: &Config) -> Result<Vec<f64>> {
    let mut reader = match AudioSegmentReader::open(path) {
        Ok(reader) => reader,
        Err(e) => {
            warn!("Could not read sample rate for {}: {e}", path.display());
            return Ok(Vec::new());
        }
    };

    let mut detector = ClickDetector::new(config, reader.sample_rate())?;
    detector.detect(&mut reader)
}

/// Position of the chunk loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Nothing read yet.
    Init,
    /// Next chunk starts at this sample.
    ReadingChunk { start_sample: u64 },
    /// The source ran out of whole chunks.
    Done,
}

/// Iterator driving `ReadingChunk → Transforming → Scoring` per chunk.
///
/// Fails up front when the source rate differs from the detector's. Ends
/// when the source cannot supply a whole chunk or the chunk is shorter than
/// one frame. Chunks never overlap and leftover samples are dropped.
/// Each chunk is scored independently, so its first frame copies the flux of
/// its second instead of differencing against the previous chunk.
#[derive(Debug)]
pub struct ChunkScanner<'a, S> {
    detector: &'a mut ClickDetector,
    source: &'a mut S,
    state: ScanState,
}

impl<S: SegmentSource> Iterator for ChunkScanner<'_, S> {
    type Item = Result<ChunkDetections>;

    fn next(&mut self) -> Option<Self::Item> {
        let start_sample = match self.state {
            ScanState::Init => {
                let actual = self.source.sample_rate();
                if actual != self.detector.sample_rate() {
                    self.state = ScanState::Done;
                    return Some(Err(Error::SampleRateMismatch {
                        expected: self.detector.sample_rate(),
                        actual,
                    }));
                }
                0
            }
            ScanState::ReadingChunk { start_sample } => start_sample,
            ScanState::Done => return None,
        };

        let chunk_len = self.detector.chunk_len();
        let chunk = match self.source.segment(start_sample, chunk_len) {
            Ok(Some(chunk)) if chunk.len() >= self.detector.frame_len() => chunk,
            Ok(_) => {
                self.state = ScanState::Done;
                return None;
            }
            Err(e) => {
                self.state = ScanState::Done;
                return Some(Err(e));
            }
        };

        self.state = ScanState::ReadingChunk {
            start_sample: start_sample + chunk_len as u64,
        };
        Some(self.detector.detect_chunk(&chunk, start_sample))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_samples(value: f64) -> usize {
    if value.is_finite() && value > 0.0 {
        value as usize
    } else {
        0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    const FS: u32 = 44_100;

    fn signal_with_impulses(seconds: f64, impulses: &[f64]) -> Vec<f64> {
        let len = whole_samples(seconds * f64::from(FS));
        let mut samples = vec![0.0; len];
        for &t in impulses {
            samples[whole_samples((t * f64::from(FS)).round())] = 1.0;
        }
        samples
    }

    fn detect(samples: &[f64], config: &Config) -> Vec<f64> {
        let mut detector = ClickDetector::new(config, FS).unwrap();
        detector.detect_samples(samples).unwrap()
    }

    #[test]
    fn test_frame_and_chunk_lengths() {
        let detector = ClickDetector::new(&Config::default(), FS).unwrap();
        assert_eq!(detector.frame_len(), 220);
        assert_eq!(detector.chunk_len(), 44_100);
    }

    #[test]
    fn test_silence_yields_no_events() {
        let samples = vec![0.0; 3 * 44_100];
        assert!(detect(&samples, &Config::default()).is_empty());
    }

    #[test]
    fn test_impulses_inside_chunks_detected_once() {
        let samples = signal_with_impulses(10.0, &[2.5, 7.3]);
        let events = detect(&samples, &Config::default());
        assert_eq!(events.len(), 2);
        assert!((events[0] - 2.5).abs() <= 0.005);
        assert!((events[1] - 7.3).abs() <= 0.005);
    }

    #[test]
    fn test_impulse_on_chunk_start_is_lost() {
        // Frame 0 of every chunk copies frame 1, and frame 1 sees only the
        // decay of an impulse centred on frame 0.
        let samples = signal_with_impulses(4.0, &[2.0]);
        assert!(detect(&samples, &Config::default()).is_empty());
    }

    #[test]
    fn test_chunk_start_click_dropped_from_pair() {
        // Of clicks at 2.0 s and 7.3 s only the one inside a chunk survives.
        let samples = signal_with_impulses(10.0, &[2.0, 7.3]);
        let events = detect(&samples, &Config::default());
        assert_eq!(events.len(), 1);
        assert!((events[0] - 7.3).abs() <= 0.005);
    }

    #[test]
    fn test_second_frame_detection_duplicates_into_first() {
        // An impulse in frame 1 of a chunk is reported for frames 0 and 1.
        let samples = signal_with_impulses(3.0, &[1.005]);
        let events = detect(&samples, &Config::default());
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], 1.0);
        assert!((events[1] - 1.005).abs() < 1e-9);
    }

    #[test]
    fn test_trailing_partial_chunk_dropped() {
        let samples = signal_with_impulses(2.9, &[2.5]);
        assert!(detect(&samples, &Config::default()).is_empty());
    }

    #[test]
    fn test_scanner_yields_one_item_per_whole_chunk() {
        let samples = vec![0.0; 44_100 * 3 + 100];
        let mut detector = ClickDetector::new(&Config::default(), FS).unwrap();
        let mut source = MemorySource::new(&samples, FS);
        let chunks: Vec<ChunkDetections> =
            detector.scan(&mut source).map(Result::unwrap).collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].start_sample, 88_200);
        assert_eq!(chunks[0].odf.len(), 200);
    }

    #[test]
    fn test_source_rate_must_match_detector() {
        let samples = vec![0.0; 3 * 48_000];
        let mut detector = ClickDetector::new(&Config::default(), FS).unwrap();
        let mut source = MemorySource::new(&samples, 48_000);

        assert!(matches!(
            detector.detect(&mut source),
            Err(Error::SampleRateMismatch {
                expected: 44_100,
                actual: 48_000
            })
        ));
        assert_eq!(detector.scan(&mut source).count(), 1);
    }

    #[test]
    fn test_chunk_shorter_than_frame_stops_scan() {
        let mut config = Config::default();
        config.processing.short_term_duration = 0.01;
        config.processing.mid_term_duration = 0.005;
        let samples = vec![0.0; 44_100];
        let mut detector = ClickDetector::new(&config, FS).unwrap();
        let mut source = MemorySource::new(&samples, FS);
        assert_eq!(detector.scan(&mut source).count(), 0);
    }

    #[test]
    fn test_threshold_above_peak_suppresses_events() {
        let mut config = Config::default();
        config.detection.threshold = 10.0;
        let samples = signal_with_impulses(4.0, &[2.5]);
        assert!(detect(&samples, &config).is_empty());
    }

    #[test]
    fn test_detection_is_deterministic() {
        let samples: Vec<f64> = (0..5 * 44_100)
            .map(|i| {
                let t = f64::from(i);
                0.3 * (t * 0.91).sin() * (t * 0.0007).cos() + if i % 9_973 == 0 { 0.8 } else { 0.0 }
            })
            .collect();
        let config = Config::default();
        assert_eq!(detect(&samples, &config), detect(&samples, &config));
    }

    #[test]
    fn test_steady_out_of_band_tone_ignored() {
        let samples: Vec<f64> = (0..3 * 44_100)
            .map(|i| (2.0 * std::f64::consts::PI * 1000.0 * f64::from(i) / 44_100.0).sin())
            .collect();
        let mut config = Config::default();
        config.detection.frequency_band.low = 15_000.0;
        config.detection.threshold = 0.05;
        assert!(detect(&samples, &config).is_empty());
    }

    #[test]
    fn test_unreadable_file_yields_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.wav");
        assert!(detect_clicks(&path, &Config::default()).unwrap().is_empty());
    }

    #[test]
    fn test_frame_shorter_than_sample_rejected() {
        let mut config = Config::default();
        config.processing.short_term_duration = 1e-6;
        assert!(ClickDetector::new(&config, 8_000).is_err());
    }
}
