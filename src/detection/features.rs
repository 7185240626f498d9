//! Onset detection sub-features.
//!
//! Both features take a band-restricted magnitude spectrogram stored
//! frame-major (`frames[t][bin]`) and return one value per frame, compressed
//! with `log10(x + 1)`. They are pure: a spectrogram split into gapless
//! chunks gives the same values as the whole, except at each chunk's first
//! frame, which copies its second because it has no predecessor.

/// Spectral flux: summed positive magnitude increase from the previous frame.
pub fn spectral_flux(frames: &[Vec<f64>]) -> Vec<f64> {
    let mut flux: Vec<f64> = std::iter::once(0.0)
        .chain(frames.windows(2).map(|pair| {
            pair[1]
                .iter()
                .zip(&pair[0])
                .map(|(cur, prev)| (cur - prev).max(0.0))
                .sum::<f64>()
        }))
        .take(frames.len())
        .collect();

    copy_second_into_first(&mut flux);
    flux.into_iter().map(compress).collect()
}

/// High-frequency content: positive first difference of the band energy sum.
pub fn high_frequency_content(frames: &[Vec<f64>]) -> Vec<f64> {
    let sums: Vec<f64> = frames.iter().map(|frame| frame.iter().sum()).collect();

    let mut rise: Vec<f64> = std::iter::once(0.0)
        .chain(sums.windows(2).map(|pair| (pair[1] - pair[0]).max(0.0)))
        .take(sums.len())
        .collect();

    copy_second_into_first(&mut rise);
    rise.into_iter().map(compress).collect()
}

/// Combine the sub-features into the onset detection function.
///
/// The product is zero whenever either feature is zero, so a click needs
/// both a rising transient and rising band energy in the same frame.
pub fn onset_detection_function(flux: &[f64], hfc: &[f64]) -> Vec<f64> {
    flux.iter()
        .zip(hfc)
        .map(|(sf, hfc)| compress(sf * hfc))
        .collect()
}

/// Indices of frames whose ODF reaches the threshold (inclusive).
pub fn click_frames(odf: &[f64], threshold: f64) -> Vec<usize> {
    odf.iter()
        .enumerate()
        .filter(|&(_, &score)| score >= threshold)
        .map(|(i, _)| i)
        .collect()
}

fn compress(value: f64) -> f64 {
    (value + 1.0).log10()
}

/// Frame 0 has no predecessor; with a single frame there is nothing to copy
/// and the value stays 0.
fn copy_second_into_first(values: &mut [f64]) {
    if let [first, second, ..] = values {
        *first = *second;
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn log1p10(x: f64) -> f64 {
        (x + 1.0).log10()
    }

    #[test]
    fn test_spectral_flux_positive_part_only() {
        let frames = vec![vec![1.0, 1.0], vec![3.0, 0.0], vec![2.0, 4.0]];
        let flux = spectral_flux(&frames);
        // t1: (3-1) + max(0, 0-1) = 2; t2: max(0,-1) + 4 = 4; t0 copies t1.
        assert_eq!(flux, vec![log1p10(2.0), log1p10(2.0), log1p10(4.0)]);
    }

    #[test]
    fn test_hfc_positive_difference() {
        let frames = vec![vec![1.0, 1.0], vec![3.0, 0.0], vec![0.5, 0.5]];
        let hfc = high_frequency_content(&frames);
        // sums 2, 3, 1 -> diffs 1, -2 -> rectified 1, 0; t0 copies t1.
        assert_eq!(hfc, vec![log1p10(1.0), log1p10(1.0), 0.0]);
    }

    #[test]
    fn test_single_and_empty_spectrogram() {
        assert!(spectral_flux(&[]).is_empty());
        assert!(high_frequency_content(&[]).is_empty());
        assert_eq!(spectral_flux(&[vec![5.0]]), vec![0.0]);
        assert_eq!(high_frequency_content(&[vec![5.0]]), vec![0.0]);
    }

    #[test]
    fn test_features_agree_across_chunking_after_first_frame() {
        let frames: Vec<Vec<f64>> = (0..12)
            .map(|t| {
                let t = f64::from(t);
                vec![(t * 0.7).sin().abs(), (t * 1.3).cos().abs(), t % 3.0]
            })
            .collect();

        let whole_flux = spectral_flux(&frames);
        let whole_hfc = high_frequency_content(&frames);

        for chunk_start in [0, 4, 8] {
            let chunk = &frames[chunk_start..chunk_start + 4];
            let flux = spectral_flux(chunk);
            let hfc = high_frequency_content(chunk);
            for i in 1..4 {
                assert!((flux[i] - whole_flux[chunk_start + i]).abs() < 1e-12);
                assert!((hfc[i] - whole_hfc[chunk_start + i]).abs() < 1e-12);
            }
            assert_eq!(flux[0], flux[1]);
            assert_eq!(hfc[0], hfc[1]);
        }
    }

    #[test]
    fn test_odf_zero_when_either_feature_zero() {
        let odf = onset_detection_function(&[0.0, 1.0, 2.0], &[3.0, 0.0, 1.5]);
        assert_eq!(odf[0], 0.0);
        assert_eq!(odf[1], 0.0);
        assert_eq!(odf[2], log1p10(3.0));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let odf = [0.1, 0.25, 0.2499, 0.3];
        assert_eq!(click_frames(&odf, 0.25), vec![1, 3]);
    }

    #[test]
    fn test_zero_threshold_accepts_silence() {
        assert_eq!(click_frames(&[0.0, 0.0], 0.0), vec![0, 1]);
    }
}
