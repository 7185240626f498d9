//! Gap filling and zero-phase smoothing of count series.

/// Fill `None` gaps with a quadratic interpolating spline through the
/// defined values. Leading and trailing gaps take the nearest defined value.
///
/// With fewer than three defined values the gaps are filled by linear
/// interpolation instead. Returns `None` when the series has no defined
/// value at all.
pub fn impute_gaps(values: &[Option<f64>]) -> Option<Vec<f64>> {
    #[allow(clippy::cast_precision_loss)]
    let defined: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i as f64, v)))
        .collect();

    let (&(_, first), &(_, last)) = (defined.first()?, defined.last()?);
    let spline = QuadraticSpline::fit(&defined);

    let mut seen = 0;
    #[allow(clippy::cast_precision_loss)]
    let filled = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if let Some(v) = *v {
                seen += 1;
                return v;
            }
            if seen == 0 {
                return first;
            }
            if seen == defined.len() {
                return last;
            }
            let x = i as f64;
            match &spline {
                Some(spline) => spline.eval(x),
                None => {
                    let ((x0, y0), (x1, y1)) = (defined[seen - 1], defined[seen]);
                    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
                }
            }
        })
        .collect();
    Some(filled)
}

/// Quadratic B-spline through a set of points.
///
/// Knots sit at the end points (with multiplicity three) and midway between
/// every pair of neighbouring points except the first and last pair, which
/// leaves exactly one coefficient per point.
#[derive(Debug)]
struct QuadraticSpline {
    knots: Vec<f64>,
    coefficients: Vec<f64>,
}

impl QuadraticSpline {
    /// Interpolate `points`, whose x values must be strictly increasing.
    ///
    /// Needs at least three points.
    fn fit(points: &[(f64, f64)]) -> Option<Self> {
        let n = points.len();
        if n < 3 {
            return None;
        }

        let (x_first, x_last) = (points[0].0, points[n - 1].0);
        let mut knots = Vec::with_capacity(n + 3);
        knots.extend([x_first; 3]);
        knots.extend(points[1..n - 1].windows(2).map(|w| (w[0].0 + w[1].0) / 2.0));
        knots.extend([x_last; 3]);

        let mut spline = Self {
            knots,
            coefficients: Vec::new(),
        };

        // Collocation at point i only touches coefficients i - 1 ..= i + 1,
        // and the end points touch just their own coefficient.
        let mut sub = vec![0.0; n];
        let mut diag = vec![1.0; n];
        let mut sup = vec![0.0; n];
        for i in 1..n - 1 {
            [sub[i], diag[i], sup[i]] = spline.basis(i + 1, points[i].0);
        }

        let mut rhs: Vec<f64> = points.iter().map(|&(_, y)| y).collect();
        for i in 1..n {
            let w = sub[i] / diag[i - 1];
            diag[i] -= w * sup[i - 1];
            rhs[i] -= w * rhs[i - 1];
        }

        let mut coefficients = vec![0.0; n];
        coefficients[n - 1] = rhs[n - 1] / diag[n - 1];
        for i in (0..n - 1).rev() {
            coefficients[i] = (rhs[i] - sup[i] * coefficients[i + 1]) / diag[i];
        }

        if !coefficients.iter().all(|c| c.is_finite()) {
            return None;
        }
        spline.coefficients = coefficients;
        Some(spline)
    }

    /// Spline value at `x`, which must lie within the fitted range.
    fn eval(&self, x: f64) -> f64 {
        let span = self.interval(x);
        self.basis(span, x)
            .iter()
            .zip(&self.coefficients[span - 2..=span])
            .map(|(b, c)| b * c)
            .sum()
    }

    /// Index `m` of the knot span `[t_m, t_m+1)` holding `x`.
    fn interval(&self, x: f64) -> usize {
        let interior = &self.knots[3..self.knots.len() - 3];
        2 + interior.partition_point(|&k| k <= x)
    }

    /// The three basis functions that are non-zero on knot span `span`,
    /// evaluated at `x` (Cox-de Boor recursion).
    fn basis(&self, span: usize, x: f64) -> [f64; 3] {
        let t = &self.knots;
        let mut values = [1.0, 0.0, 0.0];
        let mut left = [0.0; 3];
        let mut right = [0.0; 3];

        for degree in 1..=2 {
            left[degree] = x - t[span + 1 - degree];
            right[degree] = t[span + degree] - x;
            let mut saved = 0.0;
            for r in 0..degree {
                let temp = values[r] / (right[r + 1] + left[degree - r]);
                values[r] = saved + right[r + 1] * temp;
                saved = left[degree - r] * temp;
            }
            values[degree] = saved;
        }
        values
    }
}

/// Zero-phase moving average: a `taps`-point box filter run forward, then
/// backward over the forward output.
///
/// Each pass starts in the steady state of its first input sample, as if
/// that sample had been repeated forever before the series began. A
/// constant series is therefore returned unchanged.
pub fn smooth_zero_phase(values: &[f64], taps: usize) -> Vec<f64> {
    if taps <= 1 {
        return values.to_vec();
    }

    let mut forward = box_filter(values, taps);
    forward.reverse();
    let mut backward = box_filter(&forward, taps);
    backward.reverse();
    backward
}

fn box_filter(values: &[f64], taps: usize) -> Vec<f64> {
    let Some(&initial) = values.first() else {
        return Vec::new();
    };

    #[allow(clippy::cast_precision_loss)]
    let scale = 1.0 / taps as f64;
    let mut sum = initial * taps as f64;
    // Ring of the last `taps` inputs, pre-filled with the initial value.
    let mut history = vec![initial; taps];

    values
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let slot = i % taps;
            sum += x - history[slot];
            history[slot] = x;
            sum * scale
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_impute_reproduces_quadratic_trend() {
        let trend = |x: f64| 0.5 * x * x - 3.0 * x + 2.0;
        let gaps = [2, 5, 6, 10, 11];
        let values: Vec<Option<f64>> = (0..13u32)
            .map(|i| (!gaps.contains(&i)).then(|| trend(f64::from(i))))
            .collect();

        let filled = impute_gaps(&values).unwrap();
        let expected: Vec<f64> = (0..13u32).map(|i| trend(f64::from(i))).collect();
        assert_close(&filled, &expected);
    }

    #[test]
    fn test_impute_three_points_is_single_parabola() {
        let filled = impute_gaps(&[Some(1.0), None, Some(4.0), None, None, Some(2.0)]).unwrap();
        assert_close(&filled, &[1.0, 44.0 / 15.0, 4.0, 4.2, 53.0 / 15.0, 2.0]);
    }

    #[test]
    fn test_impute_seam_gap_between_counts() {
        let counts = [3.0, 1.0, 4.0, 1.0, -1.0, 5.0, 9.0, 2.0];
        let values: Vec<Option<f64>> = counts.iter().map(|&c| (c >= 0.0).then_some(c)).collect();
        let filled = impute_gaps(&values).unwrap();
        assert_close(&filled[..4], &[3.0, 1.0, 4.0, 1.0]);
        assert!((filled[4] - 146.0 / 121.0).abs() < 1e-9);
        assert_close(&filled[5..], &[5.0, 9.0, 2.0]);
    }

    #[test]
    fn test_impute_two_points_falls_back_to_linear() {
        let filled = impute_gaps(&[Some(1.0), None, None, Some(4.0)]).unwrap();
        assert_close(&filled, &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_impute_edges_take_nearest_value() {
        let filled = impute_gaps(&[None, Some(2.0), Some(6.0), Some(5.0), None, None]).unwrap();
        assert_close(&filled, &[2.0, 2.0, 6.0, 5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_impute_all_null_and_empty() {
        assert!(impute_gaps(&[None, None]).is_none());
        assert!(impute_gaps(&[]).is_none());
    }

    #[test]
    fn test_impute_single_value() {
        assert_close(&impute_gaps(&[None, Some(3.0), None]).unwrap(), &[3.0; 3]);
    }

    #[test]
    fn test_smoothing_preserves_constant_series() {
        let values = vec![4.0; 17];
        assert_close(&smooth_zero_phase(&values, 5), &values);
    }

    #[test]
    fn test_smoothing_preserves_sum_of_spike_shape() {
        let mut values = vec![0.0; 21];
        values[10] = 25.0;
        let smoothed = smooth_zero_phase(&values, 5);

        // Forward and backward box filters compose into a symmetric triangle.
        assert!((smoothed[10] - 5.0).abs() < 1e-9);
        assert!((smoothed[8] - smoothed[12]).abs() < 1e-9);
        assert!((smoothed.iter().sum::<f64>() - 25.0).abs() < 1e-9);
        assert!(smoothed[5].abs() < 1e-12);
    }

    #[test]
    fn test_single_tap_and_short_series() {
        assert_close(&smooth_zero_phase(&[1.0, 5.0, 2.0], 1), &[1.0, 5.0, 2.0]);
        assert!(smooth_zero_phase(&[], 5).is_empty());
        assert_close(&smooth_zero_phase(&[7.0], 5), &[7.0]);
    }
}
