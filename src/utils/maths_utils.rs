//! Small numeric helpers used by the indicator computations.

/// Percentile with linear interpolation between ranks.
/// `p` is in [0, 100]. NaN entries are ignored; returns NaN when nothing
/// valid remains.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    let mut valid: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if valid.is_empty() {
        return f64::NAN;
    }
    valid.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = (p / 100.0).clamp(0.0, 1.0) * (valid.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        valid[lo]
    } else {
        let frac = rank - lo as f64;
        valid[lo] + (valid[hi] - valid[lo]) * frac
    }
}

/// Ordinary least squares fit y = offset + scale * x.
/// Returns (scale, offset), or None with fewer than two valid points or a
/// degenerate x spread.
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> Option<(f64, f64)> {
    debug_assert_eq!(xs.len(), ys.len());

    let mut n = 0.0;
    let (mut sx, mut sy, mut sxx, mut sxy) = (0.0, 0.0, 0.0, 0.0);
    for (&x, &y) in xs.iter().zip(ys) {
        if x.is_finite() && y.is_finite() {
            n += 1.0;
            sx += x;
            sy += y;
            sxx += x * x;
            sxy += x * y;
        }
    }
    if n < 2.0 {
        return None;
    }
    let denom = n * sxx - sx * sx;
    if denom.abs() < f64::EPSILON {
        return None;
    }
    let scale = (n * sxy - sx * sy) / denom;
    let offset = (sy - scale * sx) / n;
    Some((scale, offset))
}

/// Mann-Kendall trend test z-score with the usual continuity correction.
/// Returns NaN when fewer than 3 valid observations are present.
pub fn mann_kendall_z(series: &[f64]) -> f64 {
    let valid: Vec<f64> = series.iter().copied().filter(|v| v.is_finite()).collect();
    let n = valid.len();
    if n < 3 {
        return f64::NAN;
    }

    let mut s: i64 = 0;
    for i in 0..n - 1 {
        for j in i + 1..n {
            let diff = valid[j] - valid[i];
            if diff > 0.0 {
                s += 1;
            } else if diff < 0.0 {
                s -= 1;
            }
        }
    }

    let nf = n as f64;
    let variance = nf * (nf - 1.0) * (2.0 * nf + 5.0) / 18.0;
    if variance <= 0.0 {
        return f64::NAN;
    }

    let s = s as f64;
    if s > 0.0 {
        (s - 1.0) / variance.sqrt()
    } else if s < 0.0 {
        (s + 1.0) / variance.sqrt()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_interpolates() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&v, 0.0), 1.0);
        assert_eq!(percentile(&v, 100.0), 4.0);
        assert!((percentile(&v, 50.0) - 2.5).abs() < 1e-12);
        assert!((percentile(&v, 90.0) - 3.7).abs() < 1e-12);
    }

    #[test]
    fn percentile_skips_nan() {
        let v = [f64::NAN, 10.0, 20.0];
        assert!((percentile(&v, 50.0) - 15.0).abs() < 1e-12);
        assert!(percentile(&[f64::NAN], 50.0).is_nan());
    }

    #[test]
    fn linear_fit_recovers_line() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [1.0, 3.0, 5.0, 7.0];
        let (scale, offset) = linear_fit(&xs, &ys).unwrap();
        assert!((scale - 2.0).abs() < 1e-12);
        assert!((offset - 1.0).abs() < 1e-12);
    }

    #[test]
    fn linear_fit_rejects_degenerate_input() {
        assert!(linear_fit(&[1.0], &[2.0]).is_none());
        assert!(linear_fit(&[2.0, 2.0], &[1.0, 5.0]).is_none());
    }

    #[test]
    fn mann_kendall_detects_monotonic_trends() {
        let up: Vec<f64> = (0..15).map(|i| i as f64).collect();
        let down: Vec<f64> = (0..15).map(|i| -(i as f64)).collect();
        assert!(mann_kendall_z(&up) > 1.96);
        assert!(mann_kendall_z(&down) < -1.96);
    }

    #[test]
    fn mann_kendall_flat_series_is_zero() {
        let flat = [5.0; 12];
        assert_eq!(mann_kendall_z(&flat), 0.0);
        assert!(mann_kendall_z(&[1.0, 2.0]).is_nan());
    }
}
