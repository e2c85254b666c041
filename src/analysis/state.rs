//! Productivity state: recent mean VI against the decile distribution of
//! the pixel's own baseline period.

use anyhow::{Result, bail};
use rayon::prelude::*;

use crate::config::ANALYSIS;
use crate::domain::landcover::DegClass;
use crate::domain::period::YearRange;
use crate::domain::raster::{ClassRaster, RasterStack};
use crate::utils::percentile;

fn valid_mean(series: &[f64]) -> Option<f64> {
    let valid: Vec<f64> = series.iter().copied().filter(|v| v.is_finite()).collect();
    (!valid.is_empty()).then(|| valid.iter().sum::<f64>() / valid.len() as f64)
}

/// Decile cut points of the baseline values, with the distribution widened
/// at both ends so a target value slightly outside the observed range still
/// lands in class 1 or 10 rather than off the scale.
fn decile_cuts(baseline: &[f64], extension: f64) -> Option<[f64; 9]> {
    let valid: Vec<f64> = baseline.iter().copied().filter(|v| v.is_finite()).collect();
    if valid.len() < 2 {
        return None;
    }
    let min = valid.iter().copied().fold(f64::INFINITY, f64::min);
    let max = valid.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let ext = (max - min) * extension;

    let mut sample = valid;
    sample.push(min - ext);
    sample.push(max + ext);

    let mut cuts = [0.0; 9];
    for (i, cut) in cuts.iter_mut().enumerate() {
        *cut = percentile(&sample, (i + 1) as f64 * 10.0);
    }
    Some(cuts)
}

/// Decile class of a value, 1 through 10.
fn decile_class(value: f64, cuts: &[f64; 9]) -> i32 {
    cuts.iter().filter(|&&c| value > c).count() as i32 + 1
}

fn classify_pixel(baseline: &[f64], target: &[f64]) -> i32 {
    let (Some(base_mean), Some(target_mean)) = (valid_mean(baseline), valid_mean(target)) else {
        return DegClass::NODATA_BYTE;
    };
    // Differences inside the noise floor never count as change
    if (target_mean - base_mean).abs() <= ANALYSIS.state.epsilon {
        return DegClass::Stable.byte();
    }
    let Some(cuts) = decile_cuts(baseline, ANALYSIS.state.extension) else {
        return DegClass::NODATA_BYTE;
    };

    let diff = decile_class(target_mean, &cuts) - decile_class(base_mean, &cuts);
    if diff <= -2 {
        DegClass::Degraded.byte()
    } else if diff >= 2 {
        DegClass::Improved.byte()
    } else {
        DegClass::Stable.byte()
    }
}

/// Classify the state component. `vi` must cover both sub-periods.
pub fn state(vi: &RasterStack, baseline: YearRange, target: YearRange) -> Result<ClassRaster> {
    let baseline_stack = vi.slice_years(baseline.start, baseline.end);
    let target_stack = vi.slice_years(target.start, target.end);
    if baseline_stack.is_empty() || target_stack.is_empty() {
        bail!(
            "state sub-periods {}..{} / {}..{} not covered by the VI stack",
            baseline.start,
            baseline.end,
            target.start,
            target.end
        );
    }

    let values: Vec<i32> = (0..vi.grid.len())
        .into_par_iter()
        .map(|idx| {
            classify_pixel(
                &baseline_stack.pixel_series(idx),
                &target_stack.pixel_series(idx),
            )
        })
        .collect();

    Ok(ClassRaster {
        grid: vi.grid,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::BoundingBox;
    use crate::domain::raster::{FloatRaster, Grid};

    fn grid_1() -> Grid {
        Grid::new(
            1,
            1,
            BoundingBox {
                min_lat: 0.0,
                max_lat: 1.0,
                min_lon: 0.0,
                max_lon: 1.0,
            },
        )
    }

    fn stack(values: &[f64]) -> RasterStack {
        let g = grid_1();
        let mut s = RasterStack::new(g);
        for (i, &v) in values.iter().enumerate() {
            s.push(2001 + i as i32, FloatRaster::filled(g, v)).unwrap();
        }
        s
    }

    #[test]
    fn collapse_is_degraded() {
        // Baseline 2001..2010 spread 0.5..0.95, target years near the floor
        let vi = stack(&[
            0.50, 0.55, 0.60, 0.65, 0.70, 0.75, 0.80, 0.85, 0.90, 0.95, 0.50, 0.50,
        ]);
        let out = state(&vi, YearRange::new(2001, 2010), YearRange::new(2011, 2012)).unwrap();
        assert_eq!(out.values[0], DegClass::Degraded.byte());
    }

    #[test]
    fn surge_is_improved() {
        let vi = stack(&[
            0.50, 0.55, 0.60, 0.65, 0.70, 0.75, 0.80, 0.85, 0.90, 0.95, 0.95, 0.95,
        ]);
        let out = state(&vi, YearRange::new(2001, 2010), YearRange::new(2011, 2012)).unwrap();
        assert_eq!(out.values[0], DegClass::Improved.byte());
    }

    #[test]
    fn tiny_shift_is_forced_stable() {
        // A flat baseline would make any offset jump deciles, but the
        // epsilon floor keeps it stable
        let vi = stack(&[0.60, 0.601, 0.602, 0.600, 0.601, 0.602, 0.605, 0.605]);
        let out = state(&vi, YearRange::new(2001, 2006), YearRange::new(2007, 2008)).unwrap();
        assert_eq!(out.values[0], DegClass::Stable.byte());
    }

    #[test]
    fn uncovered_period_is_an_error() {
        let vi = stack(&[0.5, 0.6, 0.7]);
        assert!(state(&vi, YearRange::new(1990, 1995), YearRange::new(1996, 1999)).is_err());
    }

    #[test]
    fn decile_classes_span_the_extended_range() {
        let baseline: Vec<f64> = (0..10).map(|i| 0.5 + i as f64 * 0.05).collect();
        let cuts = decile_cuts(&baseline, 0.05).unwrap();
        assert_eq!(decile_class(0.40, &cuts), 1);
        assert_eq!(decile_class(1.05, &cuts), 10);
        assert!(decile_class(0.70, &cuts) > 1 && decile_class(0.70, &cuts) < 10);
    }
}
