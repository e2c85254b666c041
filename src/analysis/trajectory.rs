//! Productivity trajectory: per-pixel significance of the VI trend over the
//! trend sub-period, optionally corrected for rainfall.

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::config::ANALYSIS;
use crate::domain::landcover::DegClass;
use crate::domain::raster::{ClassRaster, RasterStack};
use crate::models::TrajectoryMethod;
use crate::utils::{linear_fit, mann_kendall_z};

/// Two-sided critical z for a confidence level, e.g. 0.95 -> 1.96.
pub fn critical_z(confidence: f64) -> Result<f64> {
    if !(0.0..1.0).contains(&confidence) {
        bail!("confidence {} outside (0, 1)", confidence);
    }
    let normal = Normal::new(0.0, 1.0).context("standard normal")?;
    Ok(normal.inverse_cdf(1.0 - (1.0 - confidence) / 2.0))
}

/// The series the Mann-Kendall test actually runs on for one pixel.
fn test_series(method: TrajectoryMethod, vi: &[f64], precip: &[f64]) -> Vec<f64> {
    match method {
        TrajectoryMethod::NdviTrend => vi.to_vec(),

        // Remove the rainfall-explained component and test the residuals
        TrajectoryMethod::Restrend => match linear_fit(precip, vi) {
            Some((scale, offset)) => vi
                .iter()
                .zip(precip)
                .map(|(&v, &p)| {
                    if v.is_finite() && p.is_finite() {
                        v - (offset + scale * p)
                    } else {
                        f64::NAN
                    }
                })
                .collect(),
            None => vec![f64::NAN; vi.len()],
        },

        // VI per meter of rain
        TrajectoryMethod::RainUseEfficiency => vi
            .iter()
            .zip(precip)
            .map(|(&v, &p)| {
                if v.is_finite() && p.is_finite() && p > 0.0 {
                    v / (p / 1000.0)
                } else {
                    f64::NAN
                }
            })
            .collect(),
    }
}

fn classify(z: f64, z_crit: f64) -> i32 {
    if !z.is_finite() {
        DegClass::NODATA_BYTE
    } else if z < -z_crit {
        DegClass::Degraded.byte()
    } else if z > z_crit {
        DegClass::Improved.byte()
    } else {
        DegClass::Stable.byte()
    }
}

/// Classify every pixel of the trend window.
///
/// `vi` and `precip` must already be sliced to the trend sub-period and
/// share the bundle grid. Pixels with fewer valid years than the configured
/// minimum come out as nodata.
pub fn trajectory(
    vi: &RasterStack,
    precip: &RasterStack,
    method: TrajectoryMethod,
    confidence: f64,
) -> Result<ClassRaster> {
    if vi.is_empty() {
        bail!("trajectory needs at least one VI layer");
    }
    if method != TrajectoryMethod::NdviTrend && precip.len() != vi.len() {
        bail!(
            "precipitation stack ({} layers) does not match the VI stack ({})",
            precip.len(),
            vi.len()
        );
    }

    let z_crit = critical_z(confidence)?;
    let min_years = ANALYSIS.trajectory.min_years;

    let values: Vec<i32> = (0..vi.grid.len())
        .into_par_iter()
        .map(|idx| {
            let vi_series = vi.pixel_series(idx);
            if vi_series.iter().filter(|v| v.is_finite()).count() < min_years {
                return DegClass::NODATA_BYTE;
            }
            let precip_series = if method == TrajectoryMethod::NdviTrend {
                Vec::new()
            } else {
                precip.pixel_series(idx)
            };
            let series = test_series(method, &vi_series, &precip_series);
            classify(mann_kendall_z(&series), z_crit)
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
    use crate::analysis::integration::{annual_precip_stack, annual_vi_stack};
    use crate::data::demo::demo_bundle;
    use crate::domain::period::YearRange;
    use crate::models::{Sensor, VegetationIndex};

    fn demo_stacks(period: YearRange) -> (RasterStack, RasterStack) {
        let bundle = demo_bundle();
        let vi = annual_vi_stack(
            &bundle,
            &[Sensor::ModisMod13Q1],
            VegetationIndex::Ndvi,
            0.0,
            period,
        )
        .unwrap();
        let precip = annual_precip_stack(&bundle, period).unwrap();
        (vi, precip)
    }

    #[test]
    fn critical_z_matches_the_textbook_values() {
        assert!((critical_z(0.95).unwrap() - 1.96).abs() < 0.01);
        assert!((critical_z(0.99).unwrap() - 2.576).abs() < 0.01);
        assert!(critical_z(1.5).is_err());
    }

    #[test]
    fn vi_trend_finds_the_designed_pattern() {
        let (vi, precip) = demo_stacks(YearRange::new(2001, 2015));
        let out = trajectory(&vi, &precip, TrajectoryMethod::NdviTrend, 0.95).unwrap();
        let cols = vi.grid.cols;

        // West third degrades, north-east improves, center stays stable
        assert_eq!(out.values[10 * cols + 2], DegClass::Degraded.byte());
        assert_eq!(out.values[3 * cols + (cols - 6)], DegClass::Improved.byte());
        assert_eq!(out.values[12 * cols + 10], DegClass::Stable.byte());
    }

    #[test]
    fn restrend_still_sees_the_trend_under_rainfall() {
        let (vi, precip) = demo_stacks(YearRange::new(2001, 2015));
        let out = trajectory(&vi, &precip, TrajectoryMethod::Restrend, 0.95).unwrap();
        let cols = vi.grid.cols;
        assert_eq!(out.values[10 * cols + 2], DegClass::Degraded.byte());
    }

    #[test]
    fn rain_use_efficiency_runs_end_to_end() {
        let (vi, precip) = demo_stacks(YearRange::new(2001, 2015));
        let out = trajectory(&vi, &precip, TrajectoryMethod::RainUseEfficiency, 0.95).unwrap();
        assert!(out.values.iter().any(|&v| v != DegClass::NODATA_BYTE));
    }

    #[test]
    fn short_series_is_nodata() {
        let (vi, precip) = demo_stacks(YearRange::new(2001, 2003));
        let out = trajectory(&vi, &precip, TrajectoryMethod::NdviTrend, 0.95).unwrap();
        assert!(out.values.iter().all(|&v| v == DegClass::NODATA_BYTE));
    }
}
