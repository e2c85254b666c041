//! Vegetation index integration: monthly observations to one annual VI
//! raster per year, plus the matching annual precipitation stack.

use std::borrow::Borrow;

use anyhow::{Result, bail};

use crate::data::bundle::{DataBundle, SceneObservation};
use crate::domain::period::YearRange;
use crate::domain::raster::{FloatRaster, Grid, RasterStack};
use crate::models::{Sensor, VegetationIndex};

/// Per-pixel index from the red/NIR bands.
pub fn vegetation_index(red: f64, nir: f64, index: VegetationIndex) -> f64 {
    if !red.is_finite() || !nir.is_finite() {
        return f64::NAN;
    }
    match index {
        VegetationIndex::Ndvi => (nir - red) / (nir + red),
        VegetationIndex::Evi => 2.4 * (nir - red) / (nir + red + 1.0),
        VegetationIndex::Msvi => {
            let a = 2.0 * nir + 1.0;
            (a - (a * a - 8.0 * (nir - red)).sqrt()) / 2.0
        }
    }
}

/// One scene's VI raster. Values at or below the threshold are zeroed, which
/// suppresses water and snow noise before any averaging happens.
pub fn scene_vi(scene: &SceneObservation, index: VegetationIndex, threshold: f64) -> FloatRaster {
    scene.red.zip_map(&scene.nir, |red, nir| {
        let v = vegetation_index(red, nir, index);
        if v.is_finite() && v <= threshold { 0.0 } else { v }
    })
}

/// Mean of a set of rasters, pixel by pixel, ignoring nodata.
fn pixel_mean<R: Borrow<FloatRaster>>(grid: Grid, rasters: &[R]) -> FloatRaster {
    let mut out = FloatRaster::filled(grid, f64::NAN);
    for idx in 0..grid.len() {
        let mut sum = 0.0;
        let mut n = 0usize;
        for raster in rasters {
            let v = raster.borrow().values[idx];
            if v.is_finite() {
                sum += v;
                n += 1;
            }
        }
        if n > 0 {
            out.values[idx] = sum / n as f64;
        }
    }
    out
}

/// Integrate the selected sensors into one VI raster per year.
///
/// Observations are averaged per calendar month first, then the monthly
/// means are averaged into the annual value, so a season with dense
/// acquisitions does not dominate the year.
pub fn annual_vi_stack(
    bundle: &DataBundle,
    sensors: &[Sensor],
    index: VegetationIndex,
    threshold: f64,
    period: YearRange,
) -> Result<RasterStack> {
    let mut stack = RasterStack::new(bundle.grid);

    for year in period.years() {
        let scenes = bundle.scenes_for(sensors, year, year);
        if scenes.is_empty() {
            bail!("no observations from the selected sensors in {}", year);
        }

        let mut monthly = Vec::new();
        for month in 1..=12u32 {
            let in_month: Vec<FloatRaster> = scenes
                .iter()
                .filter(|s| s.month == month)
                .map(|s| scene_vi(s, index, threshold))
                .collect();
            if !in_month.is_empty() {
                monthly.push(pixel_mean(bundle.grid, &in_month));
            }
        }

        stack.push(year, pixel_mean(bundle.grid, &monthly))?;
    }

    log::debug!(
        "integrated {} annual VI layers over {}..{}",
        stack.len(),
        period.start,
        period.end
    );
    Ok(stack)
}

/// Annual mean of the monthly precipitation fields in mm, one raster per
/// year. Averaging keeps years with missing months comparable to complete
/// ones, so a data gap never reads as a drought.
pub fn annual_precip_stack(bundle: &DataBundle, period: YearRange) -> Result<RasterStack> {
    let mut stack = RasterStack::new(bundle.grid);

    for year in period.years() {
        let months: Vec<&FloatRaster> = bundle
            .precipitation
            .iter()
            .filter(|p| p.year == year)
            .map(|p| &p.precipitation)
            .collect();
        if months.is_empty() {
            bail!("no precipitation data for {}", year);
        }
        stack.push(year, pixel_mean(bundle.grid, &months))?;
    }

    Ok(stack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::demo::demo_bundle;

    #[test]
    fn ndvi_matches_the_band_ratio() {
        let v = vegetation_index(0.1, 0.5, VegetationIndex::Ndvi);
        assert!((v - (0.4 / 0.6)).abs() < 1e-12);
        assert!(vegetation_index(f64::NAN, 0.5, VegetationIndex::Ndvi).is_nan());
    }

    #[test]
    fn msvi_stays_below_one() {
        let v = vegetation_index(0.05, 0.6, VegetationIndex::Msvi);
        assert!(v > 0.0 && v < 1.0);
    }

    #[test]
    fn threshold_zeroes_low_observations() {
        let bundle = demo_bundle();
        let scene = &bundle.scenes[0];
        let vi = scene_vi(scene, VegetationIndex::Ndvi, 0.9);
        // Threshold above every demo value: all valid pixels become zero
        assert!(vi.values.iter().all(|v| !v.is_finite() || *v == 0.0));
    }

    #[test]
    fn annual_stack_covers_the_period() {
        let bundle = demo_bundle();
        let period = YearRange::new(2001, 2005);
        let stack = annual_vi_stack(
            &bundle,
            &[Sensor::ModisMod13Q1],
            VegetationIndex::Ndvi,
            0.0,
            period,
        )
        .unwrap();
        assert_eq!(stack.years, vec![2001, 2002, 2003, 2004, 2005]);
        // Cloud stripes never hit every scene of a year, so the annual
        // layers are gap-free
        assert!(stack.layers[0].values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn missing_years_are_an_error() {
        let bundle = demo_bundle();
        let period = YearRange::new(1990, 1995);
        assert!(
            annual_vi_stack(
                &bundle,
                &[Sensor::ModisMod13Q1],
                VegetationIndex::Ndvi,
                0.0,
                period
            )
            .is_err()
        );
    }

    #[test]
    fn precip_means_are_positive() {
        let bundle = demo_bundle();
        let stack = annual_precip_stack(&bundle, YearRange::new(2001, 2003)).unwrap();
        assert_eq!(stack.len(), 3);
        assert!(stack.layers[0].values.iter().all(|&v| v > 0.0));
    }

    #[test]
    fn incomplete_years_average_over_the_months_present() {
        let mut bundle = demo_bundle();
        bundle
            .precipitation
            .retain(|p| p.year != 2002 || p.month <= 6);

        let stack = annual_precip_stack(&bundle, YearRange::new(2001, 2002)).unwrap();
        let expected = bundle
            .precipitation
            .iter()
            .filter(|p| p.year == 2002)
            .map(|p| p.precipitation.values[0])
            .sum::<f64>()
            / 6.0;
        assert!((stack.layers[1].values[0] - expected).abs() < 1e-9);

        // A half-year of data stays on the scale of a full year instead of
        // reading as half the rainfall
        let full = stack.layers[0].values[0];
        assert!(stack.layers[1].values[0] > 0.5 * full);
    }
}
