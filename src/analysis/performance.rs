//! Productivity performance: observed mean VI against the 90th percentile
//! of similarly-situated land, where "similar" means the same soil
//! taxonomic unit carrying the same land cover class.

use anyhow::{Result, bail};
use itertools::Itertools;

use crate::config::ANALYSIS;
use crate::domain::landcover::DegClass;
use crate::domain::raster::{ClassRaster, NODATA, RasterStack};
use crate::utils::percentile;

/// Ecological unit id: soil taxonomy code combined with the reporting land
/// cover class. Either side missing makes the unit undefined.
fn unit_id(soil: i32, lc: i32) -> i32 {
    if soil == NODATA || lc == NODATA {
        NODATA
    } else {
        soil * 100 + lc
    }
}

/// Classify the performance sub-period.
///
/// `vi` is the stack sliced to the performance window, `lc` the reporting
/// class raster for the window's end year, `soil` the taxonomy raster, and
/// `aoi_mask` restricts the percentile population to the assessed area.
pub fn performance(
    vi: &RasterStack,
    lc: &ClassRaster,
    soil: &ClassRaster,
    aoi_mask: &ClassRaster,
) -> Result<ClassRaster> {
    if vi.is_empty() {
        bail!("performance needs at least one VI layer");
    }

    let mean_vi = vi.pixel_mean();
    let units = soil.zip_map(lc, unit_id);

    // 90th percentile of the mean VI per unit, computed over the AOI
    let mut unit_p90: Vec<(i32, f64)> = Vec::new();
    let present: Vec<i32> = units
        .values
        .iter()
        .zip(&aoi_mask.values)
        .filter(|&(&u, &m)| m == 1 && u != NODATA)
        .map(|(&u, _)| u)
        .unique()
        .collect();
    for unit in present {
        let sample: Vec<f64> = mean_vi
            .values
            .iter()
            .zip(&units.values)
            .zip(&aoi_mask.values)
            .filter(|&((_, &u), &m)| m == 1 && u == unit)
            .map(|((&v, _), _)| v)
            .collect();
        let p90 = percentile(&sample, 90.0);
        if p90.is_finite() && p90 > 0.0 {
            unit_p90.push((unit, p90));
        }
    }

    let threshold = ANALYSIS.performance.degraded_ratio;
    let values: Vec<i32> = (0..vi.grid.len())
        .map(|idx| {
            let v = mean_vi.values[idx];
            let unit = units.values[idx];
            let p90 = unit_p90
                .iter()
                .find(|(u, _)| *u == unit)
                .map(|(_, p)| *p);
            match (v.is_finite(), p90) {
                (true, Some(p90)) => {
                    if v / p90 <= threshold {
                        DegClass::Degraded.byte()
                    } else {
                        DegClass::Stable.byte()
                    }
                }
                _ => DegClass::NODATA_BYTE,
            }
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
    use crate::analysis::integration::annual_vi_stack;
    use crate::data::demo::{demo_aoi, demo_bundle};
    use crate::domain::period::YearRange;
    use crate::models::{ReclassSettings, Sensor, VegetationIndex};

    #[test]
    fn performance_never_flags_improvement() {
        let bundle = demo_bundle();
        let vi = annual_vi_stack(
            &bundle,
            &[Sensor::ModisMod13Q1],
            VegetationIndex::Ndvi,
            0.0,
            YearRange::new(2001, 2015),
        )
        .unwrap();
        let (from, to) = ReclassSettings::default().remap_tables();
        let lc = bundle.land_cover_for(2015).unwrap().remap(&from, &to);
        let mask = bundle.grid.aoi_mask(&demo_aoi());

        let out = performance(&vi, &lc, &bundle.soil_taxonomy, &mask).unwrap();
        assert!(out.values.iter().all(|&v| v != DegClass::Improved.byte()));
        assert!(out.values.iter().any(|&v| v == DegClass::Stable.byte()));
    }

    #[test]
    fn uniform_unit_is_stable() {
        // A unit whose VI barely varies never drops under half its p90
        let bundle = demo_bundle();
        let vi = annual_vi_stack(
            &bundle,
            &[Sensor::ModisMod13Q1],
            VegetationIndex::Ndvi,
            0.0,
            YearRange::new(2001, 2003),
        )
        .unwrap();
        let lc = ClassRaster::filled(bundle.grid, 2);
        let soil = ClassRaster::filled(bundle.grid, 3);
        let mask = ClassRaster::filled(bundle.grid, 1);

        let out = performance(&vi, &lc, &soil, &mask).unwrap();
        let cols = bundle.grid.cols;
        // Sample away from the degrading west
        assert_eq!(out.values[10 * cols + 10], DegClass::Stable.byte());
    }

    #[test]
    fn missing_unit_is_nodata() {
        let bundle = demo_bundle();
        let vi = annual_vi_stack(
            &bundle,
            &[Sensor::ModisMod13Q1],
            VegetationIndex::Ndvi,
            0.0,
            YearRange::new(2001, 2003),
        )
        .unwrap();
        let lc = ClassRaster::filled(bundle.grid, NODATA);
        let mask = ClassRaster::filled(bundle.grid, 1);

        let out = performance(&vi, &lc, &bundle.soil_taxonomy, &mask).unwrap();
        assert!(out.values.iter().all(|&v| v == DegClass::NODATA_BYTE));
    }
}
