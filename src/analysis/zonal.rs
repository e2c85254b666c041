//! Zonal statistics: turn the classified rasters into the per-class area
//! tables the result tile displays and exports.

use itertools::Itertools;

use crate::domain::landcover::{DegClass, LcClass};
use crate::domain::raster::{ClassRaster, NODATA};
use crate::models::results::{ClassArea, TransitionArea};

/// Total AOI area in hectares, from the mask.
pub fn aoi_area_ha(mask: &ClassRaster) -> f64 {
    let cols = mask.grid.cols;
    mask.values
        .iter()
        .enumerate()
        .filter(|&(_, &m)| m == 1)
        .map(|(idx, _)| mask.grid.pixel_area_ha(idx / cols))
        .sum()
}

/// Pixel counts and areas per class inside the AOI. Nodata pixels are
/// excluded from the population; percentages are of the AOI area.
pub fn class_areas(
    raster: &ClassRaster,
    mask: &ClassRaster,
    label: impl Fn(i32) -> String,
) -> Vec<ClassArea> {
    let cols = raster.grid.cols;
    let total_ha = aoi_area_ha(mask);

    let mut classes: Vec<i32> = raster
        .values
        .iter()
        .zip(&mask.values)
        .filter(|&(&v, &m)| m == 1 && v != NODATA && v != DegClass::NODATA_BYTE)
        .map(|(&v, _)| v)
        .unique()
        .collect();
    classes.sort_unstable();

    classes
        .into_iter()
        .map(|class| {
            let mut pixels = 0usize;
            let mut area_ha = 0.0;
            for (idx, (&v, &m)) in raster.values.iter().zip(&mask.values).enumerate() {
                if m == 1 && v == class {
                    pixels += 1;
                    area_ha += raster.grid.pixel_area_ha(idx / cols);
                }
            }
            ClassArea {
                class,
                label: label(class),
                pixels,
                area_ha,
                pct: if total_ha > 0.0 {
                    area_ha / total_ha * 100.0
                } else {
                    0.0
                },
            }
        })
        .collect()
}

/// Class areas of a degradation raster with the standard labels.
pub fn deg_class_areas(raster: &ClassRaster, mask: &ClassRaster) -> Vec<ClassArea> {
    class_areas(raster, mask, |byte| {
        DegClass::from_byte(byte)
            .map(|c| c.to_string())
            .unwrap_or_else(|| format!("class {byte}"))
    })
}

/// Area moving between each pair of reporting classes, changed pairs only.
pub fn transition_areas(
    baseline: &ClassRaster,
    target: &ClassRaster,
    mask: &ClassRaster,
) -> Vec<TransitionArea> {
    let cols = baseline.grid.cols;
    let mut out: Vec<TransitionArea> = Vec::new();

    for (idx, ((&b, &t), &m)) in baseline
        .values
        .iter()
        .zip(&target.values)
        .zip(&mask.values)
        .enumerate()
    {
        if m != 1 || b == t {
            continue;
        }
        let (Some(b), Some(t)) = (LcClass::from_code(b), LcClass::from_code(t)) else {
            continue;
        };
        let area = baseline.grid.pixel_area_ha(idx / cols);
        match out
            .iter_mut()
            .find(|e| e.baseline == b && e.target == t)
        {
            Some(entry) => {
                entry.pixels += 1;
                entry.area_ha += area;
            }
            None => out.push(TransitionArea {
                baseline: b,
                target: t,
                pixels: 1,
                area_ha: area,
            }),
        }
    }

    out.sort_by(|a, b| b.area_ha.total_cmp(&a.area_ha));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::BoundingBox;
    use crate::domain::raster::Grid;

    fn grid_2x2() -> Grid {
        Grid::new(
            2,
            2,
            BoundingBox {
                min_lat: 0.0,
                max_lat: 2.0,
                min_lon: 0.0,
                max_lon: 2.0,
            },
        )
    }

    #[test]
    fn class_areas_respect_the_mask() {
        let g = grid_2x2();
        let raster = ClassRaster::from_values(g, vec![1, 1, 2, 2]).unwrap();
        let mask = ClassRaster::from_values(g, vec![1, 1, 1, 0]).unwrap();

        let areas = deg_class_areas(&raster, &mask);
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].class, 1);
        assert_eq!(areas[0].pixels, 2);
        assert_eq!(areas[1].pixels, 1);
        assert!(areas[0].pct > areas[1].pct);
    }

    #[test]
    fn percentages_are_of_the_aoi() {
        let g = grid_2x2();
        let raster = ClassRaster::from_values(g, vec![2, 2, 0, 0]).unwrap();
        let mask = ClassRaster::filled(g, 1);

        let areas = deg_class_areas(&raster, &mask);
        assert_eq!(areas.len(), 1);
        // Nodata pixels still count toward the AOI area, so the stable
        // share is about half
        assert!((areas[0].pct - 50.0).abs() < 1.0);
    }

    #[test]
    fn transitions_skip_unchanged_pixels() {
        let g = grid_2x2();
        let baseline = ClassRaster::from_values(g, vec![1, 1, 2, 2]).unwrap();
        let target = ClassRaster::from_values(g, vec![3, 1, 2, 3]).unwrap();
        let mask = ClassRaster::filled(g, 1);

        let transitions = transition_areas(&baseline, &target, &mask);
        assert_eq!(transitions.len(), 2);
        assert!(transitions.iter().any(|t| {
            t.baseline == LcClass::TreeCovered && t.target == LcClass::Cropland && t.pixels == 1
        }));
        assert!(transitions.iter().any(|t| {
            t.baseline == LcClass::Grassland && t.target == LcClass::Cropland && t.pixels == 1
        }));
    }

    #[test]
    fn empty_mask_means_zero_area() {
        let g = grid_2x2();
        let mask = ClassRaster::filled(g, 0);
        assert_eq!(aoi_area_ha(&mask), 0.0);
        let raster = ClassRaster::filled(g, 1);
        assert!(class_areas(&raster, &mask, |c| c.to_string()).is_empty());
    }
}
