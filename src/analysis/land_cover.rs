//! Land cover sub-indicator: aggregate the product classes to the seven
//! reporting classes and type every baseline-to-target transition.

use anyhow::{Result, bail};

use crate::domain::landcover::{DegClass, LcClass, transition_code};
use crate::domain::raster::{ClassRaster, NODATA};
use crate::models::ReclassSettings;

/// Everything the land cover component produces.
pub struct LandCoverOutput {
    /// Baseline year, reporting classes.
    pub baseline: ClassRaster,
    /// Target year, reporting classes.
    pub target: ClassRaster,
    /// Transition codes, baseline class * 10 + target class.
    pub transition: ClassRaster,
    /// Degradation verdict per the transition significance matrix.
    pub degradation: ClassRaster,
}

/// Run the component on two product-coded land cover maps.
pub fn land_cover(
    baseline_product: &ClassRaster,
    target_product: &ClassRaster,
    reclass: &ReclassSettings,
) -> Result<LandCoverOutput> {
    if baseline_product.grid != target_product.grid {
        bail!("land cover maps are on different grids");
    }

    let (from, to) = reclass.remap_tables();
    let baseline = baseline_product.remap(&from, &to);
    let target = target_product.remap(&from, &to);
    let transition = baseline.zip_map(&target, transition_code);

    let degradation = baseline.zip_map(&target, |b, t| {
        match (LcClass::from_code(b), LcClass::from_code(t)) {
            (Some(b), Some(t)) => reclass.matrix.deg_class(b, t).byte(),
            _ => DegClass::NODATA_BYTE,
        }
    });

    Ok(LandCoverOutput {
        baseline,
        target,
        transition,
        degradation,
    })
}
