//! Soil organic carbon sub-indicator.
//!
//! The stock walk follows the IPCC tier 1 accounting: a land cover
//! transition moves the stock toward its new equilibrium linearly over the
//! equilibrium horizon, and the verdict compares the final stock to the
//! initial one.

use anyhow::{Result, bail};

use crate::config::ANALYSIS;
use crate::config::factors::{ClimateZone, climate_conversion_coef, soc_factors_for};
use crate::data::bundle::DataBundle;
use crate::domain::landcover::{DegClass, LcClass};
use crate::domain::period::YearRange;
use crate::domain::raster::ClassRaster;
use crate::models::ReclassSettings;

/// Per-pixel climate conversion coefficient, either the user override or
/// the value looked up from the zone raster.
fn climate_coef(zones: &ClassRaster, idx: usize, override_coef: Option<f64>) -> f64 {
    if let Some(c) = override_coef {
        return c;
    }
    ClimateZone::from_code(zones.values[idx])
        .map(climate_conversion_coef)
        .unwrap_or(1.0)
}

struct PixelWalk {
    stock: f64,
    class: LcClass,
    /// Annual stock delta of the active transition, and years left on it.
    annual_change: f64,
    years_left: f64,
}

impl PixelWalk {
    fn step(&mut self, new_class: LcClass, coef: f64) {
        if new_class != self.class {
            // A new transition replaces any still-running one
            let factors = soc_factors_for(self.class, new_class);
            let f = factors.land_use.resolve(coef) * factors.management * factors.input;
            self.annual_change =
                (self.stock * f - self.stock) / ANALYSIS.soc.equilibrium_years;
            self.years_left = ANALYSIS.soc.equilibrium_years;
            self.class = new_class;
        }
        if self.years_left > 0.0 {
            self.stock += self.annual_change;
            self.years_left -= 1.0;
        }
    }
}

/// Classify the SOC window. Land cover maps are read per year from the
/// bundle, clamped to the product's coverage at both ends.
pub fn soil_carbon(
    bundle: &DataBundle,
    period: YearRange,
    reclass: &ReclassSettings,
    climate_override: Option<f64>,
) -> Result<ClassRaster> {
    if period.n_years() < 2 {
        bail!(
            "soil carbon window {}..{} is too short",
            period.start,
            period.end
        );
    }

    let (from, to) = reclass.remap_tables();
    let yearly: Vec<ClassRaster> = period
        .years()
        .map(|year| {
            bundle
                .land_cover_at_or_before(year)
                .map(|lc| lc.remap(&from, &to))
                .ok_or_else(|| anyhow::anyhow!("no land cover at or before {}", year))
        })
        .collect::<Result<_>>()?;

    let threshold = ANALYSIS.soc.pct_change_threshold;
    let values: Vec<i32> = (0..bundle.grid.len())
        .map(|idx| {
            let initial = bundle.soc.values[idx];
            let Some(start_class) = LcClass::from_code(yearly[0].values[idx]) else {
                return DegClass::NODATA_BYTE;
            };
            if !initial.is_finite() || initial <= 0.0 {
                return DegClass::NODATA_BYTE;
            }

            let coef = climate_coef(&bundle.climate_zones, idx, climate_override);
            let mut walk = PixelWalk {
                stock: initial,
                class: start_class,
                annual_change: 0.0,
                years_left: 0.0,
            };
            for year_map in &yearly[1..] {
                let Some(class) = LcClass::from_code(year_map.values[idx]) else {
                    return DegClass::NODATA_BYTE;
                };
                walk.step(class, coef);
            }

            let pct = (walk.stock - initial) / initial * 100.0;
            if pct < -threshold {
                DegClass::Degraded.byte()
            } else if pct > threshold {
                DegClass::Improved.byte()
            } else {
                DegClass::Stable.byte()
            }
        })
        .collect();

    Ok(ClassRaster {
        grid: bundle.grid,
        values,
    })
}
