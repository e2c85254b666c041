use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::landcover::DegClass;
use crate::domain::raster::{ClassRaster, FloatRaster, Grid};
use crate::domain::LcClass;

/// Area accounted to one class of a categorical raster inside the AOI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassArea {
    pub class: i32,
    pub label: String,
    pub pixels: usize,
    pub area_ha: f64,
    pub pct: f64,
}

/// Area moving from one land cover class to another over the period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionArea {
    pub baseline: LcClass,
    pub target: LcClass,
    pub pixels: usize,
    pub area_ha: f64,
}

/// The numbers the result tile displays and exports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DegradationSummary {
    pub aoi_name: String,
    pub aoi_area_ha: f64,
    pub productivity: Vec<ClassArea>,
    pub land_cover: Vec<ClassArea>,
    pub soil_carbon: Vec<ClassArea>,
    pub sdg: Vec<ClassArea>,
    pub transitions: Vec<TransitionArea>,
}

impl DegradationSummary {
    /// Percent of the AOI degraded according to the combined indicator.
    pub fn sdg_degraded_pct(&self) -> f64 {
        self.sdg
            .iter()
            .find(|c| c.class == DegClass::Degraded.byte())
            .map(|c| c.pct)
            .unwrap_or(0.0)
    }
}

/// Everything one indicator run produces. The engine wraps this in an Arc
/// and stores it on the shared indicator model; tiles read it, never copy it.
#[derive(Debug, Clone)]
pub struct IndicatorOutputs {
    pub grid: Grid,
    /// 1 inside the AOI, 0 outside.
    pub aoi_mask: ClassRaster,

    /// Mean VI over the assessment window, for the continuous map layer.
    pub mean_vi: FloatRaster,

    // Productivity component rasters (byte convention 1/2/3, 0 nodata)
    pub trajectory: ClassRaster,
    pub performance: ClassRaster,
    pub state: ClassRaster,
    pub productivity: ClassRaster,

    // Land cover component
    pub lc_baseline: ClassRaster,
    pub lc_target: ClassRaster,
    /// Transition codes, baseline*10 + target.
    pub lc_transition: ClassRaster,
    pub land_cover: ClassRaster,

    // Soil organic carbon component
    pub soil_carbon: ClassRaster,

    /// The combined SDG 15.3.1 verdict.
    pub sdg: ClassRaster,

    pub summary: DegradationSummary,
    pub computed_at: DateTime<Utc>,
    pub duration_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degraded_pct_reads_the_right_class() {
        let summary = DegradationSummary {
            sdg: vec![
                ClassArea {
                    class: DegClass::Degraded.byte(),
                    label: "Degraded".into(),
                    pixels: 10,
                    area_ha: 100.0,
                    pct: 25.0,
                },
                ClassArea {
                    class: DegClass::Stable.byte(),
                    label: "Stable".into(),
                    pixels: 30,
                    area_ha: 300.0,
                    pct: 75.0,
                },
            ],
            ..Default::default()
        };
        assert_eq!(summary.sdg_degraded_pct(), 25.0);
        assert_eq!(DegradationSummary::default().sdg_degraded_pct(), 0.0);
    }
}
