use std::sync::Arc;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::config::TransitionMatrix;
use crate::config::factors::DEFAULT_CLASS_MAP;
use crate::domain::geometry::Aoi;
use crate::domain::period::AssessmentPeriods;
use crate::domain::LcClass;
use crate::models::results::IndicatorOutputs;

/// Supported imagery sources.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Sensor {
    #[strum(serialize = "Landsat 4")]
    Landsat4,
    #[strum(serialize = "Landsat 5")]
    Landsat5,
    #[strum(serialize = "Landsat 7")]
    Landsat7,
    #[strum(serialize = "Landsat 8")]
    Landsat8,
    #[strum(serialize = "Landsat 9")]
    Landsat9,
    #[strum(serialize = "Sentinel 2")]
    Sentinel2,
    #[strum(serialize = "MODIS MOD13Q1")]
    ModisMod13Q1,
    #[strum(serialize = "MODIS MYD13Q1")]
    ModisMyd13Q1,
}

impl Sensor {
    /// MODIS ships pre-computed VI products; the others are surface
    /// reflectance and get their index computed from the raw bands.
    /// The two families integrate differently and cannot be mixed.
    pub fn is_modis(self) -> bool {
        matches!(self, Sensor::ModisMod13Q1 | Sensor::ModisMyd13Q1)
    }
}

/// Vegetation index derived from the red/NIR bands.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum VegetationIndex {
    #[strum(serialize = "NDVI")]
    Ndvi,
    #[strum(serialize = "EVI")]
    Evi,
    #[strum(serialize = "MSVI")]
    Msvi,
}

/// Method for the productivity trajectory component.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum TrajectoryMethod {
    #[strum(serialize = "VI trend")]
    NdviTrend,
    #[strum(serialize = "Residual trend (RESTREND)")]
    Restrend,
    #[strum(serialize = "Rain use efficiency")]
    RainUseEfficiency,
}

/// The land cover adaptation the reclassify tile edits: product class map
/// plus the transition significance matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReclassSettings {
    pub class_map: Vec<(i32, LcClass)>,
    pub matrix: TransitionMatrix,
}

impl ReclassSettings {
    pub fn remap_tables(&self) -> (Vec<i32>, Vec<i32>) {
        self.class_map
            .iter()
            .map(|(from, to)| (*from, to.code()))
            .unzip()
    }
}

impl Default for ReclassSettings {
    fn default() -> Self {
        Self {
            class_map: DEFAULT_CLASS_MAP.to_vec(),
            matrix: TransitionMatrix::default(),
        }
    }
}

/// The shared indicator model: configuration chosen in the input and
/// reclassify tiles, plus the outputs the engine writes back.
/// One instance exists per running app; tiles hold handles to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorModel {
    pub sensors: Vec<Sensor>,
    pub vegetation_index: VegetationIndex,
    pub trajectory: TrajectoryMethod,
    /// Observations at or below this VI are zeroed before integration.
    pub vi_threshold: f64,
    pub periods: AssessmentPeriods,
    /// Override for the climate conversion coefficient; None derives it
    /// from the bundle's climate zone raster.
    pub climate_coef_override: Option<f64>,
    pub reclass: ReclassSettings,

    /// Latest computed outputs. Runtime-only.
    #[serde(skip)]
    pub outputs: Option<Arc<IndicatorOutputs>>,
}

impl Default for IndicatorModel {
    fn default() -> Self {
        Self {
            sensors: vec![Sensor::ModisMod13Q1],
            vegetation_index: VegetationIndex::Ndvi,
            trajectory: TrajectoryMethod::NdviTrend,
            vi_threshold: 0.0,
            periods: AssessmentPeriods::default(),
            climate_coef_override: None,
            reclass: ReclassSettings::default(),
            outputs: None,
        }
    }
}

impl IndicatorModel {
    pub fn validate(&self) -> Result<()> {
        if self.sensors.is_empty() {
            bail!("select at least one sensor");
        }
        let modis = self.sensors.iter().filter(|s| s.is_modis()).count();
        if modis > 0 && modis < self.sensors.len() {
            bail!("MODIS VI products cannot be mixed with reflectance sensors");
        }
        if !(-1.0..1.0).contains(&self.vi_threshold) {
            bail!("VI threshold {} outside [-1, 1)", self.vi_threshold);
        }
        if self.reclass.class_map.is_empty() {
            bail!("the land cover class map is empty");
        }
        self.periods.validate()
    }

    /// Snapshot everything a computation needs. The engine hands this to the
    /// worker so the UI can keep mutating the live model meanwhile.
    pub fn job_params(&self, aoi: Aoi, aoi_name: impl Into<String>) -> JobParams {
        JobParams {
            aoi,
            aoi_name: aoi_name.into(),
            sensors: self.sensors.clone(),
            vegetation_index: self.vegetation_index,
            trajectory: self.trajectory,
            vi_threshold: self.vi_threshold,
            periods: self.periods,
            climate_coef_override: self.climate_coef_override,
            reclass: self.reclass.clone(),
        }
    }
}

/// An immutable snapshot of the indicator configuration plus the AOI,
/// taken when a run is launched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobParams {
    pub aoi: Aoi,
    pub aoi_name: String,
    pub sensors: Vec<Sensor>,
    pub vegetation_index: VegetationIndex,
    pub trajectory: TrajectoryMethod,
    pub vi_threshold: f64,
    pub periods: AssessmentPeriods,
    pub climate_coef_override: Option<f64>,
    pub reclass: ReclassSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::AoiPoint;

    #[test]
    fn default_model_is_valid() {
        IndicatorModel::default().validate().unwrap();
    }

    #[test]
    fn sensor_families_cannot_mix() {
        let mut model = IndicatorModel::default();
        model.sensors = vec![Sensor::ModisMod13Q1, Sensor::Landsat8];
        assert!(model.validate().is_err());

        model.sensors = vec![Sensor::Landsat8, Sensor::Sentinel2];
        assert!(model.validate().is_ok());
    }

    #[test]
    fn empty_sensor_list_is_invalid() {
        let mut model = IndicatorModel::default();
        model.sensors.clear();
        assert!(model.validate().is_err());
    }

    #[test]
    fn job_params_snapshot_is_independent() {
        let mut model = IndicatorModel::default();
        let aoi = Aoi {
            points: vec![AoiPoint::new(10.0, 10.0, 20.0)],
        };
        let params = model.job_params(aoi.clone(), "test area");

        // Mutating the live model must not affect the snapshot
        model.vegetation_index = VegetationIndex::Evi;
        model.sensors.push(Sensor::ModisMyd13Q1);

        assert_eq!(params.vegetation_index, VegetationIndex::Ndvi);
        assert_eq!(params.sensors, vec![Sensor::ModisMod13Q1]);
        assert_eq!(params.aoi, aoi);
    }

    #[test]
    fn reclass_remap_tables_align() {
        let reclass = ReclassSettings::default();
        let (from, to) = reclass.remap_tables();
        assert_eq!(from.len(), to.len());
        let idx = from.iter().position(|&c| c == 210).unwrap();
        assert_eq!(to[idx], LcClass::Water.code());
    }
}
