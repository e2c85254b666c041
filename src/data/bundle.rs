use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::config::persistence::BUNDLE_VERSION;
use crate::domain::raster::{ClassRaster, FloatRaster, Grid};
use crate::models::Sensor;

/// One satellite scene, analysis-ready: cloud masking and the sensor scale
/// factors are applied at extraction time, cloudy pixels arrive as NaN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObservation {
    pub sensor: Sensor,
    pub year: i32,
    pub month: u32,
    pub red: FloatRaster,
    pub nir: FloatRaster,
}

/// One monthly precipitation field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrecipObservation {
    pub year: i32,
    pub month: u32,
    /// Monthly precipitation in mm.
    pub precipitation: FloatRaster,
}

/// The analysis-ready extract for one area: everything the indicator
/// computation needs, pre-clipped to a single grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataBundle {
    pub version: u32,
    pub name: String,
    pub grid: Grid,

    pub scenes: Vec<SceneObservation>,
    pub precipitation: Vec<PrecipObservation>,

    /// Yearly land cover maps in product (pre-aggregation) codes.
    pub land_cover_years: Vec<i32>,
    pub land_cover: Vec<ClassRaster>,

    /// Reference soil organic carbon stock, t/ha.
    pub soc: FloatRaster,
    /// Soil taxonomy units.
    pub soil_taxonomy: ClassRaster,
    /// IPCC climate zone codes.
    pub climate_zones: ClassRaster,
}

impl DataBundle {
    /// Check internal consistency: every raster on the bundle grid, land
    /// cover years sorted and aligned with their maps.
    pub fn validate(&self) -> Result<()> {
        if self.version != BUNDLE_VERSION {
            bail!(
                "bundle format v{} is not supported (expected v{})",
                self.version,
                BUNDLE_VERSION
            );
        }
        if self.grid.is_empty() {
            bail!("bundle grid is empty");
        }
        for scene in &self.scenes {
            if scene.red.grid != self.grid || scene.nir.grid != self.grid {
                bail!(
                    "scene {}-{:02} ({}) is not on the bundle grid",
                    scene.year,
                    scene.month,
                    scene.sensor
                );
            }
        }
        for p in &self.precipitation {
            if p.precipitation.grid != self.grid {
                bail!("precipitation {}-{:02} is not on the bundle grid", p.year, p.month);
            }
        }
        if self.land_cover_years.len() != self.land_cover.len() {
            bail!(
                "{} land cover years but {} maps",
                self.land_cover_years.len(),
                self.land_cover.len()
            );
        }
        if !self.land_cover_years.windows(2).all(|w| w[0] < w[1]) {
            bail!("land cover years are not strictly increasing");
        }
        for (year, map) in self.land_cover_years.iter().zip(&self.land_cover) {
            if map.grid != self.grid {
                bail!("land cover map for {} is not on the bundle grid", year);
            }
        }
        if self.soc.grid != self.grid
            || self.soil_taxonomy.grid != self.grid
            || self.climate_zones.grid != self.grid
        {
            bail!("static layers are not on the bundle grid");
        }
        Ok(())
    }

    pub fn land_cover_for(&self, year: i32) -> Option<&ClassRaster> {
        self.land_cover_years
            .iter()
            .position(|&y| y == year)
            .map(|i| &self.land_cover[i])
    }

    /// The land cover map closest at-or-before `year`, falling back to the
    /// earliest map. Callers clamp years against the product coverage first.
    pub fn land_cover_at_or_before(&self, year: i32) -> Option<&ClassRaster> {
        let idx = self
            .land_cover_years
            .iter()
            .rposition(|&y| y <= year)
            .unwrap_or(0);
        self.land_cover.get(idx)
    }

    /// Scenes from the selected sensors within [start, end], in time order.
    pub fn scenes_for(&self, sensors: &[Sensor], start: i32, end: i32) -> Vec<&SceneObservation> {
        let mut scenes: Vec<&SceneObservation> = self
            .scenes
            .iter()
            .filter(|s| sensors.contains(&s.sensor) && (start..=end).contains(&s.year))
            .collect();
        scenes.sort_by_key(|s| (s.year, s.month));
        scenes
    }

    // --- Persistence ---

    pub fn load(path: &Path) -> Result<DataBundle> {
        let file = File::open(path)
            .with_context(|| format!("cannot open data bundle at {}", path.display()))?;
        let bundle: DataBundle = bincode::deserialize_from(BufReader::new(file))
            .with_context(|| format!("cannot decode data bundle at {}", path.display()))?;
        bundle.validate()?;
        log::info!(
            "Loaded bundle '{}': {} scenes, {} land cover years, {}x{} grid",
            bundle.name,
            bundle.scenes.len(),
            bundle.land_cover_years.len(),
            bundle.grid.rows,
            bundle.grid.cols
        );
        Ok(bundle)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("cannot create {}", dir.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("cannot create bundle file at {}", path.display()))?;
        bincode::serialize_into(BufWriter::new(file), self)
            .with_context(|| format!("cannot encode bundle to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::demo::demo_bundle;

    #[test]
    fn demo_bundle_is_valid() {
        demo_bundle().validate().unwrap();
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let mut bundle = demo_bundle();
        bundle.version = BUNDLE_VERSION + 1;
        assert!(bundle.validate().is_err());
    }

    #[test]
    fn scene_selection_filters_and_sorts() {
        let bundle = demo_bundle();
        let scenes = bundle.scenes_for(&[Sensor::ModisMod13Q1], 2005, 2006);
        assert!(!scenes.is_empty());
        assert!(scenes.iter().all(|s| s.sensor == Sensor::ModisMod13Q1));
        assert!(scenes.iter().all(|s| (2005..=2006).contains(&s.year)));
        assert!(
            scenes
                .windows(2)
                .all(|w| (w[0].year, w[0].month) <= (w[1].year, w[1].month))
        );
    }

    #[test]
    fn land_cover_lookup_falls_back() {
        let bundle = demo_bundle();
        let first_year = bundle.land_cover_years[0];
        assert!(bundle.land_cover_at_or_before(first_year - 10).is_some());
        assert!(bundle.land_cover_for(first_year).is_some());
        assert!(bundle.land_cover_for(first_year - 1).is_none());
    }

    #[test]
    fn bundle_round_trips_through_bincode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.bin");
        let bundle = demo_bundle();
        bundle.save(&path).unwrap();
        let loaded = DataBundle::load(&path).unwrap();
        assert_eq!(loaded.name, bundle.name);
        assert_eq!(loaded.scenes.len(), bundle.scenes.len());
        assert_eq!(loaded.grid, bundle.grid);
    }
}
