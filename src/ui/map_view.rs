//! Raster map rendering: classified and continuous layers drawn into a
//! texture, rebuilt only when the run or the selected layer changes.

use std::sync::Arc;

use colorgrad::Gradient;
use eframe::egui::{Color32, ColorImage, TextureHandle, TextureOptions, Ui, Vec2};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::domain::landcover::LcClass;
use crate::domain::raster::{ClassRaster, FloatRaster};
use crate::models::results::IndicatorOutputs;
use crate::ui::config::UI_CONFIG;
use crate::ui::utils::deg_color;

/// Which raster the map shows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter,
)]
pub enum MapLayer {
    #[strum(serialize = "SDG 15.3.1")]
    Sdg,
    #[strum(serialize = "Productivity")]
    Productivity,
    #[strum(serialize = "Trajectory")]
    Trajectory,
    #[strum(serialize = "State")]
    State,
    #[strum(serialize = "Performance")]
    Performance,
    #[strum(serialize = "Land cover")]
    LandCover,
    #[strum(serialize = "Soil carbon")]
    SoilCarbon,
    #[strum(serialize = "Mean VI")]
    MeanVi,
}

/// Fixed palette for the reporting land cover classes.
fn lc_color(code: i32) -> Color32 {
    match LcClass::from_code(code) {
        Some(LcClass::TreeCovered) => Color32::from_rgb(30, 110, 40),
        Some(LcClass::Grassland) => Color32::from_rgb(150, 180, 80),
        Some(LcClass::Cropland) => Color32::from_rgb(210, 180, 60),
        Some(LcClass::Wetland) => Color32::from_rgb(80, 160, 170),
        Some(LcClass::Artificial) => Color32::from_rgb(180, 70, 70),
        Some(LcClass::OtherLand) => Color32::from_rgb(190, 185, 160),
        Some(LcClass::Water) => Color32::from_rgb(50, 80, 160),
        None => UI_CONFIG.colors.nodata,
    }
}

fn class_image(raster: &ClassRaster, color: impl Fn(i32) -> Color32) -> ColorImage {
    let pixels = raster.values.iter().map(|&v| color(v)).collect();
    ColorImage::new([raster.grid.cols, raster.grid.rows], pixels)
}

/// Continuous layer through the viridis ramp, scaled to [0, 1].
fn float_image(raster: &FloatRaster) -> ColorImage {
    let grad = colorgrad::preset::viridis();
    let pixels = raster
        .values
        .iter()
        .map(|&v| {
            if v.is_finite() {
                let [r, g, b, _] = grad.at(v.clamp(0.0, 1.0) as f32).to_rgba8();
                Color32::from_rgb(r, g, b)
            } else {
                UI_CONFIG.colors.nodata
            }
        })
        .collect();
    ColorImage::new([raster.grid.cols, raster.grid.rows], pixels)
}

fn layer_image(outputs: &IndicatorOutputs, layer: MapLayer) -> ColorImage {
    match layer {
        MapLayer::Sdg => class_image(&outputs.sdg, deg_color),
        MapLayer::Productivity => class_image(&outputs.productivity, deg_color),
        MapLayer::Trajectory => class_image(&outputs.trajectory, deg_color),
        MapLayer::State => class_image(&outputs.state, deg_color),
        MapLayer::Performance => class_image(&outputs.performance, deg_color),
        MapLayer::LandCover => class_image(&outputs.lc_target, lc_color),
        MapLayer::SoilCarbon => class_image(&outputs.soil_carbon, deg_color),
        MapLayer::MeanVi => float_image(&outputs.mean_vi),
    }
}

/// Owns the cached texture; one instance per tile that shows a map.
pub struct MapView {
    texture: Option<TextureHandle>,
    cache_key: Option<(MapLayer, usize)>,
}

impl MapView {
    pub fn new() -> Self {
        Self {
            texture: None,
            cache_key: None,
        }
    }

    pub fn show(&mut self, ui: &mut Ui, outputs: &Arc<IndicatorOutputs>, layer: MapLayer) {
        let key = (layer, Arc::as_ptr(outputs) as usize);
        if self.cache_key != Some(key) {
            let image = layer_image(outputs, layer);
            self.texture = Some(ui.ctx().load_texture(
                "indicator_map",
                image,
                TextureOptions::NEAREST,
            ));
            self.cache_key = Some(key);
        }

        if let Some(texture) = &self.texture {
            let aspect = outputs.grid.cols as f32 / outputs.grid.rows.max(1) as f32;
            let height = UI_CONFIG.map_height;
            let size = Vec2::new(height * aspect, height);
            ui.image((texture.id(), size));
        }
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::new()
    }
}
