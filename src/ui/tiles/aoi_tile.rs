//! AOI tile: capture the assessment area as buffered points.

use std::sync::{Arc, RwLock};

use eframe::egui::{DragValue, Grid, Ui};
use strum::IntoEnumIterator;

use crate::domain::geometry::AoiPoint;
use crate::models::{AoiMethod, AoiModel};
use crate::ui::config::UI_TEXT;
use crate::ui::drawer::TileId;
use crate::ui::tiles::{Tile, TileEvent};
use crate::ui::utils::{colored_subsection_heading, helper_text, section_heading, spaced_separator};

pub struct AoiTile {
    pub(crate) aoi: Arc<RwLock<AoiModel>>,
}

impl AoiTile {
    pub fn new(aoi: Arc<RwLock<AoiModel>>) -> Self {
        Self { aoi }
    }

    fn render_method_selector(&self, ui: &mut Ui, model: &mut AoiModel) {
        ui.label(colored_subsection_heading(UI_TEXT.aoi_method_heading));
        for method in AoiMethod::iter() {
            let enabled = model.is_method_enabled(method);
            ui.add_enabled_ui(enabled, |ui| {
                let mut selected = model.method == method;
                if ui.toggle_value(&mut selected, method.to_string()).clicked() && enabled {
                    model.method = method;
                }
            });
        }
        helper_text(
            ui,
            format!(
                "{}: {}",
                UI_TEXT.aoi_disabled_method_hint,
                AoiMethod::iter()
                    .filter(|m| !model.is_method_enabled(*m))
                    .map(|m| m.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        );
    }

    fn render_point_editor(&self, ui: &mut Ui, model: &mut AoiModel) {
        ui.label(colored_subsection_heading(UI_TEXT.aoi_points_heading));

        let mut remove: Option<usize> = None;
        Grid::new("aoi_points").striped(true).show(ui, |ui| {
            ui.label("Latitude");
            ui.label("Longitude");
            ui.label("Buffer (km)");
            ui.label("");
            ui.end_row();

            for (i, point) in model.aoi.points.iter_mut().enumerate() {
                ui.add(
                    DragValue::new(&mut point.lat)
                        .speed(0.05)
                        .range(-90.0..=90.0),
                );
                ui.add(
                    DragValue::new(&mut point.lon)
                        .speed(0.05)
                        .range(-180.0..=180.0),
                );
                ui.add(
                    DragValue::new(&mut point.buffer_km)
                        .speed(1.0)
                        .range(1.0..=500.0),
                );
                if ui.button("✖").clicked() {
                    remove = Some(i);
                }
                ui.end_row();
            }
        });
        if let Some(i) = remove {
            model.remove_point(i);
        }

        ui.horizontal(|ui| {
            if ui.button(UI_TEXT.aoi_add_point).clicked() {
                model.add_point(AoiPoint::new(0.0, 0.0, 25.0));
            }
            if !model.aoi.is_empty() && ui.button(UI_TEXT.aoi_clear).clicked() {
                model.clear();
            }
        });

        if model.aoi.is_empty() {
            helper_text(ui, UI_TEXT.aoi_empty_hint);
        } else if let Some(bounds) = model.bounding_box() {
            helper_text(
                ui,
                format!(
                    "Extent: {:.3}..{:.3} N, {:.3}..{:.3} E",
                    bounds.min_lat, bounds.max_lat, bounds.min_lon, bounds.max_lon
                ),
            );
        }
    }
}

impl Tile for AoiTile {
    fn id(&self) -> TileId {
        TileId::Aoi
    }

    fn render(&mut self, ui: &mut Ui) -> Vec<TileEvent> {
        section_heading(ui, UI_TEXT.aoi_heading);

        let Ok(mut model) = self.aoi.write() else {
            return Vec::new();
        };

        ui.horizontal(|ui| {
            ui.label("Name:");
            ui.text_edit_singleline(&mut model.name);
        });
        spaced_separator(ui);

        self.render_method_selector(ui, &mut model);
        spaced_separator(ui);
        self.render_point_editor(ui, &mut model);

        Vec::new()
    }
}
