//! Reclassify tile: edit the product class aggregation and the transition
//! significance matrix.

use std::sync::{Arc, RwLock};

use eframe::egui::{Button, ComboBox, Grid, RichText, ScrollArea, Ui};
use strum::IntoEnumIterator;

use crate::domain::LcClass;
use crate::models::{IndicatorModel, ReclassSettings};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::drawer::TileId;
use crate::ui::tiles::{Tile, TileEvent};
use crate::ui::utils::{colored_subsection_heading, helper_text, section_heading, spaced_separator};

pub struct ReclassifyTile {
    pub(crate) indicator: Arc<RwLock<IndicatorModel>>,
}

impl ReclassifyTile {
    pub fn new(indicator: Arc<RwLock<IndicatorModel>>) -> Self {
        Self { indicator }
    }

    fn sign_text(sign: i8) -> RichText {
        match sign {
            s if s < 0 => RichText::new("−").color(UI_CONFIG.colors.degraded),
            s if s > 0 => RichText::new("+").color(UI_CONFIG.colors.improved),
            _ => RichText::new("0").color(UI_CONFIG.colors.label),
        }
    }

    fn render_matrix(&self, ui: &mut Ui, reclass: &mut ReclassSettings) {
        ui.label(colored_subsection_heading(UI_TEXT.reclassify_matrix_heading));
        helper_text(ui, UI_TEXT.reclassify_matrix_helper);

        Grid::new("transition_matrix").show(ui, |ui| {
            ui.label("");
            for target in LcClass::iter() {
                // Short column headers keep the grid readable
                ui.label(target.to_string().chars().take(4).collect::<String>());
            }
            ui.end_row();

            for baseline in LcClass::iter() {
                ui.label(baseline.to_string());
                for target in LcClass::iter() {
                    let sign = reclass.matrix.get(baseline, target);
                    if ui
                        .add(Button::new(Self::sign_text(sign)).min_size([24.0, 18.0].into()))
                        .clicked()
                    {
                        // Cycle -1 -> 0 -> +1 -> -1
                        let next = match sign {
                            -1 => 0,
                            0 => 1,
                            _ => -1,
                        };
                        reclass.matrix.set(baseline, target, next);
                    }
                }
                ui.end_row();
            }
        });
    }

    fn render_class_map(&self, ui: &mut Ui, reclass: &mut ReclassSettings) {
        ui.label(colored_subsection_heading(UI_TEXT.reclassify_map_heading));
        ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
            Grid::new("class_map").striped(true).show(ui, |ui| {
                ui.label("Product code");
                ui.label("Reporting class");
                ui.end_row();
                for (code, class) in reclass.class_map.iter_mut() {
                    ui.label(code.to_string());
                    ComboBox::from_id_salt(("class_map", *code))
                        .selected_text(class.to_string())
                        .show_ui(ui, |ui| {
                            for option in LcClass::iter() {
                                ui.selectable_value(class, option, option.to_string());
                            }
                        });
                    ui.end_row();
                }
            });
        });
    }
}

impl Tile for ReclassifyTile {
    fn id(&self) -> TileId {
        TileId::Reclassify
    }

    fn render(&mut self, ui: &mut Ui) -> Vec<TileEvent> {
        section_heading(ui, UI_TEXT.reclassify_heading);

        let Ok(mut model) = self.indicator.write() else {
            return Vec::new();
        };

        self.render_matrix(ui, &mut model.reclass);
        spaced_separator(ui);
        self.render_class_map(ui, &mut model.reclass);
        spaced_separator(ui);

        if ui.button(UI_TEXT.reclassify_reset).clicked() {
            model.reclass = ReclassSettings::default();
        }

        Vec::new()
    }
}
