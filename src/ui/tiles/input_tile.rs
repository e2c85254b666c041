//! Input tile: sensors, index, trajectory method, periods, and the run
//! button.

use std::sync::{Arc, RwLock};

use eframe::egui::{ComboBox, DragValue, Slider, Ui};
use strum::IntoEnumIterator;

use crate::config::datasets::sensor_spec;
use crate::models::{AoiModel, IndicatorModel, Sensor, TrajectoryMethod, VegetationIndex};
use crate::ui::config::UI_TEXT;
use crate::ui::drawer::TileId;
use crate::ui::tiles::{Tile, TileEvent};
use crate::ui::utils::{colored_subsection_heading, helper_text, section_heading, spaced_separator};

pub struct InputTile {
    pub(crate) aoi: Arc<RwLock<AoiModel>>,
    pub(crate) indicator: Arc<RwLock<IndicatorModel>>,
}

impl InputTile {
    pub fn new(aoi: Arc<RwLock<AoiModel>>, indicator: Arc<RwLock<IndicatorModel>>) -> Self {
        Self { aoi, indicator }
    }

    fn render_sensors(&self, ui: &mut Ui, model: &mut IndicatorModel) {
        ui.label(colored_subsection_heading(UI_TEXT.input_sensors_heading));
        for sensor in Sensor::iter() {
            let spec = sensor_spec(sensor);
            let mut selected = model.sensors.contains(&sensor);
            let response = ui.checkbox(&mut selected, sensor.to_string()).on_hover_text(
                format!(
                    "{} m resolution, coverage {}..{}",
                    spec.resolution_m, spec.coverage.start, spec.coverage.end
                ),
            );
            if response.changed() {
                if selected {
                    model.sensors.push(sensor);
                } else {
                    model.sensors.retain(|s| *s != sensor);
                }
            }
        }
    }

    fn render_index(&self, ui: &mut Ui, model: &mut IndicatorModel) {
        ui.label(colored_subsection_heading(UI_TEXT.input_index_heading));
        ComboBox::from_id_salt("vegetation_index")
            .selected_text(model.vegetation_index.to_string())
            .show_ui(ui, |ui| {
                for index in VegetationIndex::iter() {
                    ui.selectable_value(&mut model.vegetation_index, index, index.to_string());
                }
            });

        ui.add(
            Slider::new(&mut model.vi_threshold, -0.5..=0.5)
                .step_by(0.01)
                .text("threshold"),
        );
        helper_text(ui, UI_TEXT.input_threshold_helper);
    }

    fn render_trajectory(&self, ui: &mut Ui, model: &mut IndicatorModel) {
        ui.label(colored_subsection_heading(UI_TEXT.input_trajectory_heading));
        ComboBox::from_id_salt("trajectory_method")
            .selected_text(model.trajectory.to_string())
            .show_ui(ui, |ui| {
                for method in TrajectoryMethod::iter() {
                    ui.selectable_value(&mut model.trajectory, method, method.to_string());
                }
            });
    }

    fn render_periods(&self, ui: &mut Ui, model: &mut IndicatorModel) {
        ui.label(colored_subsection_heading(UI_TEXT.input_periods_heading));

        let year_range = 1982..=2030;
        let mut year_pair = |ui: &mut Ui, label: &str, start: &mut i32, end: &mut i32| {
            ui.horizontal(|ui| {
                ui.label(label);
                ui.add(DragValue::new(start).range(year_range.clone()));
                ui.label("to");
                ui.add(DragValue::new(end).range(year_range.clone()));
            });
        };

        let p = &mut model.periods;
        year_pair(
            ui,
            "Assessment",
            &mut p.assessment.start,
            &mut p.assessment.end,
        );
        year_pair(ui, "Trend", &mut p.trend.start, &mut p.trend.end);
        year_pair(
            ui,
            "Performance",
            &mut p.performance.start,
            &mut p.performance.end,
        );
        year_pair(ui, "Soil carbon", &mut p.soc.start, &mut p.soc.end);

        ui.horizontal(|ui| {
            ui.label("State split");
            ui.add(DragValue::new(&mut p.state_baseline_end).range(year_range.clone()));
            ui.label("/");
            ui.add(DragValue::new(&mut p.state_target_start).range(year_range));
        });
    }

    fn render_run_button(&self, ui: &mut Ui, model: &IndicatorModel) -> Vec<TileEvent> {
        let aoi_ready = self
            .aoi
            .read()
            .map(|aoi| aoi.is_ready())
            .unwrap_or(false);
        let validation = model.validate();

        let mut events = Vec::new();
        ui.add_enabled_ui(aoi_ready && validation.is_ok(), |ui| {
            if ui.button(UI_TEXT.input_run).clicked() {
                events.push(TileEvent::RunRequested);
            }
        });
        if !aoi_ready {
            helper_text(ui, UI_TEXT.input_aoi_missing);
        } else if let Err(e) = validation {
            helper_text(ui, e.to_string());
        }
        events
    }
}

impl Tile for InputTile {
    fn id(&self) -> TileId {
        TileId::Input
    }

    fn render(&mut self, ui: &mut Ui) -> Vec<TileEvent> {
        section_heading(ui, UI_TEXT.input_heading);

        let Ok(mut model) = self.indicator.write() else {
            return Vec::new();
        };

        self.render_sensors(ui, &mut model);
        spaced_separator(ui);
        self.render_index(ui, &mut model);
        spaced_separator(ui);
        self.render_trajectory(ui, &mut model);
        spaced_separator(ui);
        self.render_periods(ui, &mut model);
        spaced_separator(ui);
        self.render_run_button(ui, &model)
    }
}
