//! Result tile: map, summary tables, per-class chart, and the JSON export.

use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use eframe::egui::{ComboBox, Grid, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Plot};
use strum::IntoEnumIterator;

use crate::models::IndicatorModel;
use crate::models::results::{DegradationSummary, IndicatorOutputs};
use crate::ui::config::UI_TEXT;
use crate::ui::drawer::TileId;
use crate::ui::map_view::{MapLayer, MapView};
use crate::ui::tiles::{Tile, TileEvent};
use crate::ui::utils::{
    colored_subsection_heading, deg_color, format_area, helper_text, section_heading,
    spaced_separator,
};

const EXPORT_PATH: &str = "terradeg_summary.json";

pub struct ResultTile {
    pub(crate) indicator: Arc<RwLock<IndicatorModel>>,
    map: MapView,
    layer: MapLayer,
    export_status: Option<String>,
}

impl ResultTile {
    pub fn new(indicator: Arc<RwLock<IndicatorModel>>) -> Self {
        Self {
            indicator,
            map: MapView::new(),
            layer: MapLayer::Sdg,
            export_status: None,
        }
    }

    fn render_map(&mut self, ui: &mut Ui, outputs: &Arc<IndicatorOutputs>) {
        ui.label(colored_subsection_heading(UI_TEXT.result_map_heading));
        ComboBox::from_id_salt("map_layer")
            .selected_text(self.layer.to_string())
            .show_ui(ui, |ui| {
                for layer in MapLayer::iter() {
                    ui.selectable_value(&mut self.layer, layer, layer.to_string());
                }
            });
        self.map.show(ui, outputs, self.layer);
    }

    fn render_chart(&self, ui: &mut Ui, summary: &DegradationSummary) {
        let bars: Vec<Bar> = summary
            .sdg
            .iter()
            .map(|area| {
                Bar::new(area.class as f64, area.pct)
                    .name(&area.label)
                    .fill(deg_color(area.class))
            })
            .collect();
        let chart = BarChart::new("sdg_classes", bars);

        Plot::new("sdg_chart")
            .height(160.0)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show_axes([false, true])
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(chart);
            });
        helper_text(ui, "Percent of the assessed area per verdict");
    }

    fn render_summary(&self, ui: &mut Ui, summary: &DegradationSummary) {
        ui.label(colored_subsection_heading(UI_TEXT.result_summary_heading));
        Grid::new("summary_table").striped(true).show(ui, |ui| {
            ui.label("Sub-indicator");
            ui.label("Degraded");
            ui.label("Stable");
            ui.label("Improved");
            ui.end_row();

            let rows = [
                ("Productivity", &summary.productivity),
                ("Land cover", &summary.land_cover),
                ("Soil carbon", &summary.soil_carbon),
                ("SDG 15.3.1", &summary.sdg),
            ];
            for (label, areas) in rows {
                ui.label(label);
                for class in 1..=3 {
                    let pct = areas
                        .iter()
                        .find(|a| a.class == class)
                        .map(|a| a.pct)
                        .unwrap_or(0.0);
                    ui.label(format!("{pct:.1}%"));
                }
                ui.end_row();
            }
        });
        helper_text(
            ui,
            format!(
                "AOI '{}', {}",
                summary.aoi_name,
                format_area(summary.aoi_area_ha)
            ),
        );
    }

    fn render_transitions(&self, ui: &mut Ui, summary: &DegradationSummary) {
        ui.label(colored_subsection_heading(UI_TEXT.result_transitions_heading));
        if summary.transitions.is_empty() {
            helper_text(ui, "No land cover changes inside the AOI");
            return;
        }
        Grid::new("transition_table").striped(true).show(ui, |ui| {
            ui.label("From");
            ui.label("To");
            ui.label("Area");
            ui.end_row();
            for t in &summary.transitions {
                ui.label(t.baseline.to_string());
                ui.label(t.target.to_string());
                ui.label(format_area(t.area_ha));
                ui.end_row();
            }
        });
    }

    fn export_summary(summary: &DegradationSummary) -> Result<()> {
        let json = serde_json::to_string_pretty(summary).context("serializing summary")?;
        std::fs::write(EXPORT_PATH, json)
            .with_context(|| format!("writing {EXPORT_PATH}"))?;
        Ok(())
    }

    fn render_export(&mut self, ui: &mut Ui, summary: &DegradationSummary) {
        if ui.button(UI_TEXT.result_export).clicked() {
            self.export_status = Some(match Self::export_summary(summary) {
                Ok(()) => format!("Written to {EXPORT_PATH}"),
                Err(e) => format!("Export failed: {e:#}"),
            });
        }
        if let Some(status) = &self.export_status {
            helper_text(ui, status);
        }
    }
}

impl Tile for ResultTile {
    fn id(&self) -> TileId {
        TileId::Result
    }

    fn render(&mut self, ui: &mut Ui) -> Vec<TileEvent> {
        section_heading(ui, UI_TEXT.result_heading);

        let outputs = self
            .indicator
            .read()
            .ok()
            .and_then(|model| model.outputs.clone());
        let Some(outputs) = outputs else {
            helper_text(ui, UI_TEXT.result_empty);
            return Vec::new();
        };

        ScrollArea::vertical().show(ui, |ui| {
            self.render_map(ui, &outputs);
            spaced_separator(ui);
            self.render_chart(ui, &outputs.summary);
            spaced_separator(ui);
            self.render_summary(ui, &outputs.summary);
            spaced_separator(ui);
            self.render_transitions(ui, &outputs.summary);
            spaced_separator(ui);
            self.render_export(ui, &outputs.summary);

            helper_text(
                ui,
                format!(
                    "Computed {} in {} ms",
                    outputs.computed_at.format("%Y-%m-%d %H:%M:%S UTC"),
                    outputs.duration_ms
                ),
            );
        });

        Vec::new()
    }
}
