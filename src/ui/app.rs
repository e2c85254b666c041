use std::sync::{Arc, RwLock};
use std::time::Duration;

use eframe::{Frame, egui};
use serde::{Deserialize, Serialize};

use crate::config::DEBUG_FLAGS;
use crate::data::session::EarthSession;
use crate::engine::AnalysisEngine;
use crate::models::{AoiModel, IndicatorModel};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::drawer::{DRAWER_ITEMS, TileId};
use crate::ui::tiles::{
    AboutTile, AoiTile, InputTile, ReclassifyTile, ResultTile, Tile, TileEvent,
};
use crate::ui::utils::setup_custom_visuals;

/// What survives a restart. Outputs are recomputed, not persisted.
#[derive(Serialize, Deserialize)]
struct PersistedState {
    current_tile: TileId,
    aoi: AoiModel,
    indicator: IndicatorModel,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            current_tile: TileId::Aoi,
            aoi: AoiModel::default(),
            indicator: IndicatorModel::default(),
        }
    }
}

/// One tile instance per drawer item, wired to the shared models.
fn build_tiles(
    aoi: &Arc<RwLock<AoiModel>>,
    indicator: &Arc<RwLock<IndicatorModel>>,
) -> Vec<Box<dyn Tile>> {
    vec![
        Box::new(AoiTile::new(aoi.clone())),
        Box::new(InputTile::new(aoi.clone(), indicator.clone())),
        Box::new(ResultTile::new(indicator.clone())),
        Box::new(ReclassifyTile::new(indicator.clone())),
        Box::new(AboutTile::new()),
    ]
}

pub struct TerradegApp {
    current_tile: TileId,

    // The two shared models. Tiles and engine hold clones of these handles;
    // there is exactly one instance of each model per running app.
    aoi: Arc<RwLock<AoiModel>>,
    indicator: Arc<RwLock<IndicatorModel>>,

    engine: AnalysisEngine,
    tiles: Vec<Box<dyn Tile>>,
    project: String,
}

impl TerradegApp {
    pub fn new(cc: &eframe::CreationContext<'_>, session: EarthSession) -> Self {
        setup_custom_visuals(&cc.egui_ctx);

        let persisted: PersistedState = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        if DEBUG_FLAGS.print_state_serde {
            log::info!("restored state, current tile {}", persisted.current_tile);
        }

        let aoi = Arc::new(RwLock::new(persisted.aoi));
        let indicator = Arc::new(RwLock::new(persisted.indicator));
        let engine = AnalysisEngine::new(session.bundle.clone(), indicator.clone());
        let tiles = build_tiles(&aoi, &indicator);

        Self {
            current_tile: persisted.current_tile,
            aoi,
            indicator,
            engine,
            tiles,
            project: session.project,
        }
    }

    fn handle_event(&mut self, event: TileEvent) {
        match event {
            TileEvent::RunRequested => {
                let params = {
                    let (Ok(aoi), Ok(indicator)) = (self.aoi.read(), self.indicator.read())
                    else {
                        return;
                    };
                    indicator.job_params(aoi.aoi.clone(), aoi.name.clone())
                };
                self.engine.request_run(params);
                self.current_tile = TileId::Result;
            }
        }
    }

    fn render_drawer(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("drawer")
            .exact_width(UI_CONFIG.drawer_width)
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.heading(UI_TEXT.app_title);
                ui.separator();

                for item in DRAWER_ITEMS {
                    let selected = self.current_tile == item.target;
                    let label = format!("{} {}", item.icon, item.label);
                    if ui.selectable_label(selected, label).clicked() {
                        if DEBUG_FLAGS.print_ui_interactions {
                            log::info!("drawer: {} -> {}", self.current_tile, item.target);
                        }
                        self.current_tile = item.target;
                    }
                }
            });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.engine.is_computing() {
                    ui.spinner();
                }
                if let Some(msg) = self.engine.status_msg() {
                    ui.label(msg);
                }
                if let Some(err) = self.engine.last_error() {
                    ui.colored_label(UI_CONFIG.colors.degraded, err);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("project: {}", self.project));
                });
            });
        });
    }
}

impl eframe::App for TerradegApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let (Ok(aoi), Ok(indicator)) = (self.aoi.read(), self.indicator.read()) else {
            return;
        };
        let state = PersistedState {
            current_tile: self.current_tile,
            aoi: aoi.clone(),
            indicator: indicator.clone(),
        };
        eframe::set_value(storage, eframe::APP_KEY, &state);
        if DEBUG_FLAGS.print_state_serde {
            log::info!("state persisted");
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let busy = self.engine.update();
        if busy {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        self.render_drawer(ctx);
        self.render_status_bar(ctx);

        let mut events = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(tile) = self
                .tiles
                .iter_mut()
                .find(|t| t.id() == self.current_tile)
            {
                events = tile.render(ui);
            }
        });
        for event in events {
            self.handle_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn fresh_state_opens_on_the_aoi_tile() {
        assert_eq!(PersistedState::default().current_tile, TileId::Aoi);
    }

    #[test]
    fn one_tile_per_drawer_item_in_order() {
        let aoi = Arc::new(RwLock::new(AoiModel::default()));
        let indicator = Arc::new(RwLock::new(IndicatorModel::default()));
        let tiles = build_tiles(&aoi, &indicator);

        assert_eq!(tiles.len(), DRAWER_ITEMS.len());
        for (tile, item) in tiles.iter().zip(DRAWER_ITEMS) {
            assert_eq!(tile.id(), item.target);
        }
        // And every tile id exists exactly once
        for id in TileId::iter() {
            assert_eq!(tiles.iter().filter(|t| t.id() == id).count(), 1);
        }
    }

    #[test]
    fn tiles_share_the_model_instances() {
        let aoi = Arc::new(RwLock::new(AoiModel::default()));
        let indicator = Arc::new(RwLock::new(IndicatorModel::default()));

        let aoi_tile = AoiTile::new(aoi.clone());
        let input_tile = InputTile::new(aoi.clone(), indicator.clone());
        let result_tile = ResultTile::new(indicator.clone());
        let reclass_tile = ReclassifyTile::new(indicator.clone());

        assert!(Arc::ptr_eq(&aoi_tile.aoi, &aoi));
        assert!(Arc::ptr_eq(&input_tile.aoi, &aoi));
        assert!(Arc::ptr_eq(&input_tile.indicator, &indicator));
        assert!(Arc::ptr_eq(&result_tile.indicator, &indicator));
        assert!(Arc::ptr_eq(&reclass_tile.indicator, &indicator));
    }

    #[test]
    fn persisted_state_round_trips_through_json() {
        let mut state = PersistedState::default();
        state.current_tile = TileId::Result;
        state.aoi.name = "Test basin".to_string();

        let json = serde_json::to_string(&state).unwrap();
        let back: PersistedState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.current_tile, TileId::Result);
        assert_eq!(back.aoi.name, "Test basin");
        assert!(back.indicator.outputs.is_none());
    }
}
