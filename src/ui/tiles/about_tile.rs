//! About tile: what the indicator means and what the numbers are good for.

use eframe::egui::Ui;

use crate::ui::config::UI_TEXT;
use crate::ui::drawer::TileId;
use crate::ui::tiles::{Tile, TileEvent};
use crate::ui::utils::{helper_text, section_heading, spaced_separator};

pub struct AboutTile;

impl AboutTile {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AboutTile {
    fn default() -> Self {
        Self::new()
    }
}

impl Tile for AboutTile {
    fn id(&self) -> TileId {
        TileId::About
    }

    fn render(&mut self, ui: &mut Ui) -> Vec<TileEvent> {
        section_heading(ui, UI_TEXT.about_heading);

        ui.label(UI_TEXT.about_body);
        spaced_separator(ui);
        helper_text(ui, UI_TEXT.about_disclaimer);
        spaced_separator(ui);
        helper_text(ui, format!("Version {}", env!("CARGO_PKG_VERSION")));

        Vec::new()
    }
}
