// One file per tile. Tiles hold handles to the shared models and render
// into the central panel; anything the app shell must act on comes back as
// an event.

pub mod about_tile;
pub mod aoi_tile;
pub mod input_tile;
pub mod reclassify_tile;
pub mod result_tile;

use eframe::egui::Ui;

use crate::ui::drawer::TileId;

pub use about_tile::AboutTile;
pub use aoi_tile::AoiTile;
pub use input_tile::InputTile;
pub use reclassify_tile::ReclassifyTile;
pub use result_tile::ResultTile;

/// What a tile can ask the app shell to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileEvent {
    /// Launch an indicator run with the current configuration.
    RunRequested,
}

/// Trait for the tiles the drawer navigates between.
pub trait Tile {
    fn id(&self) -> TileId;
    fn render(&mut self, ui: &mut Ui) -> Vec<TileEvent>;
}
