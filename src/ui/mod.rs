// The desktop shell: a navigation drawer on the left, one tile in the
// central panel, engine status along the bottom.
pub mod app;
pub mod config;
pub mod drawer;
pub mod map_view;
pub mod text;
pub mod tiles;
pub mod utils;

pub use app::TerradegApp;
pub use drawer::{DRAWER_ITEMS, DrawerItem, TileId};
