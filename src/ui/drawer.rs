//! Navigation drawer: one entry per tile, mapped through a typed id rather
//! than matching on label strings.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Identity of every tile the app can show.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum TileId {
    #[strum(serialize = "AOI selection")]
    Aoi,
    #[strum(serialize = "Input parameters")]
    Input,
    #[strum(serialize = "Results")]
    Result,
    #[strum(serialize = "Reclassify land cover")]
    Reclassify,
    About,
}

/// One drawer row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawerItem {
    pub label: &'static str,
    pub icon: &'static str,
    pub target: TileId,
}

/// The drawer contents, in display order. Exactly one item per tile.
pub const DRAWER_ITEMS: [DrawerItem; 5] = [
    DrawerItem {
        label: "Area of interest",
        icon: "📍",
        target: TileId::Aoi,
    },
    DrawerItem {
        label: "Parameters",
        icon: "🔧",
        target: TileId::Input,
    },
    DrawerItem {
        label: "Results",
        icon: "📊",
        target: TileId::Result,
    },
    DrawerItem {
        label: "Reclassify",
        icon: "🗺",
        target: TileId::Reclassify,
    },
    DrawerItem {
        label: "About",
        icon: "❓",
        target: TileId::About,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_drawer_item_per_tile() {
        for tile in TileId::iter() {
            let count = DRAWER_ITEMS.iter().filter(|i| i.target == tile).count();
            assert_eq!(count, 1, "{tile} should appear exactly once");
        }
        assert_eq!(DRAWER_ITEMS.len(), TileId::iter().count());
    }

    #[test]
    fn labels_are_unique() {
        for (i, a) in DRAWER_ITEMS.iter().enumerate() {
            for b in &DRAWER_ITEMS[i + 1..] {
                assert_ne!(a.label, b.label);
            }
        }
    }
}
