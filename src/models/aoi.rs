use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::domain::geometry::{Aoi, AoiPoint, BoundingBox};

/// The ways an area of interest can be captured.
/// This build of the app only enables [`AoiMethod::Points`]; the other
/// variants exist so the selector stays honest about what is switched off.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum AoiMethod {
    #[strum(serialize = "Point selection")]
    Points,
    #[strum(serialize = "Draw a shape")]
    DrawShape,
    #[strum(serialize = "Administrative boundary")]
    AdminBoundary,
    #[strum(serialize = "Vector file")]
    VectorFile,
}

/// The shared area-of-interest model.
/// Owned by the AOI tile, referenced by every analysis tile that needs the
/// current spatial extent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AoiModel {
    /// Methods this instance accepts. Fixed at construction.
    enabled_methods: Vec<AoiMethod>,
    /// The active capture method.
    pub method: AoiMethod,
    /// Human-readable name for exports.
    pub name: String,
    /// The current selection.
    pub aoi: Aoi,
}

impl AoiModel {
    /// Construct with an explicit list of enabled methods. The first enabled
    /// method becomes active.
    ///
    /// Panics when `enabled` is empty: an AOI model with no capture method
    /// is a programming error, not a runtime condition.
    pub fn with_methods(enabled: &[AoiMethod]) -> Self {
        assert!(!enabled.is_empty(), "AoiModel needs at least one method");
        Self {
            enabled_methods: enabled.to_vec(),
            method: enabled[0],
            name: "Custom AOI".to_string(),
            aoi: Aoi::default(),
        }
    }

    pub fn enabled_methods(&self) -> &[AoiMethod] {
        &self.enabled_methods
    }

    pub fn is_method_enabled(&self, method: AoiMethod) -> bool {
        self.enabled_methods.contains(&method)
    }

    pub fn add_point(&mut self, point: AoiPoint) {
        self.aoi.points.push(point);
    }

    pub fn remove_point(&mut self, index: usize) {
        if index < self.aoi.points.len() {
            self.aoi.points.remove(index);
        }
    }

    pub fn clear(&mut self) {
        self.aoi.points.clear();
    }

    /// True once the selection can drive an analysis: at least one valid
    /// point under the points method.
    pub fn is_ready(&self) -> bool {
        !self.aoi.is_empty() && self.aoi.points.iter().all(AoiPoint::is_valid)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.aoi.bounding_box()
    }
}

impl Default for AoiModel {
    fn default() -> Self {
        Self::with_methods(&[AoiMethod::Points])
    }
}
