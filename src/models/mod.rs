// Shared application models
// AoiModel and IndicatorModel are the two objects every tile works against;
// they are created once at startup and passed around as Arc<RwLock<_>> handles.

pub mod aoi;
pub mod indicator;
pub mod results;

pub use aoi::{AoiMethod, AoiModel};
pub use indicator::{
    IndicatorModel, JobParams, ReclassSettings, Sensor, TrajectoryMethod, VegetationIndex,
};
pub use results::{ClassArea, DegradationSummary, IndicatorOutputs, TransitionArea};
