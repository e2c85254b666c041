//! Configuration module for the terradeg application.

pub mod analysis;
pub mod datasets;
pub mod factors;
pub mod persistence;

mod debug; // Public re-export only; forces files to use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

// Re-export commonly used items
pub use analysis::{ANALYSIS, AnalysisConfig};
pub use datasets::{LAND_COVER_COVERAGE, SENSORS, SensorSpec};
pub use factors::{
    CLIMATE_CONVERSION, ClimateZone, DEFAULT_CLASS_MAP, SocFactors, TransitionMatrix,
    soc_factors_for,
};
pub use persistence::{APP_STATE_PATH, BUNDLE_VERSION, DEFAULT_BUNDLE_PATH, DEFAULT_CREDENTIALS_PATH};
