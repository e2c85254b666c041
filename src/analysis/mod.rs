// The indicator computations. `indicator::run_indicator` is the entry point
// the worker calls; the sub-modules are one file per component.
pub mod indicator;
pub mod integration;
pub mod land_cover;
pub mod performance;
pub mod productivity;
pub mod soil_carbon;
pub mod state;
pub mod trajectory;
pub mod zonal;

pub use indicator::run_indicator;
