// Domain types and value objects
pub mod geometry;
pub mod landcover;
pub mod period;
pub mod raster;

pub use geometry::{Aoi, AoiPoint, BoundingBox};
pub use landcover::{DegClass, LcClass, transition_code};
pub use period::{AssessmentPeriods, YearRange};
pub use raster::{ClassRaster, FloatRaster, Grid, NODATA, RasterStack};
