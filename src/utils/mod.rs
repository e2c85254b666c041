pub mod maths_utils;

pub use maths_utils::{linear_fit, mann_kendall_z, percentile};
