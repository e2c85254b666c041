//! Combine the three productivity components into the sub-indicator.

use anyhow::{Result, bail};

use crate::domain::landcover::DegClass;
use crate::domain::raster::ClassRaster;

/// The UNCCD combination table. Trajectory carries the most weight: a
/// significant trend decides the verdict unless the other two components
/// jointly contradict it.
fn combine_pixel(traj: i32, state: i32, perf: i32) -> i32 {
    const D: i32 = 1;
    const S: i32 = 2;
    const I: i32 = 3;

    if traj == DegClass::NODATA_BYTE
        || state == DegClass::NODATA_BYTE
        || perf == DegClass::NODATA_BYTE
    {
        return DegClass::NODATA_BYTE;
    }

    match (traj, state, perf) {
        // Improving trend holds unless both state and performance degrade
        (I, D, D) => D,
        (I, _, _) => I,

        // No significant trend: state leads, performance breaks ties
        (S, I, _) => S,
        (S, S, S) => S,
        (S, S, D) => D,
        (S, D, _) => D,

        // Degrading trend is never overruled
        (D, _, _) => D,

        _ => DegClass::NODATA_BYTE,
    }
}

/// Per-pixel combination of the trajectory, state and performance rasters.
pub fn productivity(
    trajectory: &ClassRaster,
    state: &ClassRaster,
    performance: &ClassRaster,
) -> Result<ClassRaster> {
    if trajectory.grid != state.grid || trajectory.grid != performance.grid {
        bail!("productivity components are on different grids");
    }

    let values: Vec<i32> = trajectory
        .values
        .iter()
        .zip(&state.values)
        .zip(&performance.values)
        .map(|((&t, &s), &p)| combine_pixel(t, s, p))
        .collect();

    Ok(ClassRaster {
        grid: trajectory.grid,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::BoundingBox;
    use crate::domain::raster::Grid;

    #[test]
    fn combination_table_is_complete() {
        // Performance only ever produces degraded or stable
        for traj in 1..=3 {
            for state in 1..=3 {
                for perf in 1..=2 {
                    let out = combine_pixel(traj, state, perf);
                    assert!(
                        (1..=3).contains(&out),
                        "({traj},{state},{perf}) -> {out}"
                    );
                }
            }
        }
    }

    #[test]
    fn trajectory_dominates() {
        assert_eq!(combine_pixel(1, 3, 2), 1);
        assert_eq!(combine_pixel(3, 2, 1), 3);
        assert_eq!(combine_pixel(3, 3, 2), 3);
    }

    #[test]
    fn joint_contradiction_overrules_improvement() {
        assert_eq!(combine_pixel(3, 1, 1), 1);
    }

    #[test]
    fn stable_trend_defers_to_state_and_performance() {
        assert_eq!(combine_pixel(2, 3, 1), 2);
        assert_eq!(combine_pixel(2, 2, 2), 2);
        assert_eq!(combine_pixel(2, 2, 1), 1);
        assert_eq!(combine_pixel(2, 1, 2), 1);
    }

    #[test]
    fn nodata_propagates() {
        assert_eq!(combine_pixel(0, 2, 2), 0);
        assert_eq!(combine_pixel(2, 0, 2), 0);
        assert_eq!(combine_pixel(2, 2, 0), 0);
    }

    #[test]
    fn mismatched_grids_are_an_error() {
        let g1 = Grid::new(
            1,
            1,
            BoundingBox {
                min_lat: 0.0,
                max_lat: 1.0,
                min_lon: 0.0,
                max_lon: 1.0,
            },
        );
        let g2 = Grid::new(
            2,
            2,
            BoundingBox {
                min_lat: 0.0,
                max_lat: 1.0,
                min_lon: 0.0,
                max_lon: 1.0,
            },
        );
        let a = ClassRaster::filled(g1, 2);
        let b = ClassRaster::filled(g2, 2);
        assert!(productivity(&a, &b, &a).is_err());
    }
}
