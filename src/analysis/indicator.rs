//! One full indicator run: integrate, classify the three productivity
//! components, the land cover and soil carbon sub-indicators, combine, and
//! summarize over the AOI.

use std::time::Instant;

use anyhow::{Context, Result, bail};
use chrono::Utc;

use crate::analysis::integration::{annual_precip_stack, annual_vi_stack};
use crate::analysis::land_cover::land_cover;
use crate::analysis::performance::performance;
use crate::analysis::productivity::productivity;
use crate::analysis::soil_carbon::soil_carbon;
use crate::analysis::state::state;
use crate::analysis::trajectory::trajectory;
use crate::analysis::zonal::{aoi_area_ha, deg_class_areas, transition_areas};
use crate::config::{ANALYSIS, DEBUG_FLAGS, LAND_COVER_COVERAGE};
use crate::data::bundle::DataBundle;
use crate::domain::landcover::DegClass;
use crate::domain::period::YearRange;
use crate::domain::raster::ClassRaster;
use crate::models::JobParams;
use crate::models::results::{DegradationSummary, IndicatorOutputs};

/// Zero out byte-convention pixels outside the AOI.
fn clip(raster: &ClassRaster, mask: &ClassRaster) -> ClassRaster {
    raster.zip_map(mask, |v, m| if m == 1 { v } else { DegClass::NODATA_BYTE })
}

/// One-out-all-out: a pixel degraded by any sub-indicator is degraded;
/// improvement requires at least one improving sub-indicator and none
/// degrading.
fn combine_sdg(productivity: i32, land_cover: i32, soil_carbon: i32) -> i32 {
    let components = [productivity, land_cover, soil_carbon];
    if components.contains(&DegClass::Degraded.byte()) {
        DegClass::Degraded.byte()
    } else if components.contains(&DegClass::Improved.byte()) {
        DegClass::Improved.byte()
    } else if components.contains(&DegClass::Stable.byte()) {
        DegClass::Stable.byte()
    } else {
        DegClass::NODATA_BYTE
    }
}

/// Year the performance land cover map is read at: the performance window
/// start, clamped to the product's coverage. The units are meant to group
/// land as it was when the window opened, before any degradation within it.
fn performance_cover_year(performance: YearRange) -> i32 {
    LAND_COVER_COVERAGE.clamp_year(performance.start)
}

/// Run the full assessment for one parameter snapshot.
pub fn run_indicator(params: &JobParams, bundle: &DataBundle) -> Result<IndicatorOutputs> {
    let started = Instant::now();
    let mut mark = Instant::now();
    let mut component_done = move |label: &str| {
        if DEBUG_FLAGS.print_component_timings {
            log::debug!("{} took {} ms", label, mark.elapsed().as_millis());
        }
        mark = Instant::now();
    };
    let grid = bundle.grid;

    let aoi_mask = grid.aoi_mask(&params.aoi);
    if aoi_mask.count(1) == 0 {
        bail!("the area of interest does not intersect the data grid");
    }

    // Integrate once over the envelope of every sub-period, slice after
    let envelope = params.periods.integration_envelope();
    let vi = annual_vi_stack(
        bundle,
        &params.sensors,
        params.vegetation_index,
        params.vi_threshold,
        envelope,
    )
    .context("vegetation index integration")?;
    let precip = annual_precip_stack(bundle, envelope).context("precipitation integration")?;
    component_done("integration");

    let (from, to) = params.reclass.remap_tables();

    // Trajectory over the trend window
    let trend = params.periods.trend;
    let trajectory_out = trajectory(
        &vi.slice_years(trend.start, trend.end),
        &precip.slice_years(trend.start, trend.end),
        params.trajectory,
        ANALYSIS.trajectory.confidence,
    )
    .context("productivity trajectory")?;
    component_done("trajectory");

    // Performance against similar land, cover read at the window's start
    let perf = params.periods.performance;
    let perf_lc_year = performance_cover_year(perf);
    let perf_lc = bundle
        .land_cover_at_or_before(perf_lc_year)
        .ok_or_else(|| anyhow::anyhow!("no land cover at or before {}", perf_lc_year))?
        .remap(&from, &to);
    let performance_out = performance(
        &vi.slice_years(perf.start, perf.end),
        &perf_lc,
        &bundle.soil_taxonomy,
        &aoi_mask,
    )
    .context("productivity performance")?;
    component_done("performance");

    // State: recent years against the pixel's own baseline
    let state_out = state(
        &vi,
        params.periods.state_baseline(),
        params.periods.state_target(),
    )
    .context("productivity state")?;
    component_done("state");

    let productivity_out = productivity(&trajectory_out, &state_out, &performance_out)?;

    // Land cover transitions over the assessment window
    let assessment = params.periods.assessment;
    let lc_baseline_year = LAND_COVER_COVERAGE.clamp_year(assessment.start);
    let lc_target_year = LAND_COVER_COVERAGE.clamp_year(assessment.end);
    let baseline_product = bundle
        .land_cover_at_or_before(lc_baseline_year)
        .ok_or_else(|| anyhow::anyhow!("no land cover at or before {}", lc_baseline_year))?;
    let target_product = bundle
        .land_cover_at_or_before(lc_target_year)
        .ok_or_else(|| anyhow::anyhow!("no land cover at or before {}", lc_target_year))?;
    let lc_out = land_cover(baseline_product, target_product, &params.reclass)
        .context("land cover")?;
    component_done("land cover");

    let soc_out = soil_carbon(
        bundle,
        params.periods.soc,
        &params.reclass,
        params.climate_coef_override,
    )
    .context("soil organic carbon")?;
    component_done("soil carbon");

    let productivity_clipped = clip(&productivity_out, &aoi_mask);
    let land_cover_clipped = clip(&lc_out.degradation, &aoi_mask);
    let soil_carbon_clipped = clip(&soc_out, &aoi_mask);

    let sdg = ClassRaster {
        grid,
        values: (0..grid.len())
            .map(|idx| {
                combine_sdg(
                    productivity_clipped.values[idx],
                    land_cover_clipped.values[idx],
                    soil_carbon_clipped.values[idx],
                )
            })
            .collect(),
    };

    let summary = DegradationSummary {
        aoi_name: params.aoi_name.clone(),
        aoi_area_ha: aoi_area_ha(&aoi_mask),
        productivity: deg_class_areas(&productivity_clipped, &aoi_mask),
        land_cover: deg_class_areas(&land_cover_clipped, &aoi_mask),
        soil_carbon: deg_class_areas(&soil_carbon_clipped, &aoi_mask),
        sdg: deg_class_areas(&sdg, &aoi_mask),
        transitions: transition_areas(&lc_out.baseline, &lc_out.target, &aoi_mask),
    };

    let duration_ms = started.elapsed().as_millis();
    log::info!(
        "indicator run finished in {} ms, {:.1}% of the AOI degraded",
        duration_ms,
        summary.sdg_degraded_pct()
    );

    let mean_vi = vi
        .slice_years(assessment.start, assessment.end)
        .pixel_mean()
        .masked(&aoi_mask, 1);

    Ok(IndicatorOutputs {
        grid,
        mean_vi,
        trajectory: clip(&trajectory_out, &aoi_mask),
        performance: clip(&performance_out, &aoi_mask),
        state: clip(&state_out, &aoi_mask),
        productivity: productivity_clipped,
        lc_baseline: lc_out.baseline.masked(&aoi_mask, 1),
        lc_target: lc_out.target.masked(&aoi_mask, 1),
        lc_transition: lc_out.transition.masked(&aoi_mask, 1),
        aoi_mask,
        land_cover: land_cover_clipped,
        soil_carbon: soil_carbon_clipped,
        sdg,
        summary,
        computed_at: Utc::now(),
        duration_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::demo::{demo_aoi, demo_bundle};
    use crate::domain::geometry::{Aoi, AoiPoint};
    use crate::domain::raster::NODATA;
    use crate::models::IndicatorModel;

    fn demo_params() -> JobParams {
        IndicatorModel::default().job_params(demo_aoi(), "demo")
    }

    #[test]
    fn full_run_produces_all_layers() {
        let bundle = demo_bundle();
        let out = run_indicator(&demo_params(), &bundle).unwrap();

        assert_eq!(out.grid, bundle.grid);
        let inside = out.aoi_mask.count(1);
        assert!(inside > 0);

        // Every clipped layer is nodata outside the AOI
        for (idx, &m) in out.aoi_mask.values.iter().enumerate() {
            if m == 0 {
                assert_eq!(out.sdg.values[idx], DegClass::NODATA_BYTE);
                assert_eq!(out.productivity.values[idx], DegClass::NODATA_BYTE);
                assert_eq!(out.lc_baseline.values[idx], NODATA);
            }
        }

        assert!(!out.summary.sdg.is_empty());
        assert!(out.summary.aoi_area_ha > 0.0);
    }

    #[test]
    fn demo_area_is_partly_degraded() {
        let bundle = demo_bundle();
        let out = run_indicator(&demo_params(), &bundle).unwrap();
        // The degrading west and the cleared forest strip both show up
        assert!(out.summary.sdg_degraded_pct() > 5.0);
        assert!(out.summary.sdg_degraded_pct() < 95.0);
        assert!(!out.summary.transitions.is_empty());
    }

    #[test]
    fn one_out_all_out_priorities() {
        let d = DegClass::Degraded.byte();
        let s = DegClass::Stable.byte();
        let i = DegClass::Improved.byte();
        let n = DegClass::NODATA_BYTE;

        assert_eq!(combine_sdg(d, i, i), d);
        assert_eq!(combine_sdg(s, i, s), i);
        assert_eq!(combine_sdg(s, s, s), s);
        assert_eq!(combine_sdg(n, s, n), s);
        assert_eq!(combine_sdg(n, n, n), n);
    }

    #[test]
    fn performance_cover_comes_from_the_window_start() {
        assert_eq!(performance_cover_year(YearRange::new(2001, 2015)), 2001);
        // Windows opening before the product's coverage clamp to its start
        assert_eq!(
            performance_cover_year(YearRange::new(1985, 2015)),
            LAND_COVER_COVERAGE.start
        );
    }

    #[test]
    fn disjoint_aoi_is_an_error() {
        let bundle = demo_bundle();
        let mut params = demo_params();
        params.aoi = Aoi {
            points: vec![AoiPoint::new(-40.0, 120.0, 10.0)],
        };
        assert!(run_indicator(&params, &bundle).is_err());
    }
}
