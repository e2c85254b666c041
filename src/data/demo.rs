//! Deterministic synthetic bundle for demos and tests.
//!
//! The patterns are chosen so every verdict class actually occurs: the
//! western third of the grid loses productivity year over year, the
//! north-eastern corner gains, a land cover strip converts from forest to
//! cropland halfway through the period.

use crate::config::factors::ClimateZone;
use crate::config::persistence::BUNDLE_VERSION;
use crate::data::bundle::{DataBundle, PrecipObservation, SceneObservation};
use crate::domain::geometry::{Aoi, AoiPoint, BoundingBox};
use crate::domain::raster::{ClassRaster, FloatRaster, Grid};
use crate::models::Sensor;

pub const DEMO_YEARS: (i32, i32) = (2000, 2016);
const ROWS: usize = 20;
const COLS: usize = 20;
/// Forest strip converts to cropland at the start of this year.
const CONVERSION_YEAR: i32 = 2008;

fn demo_grid() -> Grid {
    Grid::new(
        ROWS,
        COLS,
        BoundingBox {
            min_lat: 8.0,
            max_lat: 10.0,
            min_lon: 38.0,
            max_lon: 40.0,
        },
    )
}

/// Underlying "true" VI of a pixel for a given fractional year.
fn vi_signal(row: usize, col: usize, year: i32, month: u32) -> f64 {
    let t = (year - DEMO_YEARS.0) as f64 + (month as f64 - 0.5) / 12.0;
    let base = 0.35 + 0.25 * (row as f64 / ROWS as f64);

    // Spatial trend pattern
    let trend = if col < COLS / 3 {
        -0.010 // degrading west
    } else if col >= 2 * COLS / 3 && row < ROWS / 2 {
        0.010 // improving north-east
    } else {
        0.0
    };

    // Mild seasonality
    let season = 0.05 * ((month as f64 / 12.0) * std::f64::consts::TAU).sin();

    (base + trend * t + season).clamp(0.02, 0.95)
}

/// Solve red for a target VI with a fixed NIR, so the scene bands produce
/// the requested NDVI exactly.
fn bands_for_vi(vi: f64) -> (f64, f64) {
    let nir = 0.4;
    let red = nir * (1.0 - vi) / (1.0 + vi);
    (red, nir)
}

fn monthly_precip(row: usize, _col: usize, year: i32, month: u32) -> f64 {
    let t = (year - DEMO_YEARS.0) as f64;
    let wet_season = 60.0 * ((month as f64 / 12.0) * std::f64::consts::TAU).cos().max(0.0);
    30.0 + wet_season + 2.0 * (row as f64 / ROWS as f64) + 0.4 * t
}

fn land_cover_map(grid: Grid, year: i32) -> ClassRaster {
    let mut map = ClassRaster::filled(grid, 130); // grassland
    for row in 0..ROWS {
        for col in 0..COLS {
            let idx = row * COLS + col;
            if col >= COLS - 3 {
                map.values[idx] = 210; // water along the eastern edge
            } else if row < ROWS / 3 {
                map.values[idx] = 50; // forest in the north
            } else if row >= 2 * ROWS / 3 {
                map.values[idx] = 10; // cropland in the south
            }
            // The conversion strip: forest cleared for cropland
            if (8..11).contains(&col) && row < ROWS / 3 && year >= CONVERSION_YEAR {
                map.values[idx] = 10;
            }
        }
    }
    map
}

/// Build the demo bundle. Fully deterministic.
pub fn demo_bundle() -> DataBundle {
    let grid = demo_grid();
    let (start, end) = DEMO_YEARS;

    let mut scenes = Vec::new();
    let mut precipitation = Vec::new();
    for year in start..=end {
        for month in [2u32, 5, 8, 11] {
            let mut red = FloatRaster::filled(grid, f64::NAN);
            let mut nir = FloatRaster::filled(grid, f64::NAN);
            for row in 0..ROWS {
                for col in 0..COLS {
                    let idx = row * COLS + col;
                    // A moving stripe of "cloud" keeps the NaN path honest
                    if (row + col + year as usize + month as usize) % 23 == 0 {
                        continue;
                    }
                    let (r, n) = bands_for_vi(vi_signal(row, col, year, month));
                    red.values[idx] = r;
                    nir.values[idx] = n;
                }
            }
            scenes.push(SceneObservation {
                sensor: Sensor::ModisMod13Q1,
                year,
                month,
                red,
                nir,
            });
        }

        for month in 1..=12u32 {
            let mut field = FloatRaster::filled(grid, 0.0);
            for row in 0..ROWS {
                for col in 0..COLS {
                    field.values[row * COLS + col] = monthly_precip(row, col, year, month);
                }
            }
            precipitation.push(PrecipObservation {
                year,
                month,
                precipitation: field,
            });
        }
    }

    let land_cover_years: Vec<i32> = (start..=end).collect();
    let land_cover = land_cover_years
        .iter()
        .map(|&y| land_cover_map(grid, y))
        .collect();

    let mut soc = FloatRaster::filled(grid, 0.0);
    for row in 0..ROWS {
        for col in 0..COLS {
            soc.values[row * COLS + col] = 30.0 + 20.0 * (row as f64 / ROWS as f64);
        }
    }

    let mut soil_taxonomy = ClassRaster::filled(grid, 3);
    for row in 0..ROWS {
        for col in 0..COLS / 2 {
            soil_taxonomy.values[row * COLS + col] = 4;
        }
    }

    let climate_zones = ClassRaster::filled(grid, ClimateZone::TropicalDry.code());

    DataBundle {
        version: BUNDLE_VERSION,
        name: "terradeg demo".to_string(),
        grid,
        scenes,
        precipitation,
        land_cover_years,
        land_cover,
        soc,
        soil_taxonomy,
        climate_zones,
    }
}

/// An AOI covering most of the demo grid.
pub fn demo_aoi() -> Aoi {
    Aoi {
        points: vec![AoiPoint::new(9.0, 39.0, 90.0)],
    }
}
