use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::domain::geometry::{Aoi, BoundingBox};

/// Nodata sentinel for class rasters.
/// Matches the int16 convention of the analysis-ready land products.
pub const NODATA: i32 = -32768;

// ============================================================================
// Grid: shared georeferencing for every raster in a bundle
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    pub bounds: BoundingBox,
}

impl Grid {
    pub fn new(rows: usize, cols: usize, bounds: BoundingBox) -> Self {
        Self { rows, cols, bounds }
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Center coordinate of a pixel. Row 0 is the northern edge.
    pub fn pixel_center(&self, row: usize, col: usize) -> (f64, f64) {
        let lat_step = self.bounds.lat_span() / self.rows as f64;
        let lon_step = self.bounds.lon_span() / self.cols as f64;
        (
            self.bounds.max_lat - (row as f64 + 0.5) * lat_step,
            self.bounds.min_lon + (col as f64 + 0.5) * lon_step,
        )
    }

    /// Approximate area of one pixel in hectares, evaluated at the pixel row.
    pub fn pixel_area_ha(&self, row: usize) -> f64 {
        let lat_step = self.bounds.lat_span() / self.rows as f64;
        let lon_step = self.bounds.lon_span() / self.cols as f64;
        let (lat, _) = self.pixel_center(row, 0);
        let km_lat = lat_step * 111.32;
        let km_lon = lon_step * 111.32 * lat.to_radians().cos();
        km_lat.abs() * km_lon.abs() * 100.0
    }

    /// Rasterize the AOI: 1 inside, 0 outside.
    pub fn aoi_mask(&self, aoi: &Aoi) -> ClassRaster {
        let mut mask = ClassRaster::filled(*self, 0);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let (lat, lon) = self.pixel_center(row, col);
                if aoi.contains(lat, lon) {
                    mask.values[row * self.cols + col] = 1;
                }
            }
        }
        mask
    }
}

// ============================================================================
// FloatRaster: continuous values, NaN = nodata
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatRaster {
    pub grid: Grid,
    pub values: Vec<f64>,
}

impl FloatRaster {
    pub fn filled(grid: Grid, value: f64) -> Self {
        Self {
            values: vec![value; grid.len()],
            grid,
        }
    }

    pub fn from_values(grid: Grid, values: Vec<f64>) -> Result<Self> {
        if values.len() != grid.len() {
            bail!(
                "raster size mismatch: grid wants {} values, got {}",
                grid.len(),
                values.len()
            );
        }
        Ok(Self { grid, values })
    }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> FloatRaster {
        FloatRaster {
            grid: self.grid,
            values: self.values.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Per-pixel combination of two rasters on the same grid.
    pub fn zip_map(&self, other: &FloatRaster, f: impl Fn(f64, f64) -> f64) -> FloatRaster {
        debug_assert_eq!(self.grid, other.grid);
        FloatRaster {
            grid: self.grid,
            values: self
                .values
                .iter()
                .zip(&other.values)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    /// Set to nodata where the mask is not `keep`.
    pub fn masked(&self, mask: &ClassRaster, keep: i32) -> FloatRaster {
        debug_assert_eq!(self.grid, mask.grid);
        FloatRaster {
            grid: self.grid,
            values: self
                .values
                .iter()
                .zip(&mask.values)
                .map(|(&v, &m)| if m == keep { v } else { f64::NAN })
                .collect(),
        }
    }

    /// Mean of valid pixels, None when everything is nodata.
    pub fn mean(&self) -> Option<f64> {
        let mut sum = 0.0;
        let mut n = 0usize;
        for &v in &self.values {
            if v.is_finite() {
                sum += v;
                n += 1;
            }
        }
        (n > 0).then(|| sum / n as f64)
    }
}

// ============================================================================
// ClassRaster: categorical values, NODATA sentinel
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRaster {
    pub grid: Grid,
    pub values: Vec<i32>,
}

impl ClassRaster {
    pub fn filled(grid: Grid, value: i32) -> Self {
        Self {
            values: vec![value; grid.len()],
            grid,
        }
    }

    pub fn from_values(grid: Grid, values: Vec<i32>) -> Result<Self> {
        if values.len() != grid.len() {
            bail!(
                "raster size mismatch: grid wants {} values, got {}",
                grid.len(),
                values.len()
            );
        }
        Ok(Self { grid, values })
    }

    /// Paired-table remap. Values not present in `from` become nodata,
    /// mirroring the remap of the source land products.
    pub fn remap(&self, from: &[i32], to: &[i32]) -> ClassRaster {
        debug_assert_eq!(from.len(), to.len());
        ClassRaster {
            grid: self.grid,
            values: self
                .values
                .iter()
                .map(|&v| {
                    if v == NODATA {
                        NODATA
                    } else {
                        from.iter()
                            .position(|&f| f == v)
                            .map(|i| to[i])
                            .unwrap_or(NODATA)
                    }
                })
                .collect(),
        }
    }

    pub fn map(&self, f: impl Fn(i32) -> i32) -> ClassRaster {
        ClassRaster {
            grid: self.grid,
            values: self.values.iter().map(|&v| f(v)).collect(),
        }
    }

    pub fn zip_map(&self, other: &ClassRaster, f: impl Fn(i32, i32) -> i32) -> ClassRaster {
        debug_assert_eq!(self.grid, other.grid);
        ClassRaster {
            grid: self.grid,
            values: self
                .values
                .iter()
                .zip(&other.values)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    /// Set to nodata where the mask is not `keep`.
    pub fn masked(&self, mask: &ClassRaster, keep: i32) -> ClassRaster {
        debug_assert_eq!(self.grid, mask.grid);
        ClassRaster {
            grid: self.grid,
            values: self
                .values
                .iter()
                .zip(&mask.values)
                .map(|(&v, &m)| if m == keep { v } else { NODATA })
                .collect(),
        }
    }

    pub fn count(&self, class: i32) -> usize {
        self.values.iter().filter(|&&v| v == class).count()
    }
}

// ============================================================================
// RasterStack: one float raster per year, all on the same grid
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterStack {
    pub grid: Grid,
    pub years: Vec<i32>,
    pub layers: Vec<FloatRaster>,
}

impl RasterStack {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            years: Vec::new(),
            layers: Vec::new(),
        }
    }

    pub fn push(&mut self, year: i32, layer: FloatRaster) -> Result<()> {
        if layer.grid != self.grid {
            bail!("stack layer for {} is on a different grid", year);
        }
        self.years.push(year);
        self.layers.push(layer);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer_for(&self, year: i32) -> Option<&FloatRaster> {
        self.years
            .iter()
            .position(|&y| y == year)
            .map(|i| &self.layers[i])
    }

    /// Restrict to layers whose year falls in [start, end].
    pub fn slice_years(&self, start: i32, end: i32) -> RasterStack {
        let mut out = RasterStack::new(self.grid);
        for (year, layer) in self.years.iter().zip(&self.layers) {
            if (start..=end).contains(year) {
                out.years.push(*year);
                out.layers.push(layer.clone());
            }
        }
        out
    }

    /// The per-pixel time series at a flat pixel index.
    pub fn pixel_series(&self, idx: usize) -> Vec<f64> {
        self.layers.iter().map(|l| l.values[idx]).collect()
    }

    /// Per-pixel mean over years.
    pub fn pixel_mean(&self) -> FloatRaster {
        let mut out = FloatRaster::filled(self.grid, f64::NAN);
        for idx in 0..self.grid.len() {
            let mut sum = 0.0;
            let mut n = 0usize;
            for layer in &self.layers {
                let v = layer.values[idx];
                if v.is_finite() {
                    sum += v;
                    n += 1;
                }
            }
            if n > 0 {
                out.values[idx] = sum / n as f64;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::AoiPoint;

    fn grid_2x2() -> Grid {
        Grid::new(
            2,
            2,
            BoundingBox {
                min_lat: 0.0,
                max_lat: 2.0,
                min_lon: 0.0,
                max_lon: 2.0,
            },
        )
    }

    #[test]
    fn pixel_centers_run_north_to_south() {
        let g = grid_2x2();
        let (lat0, lon0) = g.pixel_center(0, 0);
        let (lat1, _) = g.pixel_center(1, 0);
        assert!((lat0 - 1.5).abs() < 1e-9);
        assert!((lon0 - 0.5).abs() < 1e-9);
        assert!(lat1 < lat0);
    }

    #[test]
    fn remap_drops_unknown_classes() {
        let r = ClassRaster::from_values(grid_2x2(), vec![10, 20, 30, NODATA]).unwrap();
        let remapped = r.remap(&[10, 20], &[1, 2]);
        assert_eq!(remapped.values, vec![1, 2, NODATA, NODATA]);
    }

    #[test]
    fn masked_keeps_only_mask_hits() {
        let r = FloatRaster::from_values(grid_2x2(), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let mask = ClassRaster::from_values(grid_2x2(), vec![1, 0, 1, 0]).unwrap();
        let m = r.masked(&mask, 1);
        assert!(m.values[0].is_finite() && m.values[2].is_finite());
        assert!(m.values[1].is_nan() && m.values[3].is_nan());
        assert_eq!(m.mean(), Some(2.0));
    }

    #[test]
    fn stack_slice_and_series() {
        let g = grid_2x2();
        let mut stack = RasterStack::new(g);
        for (i, year) in (2001..=2004).enumerate() {
            stack
                .push(year, FloatRaster::filled(g, i as f64))
                .unwrap();
        }
        let sliced = stack.slice_years(2002, 2003);
        assert_eq!(sliced.years, vec![2002, 2003]);
        assert_eq!(sliced.pixel_series(0), vec![1.0, 2.0]);
        assert_eq!(stack.pixel_mean().values[0], 1.5);
    }

    #[test]
    fn aoi_mask_marks_inside_pixels() {
        let g = grid_2x2();
        let aoi = Aoi {
            // ~55 km buffer around the NW pixel center
            points: vec![AoiPoint::new(1.5, 0.5, 30.0)],
        };
        let mask = g.aoi_mask(&aoi);
        assert_eq!(mask.values[0], 1);
        assert_eq!(mask.values[3], 0);
    }

    #[test]
    fn size_mismatch_is_an_error() {
        assert!(FloatRaster::from_values(grid_2x2(), vec![1.0]).is_err());
    }
}
