//! Parameter tables for the land cover and soil organic carbon components:
//! the default ESA-CCI class aggregation, the UNCCD transition significance
//! matrix, and the IPCC stock-change factors.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::domain::{DegClass, LcClass};

// ============================================================================
// Land cover aggregation: product classes -> the 7 reporting classes
// ============================================================================

/// Default mapping from ESA CCI land cover codes to the reporting classes.
/// Editable per-assessment in the reclassify tile.
pub const DEFAULT_CLASS_MAP: &[(i32, LcClass)] = &[
    (10, LcClass::Cropland),
    (11, LcClass::Cropland),
    (12, LcClass::Cropland),
    (20, LcClass::Cropland),
    (30, LcClass::Cropland),
    (40, LcClass::TreeCovered),
    (50, LcClass::TreeCovered),
    (60, LcClass::TreeCovered),
    (61, LcClass::TreeCovered),
    (62, LcClass::TreeCovered),
    (70, LcClass::TreeCovered),
    (71, LcClass::TreeCovered),
    (72, LcClass::TreeCovered),
    (80, LcClass::TreeCovered),
    (81, LcClass::TreeCovered),
    (82, LcClass::TreeCovered),
    (90, LcClass::TreeCovered),
    (100, LcClass::TreeCovered),
    (110, LcClass::Grassland),
    (120, LcClass::Grassland),
    (121, LcClass::Grassland),
    (122, LcClass::Grassland),
    (130, LcClass::Grassland),
    (140, LcClass::Grassland),
    (150, LcClass::OtherLand),
    (151, LcClass::OtherLand),
    (152, LcClass::OtherLand),
    (153, LcClass::OtherLand),
    (160, LcClass::Wetland),
    (170, LcClass::Wetland),
    (180, LcClass::Wetland),
    (190, LcClass::Artificial),
    (200, LcClass::OtherLand),
    (201, LcClass::OtherLand),
    (202, LcClass::OtherLand),
    (210, LcClass::Water),
];

// ============================================================================
// Transition significance matrix
// ============================================================================

/// 7x7 matrix typing each land cover transition as degradation (-1),
/// no relevant change (0) or improvement (+1). Rows are the baseline class,
/// columns the target class, both in reporting-code order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionMatrix {
    pub entries: [[i8; LcClass::COUNT]; LcClass::COUNT],
}

impl TransitionMatrix {
    pub fn get(&self, baseline: LcClass, target: LcClass) -> i8 {
        self.entries[baseline.code() as usize - 1][target.code() as usize - 1]
    }

    pub fn set(&mut self, baseline: LcClass, target: LcClass, sign: i8) {
        self.entries[baseline.code() as usize - 1][target.code() as usize - 1] =
            sign.clamp(-1, 1);
    }

    pub fn deg_class(&self, baseline: LcClass, target: LcClass) -> DegClass {
        DegClass::from_sign(self.get(baseline, target))
    }
}

impl Default for TransitionMatrix {
    /// The UNCCD default meaning matrix.
    /// Row order: tree-covered, grassland, cropland, wetland, artificial,
    /// other land, water.
    fn default() -> Self {
        Self {
            entries: [
                [0, -1, -1, -1, -1, -1, 0],
                [1, 0, 1, -1, -1, -1, 0],
                [1, -1, 0, -1, -1, -1, 0],
                [-1, -1, -1, 0, -1, -1, 0],
                [1, 1, 1, 1, 0, 1, 0],
                [1, 1, 1, 1, -1, 0, 0],
                [0, 0, 0, 0, 0, 0, 0],
            ],
        }
    }
}

// ============================================================================
// IPCC climate zones and SOC stock-change factors
// ============================================================================

/// Coarse IPCC climate zone, as coded in the bundle's climate zone raster.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum ClimateZone {
    TemperateDry,
    TemperateMoist,
    TropicalDry,
    TropicalMoist,
    TropicalWet,
    Boreal,
}

impl ClimateZone {
    pub fn code(self) -> i32 {
        match self {
            ClimateZone::TemperateDry => 1,
            ClimateZone::TemperateMoist => 2,
            ClimateZone::TropicalDry => 3,
            ClimateZone::TropicalMoist => 4,
            ClimateZone::TropicalWet => 5,
            ClimateZone::Boreal => 6,
        }
    }

    pub fn from_code(code: i32) -> Option<ClimateZone> {
        match code {
            1 => Some(ClimateZone::TemperateDry),
            2 => Some(ClimateZone::TemperateMoist),
            3 => Some(ClimateZone::TropicalDry),
            4 => Some(ClimateZone::TropicalMoist),
            5 => Some(ClimateZone::TropicalWet),
            6 => Some(ClimateZone::Boreal),
            _ => None,
        }
    }
}

/// IPCC land-use conversion coefficient (F_LU for cropland) per climate zone.
/// Applied when native vegetation converts to cropland; the inverse applies
/// on the way back.
pub const CLIMATE_CONVERSION: &[(ClimateZone, f64)] = &[
    (ClimateZone::TemperateDry, 0.80),
    (ClimateZone::TemperateMoist, 0.69),
    (ClimateZone::TropicalDry, 0.58),
    (ClimateZone::TropicalMoist, 0.48),
    (ClimateZone::TropicalWet, 0.48),
    (ClimateZone::Boreal, 0.69),
];

pub fn climate_conversion_coef(zone: ClimateZone) -> f64 {
    CLIMATE_CONVERSION
        .iter()
        .find(|(z, _)| *z == zone)
        .map(|(_, c)| *c)
        .unwrap_or(1.0)
}

/// The land-use component of the stock change. Conversions to cropland
/// depend on the climate zone, so they cannot be a plain number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LandUseFactor {
    Fixed(f64),
    /// Multiply by the climate conversion coefficient.
    ClimateDependent,
    /// Multiply by 1 / climate conversion coefficient.
    InverseClimateDependent,
}

impl LandUseFactor {
    pub fn resolve(self, climate_coef: f64) -> f64 {
        match self {
            LandUseFactor::Fixed(f) => f,
            LandUseFactor::ClimateDependent => climate_coef,
            LandUseFactor::InverseClimateDependent => {
                if climate_coef.abs() < f64::EPSILON {
                    1.0
                } else {
                    1.0 / climate_coef
                }
            }
        }
    }
}

/// Stock-change factors for one land cover transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SocFactors {
    pub land_use: LandUseFactor,
    pub management: f64,
    pub input: f64,
}

const NEUTRAL: SocFactors = SocFactors {
    land_use: LandUseFactor::Fixed(1.0),
    management: 1.0,
    input: 1.0,
};

/// Stock-change factors for a transition between reporting classes.
/// Default IPCC tier 1 behavior: only conversions in and out of cropland
/// and artificial surfaces move carbon; everything else is neutral.
pub fn soc_factors_for(baseline: LcClass, target: LcClass) -> SocFactors {
    use LcClass::*;

    if baseline == target {
        return NEUTRAL;
    }

    match (baseline, target) {
        // Native vegetation brought into cultivation
        (TreeCovered | Grassland | Wetland, Cropland) => SocFactors {
            land_use: LandUseFactor::ClimateDependent,
            management: 1.0,
            input: 1.0,
        },
        // Cropland reverting to native vegetation
        (Cropland, TreeCovered | Grassland | Wetland) => SocFactors {
            land_use: LandUseFactor::InverseClimateDependent,
            management: 1.0,
            input: 1.0,
        },
        // Sealing under artificial surfaces loses a fixed share
        (_, Artificial) => SocFactors {
            land_use: LandUseFactor::Fixed(0.80),
            management: 1.0,
            input: 1.0,
        },
        // Degradation to bare ground
        (TreeCovered | Grassland | Cropland | Wetland, OtherLand) => SocFactors {
            land_use: LandUseFactor::Fixed(0.90),
            management: 1.0,
            input: 1.0,
        },
        // Revegetation of bare ground
        (OtherLand, TreeCovered | Grassland | Cropland | Wetland) => SocFactors {
            land_use: LandUseFactor::Fixed(1.10),
            management: 1.0,
            input: 1.0,
        },
        _ => NEUTRAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matrix_is_zero_on_the_diagonal() {
        let m = TransitionMatrix::default();
        use strum::IntoEnumIterator;
        for class in LcClass::iter() {
            assert_eq!(m.get(class, class), 0, "diagonal for {class}");
        }
    }

    #[test]
    fn deforestation_is_degradation() {
        let m = TransitionMatrix::default();
        assert_eq!(
            m.deg_class(LcClass::TreeCovered, LcClass::Cropland),
            DegClass::Degraded
        );
        assert_eq!(
            m.deg_class(LcClass::Cropland, LcClass::TreeCovered),
            DegClass::Improved
        );
    }

    #[test]
    fn matrix_set_clamps_sign() {
        let mut m = TransitionMatrix::default();
        m.set(LcClass::Water, LcClass::Water, 5);
        assert_eq!(m.get(LcClass::Water, LcClass::Water), 1);
    }

    #[test]
    fn cropland_conversions_are_climate_dependent() {
        let f = soc_factors_for(LcClass::TreeCovered, LcClass::Cropland);
        assert_eq!(f.land_use, LandUseFactor::ClimateDependent);
        let back = soc_factors_for(LcClass::Cropland, LcClass::Grassland);
        assert_eq!(back.land_use, LandUseFactor::InverseClimateDependent);

        let coef = climate_conversion_coef(ClimateZone::TropicalDry);
        assert!((f.land_use.resolve(coef) - 0.58).abs() < 1e-12);
        assert!((back.land_use.resolve(coef) - 1.0 / 0.58).abs() < 1e-12);
    }

    #[test]
    fn unchanged_cover_is_neutral() {
        let f = soc_factors_for(LcClass::Grassland, LcClass::Grassland);
        assert_eq!(f.land_use.resolve(0.5), 1.0);
        assert_eq!(f.management, 1.0);
        assert_eq!(f.input, 1.0);
    }

    #[test]
    fn climate_zone_codes_round_trip() {
        use strum::IntoEnumIterator;
        for zone in ClimateZone::iter() {
            assert_eq!(ClimateZone::from_code(zone.code()), Some(zone));
        }
    }
}
