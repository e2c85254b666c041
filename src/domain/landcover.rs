use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::domain::raster::NODATA;

/// The seven UNCCD reporting land cover classes (IPCC aggregation).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum LcClass {
    #[strum(serialize = "Tree-covered")]
    TreeCovered,
    Grassland,
    Cropland,
    Wetland,
    #[strum(serialize = "Artificial surfaces")]
    Artificial,
    #[strum(serialize = "Other land")]
    OtherLand,
    #[strum(serialize = "Water bodies")]
    Water,
}

impl LcClass {
    pub const COUNT: usize = 7;

    /// Reporting code, 1-based.
    pub fn code(self) -> i32 {
        match self {
            LcClass::TreeCovered => 1,
            LcClass::Grassland => 2,
            LcClass::Cropland => 3,
            LcClass::Wetland => 4,
            LcClass::Artificial => 5,
            LcClass::OtherLand => 6,
            LcClass::Water => 7,
        }
    }

    pub fn from_code(code: i32) -> Option<LcClass> {
        match code {
            1 => Some(LcClass::TreeCovered),
            2 => Some(LcClass::Grassland),
            3 => Some(LcClass::Cropland),
            4 => Some(LcClass::Wetland),
            5 => Some(LcClass::Artificial),
            6 => Some(LcClass::OtherLand),
            7 => Some(LcClass::Water),
            _ => None,
        }
    }
}

/// Transition code: first digit baseline class, second digit target class.
pub fn transition_code(baseline: i32, target: i32) -> i32 {
    if baseline == NODATA || target == NODATA {
        NODATA
    } else {
        baseline * 10 + target
    }
}

/// Degradation verdict of a pixel, byte convention of the land products:
/// 1 degraded, 2 stable, 3 improved, 0 nodata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum DegClass {
    Degraded,
    Stable,
    Improved,
}

impl DegClass {
    pub const NODATA_BYTE: i32 = 0;

    pub fn byte(self) -> i32 {
        match self {
            DegClass::Degraded => 1,
            DegClass::Stable => 2,
            DegClass::Improved => 3,
        }
    }

    pub fn from_byte(byte: i32) -> Option<DegClass> {
        match byte {
            1 => Some(DegClass::Degraded),
            2 => Some(DegClass::Stable),
            3 => Some(DegClass::Improved),
            _ => None,
        }
    }

    /// From a -1/0/+1 significance entry.
    pub fn from_sign(sign: i8) -> DegClass {
        match sign {
            s if s < 0 => DegClass::Degraded,
            s if s > 0 => DegClass::Improved,
            _ => DegClass::Stable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn codes_round_trip() {
        for class in LcClass::iter() {
            assert_eq!(LcClass::from_code(class.code()), Some(class));
        }
        assert_eq!(LcClass::from_code(0), None);
        assert_eq!(LcClass::from_code(8), None);
    }

    #[test]
    fn transition_codes_combine_digits() {
        assert_eq!(transition_code(1, 3), 13);
        assert_eq!(transition_code(7, 7), 77);
        assert_eq!(transition_code(NODATA, 3), NODATA);
    }

    #[test]
    fn deg_class_bytes() {
        assert_eq!(DegClass::Degraded.byte(), 1);
        assert_eq!(DegClass::from_byte(3), Some(DegClass::Improved));
        assert_eq!(DegClass::from_byte(0), None);
        assert_eq!(DegClass::from_sign(-1), DegClass::Degraded);
        assert_eq!(DegClass::from_sign(0), DegClass::Stable);
    }
}
