//! Descriptors for the remote-sensing products a bundle can carry.

use crate::domain::YearRange;
use crate::models::Sensor;

/// Static metadata for one supported sensor.
pub struct SensorSpec {
    pub sensor: Sensor,
    pub label: &'static str,
    /// Native ground resolution in meters.
    pub resolution_m: u32,
    /// Years the archive covers.
    pub coverage: YearRange,
}

/// The sensor catalog. Order matters: this is the order shown in the UI.
pub const SENSORS: &[SensorSpec] = &[
    SensorSpec {
        sensor: Sensor::Landsat4,
        label: "Landsat 4",
        resolution_m: 30,
        coverage: YearRange {
            start: 1982,
            end: 1993,
        },
    },
    SensorSpec {
        sensor: Sensor::Landsat5,
        label: "Landsat 5",
        resolution_m: 30,
        coverage: YearRange {
            start: 1984,
            end: 2012,
        },
    },
    SensorSpec {
        sensor: Sensor::Landsat7,
        label: "Landsat 7",
        resolution_m: 30,
        coverage: YearRange {
            start: 1999,
            end: 2022,
        },
    },
    SensorSpec {
        sensor: Sensor::Landsat8,
        label: "Landsat 8",
        resolution_m: 30,
        coverage: YearRange {
            start: 2013,
            end: 2030,
        },
    },
    SensorSpec {
        sensor: Sensor::Landsat9,
        label: "Landsat 9",
        resolution_m: 30,
        coverage: YearRange {
            start: 2021,
            end: 2030,
        },
    },
    SensorSpec {
        sensor: Sensor::Sentinel2,
        label: "Sentinel 2",
        resolution_m: 10,
        coverage: YearRange {
            start: 2015,
            end: 2030,
        },
    },
    SensorSpec {
        sensor: Sensor::ModisMod13Q1,
        label: "MODIS MOD13Q1",
        resolution_m: 250,
        coverage: YearRange {
            start: 2000,
            end: 2030,
        },
    },
    SensorSpec {
        sensor: Sensor::ModisMyd13Q1,
        label: "MODIS MYD13Q1",
        resolution_m: 250,
        coverage: YearRange {
            start: 2002,
            end: 2030,
        },
    },
];

/// Years covered by the yearly land cover product.
pub const LAND_COVER_COVERAGE: YearRange = YearRange {
    start: 1992,
    end: 2022,
};

pub fn sensor_spec(sensor: Sensor) -> &'static SensorSpec {
    SENSORS
        .iter()
        .find(|s| s.sensor == sensor)
        .expect("every Sensor variant has a catalog entry")
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_sensor_has_a_spec() {
        for sensor in Sensor::iter() {
            let spec = sensor_spec(sensor);
            assert_eq!(spec.sensor, sensor);
            assert!(spec.coverage.start < spec.coverage.end);
        }
    }
}
