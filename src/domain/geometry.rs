use serde::{Deserialize, Serialize};

/// Mean earth circumference based degrees-per-km at the equator.
const DEG_PER_KM: f64 = 1.0 / 111.32;

/// A single user-placed AOI point with its buffer radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AoiPoint {
    pub lat: f64,
    pub lon: f64,
    /// Buffer radius around the point, in km.
    pub buffer_km: f64,
}

impl AoiPoint {
    pub fn new(lat: f64, lon: f64, buffer_km: f64) -> Self {
        Self {
            lat,
            lon,
            buffer_km,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
            && self.buffer_km > 0.0
    }

    /// The square buffer around the point, in degrees.
    /// Longitude span is widened by 1/cos(lat) so the box stays roughly
    /// square on the ground away from the equator.
    pub fn buffered_bounds(&self) -> BoundingBox {
        let half_lat = self.buffer_km * DEG_PER_KM;
        let cos_lat = self.lat.to_radians().cos().max(0.01);
        let half_lon = half_lat / cos_lat;
        BoundingBox {
            min_lat: (self.lat - half_lat).max(-90.0),
            max_lat: (self.lat + half_lat).min(90.0),
            min_lon: (self.lon - half_lon).max(-180.0),
            max_lon: (self.lon + half_lon).min(180.0),
        }
    }
}

/// Geographic bounding box in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_lat: self.min_lat.min(other.min_lat),
            max_lat: self.max_lat.max(other.max_lat),
            min_lon: self.min_lon.min(other.min_lon),
            max_lon: self.max_lon.max(other.max_lon),
        }
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }
}

/// The area of interest: the union of all buffered points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aoi {
    pub points: Vec<AoiPoint>,
}

impl Aoi {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box of the whole selection, None when no points are placed.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut iter = self.points.iter().map(AoiPoint::buffered_bounds);
        let first = iter.next()?;
        Some(iter.fold(first, |acc, b| acc.union(&b)))
    }

    /// A pixel center belongs to the AOI when it falls inside any buffered box.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.points
            .iter()
            .any(|p| p.buffered_bounds().contains(lat, lon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffered_bounds_are_symmetric_around_point() {
        let p = AoiPoint::new(0.0, 10.0, 111.32);
        let b = p.buffered_bounds();
        assert!((b.max_lat - 1.0).abs() < 1e-6);
        assert!((b.min_lat + 1.0).abs() < 1e-6);
        // At the equator lon and lat spans match
        assert!((b.lon_span() - b.lat_span()).abs() < 1e-6);
    }

    #[test]
    fn lon_span_widens_away_from_equator() {
        let eq = AoiPoint::new(0.0, 0.0, 50.0).buffered_bounds();
        let north = AoiPoint::new(60.0, 0.0, 50.0).buffered_bounds();
        assert!(north.lon_span() > eq.lon_span() * 1.5);
    }

    #[test]
    fn aoi_union_covers_all_points() {
        let aoi = Aoi {
            points: vec![AoiPoint::new(0.0, 0.0, 10.0), AoiPoint::new(2.0, 2.0, 10.0)],
        };
        let bbox = aoi.bounding_box().unwrap();
        assert!(bbox.contains(0.0, 0.0));
        assert!(bbox.contains(2.0, 2.0));
        assert!(aoi.contains(0.0, 0.0));
        assert!(!aoi.contains(1.0, 1.0)); // gap between the two buffers
    }

    #[test]
    fn empty_aoi_has_no_bbox() {
        assert!(Aoi::default().bounding_box().is_none());
    }

    #[test]
    fn point_validation() {
        assert!(AoiPoint::new(45.0, 100.0, 5.0).is_valid());
        assert!(!AoiPoint::new(95.0, 0.0, 5.0).is_valid());
        assert!(!AoiPoint::new(0.0, 0.0, 0.0).is_valid());
    }
}
