//! Subset of the KML 2.2 schema (plus the `gx:` touring extension) that the
//! exporters produce.

use crate::tracker::GeodeticSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "camelCase")]
pub enum AltitudeMode {
    RelativeToGround,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "camelCase")]
pub enum RefreshMode {
    OnInterval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "camelCase")]
pub enum FlyToMode {
    Bounce,
}

/// A `lon,lat,alt` tuple. The altitude is the sample's value in km, written
/// unchanged so the artifacts match the console line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub longitude_deg: f64,
    pub latitude_deg: f64,
    pub altitude_km: f64,
}

impl From<&GeodeticSample> for Coordinates {
    fn from(sample: &GeodeticSample) -> Self {
        Self {
            longitude_deg: sample.longitude_deg,
            latitude_deg: sample.latitude_deg,
            altitude_km: sample.altitude_km,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookAt {
    pub longitude_deg: f64,
    pub latitude_deg: f64,
    pub altitude_km: f64,
    pub heading_deg: f64,
    pub tilt_deg: f64,
    pub range_m: f64,
    pub altitude_mode: AltitudeMode,
}

impl LookAt {
    /// Straight-down camera on the sample from `range_m` away.
    pub fn overhead(sample: &GeodeticSample, range_m: f64) -> Self {
        Self {
            longitude_deg: sample.longitude_deg,
            latitude_deg: sample.latitude_deg,
            altitude_km: sample.altitude_km,
            heading_deg: 0.0,
            tilt_deg: 0.0,
            range_m,
            altitude_mode: AltitudeMode::RelativeToGround,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point {
        coordinates: Coordinates,
        altitude_mode: AltitudeMode,
    },
    LineString {
        coordinates: Vec<Coordinates>,
        extrude: bool,
        tessellate: bool,
        altitude_mode: AltitudeMode,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placemark {
    pub name: String,
    pub look_at: Option<LookAt>,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub href: String,
    pub refresh_mode: RefreshMode,
    pub refresh_interval_s: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkLink {
    pub name: String,
    pub link: Link,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TourPrimitive {
    FlyTo {
        duration_s: f64,
        mode: FlyToMode,
        look_at: LookAt,
    },
    Wait {
        duration_s: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    pub name: String,
    pub playlist: Vec<TourPrimitive>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Feature {
    Placemark(Placemark),
    NetworkLink(NetworkLink),
    Tour(Tour),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub features: Vec<Feature>,
}
