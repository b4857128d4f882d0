use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use super::error::TrackerError;
use super::geodesy::{ecef_to_geodetic, teme_to_ecef_position};
use super::sample::GeodeticSample;
use crate::elements::ElementsPair;

/// Turns a point in time into the satellite's ground position.
pub trait PositionResolver {
    fn resolve(&self, at: DateTime<Utc>) -> Result<GeodeticSample, TrackerError>;
}

/// SGP4 propagation of a single TLE, followed by a WGS-84 conversion.
pub struct Sgp4Resolver {
    elements: Elements,
    constants: Constants,
}

impl Sgp4Resolver {
    pub fn new(pair: &ElementsPair) -> Result<Self, TrackerError> {
        let elements = Elements::from_tle(
            Some(pair.name.clone()),
            pair.line1.as_bytes(),
            pair.line2.as_bytes(),
        )?;
        let constants = Constants::from_elements(&elements)?;

        log::debug!(
            "Loaded elements for {} (NORAD {}, epoch {})",
            pair.name,
            elements.norad_id,
            elements.datetime
        );

        Ok(Self {
            elements,
            constants,
        })
    }
}

impl PositionResolver for Sgp4Resolver {
    fn resolve(&self, at: DateTime<Utc>) -> Result<GeodeticSample, TrackerError> {
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&at.naive_utc())
            .map_err(|e| TrackerError::Propagation(e.to_string()))?;

        let prediction = self.constants.propagate(minutes)?;

        let sidereal =
            sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&at.naive_utc()));
        let ecef = teme_to_ecef_position(prediction.position, sidereal);
        let (latitude_deg, longitude_deg, altitude_km) = ecef_to_geodetic(ecef);

        Ok(GeodeticSample::new(latitude_deg, longitude_deg, altitude_km))
    }
}
