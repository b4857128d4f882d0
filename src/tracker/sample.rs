use chrono::{DateTime, Utc};

/// One observed ground position of the satellite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticSample {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}

impl GeodeticSample {
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_km: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_km,
        }
    }

    /// Console line printed for every tick of the acquisition loop.
    pub fn tick_line(&self, timestamp: DateTime<Utc>) -> String {
        format!(
            "{} → Lat {:.4}°, Lon {:.4}°, Alt {:.0} km",
            timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.latitude_deg,
            self.longitude_deg,
            self.altitude_km
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn tick_line_rounds_to_four_decimals_and_whole_km() {
        let sample = GeodeticSample::new(51.644_449, -0.127_58, 418.62);
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();

        assert_eq!(
            sample.tick_line(at),
            "2025-03-14 09:26:53 UTC → Lat 51.6444°, Lon -0.1276°, Alt 419 km"
        );
    }
}
