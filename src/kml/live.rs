use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::KmlError;
use super::types::{
    AltitudeMode, Coordinates, Document, Feature, Geometry, Link, LookAt, NetworkLink, Placemark,
    RefreshMode,
};
use super::writer::save;
use crate::tracker::GeodeticSample;

/// Rewrites the live marker file on every tick.
///
/// The file links back to itself so an open viewer reloads it every
/// `refresh_interval`, which the acquisition loop also uses as its sleep.
pub struct LiveMarkerExporter {
    path: PathBuf,
    label: String,
    camera_range_m: f64,
    refresh_interval: Duration,
}

impl LiveMarkerExporter {
    pub fn new(
        path: PathBuf,
        label: impl Into<String>,
        camera_range_m: f64,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            path,
            label: label.into(),
            camera_range_m,
            refresh_interval,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub fn document(&self, sample: &GeodeticSample) -> Document {
        let href = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());

        Document {
            features: vec![
                Feature::Placemark(Placemark {
                    name: self.label.clone(),
                    look_at: Some(LookAt::overhead(sample, self.camera_range_m)),
                    geometry: Geometry::Point {
                        coordinates: Coordinates::from(sample),
                        altitude_mode: AltitudeMode::RelativeToGround,
                    },
                }),
                Feature::NetworkLink(NetworkLink {
                    name: format!("{} Tracker", self.label),
                    link: Link {
                        href,
                        refresh_mode: RefreshMode::OnInterval,
                        refresh_interval_s: self.refresh_interval.as_secs_f64(),
                    },
                }),
            ],
        }
    }

    pub fn export(&self, sample: &GeodeticSample) -> Result<(), KmlError> {
        save(&self.document(sample), &self.path)
    }
}
