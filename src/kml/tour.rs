use std::path::{Path, PathBuf};

use super::error::KmlError;
use super::types::{Document, Feature, FlyToMode, LookAt, Tour, TourPrimitive};
use super::writer::save;
use crate::tracker::GeodeticSample;

/// Builds the camera fly-through of a finished run.
pub struct TourExporter {
    path: PathBuf,
    label: String,
    camera_range_m: f64,
    fly_to_duration_s: f64,
    wait_duration_s: f64,
}

impl TourExporter {
    pub fn new(
        path: PathBuf,
        label: impl Into<String>,
        camera_range_m: f64,
        fly_to_duration_s: f64,
        wait_duration_s: f64,
    ) -> Self {
        Self {
            path,
            label: label.into(),
            camera_range_m,
            fly_to_duration_s,
            wait_duration_s,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// One fly-to and one wait per sample, in track order.
    pub fn document(&self, samples: &[GeodeticSample]) -> Document {
        let playlist = samples
            .iter()
            .flat_map(|sample| {
                [
                    TourPrimitive::FlyTo {
                        duration_s: self.fly_to_duration_s,
                        mode: FlyToMode::Bounce,
                        look_at: LookAt::overhead(sample, self.camera_range_m),
                    },
                    TourPrimitive::Wait {
                        duration_s: self.wait_duration_s,
                    },
                ]
            })
            .collect();

        Document {
            features: vec![Feature::Tour(Tour {
                name: format!("{} Flight Tour", self.label),
                playlist,
            })],
        }
    }

    pub fn export(&self, samples: &[GeodeticSample]) -> Result<(), KmlError> {
        save(&self.document(samples), &self.path)?;
        log::info!(
            "Saved {} with {} steps",
            self.path.display(),
            samples.len()
        );
        Ok(())
    }
}
