use std::path::{Path, PathBuf};

use super::error::KmlError;
use super::types::{AltitudeMode, Coordinates, Document, Feature, Geometry, Placemark};
use super::writer::save;
use crate::tracker::GeodeticSample;

/// Builds a single extruded line through every sample of a finished run.
pub struct PathExporter {
    path: PathBuf,
    label: String,
}

impl PathExporter {
    pub fn new(path: PathBuf, label: impl Into<String>) -> Self {
        Self {
            path,
            label: label.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self, samples: &[GeodeticSample]) -> Document {
        Document {
            features: vec![Feature::Placemark(Placemark {
                name: format!("{} Path", self.label),
                look_at: None,
                geometry: Geometry::LineString {
                    coordinates: samples.iter().map(Coordinates::from).collect(),
                    extrude: true,
                    tessellate: true,
                    altitude_mode: AltitudeMode::RelativeToGround,
                },
            })],
        }
    }

    pub fn export(&self, samples: &[GeodeticSample]) -> Result<(), KmlError> {
        save(&self.document(samples), &self.path)?;
        log::info!("Saved {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn coordinates_of(kml: &str) -> Vec<(f64, f64, f64)> {
        let start = kml.find("<coordinates>").unwrap() + "<coordinates>".len();
        let end = kml.find("</coordinates>").unwrap();
        kml[start..end]
            .split_whitespace()
            .map(|tuple| {
                let v: Vec<f64> = tuple.split(',').map(|p| p.parse().unwrap()).collect();
                (v[0], v[1], v[2])
            })
            .collect()
    }

    #[test]
    fn line_follows_samples_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = PathExporter::new(dir.path().join("path.kml"), "ISS");
        let samples = [
            GeodeticSample::new(10.5, 20.25, 400.0),
            GeodeticSample::new(11.5, 22.25, 401.5),
            GeodeticSample::new(10.5, 20.25, 400.0),
        ];

        exporter.export(&samples).unwrap();

        let kml = std::fs::read_to_string(exporter.path()).unwrap();
        assert_eq!(
            coordinates_of(&kml),
            vec![
                (20.25, 10.5, 400.0),
                (22.25, 11.5, 401.5),
                (20.25, 10.5, 400.0)
            ]
        );
        assert!(kml.contains("<name>ISS Path</name>"));
        assert!(kml.contains("<extrude>1</extrude>"));
        assert!(kml.contains("<tessellate>1</tessellate>"));
        assert!(kml.contains("<altitudeMode>relativeToGround</altitudeMode>"));
    }

    #[test]
    fn empty_track_writes_an_empty_line() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = PathExporter::new(dir.path().join("path.kml"), "ISS");

        exporter.export(&[]).unwrap();

        let kml = std::fs::read_to_string(exporter.path()).unwrap();
        assert!(kml.contains("<LineString>"));
        assert!(kml.contains("<coordinates/>"));
    }
}
