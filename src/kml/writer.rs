use std::fmt::Display;
use std::fs;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::error::KmlError;
use super::types::{
    Coordinates, Document, Feature, Geometry, Link, LookAt, NetworkLink, Placemark, Tour,
    TourPrimitive,
};

const KML_NS: &str = "http://www.opengis.net/kml/2.2";
const GX_NS: &str = "http://www.google.com/kml/ext/2.2";

/// Serializes a document to KML bytes.
pub fn to_bytes(document: &Document) -> Result<Vec<u8>, KmlError> {
    let mut writer = KmlWriter::new();
    writer.document(document)?;
    Ok(writer.finish())
}

/// Writes the document next to `path` first and renames it into place, so a
/// viewer reloading the file never sees it half written.
pub fn save(document: &Document, path: &Path) -> Result<(), KmlError> {
    let bytes = to_bytes(document)?;
    let temp_path = path.with_extension("kml.tmp");

    fs::write(&temp_path, bytes)?;
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    log::debug!("Wrote {}", path.display());
    Ok(())
}

struct KmlWriter {
    inner: Writer<Vec<u8>>,
}

impl KmlWriter {
    fn new() -> Self {
        Self {
            inner: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn finish(self) -> Vec<u8> {
        self.inner.into_inner()
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), KmlError> {
        self.inner
            .write_event(event)
            .map_err(|e| KmlError::Xml(e.to_string()))
    }

    fn start(&mut self, tag: &str) -> Result<(), KmlError> {
        self.event(Event::Start(BytesStart::new(tag)))
    }

    fn end(&mut self, tag: &str) -> Result<(), KmlError> {
        self.event(Event::End(BytesEnd::new(tag)))
    }

    fn text(&mut self, tag: &str, value: impl Display) -> Result<(), KmlError> {
        let value = value.to_string();
        if value.is_empty() {
            return self.event(Event::Empty(BytesStart::new(tag)));
        }
        self.start(tag)?;
        self.event(Event::Text(BytesText::new(&value)))?;
        self.end(tag)
    }

    fn flag(&mut self, tag: &str, value: bool) -> Result<(), KmlError> {
        self.text(tag, u8::from(value))
    }

    fn document(&mut self, document: &Document) -> Result<(), KmlError> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.event(Event::Start(
            BytesStart::new("kml").with_attributes([("xmlns", KML_NS), ("xmlns:gx", GX_NS)]),
        ))?;
        self.start("Document")?;
        for feature in &document.features {
            match feature {
                Feature::Placemark(placemark) => self.placemark(placemark)?,
                Feature::NetworkLink(network_link) => self.network_link(network_link)?,
                Feature::Tour(tour) => self.tour(tour)?,
            }
        }
        self.end("Document")?;
        self.end("kml")
    }

    fn placemark(&mut self, placemark: &Placemark) -> Result<(), KmlError> {
        self.start("Placemark")?;
        self.text("name", &placemark.name)?;
        if let Some(look_at) = &placemark.look_at {
            self.look_at(look_at)?;
        }
        match &placemark.geometry {
            Geometry::Point {
                coordinates,
                altitude_mode,
            } => {
                self.start("Point")?;
                self.text("altitudeMode", altitude_mode)?;
                self.text("coordinates", format_coordinates(coordinates))?;
                self.end("Point")?;
            }
            Geometry::LineString {
                coordinates,
                extrude,
                tessellate,
                altitude_mode,
            } => {
                let joined = coordinates
                    .iter()
                    .map(format_coordinates)
                    .collect::<Vec<_>>()
                    .join(" ");
                self.start("LineString")?;
                self.flag("extrude", *extrude)?;
                self.flag("tessellate", *tessellate)?;
                self.text("altitudeMode", altitude_mode)?;
                self.text("coordinates", joined)?;
                self.end("LineString")?;
            }
        }
        self.end("Placemark")
    }

    fn look_at(&mut self, look_at: &LookAt) -> Result<(), KmlError> {
        self.start("LookAt")?;
        self.text("longitude", look_at.longitude_deg)?;
        self.text("latitude", look_at.latitude_deg)?;
        self.text("altitude", look_at.altitude_km)?;
        self.text("heading", look_at.heading_deg)?;
        self.text("tilt", look_at.tilt_deg)?;
        self.text("range", look_at.range_m)?;
        self.text("altitudeMode", look_at.altitude_mode)?;
        self.end("LookAt")
    }

    fn network_link(&mut self, network_link: &NetworkLink) -> Result<(), KmlError> {
        self.start("NetworkLink")?;
        self.text("name", &network_link.name)?;
        self.link(&network_link.link)?;
        self.end("NetworkLink")
    }

    fn link(&mut self, link: &Link) -> Result<(), KmlError> {
        self.start("Link")?;
        self.text("href", &link.href)?;
        self.text("refreshMode", link.refresh_mode)?;
        self.text("refreshInterval", link.refresh_interval_s)?;
        self.end("Link")
    }

    fn tour(&mut self, tour: &Tour) -> Result<(), KmlError> {
        self.start("gx:Tour")?;
        self.text("name", &tour.name)?;
        if tour.playlist.is_empty() {
            self.event(Event::Empty(BytesStart::new("gx:Playlist")))?;
            return self.end("gx:Tour");
        }
        self.start("gx:Playlist")?;
        for primitive in &tour.playlist {
            match primitive {
                TourPrimitive::FlyTo {
                    duration_s,
                    mode,
                    look_at,
                } => {
                    self.start("gx:FlyTo")?;
                    self.text("gx:duration", format!("{:.1}", duration_s))?;
                    self.text("gx:flyToMode", mode)?;
                    self.look_at(look_at)?;
                    self.end("gx:FlyTo")?;
                }
                TourPrimitive::Wait { duration_s } => {
                    self.start("gx:Wait")?;
                    self.text("gx:duration", format!("{:.1}", duration_s))?;
                    self.end("gx:Wait")?;
                }
            }
        }
        self.end("gx:Playlist")?;
        self.end("gx:Tour")
    }
}

fn format_coordinates(coordinates: &Coordinates) -> String {
    format!(
        "{},{},{}",
        coordinates.longitude_deg, coordinates.latitude_deg, coordinates.altitude_km
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kml::{AltitudeMode, RefreshMode};
    use pretty_assertions::assert_eq;

    fn render(document: &Document) -> String {
        String::from_utf8(to_bytes(document).unwrap()).unwrap()
    }

    #[test]
    fn empty_document_is_well_formed_kml() {
        let kml = render(&Document::default());

        assert!(kml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(kml.contains(r#"<kml xmlns="http://www.opengis.net/kml/2.2" xmlns:gx="http://www.google.com/kml/ext/2.2">"#));
        assert!(kml.trim_end().ends_with("</kml>"));
    }

    #[test]
    fn names_are_escaped() {
        let document = Document {
            features: vec![Feature::NetworkLink(NetworkLink {
                name: "A & B <live>".to_string(),
                link: Link {
                    href: "track.kml".to_string(),
                    refresh_mode: RefreshMode::OnInterval,
                    refresh_interval_s: 5.0,
                },
            })],
        };

        let kml = render(&document);

        assert!(kml.contains("<name>A &amp; B &lt;live&gt;</name>"));
        assert!(kml.contains("<refreshInterval>5</refreshInterval>"));
    }

    #[test]
    fn point_coordinates_are_lon_lat_alt() {
        let document = Document {
            features: vec![Feature::Placemark(Placemark {
                name: "ISS".to_string(),
                look_at: None,
                geometry: Geometry::Point {
                    coordinates: Coordinates {
                        longitude_deg: -71.0603,
                        latitude_deg: 42.3583,
                        altitude_km: 420.0,
                    },
                    altitude_mode: AltitudeMode::RelativeToGround,
                },
            })],
        };

        let kml = render(&document);

        assert!(kml.contains("<coordinates>-71.0603,42.3583,420</coordinates>"));
        assert!(kml.contains("<altitudeMode>relativeToGround</altitudeMode>"));
        assert!(!kml.contains("<LookAt>"));
    }

    #[test]
    fn save_replaces_existing_file_without_leaving_temp_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("track.kml");
        std::fs::write(&path, "stale").unwrap();

        save(&Document::default(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render(&Document::default()));
        assert!(!dir.path().join("track.kml.tmp").exists());
    }

    #[test]
    fn save_into_missing_directory_fails_with_io() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("track.kml");

        assert!(matches!(
            save(&Document::default(), &path),
            Err(KmlError::Io(_))
        ));
    }
}
