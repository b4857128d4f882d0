use thiserror::Error;

use crate::kml::KmlError;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("invalid tle: {0}")]
    Tle(#[from] sgp4::TleError),
    #[error("elements error: {0}")]
    Elements(#[from] sgp4::ElementsError),
    #[error("propagation error: {0}")]
    Propagation(String),
    #[error("live marker export failed: {0}")]
    Export(#[from] KmlError),
}

impl From<sgp4::Error> for TrackerError {
    fn from(err: sgp4::Error) -> Self {
        TrackerError::Propagation(err.to_string())
    }
}
