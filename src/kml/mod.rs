mod error;
mod live;
mod path;
mod tour;
mod types;
mod writer;

pub use error::KmlError;
pub use live::LiveMarkerExporter;
pub use path::PathExporter;
pub use tour::TourExporter;
pub use types::*;
#[cfg(test)]
pub use writer::to_bytes;
