mod acquisition;
mod error;
mod geodesy;
mod resolver;
mod sample;
mod track;

pub use acquisition::Acquisition;
pub use error::TrackerError;
pub use resolver::{PositionResolver, Sgp4Resolver};
pub use sample::GeodeticSample;
pub use track::Track;
