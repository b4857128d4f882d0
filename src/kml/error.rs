use thiserror::Error;

#[derive(Debug, Error)]
pub enum KmlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML write error: {0}")]
    Xml(String),
}
