use thiserror::Error;

#[derive(Debug, Error)]
pub enum ElementsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("elements file read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0} not found in elements feed")]
    NotFound(String),
    #[error("elements for {0} are truncated")]
    Truncated(String),
    #[error("invalid elements for {name}: {message}")]
    InvalidFormat { name: String, message: String },
}
