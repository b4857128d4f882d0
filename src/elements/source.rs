use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ElementsError;

/// Where the TLE feed comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementsSource {
    Http { url: String, timeout: Duration },
    File(PathBuf),
}

impl ElementsSource {
    pub async fn fetch(&self) -> Result<String, ElementsError> {
        match self {
            ElementsSource::Http { url, timeout } => {
                log::debug!("GET {} (timeout {:?})", url, timeout);
                let client = reqwest::Client::builder().timeout(*timeout).build()?;
                let body = client
                    .get(url)
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await?;
                Ok(body)
            }
            ElementsSource::File(path) => Ok(std::fs::read_to_string(path)?),
        }
    }
}

impl fmt::Display for ElementsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementsSource::Http { url, .. } => write!(f, "{}", url),
            ElementsSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}
