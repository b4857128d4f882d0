use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::elements::ElementsSource;

pub const TRACK_FILE: &str = "track.kml";
pub const TOUR_FILE: &str = "tour.kml";
pub const PATH_FILE: &str = "path.kml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub satellite: SatelliteConfig,
    pub elements: ElementsConfig,
    pub tracking: TrackingConfig,
    pub tour: TourConfig,
    pub output: OutputConfig,
    pub viewer: ViewerConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SatelliteConfig {
    /// Header line of the entry in the elements feed.
    pub name: String,
    /// Short name used in artifact titles.
    pub label: String,
}

impl Default for SatelliteConfig {
    fn default() -> Self {
        Self {
            name: "ISS (ZARYA)".to_string(),
            label: "ISS".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ElementsConfig {
    pub url: String,
    /// Read the feed from disk instead of `url`.
    pub file: Option<PathBuf>,
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
}

impl Default for ElementsConfig {
    fn default() -> Self {
        Self {
            url: "https://celestrak.com/NORAD/elements/stations.txt".to_string(),
            file: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl ElementsConfig {
    pub fn source(&self) -> ElementsSource {
        match &self.file {
            Some(path) => ElementsSource::File(path.clone()),
            None => ElementsSource::Http {
                url: self.url.clone(),
                timeout: self.timeout,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackingConfig {
    /// Poll period, also advertised as the live marker's refresh interval.
    #[serde(deserialize_with = "deserialize_duration")]
    pub interval: Duration,
    pub camera_range_m: f64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            camera_range_m: 700_000.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TourConfig {
    pub fly_to_duration_s: f64,
    pub wait_duration_s: f64,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            fly_to_duration_s: 2.0,
            wait_duration_s: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl OutputConfig {
    pub fn track_path(&self) -> PathBuf {
        self.directory.join(TRACK_FILE)
    }

    pub fn tour_path(&self) -> PathBuf {
        self.directory.join(TOUR_FILE)
    }

    pub fn path_path(&self) -> PathBuf {
        self.directory.join(PATH_FILE)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub enabled: bool,
    pub program: String,
    pub args: Vec<String>,
}

impl Default for ViewerConfig {
    #[cfg(target_os = "macos")]
    fn default() -> Self {
        Self {
            enabled: true,
            program: "open".to_string(),
            args: vec!["-a".to_string(), "Google Earth Pro".to_string()],
        }
    }

    #[cfg(not(target_os = "macos"))]
    fn default() -> Self {
        Self {
            enabled: true,
            program: "google-earth-pro".to_string(),
            args: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Built-in defaults, or the file at `path` when one is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tracking.interval.is_zero() {
            return Err(ConfigError::Invalid(
                "tracking.interval must be positive".into(),
            ));
        }
        if self.elements.timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "elements.timeout must be positive".into(),
            ));
        }
        if self.satellite.name.trim().is_empty() {
            return Err(ConfigError::Invalid("satellite.name is empty".into()));
        }
        Ok(())
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    humantime::parse_duration(text.trim()).map_err(serde::de::Error::custom)
}
