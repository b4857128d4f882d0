use std::future::Future;

use thiserror::Error;

use crate::config::Config;
use crate::elements::{fetch_elements, ElementsError};
use crate::kml::{LiveMarkerExporter, PathExporter, TourExporter};
use crate::shutdown::{Shutdown, ShutdownReport};
use crate::tracker::{Acquisition, Sgp4Resolver, TrackerError};
use crate::viewer::{ProcessLauncher, ViewerLauncher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RunState {
    FetchingElements,
    Running,
    Stopped,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("fetching elements failed: {0}")]
    Elements(#[from] ElementsError),
    #[error("loading elements failed: {0}")]
    Setup(TrackerError),
    #[error("tracking stopped after {samples} samples: {source}")]
    Tracking {
        samples: usize,
        source: TrackerError,
    },
    #[error("{} shutdown step(s) failed", .0.failures.len())]
    Shutdown(ShutdownReport),
}

type RunnerResult<T> = Result<T, RunnerError>;

pub struct Runner {
    config: Config,
    launcher: Option<Box<dyn ViewerLauncher>>,
}

impl Runner {
    pub fn new(config: Config) -> Self {
        let launcher = ProcessLauncher::from_config(&config.viewer)
            .map(|l| Box::new(l) as Box<dyn ViewerLauncher>);
        Self { config, launcher }
    }

    #[cfg(test)]
    pub fn with_launcher(mut self, launcher: Option<Box<dyn ViewerLauncher>>) -> Self {
        self.launcher = launcher;
        self
    }

    /// Fetches elements, tracks until `stop` resolves, then writes the
    /// end-of-run artifacts. Nothing is written if fetching fails.
    pub async fn run<F>(self, stop: F) -> RunnerResult<ShutdownReport>
    where
        F: Future<Output = ()>,
    {
        let Runner { config, launcher } = self;

        log::info!("{}", RunState::FetchingElements);
        println!("Fetching {} elements…", config.satellite.label);
        let source = config.elements.source();
        let pair = fetch_elements(&source, &config.satellite.name).await?;
        let resolver = Sgp4Resolver::new(&pair).map_err(RunnerError::Setup)?;

        let output = &config.output;
        let live = LiveMarkerExporter::new(
            output.track_path(),
            &config.satellite.label,
            config.tracking.camera_range_m,
            config.tracking.interval,
        );
        let tour = TourExporter::new(
            output.tour_path(),
            &config.satellite.label,
            config.tracking.camera_range_m,
            config.tour.fly_to_duration_s,
            config.tour.wait_duration_s,
        );
        let path = PathExporter::new(output.path_path(), &config.satellite.label);

        let mut shutdown = Shutdown::new(live.path().to_path_buf(), tour, path, launcher);
        let acquisition = Acquisition::new(resolver, live);

        log::info!("{}", RunState::Running);
        println!("Elements acquired. Looping, Ctrl+C to stop.\n");
        let outcome = acquisition.run(shutdown.track_mut(), stop).await;

        log::info!("{}", RunState::Stopped);
        println!("\nStopping. Generating tour and path, then launching the viewer…");
        let samples = shutdown.track().len();
        let report = shutdown.finish().unwrap_or_default();

        if let Err(source) = outcome {
            return Err(RunnerError::Tracking { samples, source });
        }
        if !report.is_success() {
            return Err(RunnerError::Shutdown(report));
        }
        Ok(report)
    }
}
