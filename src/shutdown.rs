use std::path::PathBuf;

use crate::kml::{PathExporter, TourExporter};
use crate::tracker::Track;
use crate::viewer::ViewerLauncher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ShutdownStep {
    TourExport,
    PathExport,
}

#[derive(Debug, Default)]
pub struct ShutdownReport {
    pub samples: usize,
    pub failures: Vec<(ShutdownStep, String)>,
}

impl ShutdownReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Owns the run's track and writes the end-of-run artifacts exactly once:
/// either through [`Shutdown::finish`] or, failing that, when dropped.
///
/// Steps run in order (tour, path, viewer) and a failing step does not stop
/// the ones after it. Only export failures land in the report; the viewer is
/// best effort.
pub struct Shutdown {
    track: Track,
    live_path: PathBuf,
    tour: TourExporter,
    path: PathExporter,
    launcher: Option<Box<dyn ViewerLauncher>>,
    done: bool,
}

impl Shutdown {
    pub fn new(
        live_path: PathBuf,
        tour: TourExporter,
        path: PathExporter,
        launcher: Option<Box<dyn ViewerLauncher>>,
    ) -> Self {
        Self {
            track: Track::new(),
            live_path,
            tour,
            path,
            launcher,
            done: false,
        }
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn track_mut(&mut self) -> &mut Track {
        &mut self.track
    }

    /// Runs the shutdown steps. Returns `None` if they already ran.
    pub fn finish(&mut self) -> Option<ShutdownReport> {
        if self.done {
            return None;
        }
        self.done = true;

        if self.track.is_empty() {
            log::info!("No samples recorded, tour and path will be empty");
        }
        let samples = self.track.snapshot();
        let mut report = ShutdownReport {
            samples: samples.len(),
            failures: Vec::new(),
        };

        if let Err(e) = self.tour.export(samples) {
            log::error!("Tour export to {} failed: {}", self.tour.path().display(), e);
            report.failures.push((ShutdownStep::TourExport, e.to_string()));
        }

        if let Err(e) = self.path.export(samples) {
            log::error!("Path export to {} failed: {}", self.path.path().display(), e);
            report.failures.push((ShutdownStep::PathExport, e.to_string()));
        }

        match &self.launcher {
            Some(launcher) => {
                let artifacts = [
                    self.live_path.clone(),
                    self.tour.path().to_path_buf(),
                    self.path.path().to_path_buf(),
                ];
                if let Err(e) = launcher.launch(&artifacts) {
                    log::warn!("Viewer launch failed: {}", e);
                }
            }
            None => log::debug!("Viewer launch disabled"),
        }

        Some(report)
    }
}

impl Drop for Shutdown {
    fn drop(&mut self) {
        if let Some(report) = self.finish() {
            log::warn!(
                "Shutdown steps ran on drop ({} samples, {} failures)",
                report.samples,
                report.failures.len()
            );
        }
    }
}
