use chrono::Utc;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use super::error::TrackerError;
use super::resolver::PositionResolver;
use super::track::Track;
use crate::kml::LiveMarkerExporter;

/// The polling loop: resolve, append, export the live marker, sleep.
pub struct Acquisition<R> {
    resolver: R,
    live: LiveMarkerExporter,
}

impl<R: PositionResolver> Acquisition<R> {
    pub fn new(resolver: R, live: LiveMarkerExporter) -> Self {
        Self { resolver, live }
    }

    /// Sleep between ticks; identical to the live marker's refresh interval.
    pub fn interval(&self) -> Duration {
        self.live.refresh_interval()
    }

    /// Runs ticks until `stop` resolves or a tick fails.
    ///
    /// `stop` is polled before every tick, and again while the tick sleeps, so
    /// a stop that fires mid-tick ends the loop right after that tick's sample
    /// has been appended and exported.
    pub async fn run<F>(&self, track: &mut Track, stop: F) -> Result<(), TrackerError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(stop);

        loop {
            tokio::select! {
                biased;
                _ = &mut stop => break,
                result = self.tick(track) => result?,
            }
        }

        log::info!("Stop requested after {} samples", track.len());
        Ok(())
    }

    async fn tick(&self, track: &mut Track) -> Result<(), TrackerError> {
        let now = Utc::now();
        let sample = self.resolver.resolve(now)?;
        track.append(sample);

        println!("{}", sample.tick_line(now));
        self.live.export(&sample)?;

        sleep(self.interval()).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::GeodeticSample;
    use chrono::{DateTime, Utc};
    use std::cell::{Cell, RefCell};
    use std::path::Path;
    use tokio::sync::oneshot;

    /// Yields a scripted sequence and fires `stop` while producing sample `stop_after`.
    struct ScriptedResolver {
        calls: Cell<usize>,
        stop_after: usize,
        stop_tx: RefCell<Option<oneshot::Sender<()>>>,
        fail_at: Option<usize>,
    }

    impl ScriptedResolver {
        fn new(stop_after: usize) -> (Self, oneshot::Receiver<()>) {
            let (stop_tx, stop_rx) = oneshot::channel();
            let resolver = Self {
                calls: Cell::new(0),
                stop_after,
                stop_tx: RefCell::new(Some(stop_tx)),
                fail_at: None,
            };
            (resolver, stop_rx)
        }

        fn sample(i: usize) -> GeodeticSample {
            GeodeticSample::new(i as f64, 100.0 - i as f64, 400.0 + i as f64)
        }
    }

    impl PositionResolver for ScriptedResolver {
        fn resolve(&self, _at: DateTime<Utc>) -> Result<GeodeticSample, TrackerError> {
            let i = self.calls.get() + 1;
            self.calls.set(i);
            if self.fail_at == Some(i) {
                return Err(TrackerError::Propagation("decayed".into()));
            }
            if i == self.stop_after {
                if let Some(tx) = self.stop_tx.borrow_mut().take() {
                    let _ = tx.send(());
                }
            }
            Ok(Self::sample(i))
        }
    }

    fn live(dir: &Path) -> LiveMarkerExporter {
        LiveMarkerExporter::new(
            dir.join("track.kml"),
            "ISS",
            700_000.0,
            Duration::from_millis(1),
        )
    }

    async fn stop_signal(rx: oneshot::Receiver<()>) {
        let _ = rx.await;
    }

    #[tokio::test]
    async fn n_ticks_then_stop_appends_n_samples_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let (resolver, stop_rx) = ScriptedResolver::new(4);
        let acquisition = Acquisition::new(resolver, live(dir.path()));
        let mut track = Track::new();

        acquisition
            .run(&mut track, stop_signal(stop_rx))
            .await
            .unwrap();

        let expected: Vec<_> = (1..=4).map(ScriptedResolver::sample).collect();
        assert_eq!(track.snapshot(), expected.as_slice());

        let kml = std::fs::read_to_string(dir.path().join("track.kml")).unwrap();
        assert!(kml.contains("<coordinates>96,4,404</coordinates>"));
    }

    #[tokio::test]
    async fn stop_before_first_tick_leaves_track_empty() {
        let dir = tempfile::tempdir().unwrap();
        let (resolver, _stop_rx) = ScriptedResolver::new(usize::MAX);
        let acquisition = Acquisition::new(resolver, live(dir.path()));
        let mut track = Track::new();

        acquisition
            .run(&mut track, std::future::ready(()))
            .await
            .unwrap();

        assert!(track.is_empty());
        assert!(!dir.path().join("track.kml").exists());
    }

    #[tokio::test]
    async fn failing_tick_ends_the_loop_keeping_earlier_samples() {
        let dir = tempfile::tempdir().unwrap();
        let (mut resolver, _stop_rx) = ScriptedResolver::new(usize::MAX);
        resolver.fail_at = Some(3);
        let acquisition = Acquisition::new(resolver, live(dir.path()));
        let mut track = Track::new();

        let result = acquisition
            .run(&mut track, std::future::pending())
            .await;

        assert!(matches!(result, Err(TrackerError::Propagation(_))));
        assert_eq!(track.len(), 2);
    }

    #[tokio::test]
    async fn live_export_failure_ends_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let (resolver, _stop_rx) = ScriptedResolver::new(usize::MAX);
        let acquisition = Acquisition::new(resolver, live(&dir.path().join("missing")));
        let mut track = Track::new();

        let result = acquisition
            .run(&mut track, std::future::pending())
            .await;

        assert!(matches!(result, Err(TrackerError::Export(_))));
        assert_eq!(track.len(), 1);
    }

    #[test]
    fn sleep_interval_is_the_live_refresh_interval() {
        let dir = tempfile::tempdir().unwrap();
        let (resolver, _stop_rx) = ScriptedResolver::new(1);
        let acquisition = Acquisition::new(resolver, live(dir.path()));

        assert_eq!(acquisition.interval(), Duration::from_millis(1));
        let document = acquisition
            .live
            .document(&GeodeticSample::new(0.0, 0.0, 400.0));
        let kml = String::from_utf8(crate::kml::to_bytes(&document).unwrap()).unwrap();
        assert!(kml.contains(&format!(
            "<refreshInterval>{}</refreshInterval>",
            acquisition.interval().as_secs_f64()
        )));
    }
}
