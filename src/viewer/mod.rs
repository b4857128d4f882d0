use std::io;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::ViewerConfig;

/// Opens the finished artifacts in an external viewer.
pub trait ViewerLauncher {
    fn launch(&self, artifacts: &[PathBuf]) -> io::Result<()>;
}

/// How long a launch waits to see the viewer exit before detaching from it.
const EXIT_WAIT: Duration = Duration::from_millis(500);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Spawns `program args... artifacts...` and leaves it running. Launchers
/// such as `open` exit right away, so their exit status is logged; a viewer
/// still running after [`EXIT_WAIT`] is left detached.
pub struct ProcessLauncher {
    program: String,
    args: Vec<String>,
}

impl ProcessLauncher {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `None` when launching is disabled in the config.
    pub fn from_config(config: &ViewerConfig) -> Option<Self> {
        config
            .enabled
            .then(|| Self::new(config.program.clone(), config.args.clone()))
    }

    fn command(&self, artifacts: &[PathBuf]) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .args(artifacts)
            .stdin(Stdio::null());
        command
    }
}

impl ViewerLauncher for ProcessLauncher {
    fn launch(&self, artifacts: &[PathBuf]) -> io::Result<()> {
        log::info!("Launching {} with {} artifacts", self.program, artifacts.len());

        let mut child = self.command(artifacts).spawn()?;
        log::info!("Viewer spawned (PID: {:?})", child.id());

        match wait_for_exit(&mut child, EXIT_WAIT) {
            Ok(Some(status)) => {
                log::debug!("{} exited with code {}", self.program, status.code().unwrap_or(-1))
            }
            Ok(None) => log::debug!("{} still running, leaving it detached", self.program),
            Err(e) => log::warn!("Unable to check {} status: {}", self.program, e),
        }
        Ok(())
    }
}

/// Polls the child until it exits or `bound` elapses.
fn wait_for_exit(child: &mut Child, bound: Duration) -> io::Result<Option<ExitStatus>> {
    let deadline = Instant::now() + bound;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}
