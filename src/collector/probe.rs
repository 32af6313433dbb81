//! Live traceroute invocation.

use super::parse_collected;
use crate::parser::RunResult;
use crate::utils::config::{
    DEFAULT_MAX_HOPS, DEFAULT_PROBE_TIMEOUT, DEFAULT_RUNS, DEFAULT_RUN_DELAY_SECS,
    DEFAULT_TRACEROUTE_PROGRAM, PROBE_POLL_INTERVAL,
};
use crate::utils::error::CollectError;
use log::{debug, info, warn};
use std::io::{self, Read};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Something that can produce the raw text of one traceroute run
pub trait ProbeRunner {
    fn run_probe(&self, target: &str, max_hops: u32) -> Result<String, CollectError>;
}

/// Runs the system traceroute binary
#[derive(Debug, Clone)]
pub struct SystemTraceroute {
    program: String,
    timeout: Duration,
}

impl Default for SystemTraceroute {
    fn default() -> Self {
        Self {
            program: DEFAULT_TRACEROUTE_PROGRAM.to_string(),
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl SystemTraceroute {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl ProbeRunner for SystemTraceroute {
    fn run_probe(&self, target: &str, max_hops: u32) -> Result<String, CollectError> {
        debug!("Running {} -m {} {}", self.program, max_hops, target);

        let mut child = Command::new(&self.program)
            .arg("-m")
            .arg(max_hops.to_string())
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| CollectError::SpawnFailed {
                program: self.program.clone(),
                source,
            })?;

        // Drain both pipes off-thread so a chatty child cannot block on a full pipe
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let stdout_reader = thread::spawn(move || read_pipe(stdout));
        let stderr_reader = thread::spawn(move || read_pipe(stderr));

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                warn!("{} exceeded {:?}, killing it", self.program, self.timeout);
                let _ = child.kill();
                let _ = child.wait();
                return Err(CollectError::TimedOut {
                    program: self.program.clone(),
                    timeout: self.timeout,
                });
            }
            thread::sleep(PROBE_POLL_INTERVAL);
        };

        let stdout = join_reader(stdout_reader)?;
        let stderr = join_reader(stderr_reader)?;

        if !status.success() {
            return Err(CollectError::AbnormalExit {
                program: self.program.clone(),
                status: status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(stdout)
    }
}

fn read_pipe<R: Read>(pipe: Option<R>) -> io::Result<String> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf)?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn join_reader(handle: thread::JoinHandle<io::Result<String>>) -> io::Result<String> {
    handle
        .join()
        .unwrap_or_else(|_| Err(io::Error::new(io::ErrorKind::Other, "pipe reader panicked")))
}

/// What to do when a single probe invocation fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeFailurePolicy {
    /// Abort the whole batch on the first failure
    #[default]
    Abort,
    /// Log the failure and continue with the next run
    SkipRun,
}

/// Live collection settings
#[derive(Debug, Clone)]
pub struct CollectConfig {
    /// Number of traceroute invocations
    pub runs: u32,

    /// Pause between consecutive invocations
    pub delay: Duration,

    /// Passed to traceroute as `-m`
    pub max_hops: u32,

    pub failure_policy: ProbeFailurePolicy,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            runs: DEFAULT_RUNS,
            delay: Duration::from_secs(DEFAULT_RUN_DELAY_SECS),
            max_hops: DEFAULT_MAX_HOPS,
            failure_policy: ProbeFailurePolicy::default(),
        }
    }
}

/// Run the probe `config.runs` times, one after another
///
/// **Public** - main entry point for live collection
///
/// Sleeps `config.delay` between consecutive runs (not after the last).
/// Runs whose output has no hop lines are excluded with a warning.
///
/// # Errors
/// * Any `CollectError` from the runner under `ProbeFailurePolicy::Abort`
/// * The last runner error if every run failed under `ProbeFailurePolicy::SkipRun`
pub fn collect_live_runs<R: ProbeRunner + ?Sized>(
    runner: &R,
    target: &str,
    config: &CollectConfig,
) -> Result<Vec<RunResult>, CollectError> {
    let mut runs = Vec::with_capacity(config.runs as usize);
    let mut last_error = None;

    for index in 0..config.runs {
        if index > 0 && !config.delay.is_zero() {
            debug!("Waiting {:?} before next run", config.delay);
            thread::sleep(config.delay);
        }

        info!("Run {}/{}: tracing {}", index + 1, config.runs, target);

        let raw = match runner.run_probe(target, config.max_hops) {
            Ok(raw) => raw,
            Err(err) if config.failure_policy == ProbeFailurePolicy::SkipRun => {
                warn!("Run {} failed, skipping: {}", index + 1, err);
                last_error = Some(err);
                continue;
            }
            Err(err) => return Err(err),
        };

        if let Some(run) = parse_collected(&raw, &format!("Run {}", index + 1)) {
            debug!("Run {} produced {} hop records", index + 1, run.len());
            runs.push(run);
        }
    }

    match last_error {
        Some(err) if runs.is_empty() => Err(err),
        _ => Ok(runs),
    }
}
