use crate::aggregator::{MissingHopPolicy, TimeoutPolicy};
use crate::collector::ProbeFailurePolicy;
use crate::plot::BoxPlotConfig;
use crate::utils::config::{
    DEFAULT_MAX_HOPS, DEFAULT_PROBE_TIMEOUT, DEFAULT_RUNS, DEFAULT_RUN_DELAY_SECS,
    DEFAULT_TRACEROUTE_PROGRAM,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Arguments for the capture command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct CaptureArgs {
    /// Host or IP to trace (live mode)
    pub target: Option<String>,

    /// Directory of pre-captured traceroute outputs (offline mode)
    pub trace_dir: Option<PathBuf>,

    /// Number of live traceroute runs
    pub runs: u32,

    /// Pause between consecutive live runs
    pub delay: Duration,

    /// Highest hop probed and reported
    pub max_hops: u32,

    /// Output path for JSON statistics
    pub output_json: PathBuf,

    /// Output path for SVG box plot (optional)
    pub output_svg: Option<PathBuf>,

    /// Traceroute binary used for live runs
    pub probe_program: String,

    /// Upper bound on a single traceroute invocation
    pub probe_timeout: Duration,

    pub failure_policy: ProbeFailurePolicy,
    pub timeout_policy: TimeoutPolicy,
    pub missing_hop_policy: MissingHopPolicy,

    /// Box plot configuration
    pub plot_config: BoxPlotConfig,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for CaptureArgs {
    fn default() -> Self {
        Self {
            target: None,
            trace_dir: None,
            runs: DEFAULT_RUNS,
            delay: Duration::from_secs(DEFAULT_RUN_DELAY_SECS),
            max_hops: DEFAULT_MAX_HOPS,
            output_json: PathBuf::from("stats.json"),
            output_svg: None,
            probe_program: DEFAULT_TRACEROUTE_PROGRAM.to_string(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            failure_policy: ProbeFailurePolicy::default(),
            timeout_policy: TimeoutPolicy::default(),
            missing_hop_policy: MissingHopPolicy::default(),
            plot_config: BoxPlotConfig::default(),
            print_summary: false,
        }
    }
}

/// Where the runs of a capture come from
#[derive(Debug, Clone, PartialEq)]
pub enum RunSource<'a> {
    Live(&'a str),
    TraceDir(&'a Path),
}

impl CaptureArgs {
    /// The run source, if exactly one was given
    pub fn source(&self) -> Option<RunSource<'_>> {
        match (&self.target, &self.trace_dir) {
            (Some(target), None) => Some(RunSource::Live(target)),
            (None, Some(dir)) => Some(RunSource::TraceDir(dir.as_path())),
            _ => None,
        }
    }
}
