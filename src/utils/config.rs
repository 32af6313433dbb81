//! Configuration and constants for the CLI.

use std::time::Duration;

/// Probe attempts traceroute sends per hop (its `-q` default)
pub const PROBES_PER_HOP: usize = 3;

/// Value substituted for an unmeasured probe slot when zero-filling
pub const LATENCY_SENTINEL: f64 = 0.0;

/// Every line starting with this token is the probe tool's own banner
pub const BANNER_TOKEN: &str = "traceroute";

/// Unit marker that follows every latency value
pub const UNIT_MARKER: &str = "ms";

/// Marker printed by traceroute for a probe that timed out
pub const TIMEOUT_MARKER: &str = "*";

// Hop lines need the hop number plus at least one host/latency pair
pub const MIN_HOP_LINE_TOKENS: usize = 4;

/// Decimal places kept for the average latency
pub const AVG_DECIMALS: usize = 3;

pub const DEFAULT_RUNS: u32 = 1;
pub const DEFAULT_RUN_DELAY_SECS: u64 = 0;
pub const DEFAULT_MAX_HOPS: u32 = 30;

/// Probe binary invoked for live runs
pub const DEFAULT_TRACEROUTE_PROGRAM: &str = "traceroute";

/// Upper bound on a single traceroute invocation
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS);

// How often a running probe is polled for completion
pub const PROBE_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Default box plot width in pixels
pub const DEFAULT_PLOT_WIDTH: usize = 1200;
pub const MIN_PLOT_WIDTH: usize = 200;
