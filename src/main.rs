//! Traceroute Stats CLI
//!
//! Runs traceroute repeatedly and reports per-hop latency statistics
//! as JSON and as an SVG box plot.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;
use std::time::Duration;

use traceroute_stats::aggregator::{MissingHopPolicy, TimeoutPolicy};
use traceroute_stats::collector::ProbeFailurePolicy;
use traceroute_stats::commands::{
    display_schema, display_version, execute_capture, validate_statistics_file, CaptureArgs,
};
use traceroute_stats::plot::BoxPlotConfig;
use traceroute_stats::utils::config::{
    DEFAULT_MAX_HOPS, DEFAULT_PLOT_WIDTH, DEFAULT_PROBE_TIMEOUT_SECS, DEFAULT_RUNS,
    DEFAULT_RUN_DELAY_SECS, DEFAULT_TRACEROUTE_PROGRAM,
};

/// Traceroute Stats - per-hop latency statistics from repeated traceroutes
#[derive(Parser, Debug)]
#[command(name = "trstats")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Collect runs and compute per-hop statistics
    Capture {
        /// Number of times traceroute will run
        #[arg(short = 'n', long, default_value_t = DEFAULT_RUNS)]
        runs: u32,

        /// Seconds to wait between two consecutive runs
        #[arg(short = 'd', long, default_value_t = DEFAULT_RUN_DELAY_SECS)]
        delay: u64,

        /// Max hops per traceroute run
        #[arg(short = 'm', long, default_value_t = DEFAULT_MAX_HOPS)]
        max_hops: u32,

        /// Output path for JSON statistics
        #[arg(short, long, default_value = "stats.json")]
        output: PathBuf,

        /// Output path for SVG box plot (optional)
        #[arg(short, long)]
        graph: Option<PathBuf>,

        /// Target domain name or IP address
        #[arg(short, long)]
        target: Option<String>,

        /// Directory of pre-captured traceroute outputs
        #[arg(long = "test", value_name = "DIR")]
        test_dir: Option<PathBuf>,

        /// Traceroute binary to invoke
        #[arg(long, env = "TRSTATS_TRACEROUTE", default_value = DEFAULT_TRACEROUTE_PROGRAM)]
        traceroute: String,

        /// Seconds before a single traceroute run is killed
        #[arg(long, default_value_t = DEFAULT_PROBE_TIMEOUT_SECS)]
        timeout: u64,

        /// Continue with the next run when a traceroute invocation fails
        #[arg(long)]
        skip_failed_runs: bool,

        /// Leave hops without data out of the output instead of failing
        #[arg(long)]
        skip_missing_hops: bool,

        /// Exclude timed-out probes from statistics instead of counting them as 0 ms
        #[arg(long)]
        skip_timeouts: bool,

        /// Box plot title
        #[arg(long)]
        title: Option<String>,

        /// Box plot width in pixels
        #[arg(long, default_value_t = DEFAULT_PLOT_WIDTH)]
        width: usize,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a statistics JSON file
    Validate {
        /// Path to statistics JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Capture {
            runs,
            delay,
            max_hops,
            output,
            graph,
            target,
            test_dir,
            traceroute,
            timeout,
            skip_failed_runs,
            skip_missing_hops,
            skip_timeouts,
            title,
            width,
            summary,
        } => {
            let mut plot_config = BoxPlotConfig::new().with_width(width);
            if let Some(title) = title {
                plot_config = plot_config.with_title(title);
            }

            let args = CaptureArgs {
                target,
                trace_dir: test_dir,
                runs,
                delay: Duration::from_secs(delay),
                max_hops,
                output_json: output,
                output_svg: graph,
                probe_program: traceroute,
                probe_timeout: Duration::from_secs(timeout),
                failure_policy: if skip_failed_runs {
                    ProbeFailurePolicy::SkipRun
                } else {
                    ProbeFailurePolicy::Abort
                },
                timeout_policy: if skip_timeouts {
                    TimeoutPolicy::Skip
                } else {
                    TimeoutPolicy::ZeroFill
                },
                missing_hop_policy: if skip_missing_hops {
                    MissingHopPolicy::Skip
                } else {
                    MissingHopPolicy::Abort
                },
                plot_config,
                print_summary: summary,
            };

            execute_capture(args)?;
        }

        Commands::Validate { file } => {
            validate_statistics_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
