//! Capture command implementation.
//!
//! The capture command:
//! 1. Collects runs (live traceroute or a trace directory)
//! 2. Aggregates them into per-hop statistics
//! 3. Writes the statistics JSON
//! 4. Generates and writes the box plot (if requested)

use super::models::{CaptureArgs, RunSource};
use crate::aggregator::{aggregate, summarize_path, AggregateConfig, Aggregation};
use crate::collector::{
    collect_live_runs, collect_trace_dir, CollectConfig, ProbeRunner, SystemTraceroute,
};
use crate::output::{write_statistics, write_svg};
use crate::parser::RunResult;
use crate::plot::{generate_box_plot, generate_text_summary};
use crate::utils::config::MIN_PLOT_WIDTH;
use crate::utils::error::UsageError;
use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info, warn};
use std::time::Instant;

/// Execute the capture command with the system traceroute
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The aggregation that was written, including any skipped hops
///
/// # Errors
/// * Usage errors (missing or conflicting run source)
/// * Probe invocation and trace reading failures
/// * Missing hops under the abort policy
/// * File write errors
pub fn execute_capture(args: CaptureArgs) -> Result<Aggregation> {
    let runner = SystemTraceroute::new(args.probe_program.clone()).with_timeout(args.probe_timeout);
    execute_capture_with(args, &runner)
}

/// Execute the capture command with a custom probe runner
///
/// **Public** - lets callers and tests supply their own `ProbeRunner`
pub fn execute_capture_with<R: ProbeRunner + ?Sized>(
    args: CaptureArgs,
    runner: &R,
) -> Result<Aggregation> {
    validate_args(&args)?;
    let start_time = Instant::now();

    // Step 1: Collect runs
    info!("Step 1/4: Collecting runs...");
    let runs = collect_runs(&args, runner)?;
    info!("Collected {} usable runs", runs.len());

    // Step 2: Aggregate
    info!("Step 2/4: Aggregating hops 1..={}...", args.max_hops);
    let config = AggregateConfig::new(args.max_hops)
        .with_timeout_policy(args.timeout_policy)
        .with_missing_hop_policy(args.missing_hop_policy);
    let aggregation = aggregate(&runs, &config)
        .with_context(|| format!("Failed to aggregate {} runs", runs.len()))?;

    if !aggregation.missing_hops.is_empty() {
        warn!("Hops without data: {:?}", aggregation.missing_hops);
    }

    let path_summary = summarize_path(&aggregation.hops);
    info!("Path: {}", path_summary.summary());

    // Step 3: Write statistics
    info!("Step 3/4: Writing statistics...");
    write_statistics(&aggregation.hops, &args.output_json)
        .context("Failed to write statistics JSON")?;
    info!("✓ Statistics written to: {}", args.output_json.display());

    // Step 4: Box plot (if requested)
    match &args.output_svg {
        Some(svg_path) => {
            info!("Step 4/4: Generating box plot...");
            let plot_config = args.plot_config.clone().with_target(args.target.clone());
            let svg = generate_box_plot(&aggregation.hops, Some(&plot_config))
                .context("Failed to generate box plot")?;
            write_svg(&svg, svg_path).context("Failed to write box plot SVG")?;
            info!("✓ Box plot written to: {}", svg_path.display());
        }
        None => info!("Step 4/4: Skipping box plot (not requested)"),
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("TRACEROUTE STATISTICS");
        println!("{}", "=".repeat(80));
        match &args.source() {
            Some(RunSource::Live(target)) => println!("Target:    {}", target),
            Some(RunSource::TraceDir(dir)) => println!("Traces:    {}", dir.display()),
            None => {}
        }
        println!("Runs:      {}", runs.len());
        println!("Generated: {}", Utc::now().to_rfc3339());
        println!("\n{}", generate_text_summary(&aggregation.hops));
        if !aggregation.missing_hops.is_empty() {
            println!("  Hops without data: {:?}", aggregation.missing_hops);
        }
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Capture completed in {:.2}s", elapsed.as_secs_f64());

    Ok(aggregation)
}

/// Obtain the parsed runs from whichever source was configured
///
/// **Private** - internal helper for execute_capture_with
fn collect_runs<R: ProbeRunner + ?Sized>(args: &CaptureArgs, runner: &R) -> Result<Vec<RunResult>> {
    match args.source().ok_or(UsageError::NoSource)? {
        RunSource::TraceDir(dir) => {
            debug!("Reading pre-captured traces from {}", dir.display());
            collect_trace_dir(dir)
                .with_context(|| format!("Failed to read traces from {}", dir.display()))
        }
        RunSource::Live(target) => {
            let config = CollectConfig {
                runs: args.runs,
                delay: args.delay,
                max_hops: args.max_hops,
                failure_policy: args.failure_policy,
            };
            collect_live_runs(runner, target, &config)
                .with_context(|| format!("Failed to trace {}", target))
        }
    }
}

/// Validate capture arguments
///
/// **Public** - can be called before execute_capture for early validation
///
/// # Errors
/// * `UsageError::NoSource` / `UsageError::ConflictingSources` - not exactly
///   one of target and trace directory
/// * `UsageError::InvalidRunCount`, `InvalidMaxHops`, `InvalidWidth`
pub fn validate_args(args: &CaptureArgs) -> Result<(), UsageError> {
    match (&args.target, &args.trace_dir) {
        (None, None) => return Err(UsageError::NoSource),
        (Some(_), Some(_)) => return Err(UsageError::ConflictingSources),
        (Some(target), None) if target.trim().is_empty() => return Err(UsageError::NoSource),
        _ => {}
    }

    if args.runs == 0 {
        return Err(UsageError::InvalidRunCount);
    }

    if args.max_hops == 0 {
        return Err(UsageError::InvalidMaxHops);
    }

    if args.output_svg.is_some() && args.plot_config.width < MIN_PLOT_WIDTH {
        return Err(UsageError::InvalidWidth(MIN_PLOT_WIDTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn live_args() -> CaptureArgs {
        CaptureArgs {
            target: Some("example.com".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_args_live() {
        assert_eq!(validate_args(&live_args()), Ok(()));
    }

    #[test]
    fn test_validate_args_trace_dir() {
        let args = CaptureArgs {
            trace_dir: Some(PathBuf::from("traces")),
            ..Default::default()
        };
        assert_eq!(validate_args(&args), Ok(()));
    }

    #[test]
    fn test_validate_args_no_source() {
        assert_eq!(validate_args(&CaptureArgs::default()), Err(UsageError::NoSource));
    }

    #[test]
    fn test_validate_args_blank_target() {
        let args = CaptureArgs {
            target: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(validate_args(&args), Err(UsageError::NoSource));
    }

    #[test]
    fn test_validate_args_both_sources() {
        let args = CaptureArgs {
            trace_dir: Some(PathBuf::from("traces")),
            ..live_args()
        };
        assert_eq!(validate_args(&args), Err(UsageError::ConflictingSources));
    }

    #[test]
    fn test_validate_args_zero_runs() {
        let args = CaptureArgs {
            runs: 0,
            ..live_args()
        };
        assert_eq!(validate_args(&args), Err(UsageError::InvalidRunCount));
    }

    #[test]
    fn test_validate_args_zero_max_hops() {
        let args = CaptureArgs {
            max_hops: 0,
            ..live_args()
        };
        assert_eq!(validate_args(&args), Err(UsageError::InvalidMaxHops));
    }

    #[test]
    fn test_validate_args_narrow_plot() {
        let args = CaptureArgs {
            output_svg: Some(PathBuf::from("plot.svg")),
            plot_config: crate::plot::BoxPlotConfig::new().with_width(50),
            ..live_args()
        };
        assert_eq!(validate_args(&args), Err(UsageError::InvalidWidth(MIN_PLOT_WIDTH)));
    }
}
