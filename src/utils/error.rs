//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while parsing raw traceroute text
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("No hop lines found in run input ({lines} non-blank lines inspected)")]
    MalformedRunInput { lines: usize },
}

/// Errors that can occur while aggregating runs into per-hop statistics
#[derive(Error, Debug, PartialEq)]
pub enum AggregateError {
    #[error("No data at hop {0}: no run produced a record for it")]
    MissingHop(u32),

    #[error("No measurements at hop {0}: every probe attempt timed out")]
    NoMeasurements(u32),

    #[error("Max hops must be at least 1")]
    InvalidMaxHops,
}

/// Errors that can occur while obtaining raw run text
#[derive(Error, Debug)]
pub enum CollectError {
    #[error("Failed to start {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited abnormally ({status}): {stderr}")]
    AbnormalExit {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("{program} did not finish within {timeout:?}")]
    TimedOut { program: String, timeout: Duration },

    #[error("Failed to read trace input: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("No trace files found in {0}")]
    NoTraceFiles(PathBuf),
}

/// Errors caused by an invalid combination of user-supplied options
#[derive(Error, Debug, PartialEq)]
pub enum UsageError {
    #[error("Either a target (-t) or a trace directory (--test) is required")]
    NoSource,

    #[error("A target (-t) and a trace directory (--test) cannot be used together")]
    ConflictingSources,

    #[error("Number of runs must be at least 1")]
    InvalidRunCount,

    #[error("Max hops must be at least 1")]
    InvalidMaxHops,

    #[error("Graph width must be at least {0} pixels")]
    InvalidWidth(usize),
}

/// Errors that can occur during box plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("No hop statistics to plot")]
    EmptyStatistics,
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
