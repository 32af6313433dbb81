//! Run collection: obtaining raw traceroute text for each run.
//!
//! Runs come either from live invocations of the traceroute binary or
//! from a directory of pre-captured outputs. Both feed the line parser.

pub mod probe;
pub mod trace_dir;

// Re-export main types
pub use probe::{
    collect_live_runs, CollectConfig, ProbeFailurePolicy, ProbeRunner, SystemTraceroute,
};
pub use trace_dir::{collect_trace_dir, list_trace_files};

use crate::parser::{parse_run, RunResult};
use crate::utils::error::ParseError;
use log::warn;

/// Parse one collected run, dropping it if it has no hop lines
///
/// **Private** - shared by both collection sources
fn parse_collected(raw: &str, label: &str) -> Option<RunResult> {
    match parse_run(raw) {
        Ok(run) => Some(run),
        Err(ParseError::MalformedRunInput { lines }) => {
            warn!(
                "{}: no hop lines recognised ({} lines inspected), run excluded",
                label, lines
            );
            None
        }
    }
}
