//! Pre-captured traceroute outputs read from a directory.
//!
//! Every regular file in the directory is one run. Files are read in
//! file-name order so results that depend on run order (the host list
//! of each hop comes from the last run) are reproducible.

use super::parse_collected;
use crate::parser::RunResult;
use crate::utils::error::CollectError;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// List the trace files in a directory, sorted by file name
///
/// **Public** - used by collect_trace_dir and the capture command
pub fn list_trace_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, CollectError> {
    let dir = dir.as_ref();

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        } else {
            debug!("Skipping non-file entry: {}", path.display());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Read and parse every trace file in a directory
///
/// **Public** - main entry point for offline collection
///
/// # Errors
/// * `CollectError::ReadFailed` - Directory or file cannot be read
/// * `CollectError::NoTraceFiles` - Directory holds no regular files
pub fn collect_trace_dir(dir: impl AsRef<Path>) -> Result<Vec<RunResult>, CollectError> {
    let dir = dir.as_ref();
    let files = list_trace_files(dir)?;

    if files.is_empty() {
        return Err(CollectError::NoTraceFiles(dir.to_path_buf()));
    }

    info!("Reading {} trace files from {}", files.len(), dir.display());

    let mut runs = Vec::with_capacity(files.len());
    for path in &files {
        let raw = fs::read_to_string(path)?;
        let label = path.display().to_string();
        if let Some(run) = parse_collected(&raw, &label) {
            debug!("{}: {} hop records", label, run.len());
            runs.push(run);
        }
    }

    Ok(runs)
}
