//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod capture;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use capture::{execute_capture, execute_capture_with, validate_args};
pub use models::{CaptureArgs, RunSource};
pub use utils::{display_schema, display_version, validate_statistics_file};
