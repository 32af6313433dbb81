//! Traceroute output parsing and the shared data model.
//!
//! This module handles:
//! - Recognising hop lines in free-form traceroute text
//! - Splitting hop lines into hosts and latency measurements
//! - Defining the records exchanged with the aggregator and writers

pub mod schema;
pub mod traceroute;

// Re-export main types
pub use schema::{HopRecord, HopStatistics, RunResult};
pub use traceroute::{is_latency_token, parse_hop_line, parse_run};
