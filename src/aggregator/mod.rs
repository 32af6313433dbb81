//! Aggregation of parsed runs into per-hop statistics.
//!
//! This module transforms parsed runs into:
//! - A hop-number grouping across all runs
//! - min / max / avg / med latency per hop
//! - A whole-path summary for reporting

pub mod grouping;
pub mod metrics;
pub mod stats;

// Re-export main types and functions
pub use grouping::{group_by_hop, HopGroups};
pub use metrics::{summarize_path, PathSummary};
pub use stats::{
    aggregate, compute_statistics, latency_pool, AggregateConfig, Aggregation, LatencyStats,
    MissingHopPolicy, TimeoutPolicy, round_to,
};
