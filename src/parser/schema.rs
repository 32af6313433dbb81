//! Data model shared by the parser, aggregator and writers.
//!
//! `HopStatistics` is also the on-disk schema: the statistics file is a JSON
//! array of these records in ascending hop order.

use crate::utils::config::{LATENCY_SENTINEL, PROBES_PER_HOP};
use serde::{Deserialize, Serialize};

/// One hop line of one probe run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopRecord {
    /// 1-based distance from the source
    pub hop: u32,

    /// Every host-like token on the line, in order (may be empty or repeat)
    pub hosts: Vec<String>,

    /// One slot per probe attempt; `None` when no value was measured
    pub latencies: [Option<f64>; PROBES_PER_HOP],
}

impl HopRecord {
    pub fn new(hop: u32, hosts: Vec<String>, latencies: [Option<f64>; PROBES_PER_HOP]) -> Self {
        Self { hop, hosts, latencies }
    }

    /// Latencies with unmeasured slots replaced by the 0.0 sentinel
    pub fn padded_latencies(&self) -> [f64; PROBES_PER_HOP] {
        self.latencies.map(|slot| slot.unwrap_or(LATENCY_SENTINEL))
    }

    /// Number of probe attempts that produced a value
    pub fn measured_count(&self) -> usize {
        self.latencies.iter().filter(|slot| slot.is_some()).count()
    }
}

/// All hop records recognised in a single probe run, in line order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunResult {
    pub hops: Vec<HopRecord>,
}

impl RunResult {
    pub fn new(hops: Vec<HopRecord>) -> Self {
        Self { hops }
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    /// Highest hop number seen in this run
    pub fn last_hop(&self) -> Option<u32> {
        self.hops.iter().map(|h| h.hop).max()
    }
}

/// Latency statistics for one hop across every run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopStatistics {
    pub hop: u32,

    /// Hosts reported by the last run that reached this hop
    pub hosts: Vec<String>,

    pub min: f64,
    pub max: f64,

    /// Arithmetic mean rounded to 3 decimal places
    pub avg: f64,

    /// Lower-middle element of the sorted latency pool
    pub med: f64,
}
