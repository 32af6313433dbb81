//! Per-hop latency statistics across all runs.
//!
//! For each hop in `1..=max_hops` the latency slots of every record
//! reported for it are flattened into one pool, from which min, max,
//! average and median are taken.

use super::grouping::group_by_hop;
use crate::parser::{HopRecord, HopStatistics, RunResult};
use crate::utils::config::{AVG_DECIMALS, DEFAULT_MAX_HOPS, LATENCY_SENTINEL};
use crate::utils::error::AggregateError;
use log::{debug, warn};

/// How unmeasured probe slots enter the latency pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeoutPolicy {
    /// Pool the 0.0 sentinel for every unmeasured slot
    #[default]
    ZeroFill,
    /// Pool only measured values
    Skip,
}

/// What to do with a hop in range that has no usable data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingHopPolicy {
    /// Fail the whole aggregation
    #[default]
    Abort,
    /// Leave the hop out and list it in `Aggregation::missing_hops`
    Skip,
}

/// Aggregation settings
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    pub max_hops: u32,
    pub timeout_policy: TimeoutPolicy,
    pub missing_hop_policy: MissingHopPolicy,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            max_hops: DEFAULT_MAX_HOPS,
            timeout_policy: TimeoutPolicy::default(),
            missing_hop_policy: MissingHopPolicy::default(),
        }
    }
}

impl AggregateConfig {
    pub fn new(max_hops: u32) -> Self {
        Self {
            max_hops,
            ..Self::default()
        }
    }

    pub fn with_timeout_policy(mut self, policy: TimeoutPolicy) -> Self {
        self.timeout_policy = policy;
        self
    }

    pub fn with_missing_hop_policy(mut self, policy: MissingHopPolicy) -> Self {
        self.missing_hop_policy = policy;
        self
    }
}

/// Result of an aggregation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// Statistics in ascending hop order
    pub hops: Vec<HopStatistics>,

    /// Hops in range skipped for lack of data (only under `MissingHopPolicy::Skip`)
    pub missing_hops: Vec<u32>,
}

/// min / max / avg / med over one latency pool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub med: f64,
}

impl LatencyStats {
    /// Compute statistics over a pool, `None` if it is empty
    ///
    /// The median is the lower-middle element of the sorted pool, so an
    /// even-sized pool yields the element just below the midpoint rather
    /// than an interpolated value.
    pub fn from_pool(pool: &[f64]) -> Option<Self> {
        if pool.is_empty() {
            return None;
        }

        let mut sorted = pool.to_vec();
        sorted.sort_by(f64::total_cmp);

        let sum: f64 = sorted.iter().sum();
        let avg = round_to(sum / sorted.len() as f64, AVG_DECIMALS);

        Some(Self {
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            avg,
            med: sorted[(sorted.len() - 1) / 2],
        })
    }
}

/// Compute per-hop statistics with default policies
///
/// **Public** - main entry point for aggregation
///
/// # Arguments
/// * `runs` - Parsed runs, in the order they were collected
/// * `max_hops` - Highest hop number to report
///
/// # Errors
/// * `AggregateError::MissingHop` - No run reported some hop in `1..=max_hops`
/// * `AggregateError::InvalidMaxHops` - `max_hops` is 0
pub fn compute_statistics(
    runs: &[RunResult],
    max_hops: u32,
) -> Result<Vec<HopStatistics>, AggregateError> {
    aggregate(runs, &AggregateConfig::new(max_hops)).map(|aggregation| aggregation.hops)
}

/// Compute per-hop statistics with explicit policies
///
/// **Public** - configurable entry point used by the capture command
pub fn aggregate(
    runs: &[RunResult],
    config: &AggregateConfig,
) -> Result<Aggregation, AggregateError> {
    if config.max_hops == 0 {
        return Err(AggregateError::InvalidMaxHops);
    }

    debug!(
        "Aggregating {} runs over hops 1..={} ({:?}, {:?})",
        runs.len(),
        config.max_hops,
        config.timeout_policy,
        config.missing_hop_policy
    );

    let groups = group_by_hop(runs);
    let mut aggregation = Aggregation::default();

    for hop in 1..=config.max_hops {
        let entries = groups.get(&hop).map(Vec::as_slice).unwrap_or_default();

        match hop_statistics(hop, entries, config.timeout_policy) {
            Ok(stats) => aggregation.hops.push(stats),
            Err(err) if config.missing_hop_policy == MissingHopPolicy::Skip => {
                warn!("Skipping hop {}: {}", hop, err);
                aggregation.missing_hops.push(hop);
            }
            Err(err) => return Err(err),
        }
    }

    Ok(aggregation)
}

/// Statistics for one hop from the records grouped under it
///
/// **Private** - internal helper for aggregate
fn hop_statistics(
    hop: u32,
    entries: &[&HopRecord],
    policy: TimeoutPolicy,
) -> Result<HopStatistics, AggregateError> {
    let last = entries.last().ok_or(AggregateError::MissingHop(hop))?;

    let pool = latency_pool(entries, policy);
    let stats = LatencyStats::from_pool(&pool).ok_or(AggregateError::NoMeasurements(hop))?;

    debug!(
        "Hop {}: {} records, pool of {}, avg {:.3} ms",
        hop,
        entries.len(),
        pool.len(),
        stats.avg
    );

    Ok(HopStatistics {
        hop,
        hosts: last.hosts.clone(),
        min: stats.min,
        max: stats.max,
        avg: stats.avg,
        med: stats.med,
    })
}

/// Flatten every latency slot of the given records into one pool
///
/// **Public** - also used to reason about batch-wise aggregation
pub fn latency_pool(entries: &[&HopRecord], policy: TimeoutPolicy) -> Vec<f64> {
    entries
        .iter()
        .flat_map(|record| record.latencies.iter())
        .filter_map(|slot| match (slot, policy) {
            (Some(value), _) => Some(*value),
            (None, TimeoutPolicy::ZeroFill) => Some(LATENCY_SENTINEL),
            (None, TimeoutPolicy::Skip) => None,
        })
        .collect()
}

/// Round to `decimals` places from the exact binary value of `value`
///
/// **Public** - also used when checking written statistics
///
/// Goes through the formatter, which rounds the exact value; scaling by a
/// power of ten first would introduce its own error near half-way points.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}
