//! Whole-path summary derived from per-hop statistics.
//!
//! Used for log output and the terminal summary; it is not part of the
//! persisted statistics file.

use crate::parser::HopStatistics;
use log::debug;

/// Summary of a path across all its reported hops
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathSummary {
    /// Number of hops with statistics
    pub hop_count: usize,

    /// Hop with the highest average latency
    pub slowest_hop: Option<u32>,

    /// Average latency of the slowest hop
    pub slowest_avg: f64,

    /// Lowest latency seen at any hop
    pub overall_min: f64,

    /// Highest latency seen at any hop
    pub overall_max: f64,

    /// Mean of the per-hop averages
    pub mean_of_averages: f64,
}

/// Summarize a path from its per-hop statistics
///
/// **Public** - provides summary statistics
pub fn summarize_path(stats: &[HopStatistics]) -> PathSummary {
    if stats.is_empty() {
        return PathSummary::default();
    }

    let slowest = stats
        .iter()
        .max_by(|a, b| a.avg.total_cmp(&b.avg));

    let overall_min = stats.iter().map(|s| s.min).fold(f64::INFINITY, f64::min);
    let overall_max = stats.iter().map(|s| s.max).fold(f64::NEG_INFINITY, f64::max);
    let mean_of_averages = stats.iter().map(|s| s.avg).sum::<f64>() / stats.len() as f64;

    debug!("Summarized {} hops", stats.len());

    PathSummary {
        hop_count: stats.len(),
        slowest_hop: slowest.map(|s| s.hop),
        slowest_avg: slowest.map(|s| s.avg).unwrap_or_default(),
        overall_min,
        overall_max,
        mean_of_averages,
    }
}

impl PathSummary {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        match self.slowest_hop {
            Some(hop) => format!(
                "Hops: {} | Min: {:.3} ms | Max: {:.3} ms | Mean avg: {:.3} ms | Slowest: hop {} ({:.3} ms)",
                self.hop_count,
                self.overall_min,
                self.overall_max,
                self.mean_of_averages,
                hop,
                self.slowest_avg
            ),
            None => "Hops: 0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(hop: u32, min: f64, max: f64, avg: f64) -> HopStatistics {
        HopStatistics {
            hop,
            hosts: vec![],
            min,
            max,
            avg,
            med: avg,
        }
    }

    #[test]
    fn test_summarize_path() {
        let stats = vec![
            stat(1, 0.5, 1.5, 1.0),
            stat(2, 8.0, 30.0, 12.0),
            stat(3, 9.0, 11.0, 10.0),
        ];

        let summary = summarize_path(&stats);

        assert_eq!(summary.hop_count, 3);
        assert_eq!(summary.slowest_hop, Some(2));
        assert_eq!(summary.slowest_avg, 12.0);
        assert_eq!(summary.overall_min, 0.5);
        assert_eq!(summary.overall_max, 30.0);
        assert_eq!(summary.mean_of_averages, 23.0 / 3.0);
        assert!(summary.summary().contains("Slowest: hop 2"));
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize_path(&[]);
        assert_eq!(summary, PathSummary::default());
        assert_eq!(summary.summary(), "Hops: 0");
    }
}
