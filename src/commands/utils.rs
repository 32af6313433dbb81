use crate::aggregator::{round_to, summarize_path};
use crate::parser::HopStatistics;
use crate::output::read_statistics;
use crate::utils::config::AVG_DECIMALS;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Validate a statistics JSON file
pub fn validate_statistics_file(file_path: PathBuf) -> Result<()> {
    println!("Validating statistics: {}", file_path.display());

    let stats = read_statistics(&file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;

    for pair in stats.windows(2) {
        if pair[1].hop <= pair[0].hop {
            anyhow::bail!(
                "Hops are not in ascending order: {} follows {}",
                pair[1].hop,
                pair[0].hop
            );
        }
    }

    for hop in &stats {
        if !is_consistent(hop) {
            anyhow::bail!("Hop {} has inconsistent statistics", hop.hop);
        }
    }

    let summary = summarize_path(&stats);

    println!("✓ Valid statistics JSON");
    println!("  Hops: {}", summary.hop_count);
    if let Some(hop) = summary.slowest_hop {
        println!("  Slowest hop: {} ({:.3} ms avg)", hop, summary.slowest_avg);
        println!("  Overall range: {:.3} - {:.3} ms", summary.overall_min, summary.overall_max);
    }

    Ok(())
}

/// Check min <= med <= max and min <= avg <= max
///
/// `avg` is stored rounded, so it is compared against min and max rounded
/// the same way.
fn is_consistent(hop: &HopStatistics) -> bool {
    let low = round_to(hop.min, AVG_DECIMALS);
    let high = round_to(hop.max, AVG_DECIMALS);

    hop.min <= hop.med && hop.med <= hop.max && low <= hop.avg && hop.avg <= high
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Traceroute Stats Output Schema");
    println!();

    if show_details {
        println!("The statistics file is a JSON array, one object per hop, ascending:");
        println!("  hop: number      - Hop number (1-based distance from the source)");
        println!("  hosts: string[]  - Host tokens reported at this hop by the last run");
        println!("  min: number      - Lowest latency in the hop's pool (ms)");
        println!("  max: number      - Highest latency in the hop's pool (ms)");
        println!("  avg: number      - Mean latency, rounded to 3 decimals (ms)");
        println!("  med: number      - Lower-middle latency of the sorted pool (ms)");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Traceroute Stats v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Repeated traceroute runs aggregated into per-hop latency statistics.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::compute_statistics;
    use crate::output::write_statistics;
    use crate::parser::parse_run;
    use tempfile::NamedTempFile;

    fn stat(hop: u32, min: f64, avg: f64, med: f64, max: f64) -> HopStatistics {
        HopStatistics {
            hop,
            hosts: vec![],
            min,
            max,
            avg,
            med,
        }
    }

    #[test]
    fn test_validate_good_file() {
        let file = NamedTempFile::new().unwrap();
        write_statistics(&[stat(1, 1.0, 2.0, 2.0, 3.0), stat(2, 4.0, 5.0, 5.0, 6.0)], file.path())
            .unwrap();
        assert!(validate_statistics_file(file.path().to_path_buf()).is_ok());
    }

    #[test]
    fn test_validate_accepts_captured_high_precision_latencies() {
        let run = parse_run(" 1  gw (10.0.0.1)  1.0004 ms  1.0004 ms  1.0004 ms\n").unwrap();
        let stats = compute_statistics(&[run], 1).unwrap();
        assert_eq!(stats[0].avg, 1.0);
        assert_eq!(stats[0].min, 1.0004);

        let file = NamedTempFile::new().unwrap();
        write_statistics(&stats, file.path()).unwrap();

        assert!(validate_statistics_file(file.path().to_path_buf()).is_ok());
    }

    #[test]
    fn test_validate_rounding_bounds() {
        assert!(is_consistent(&stat(1, 2.0004, 2.0, 2.0004, 2.9996)));
        assert!(is_consistent(&stat(1, 2.0, 3.0, 2.5, 2.9996)));
        assert!(!is_consistent(&stat(1, 2.0006, 2.0, 2.0006, 3.0)));
    }

    #[test]
    fn test_validate_out_of_order() {
        let file = NamedTempFile::new().unwrap();
        write_statistics(&[stat(2, 1.0, 2.0, 2.0, 3.0), stat(1, 1.0, 2.0, 2.0, 3.0)], file.path())
            .unwrap();
        assert!(validate_statistics_file(file.path().to_path_buf()).is_err());
    }

    #[test]
    fn test_validate_inconsistent() {
        let file = NamedTempFile::new().unwrap();
        write_statistics(&[stat(1, 5.0, 2.0, 2.0, 3.0)], file.path()).unwrap();
        assert!(validate_statistics_file(file.path().to_path_buf()).is_err());
    }
}
