use pretty_assertions::assert_eq;
use traceroute_stats::aggregator::{
    aggregate, compute_statistics, group_by_hop, latency_pool, summarize_path, AggregateConfig,
    LatencyStats, MissingHopPolicy, TimeoutPolicy,
};
use traceroute_stats::parser::{parse_run, HopRecord, RunResult};
use traceroute_stats::utils::error::AggregateError;

fn single_hop_run(hop: u32, latencies: [f64; 3]) -> RunResult {
    RunResult::new(vec![HopRecord::new(
        hop,
        vec![format!("hop{}.example.net", hop)],
        latencies.map(Some),
    )])
}

fn fixture_runs() -> Vec<RunResult> {
    vec![
        parse_run(include_str!("fixtures/run_1.txt")).unwrap(),
        parse_run(include_str!("fixtures/run_2.txt")).unwrap(),
    ]
}

#[test]
fn test_two_runs_pool_into_one_hop() {
    let runs = vec![
        single_hop_run(1, [1.0, 2.0, 3.0]),
        single_hop_run(1, [4.0, 5.0, 6.0]),
    ];

    let stats = compute_statistics(&runs, 1).unwrap();

    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].hop, 1);
    assert_eq!(stats[0].min, 1.0);
    assert_eq!(stats[0].max, 6.0);
    assert_eq!(stats[0].avg, 3.5);
    assert_eq!(stats[0].med, 3.0);
}

#[test]
fn test_equal_latencies_collapse() {
    let stats = compute_statistics(&[single_hop_run(1, [7.5, 7.5, 7.5])], 1).unwrap();

    let hop = &stats[0];
    assert_eq!(hop.min, 7.5);
    assert_eq!(hop.max, 7.5);
    assert_eq!(hop.avg, 7.5);
    assert_eq!(hop.med, 7.5);
}

#[test]
fn test_fixture_statistics() {
    let stats = compute_statistics(&fixture_runs(), 5).unwrap();

    let hops: Vec<u32> = stats.iter().map(|s| s.hop).collect();
    assert_eq!(hops, vec![1, 2, 3, 4, 5]);

    // Hop 3 timed out in the first run: three 0.0 sentinels join the pool
    let hop3 = &stats[2];
    assert_eq!(hop3.min, 0.0);
    assert_eq!(hop3.max, 13.0);
    assert_eq!(hop3.avg, 6.25);
    assert_eq!(hop3.med, 0.0);
    assert_eq!(hop3.hosts, vec!["core2.isp.net", "(203.0.113.9)"]);

    let hop1 = &stats[0];
    assert_eq!(hop1.min, 0.998);
    assert_eq!(hop1.max, 1.312);
    assert_eq!(hop1.med, 1.101);
}

#[test]
fn test_fixture_statistics_skipping_timeouts() {
    let config = AggregateConfig::new(5).with_timeout_policy(TimeoutPolicy::Skip);
    let aggregation = aggregate(&fixture_runs(), &config).unwrap();

    let hop3 = &aggregation.hops[2];
    assert_eq!(hop3.min, 12.0);
    assert_eq!(hop3.avg, 12.5);
    assert_eq!(hop3.med, 12.5);

    let hop4 = &aggregation.hops[3];
    assert_eq!(hop4.min, 14.21);
}

#[test]
fn test_missing_hop_aborts_aggregation() {
    let runs = vec![parse_run(include_str!("fixtures/short_run.txt")).unwrap()];

    assert_eq!(compute_statistics(&runs, 3), Err(AggregateError::MissingHop(2)));
}

#[test]
fn test_missing_hops_flagged_when_skipping() {
    let runs = vec![parse_run(include_str!("fixtures/short_run.txt")).unwrap()];
    let config = AggregateConfig::new(3).with_missing_hop_policy(MissingHopPolicy::Skip);

    let aggregation = aggregate(&runs, &config).unwrap();

    assert_eq!(aggregation.hops.len(), 1);
    assert_eq!(aggregation.missing_hops, vec![2, 3]);
}

#[test]
fn test_no_runs_is_missing_first_hop() {
    assert_eq!(compute_statistics(&[], 1), Err(AggregateError::MissingHop(1)));
}

#[test]
fn test_min_max_agree_across_batches() {
    let runs = vec![
        single_hop_run(1, [3.0, 9.0, 4.0]),
        single_hop_run(1, [1.5, 2.5, 8.0]),
        single_hop_run(1, [6.0, 0.5, 7.0]),
        single_hop_run(1, [5.5, 5.0, 10.0]),
    ];
    let (first, second) = runs.split_at(2);

    let pool_of = |batch: &[RunResult]| {
        let groups = group_by_hop(batch);
        latency_pool(&groups[&1], TimeoutPolicy::ZeroFill)
    };

    let first_stats = LatencyStats::from_pool(&pool_of(first)).unwrap();
    let second_stats = LatencyStats::from_pool(&pool_of(second)).unwrap();

    let mut rejoined = pool_of(first);
    rejoined.extend(pool_of(second));
    let rejoined_stats = LatencyStats::from_pool(&rejoined).unwrap();

    let direct = compute_statistics(&runs, 1).unwrap();

    assert_eq!(direct[0].min, first_stats.min.min(second_stats.min));
    assert_eq!(direct[0].max, first_stats.max.max(second_stats.max));
    assert_eq!(direct[0].avg, rejoined_stats.avg);
    assert_eq!(direct[0].med, rejoined_stats.med);
}

#[test]
fn test_path_summary_of_fixtures() {
    let stats = compute_statistics(&fixture_runs(), 5).unwrap();
    let summary = summarize_path(&stats);

    assert_eq!(summary.hop_count, 5);
    assert_eq!(summary.slowest_hop, Some(5));
    assert_eq!(summary.overall_min, 0.0);
    assert_eq!(summary.overall_max, 20.4);
}
