use pretty_assertions::assert_eq;
use traceroute_stats::parser::{is_latency_token, parse_hop_line, parse_run, HopRecord};
use traceroute_stats::utils::error::ParseError;

#[test]
fn test_reference_hop_line() {
    let record = parse_hop_line("1  router.local (10.0.0.1)  1.1 ms  1.3 ms  1.2 ms")
        .unwrap();

    assert_eq!(
        record,
        HopRecord::new(
            1,
            vec!["router.local".to_string(), "(10.0.0.1)".to_string()],
            [Some(1.1), Some(1.3), Some(1.2)],
        )
    );
    assert_eq!(record.padded_latencies(), [1.1, 1.3, 1.2]);
}

#[test]
fn test_parse_fixture_run() {
    let run = parse_run(include_str!("fixtures/run_1.txt")).unwrap();

    assert_eq!(run.len(), 5);
    let hops: Vec<u32> = run.hops.iter().map(|h| h.hop).collect();
    assert_eq!(hops, vec![1, 2, 3, 4, 5]);

    for record in &run.hops {
        assert_eq!(record.padded_latencies().len(), 3);
    }

    let timed_out = &run.hops[2];
    assert!(timed_out.hosts.is_empty());
    assert_eq!(timed_out.padded_latencies(), [0.0, 0.0, 0.0]);

    let partial = &run.hops[3];
    assert_eq!(partial.hosts, vec!["ae-5.edge1.example.net", "(198.51.100.17)"]);
    assert_eq!(partial.padded_latencies(), [14.21, 15.002, 0.0]);
}

#[test]
fn test_ip_only_hop_keeps_duplicate_hosts() {
    let run = parse_run(include_str!("fixtures/run_1.txt")).unwrap();
    assert_eq!(run.hops[1].hosts, vec!["10.20.0.1", "(10.20.0.1)"]);
}

#[test]
fn test_out_of_order_hops_are_kept() {
    let raw = " 2  b (10.0.0.2)  2.0 ms  2.0 ms  2.0 ms\n 1  a (10.0.0.1)  1.0 ms  1.0 ms  1.0 ms\n 1  a (10.0.0.1)  1.5 ms  1.5 ms  1.5 ms\n";
    let run = parse_run(raw).unwrap();

    let hops: Vec<u32> = run.hops.iter().map(|h| h.hop).collect();
    assert_eq!(hops, vec![2, 1, 1]);
}

#[test]
fn test_unreachable_output_is_malformed() {
    let result = parse_run(include_str!("fixtures/unreachable.txt"));
    assert!(matches!(result, Err(ParseError::MalformedRunInput { .. })));
}

#[test]
fn test_empty_input_is_malformed() {
    assert!(matches!(
        parse_run(""),
        Err(ParseError::MalformedRunInput { lines: 0 })
    ));
}

#[test]
fn test_noise_lines_contribute_nothing() {
    let raw = "traceroute to x (1.2.3.4), 30 hops max\n\
               Warning: multiple interfaces found\n\
               1 short\n\
               hop 1 a 1.0 ms\n\
               3  c (10.0.0.3)  3.0 ms  3.1 ms  3.2 ms\n";
    let run = parse_run(raw).unwrap();

    assert_eq!(run.len(), 1);
    assert_eq!(run.hops[0].hop, 3);
}

#[test]
fn test_latency_without_unit_is_not_a_measurement() {
    let record = parse_hop_line("6 host 12.5 13.0 ms 14.0 ms").unwrap();
    assert_eq!(record.hosts, vec!["host", "12.5"]);
    assert_eq!(record.latencies, [Some(13.0), Some(14.0), None]);
}

#[test]
fn test_latency_token_predicate() {
    assert!(is_latency_token("0.998"));
    assert!(!is_latency_token("*"));
    assert!(!is_latency_token("ms"));
}

#[test]
fn test_oversized_hop_number_does_not_abort_run() {
    let raw = "traceroute to x (1.2.3.4), 30 hops max\n\
               4294967296  far (10.9.9.9)  9.0 ms  9.0 ms  9.0 ms\n\
               1  gw (10.0.0.1)  1.0 ms  1.0 ms  1.0 ms\n";
    let run = parse_run(raw).unwrap();

    let hops: Vec<u32> = run.hops.iter().map(|h| h.hop).collect();
    assert_eq!(hops, vec![1]);
}
