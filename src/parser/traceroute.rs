//! Line parser for textual traceroute output.
//!
//! Each run is a banner line followed by one line per hop:
//!
//! ```text
//! traceroute to example.com (93.184.216.34), 30 hops max, 60 byte packets
//!  1  router.local (10.0.0.1)  1.104 ms  1.312 ms  1.250 ms
//!  2  * * *
//! ```
//!
//! Anything that does not look like a hop line is ignored.

use super::schema::{HopRecord, RunResult};
use crate::utils::config::{
    BANNER_TOKEN, MIN_HOP_LINE_TOKENS, PROBES_PER_HOP, TIMEOUT_MARKER, UNIT_MARKER,
};
use crate::utils::error::ParseError;
use log::debug;

/// Parse the raw text of one probe run
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `raw` - Complete stdout of one traceroute invocation (or trace file)
///
/// # Returns
/// Hop records in the order their lines appear. Hop order is not
/// re-validated; duplicates and gaps are passed through as-is.
///
/// # Errors
/// * `ParseError::MalformedRunInput` - No hop line was recognised at all
pub fn parse_run(raw: &str) -> Result<RunResult, ParseError> {
    let mut hops = Vec::new();
    let mut inspected = 0;

    for line in raw.lines() {
        if line.trim().is_empty() || line.starts_with(BANNER_TOKEN) {
            continue;
        }
        inspected += 1;

        match parse_hop_line(line) {
            Some(record) => hops.push(record),
            None => debug!("Ignoring non-hop line: {:?}", line),
        }
    }

    if hops.is_empty() {
        return Err(ParseError::MalformedRunInput { lines: inspected });
    }

    debug!("Parsed {} hop lines from {} candidate lines", hops.len(), inspected);
    Ok(RunResult::new(hops))
}

/// Parse a single line, returning `None` if it is not a hop line
///
/// **Public** - exposed for line-level testing
///
/// A hop line has at least 4 whitespace-separated tokens and starts with
/// a token made only of decimal digits. A hop number too large for `u32`
/// excludes the line.
pub fn parse_hop_line(line: &str) -> Option<HopRecord> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if tokens.len() < MIN_HOP_LINE_TOKENS || !is_hop_number(tokens[0]) {
        return None;
    }

    let hop: u32 = match tokens[0].parse() {
        Ok(hop) => hop,
        Err(_) => {
            debug!("Hop number out of range: {}", tokens[0]);
            return None;
        }
    };

    let mut hosts = Vec::new();
    let mut values = Vec::with_capacity(PROBES_PER_HOP);

    // The final token is never inspected: on a hop line it is the unit
    // marker of the last measurement.
    for pair in tokens[1..].windows(2) {
        let (token, next) = (pair[0], pair[1]);

        if next == UNIT_MARKER {
            if let Some(value) = parse_latency_value(token) {
                values.push(value);
                continue;
            }
        }

        if token == TIMEOUT_MARKER {
            continue;
        }

        if !token.contains(UNIT_MARKER) {
            hosts.push(token.to_string());
        }
    }

    if values.len() > PROBES_PER_HOP {
        debug!(
            "Hop {} reported {} latencies, keeping the first {}",
            hop,
            values.len(),
            PROBES_PER_HOP
        );
    }

    let mut latencies = [None; PROBES_PER_HOP];
    for (slot, value) in latencies.iter_mut().zip(values) {
        *slot = Some(value);
    }

    Some(HopRecord::new(hop, hosts, latencies))
}

/// Check whether a token is a latency value (ignoring the unit that follows)
///
/// **Public** - used by tests and diagnostics
///
/// The token must be non-empty and consist of ASCII digits once every
/// decimal point is removed.
pub fn is_latency_token(token: &str) -> bool {
    let mut digits = token.chars().filter(|c| *c != '.').peekable();
    digits.peek().is_some() && digits.all(|c| c.is_ascii_digit())
}

/// Convert a latency token to a number
///
/// **Private** - tokens such as `1.2.3` look numeric but are not floats
fn parse_latency_value(token: &str) -> Option<f64> {
    if !is_latency_token(token) {
        return None;
    }
    token.parse::<f64>().ok()
}

fn is_hop_number(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}
