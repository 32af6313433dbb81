//! Group hop records from every run by hop number.
//!
//! The grouping is rebuilt for each aggregation call and only borrows
//! from the runs it was built from.

use crate::parser::{HopRecord, RunResult};
use log::debug;
use std::collections::BTreeMap;

/// Hop number -> every record reported for it, in run order
pub type HopGroups<'a> = BTreeMap<u32, Vec<&'a HopRecord>>;

/// Build the hop grouping for a set of runs
///
/// **Public** - used by the aggregator and by tests
///
/// Records keep the order in which runs were supplied, and within a run
/// the order of its lines, so the last entry of a group always comes from
/// the last run that reported that hop.
pub fn group_by_hop(runs: &[RunResult]) -> HopGroups<'_> {
    let mut groups: HopGroups<'_> = BTreeMap::new();

    for run in runs {
        for record in &run.hops {
            groups.entry(record.hop).or_default().push(record);
        }
    }

    debug!("Grouped {} runs into {} distinct hops", runs.len(), groups.len());
    groups
}
