//! Traceroute Stats
//!
//! Runs traceroute repeatedly toward a target (or reads pre-captured
//! outputs), parses each run into per-hop measurements and aggregates
//! the runs into per-hop latency statistics.
//!
//! This crate provides the core implementation for the `trstats` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! trstats capture -t example.com -n 5 -d 2 -o stats.json -g stats.svg
//! trstats capture --test traces/ -m 12 -o stats.json --summary
//! ```
//!
//! Library use goes through [`parser::parse_run`] and
//! [`aggregator::compute_statistics`].

pub mod aggregator;
pub mod collector;
pub mod commands;
pub mod output;
pub mod parser;
pub mod plot;
pub mod utils;
