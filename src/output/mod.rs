//! Output sinks
//!
//! Newline-delimited JSON, one record per trajectory.

pub mod jsonl;

pub use jsonl::{JsonLinesWriter, SinkStats, DEFAULT_OUTPUT_FILE};
