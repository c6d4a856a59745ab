//! Conversion Run
//!
//! Wires the walker to the JSON lines writer for one configured run.

use super::config::Config;
use crate::output::{JsonLinesWriter, SinkStats};
use crate::walk::{TrajectoryWalker, WalkReport};
use std::path::PathBuf;
use tracing::info;

/// Result of a completed conversion
#[derive(Debug)]
pub struct ConversionSummary {
    pub output: PathBuf,
    pub report: WalkReport,
    pub sink: SinkStats,
}

impl ConversionSummary {
    /// Whether the run should end with a failing exit status
    pub fn should_fail(&self, strict: bool) -> bool {
        strict && !self.report.is_clean()
    }
}

/// Convert every trajectory file under `config.input.root` into one JSON
/// line in `config.output.path`.
///
/// Failing to create the output file is the only fatal error; it happens
/// before any file is read.
pub fn run_conversion(config: &Config) -> crate::Result<ConversionSummary> {
    config.validate()?;

    let mut writer = JsonLinesWriter::create(&config.output.path)?;
    info!(output = %config.output.path.display(), "Writing trajectories");

    let walker = TrajectoryWalker::new(config.walk_options());
    let report = walker.walk(&config.input.root, |path, trajectory| {
        writer.write_or_drop(&trajectory, path);
    });

    let sink = writer.finish()?;

    Ok(ConversionSummary {
        output: config.output.path.clone(),
        report,
        sink,
    })
}
