//! Walk Report
//!
//! Everything that went wrong during a traversal, plus running totals.

use super::builder::{FileError, FileOutcome};
use std::path::PathBuf;
use thiserror::Error;

/// A file or directory the walker could not turn into a trajectory
#[derive(Debug, Error)]
pub enum WalkFailure {
    #[error("{}: {error}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        error: FileError,
    },

    #[error("traversal error: {0}")]
    Traversal(#[from] walkdir::Error),
}

impl WalkFailure {
    /// Path involved in the failure, when one is known
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::File { path, .. } => Some(path.as_path()),
            Self::Traversal(err) => err.path(),
        }
    }
}

/// Outcome of one call to [`TrajectoryWalker::walk`](super::TrajectoryWalker::walk)
#[derive(Debug, Default)]
pub struct WalkReport {
    /// Files whose name matched the extension filter
    pub files_matched: u64,
    /// Trajectories handed to the consumer
    pub trajectories_emitted: u64,
    /// Points across all emitted trajectories
    pub points_emitted: u64,
    /// Data rows dropped (short rows, rejected fields)
    pub rows_skipped: u64,
    /// Per-file and traversal failures, in the order they occurred
    pub failures: Vec<WalkFailure>,
}

impl WalkReport {
    pub fn record_emitted(&mut self, outcome: &FileOutcome) {
        self.trajectories_emitted += 1;
        self.points_emitted += outcome.trajectory.len() as u64;
        self.rows_skipped += outcome.skipped_rows;
    }

    pub fn record_failure(&mut self, failure: WalkFailure) {
        self.failures.push(failure);
    }

    /// True when every matched file produced a trajectory and the tree was
    /// fully readable
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}
