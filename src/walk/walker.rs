//! Directory Walker
//!
//! Recursively enumerates a root directory, keeps the files named
//! `<stem>.<extension>` and turns each one into a trajectory.
//!
//! ```no_run
//! use std::path::Path;
//! use traj_ingest::walk::{TrajectoryWalker, WalkOptions};
//!
//! let walker = TrajectoryWalker::new(WalkOptions::default());
//! let report = walker.walk(Path::new("Geolife Trajectories 1.3/Data"), |path, trajectory| {
//!     println!("{} -> {} points", path.display(), trajectory.len());
//! });
//! println!("{} failures", report.failure_count());
//! ```

use super::builder::TrajectoryBuilder;
use super::report::{WalkFailure, WalkReport};
use crate::decode::{DecodeOptions, DEFAULT_HEADER_LINES};
use crate::trajectory::Trajectory;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Extension carried by trajectory log files
pub const DEFAULT_EXTENSION: &str = "plt";

/// Traversal settings
#[derive(Debug, Clone, PartialEq)]
pub struct WalkOptions {
    /// Required file extension, without the dot (case-sensitive)
    pub extension: String,
    /// Metadata lines skipped at the top of every file
    pub header_lines: usize,
    pub decode: DecodeOptions,
    /// Descend into symlinked directories
    pub follow_links: bool,
    /// Visit siblings in file name order instead of filesystem order
    pub sort_entries: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            header_lines: DEFAULT_HEADER_LINES,
            decode: DecodeOptions::default(),
            follow_links: false,
            sort_entries: false,
        }
    }
}

/// Return the stem of `file_name` if it is exactly `<stem>.<extension>`.
///
/// Names without a dot or with more than one dot never match.
pub fn file_stem_for<'a>(file_name: &'a str, extension: &str) -> Option<&'a str> {
    let mut parts = file_name.split('.');
    let stem = parts.next()?;
    let ext = parts.next()?;
    if parts.next().is_some() || ext != extension {
        return None;
    }
    Some(stem)
}

/// Walks a directory tree and emits one trajectory per matching file
pub struct TrajectoryWalker {
    options: WalkOptions,
    builder: TrajectoryBuilder,
}

impl TrajectoryWalker {
    pub fn new(options: WalkOptions) -> Self {
        let builder = TrajectoryBuilder::new(options.header_lines, options.decode);
        Self { options, builder }
    }

    /// Visit every file under `root` and call `emit` once per decoded file.
    ///
    /// Files are processed one at a time, in traversal order. Unreadable
    /// files and directories never stop the walk; they end up in the
    /// returned report.
    pub fn walk<F>(&self, root: &Path, mut emit: F) -> WalkReport
    where
        F: FnMut(&Path, Trajectory),
    {
        info!(
            root = %root.display(),
            extension = %self.options.extension,
            "Walking trajectory files"
        );

        let mut walk_dir = WalkDir::new(root).follow_links(self.options.follow_links);
        if self.options.sort_entries {
            walk_dir = walk_dir.sort_by_file_name();
        }

        let mut report = WalkReport::default();

        for entry in walk_dir {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Traversal error: {}", err);
                    report.record_failure(WalkFailure::Traversal(err));
                    continue;
                }
            };

            // Symlinks are opened through; a dangling one surfaces as an open failure.
            let file_type = entry.file_type();
            if !(file_type.is_file() || (file_type.is_symlink() && !entry.path().is_dir())) {
                continue;
            }

            let Some(file_name) = entry.file_name().to_str() else {
                debug!(path = %entry.path().display(), "Skipping non UTF-8 file name");
                continue;
            };
            let Some(stem) = file_stem_for(file_name, &self.options.extension) else {
                continue;
            };

            report.files_matched += 1;
            let path = entry.path();

            match self.builder.build_file(path, stem) {
                Ok(outcome) => {
                    debug!(
                        path = %path.display(),
                        points = outcome.trajectory.len(),
                        skipped_rows = outcome.skipped_rows,
                        "Decoded trajectory"
                    );
                    if outcome.skipped_rows > 0 {
                        warn!(
                            "Skipped {} of {} rows in {}",
                            outcome.skipped_rows,
                            outcome.rows_read,
                            path.display()
                        );
                    }
                    report.record_emitted(&outcome);
                    emit(path, outcome.trajectory);
                }
                Err(error) => {
                    warn!("Could not decode {}: {}", path.display(), error);
                    report.record_failure(WalkFailure::File {
                        path: path.to_path_buf(),
                        error,
                    });
                }
            }
        }

        info!(
            files = report.files_matched,
            trajectories = report.trajectories_emitted,
            points = report.points_emitted,
            skipped_rows = report.rows_skipped,
            failures = report.failure_count(),
            "Walk complete"
        );

        report
    }
}
