//! Directory traversal and trajectory assembly
//!
//! - [`walker`]: recursive enumeration and file name filtering
//! - [`builder`]: one file in, one [`Trajectory`](crate::Trajectory) out
//! - [`report`]: failures and counters collected over a run

pub mod builder;
pub mod report;
pub mod walker;

pub use builder::{FileError, FileOutcome, TrajectoryBuilder};
pub use report::{WalkFailure, WalkReport};
pub use walker::{file_stem_for, TrajectoryWalker, WalkOptions, DEFAULT_EXTENSION};
