//! # traj-ingest
//!
//! Converts a directory tree of GeoLife-style `.plt` trajectory logs into a
//! stream of trajectory records, one per file.
//!
//! ## Overview
//!
//! Every log file starts with six metadata lines, followed by comma-separated
//! rows. Columns 0, 1 and 3 of each row hold latitude, longitude and
//! altitude; column 2 is unused. Each file becomes one [`Trajectory`] whose
//! id is the file name without its extension.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use traj_ingest::output::JsonLinesWriter;
//! use traj_ingest::walk::{TrajectoryWalker, WalkOptions};
//!
//! let mut writer = JsonLinesWriter::create(Path::new("geolife_simple.json"))?;
//! let walker = TrajectoryWalker::new(WalkOptions::default());
//! let report = walker.walk(Path::new("Data"), |path, trajectory| {
//!     writer.write_or_drop(&trajectory, path);
//! });
//! writer.finish()?;
//! assert!(report.is_clean());
//! # Ok::<(), traj_ingest::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`trajectory`]: `Point` and `Trajectory` records
//! - [`decode`]: fixed-column row decoder
//! - [`walk`]: directory walker, per-file trajectory builder, run report
//! - [`output`]: newline-delimited JSON sink
//! - [`app`]: CLI and configuration management
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │  WalkDir    │───▶│ Trajectory  │───▶│ RowDecoder  │───▶│  consumer   │
//! │  (filter)   │    │  Builder    │    │ (per file)  │    │ (JSON line) │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//! ```

pub mod trajectory;
pub mod decode;
pub mod walk;
pub mod output;
pub mod app;

// Re-export commonly used types
pub use decode::{DecodeOptions, InvalidFieldPolicy, RowDecoder};
pub use trajectory::{Point, Trajectory};
pub use walk::{TrajectoryWalker, WalkOptions, WalkReport};

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
