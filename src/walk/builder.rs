//! Trajectory Builder
//!
//! Opens one log file, skips its header and drains a [`RowDecoder`] into a
//! [`Trajectory`]. The decoder and the file handle live only for the
//! duration of [`TrajectoryBuilder::build_file`].

use crate::decode::{DecodeError, DecodeOptions, InvalidFieldPolicy, RowDecoder, RowError};
use crate::trajectory::{Point, Trajectory};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Why a single file produced no trajectory
#[derive(Debug, Error)]
pub enum FileError {
    #[error("could not open file: {0}")]
    Open(#[source] io::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("line {line}: {source}")]
    Row {
        /// 1-based line in the source file
        line: u64,
        #[source]
        source: RowError,
    },
}

/// A completed trajectory plus per-file row accounting
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub trajectory: Trajectory,
    /// Data rows fetched after the header
    pub rows_read: u64,
    /// Rows dropped because they were short or had rejected fields
    pub skipped_rows: u64,
}

/// Builds one trajectory per source file
#[derive(Debug, Clone)]
pub struct TrajectoryBuilder {
    header_lines: usize,
    decode: DecodeOptions,
}

impl TrajectoryBuilder {
    pub fn new(header_lines: usize, decode: DecodeOptions) -> Self {
        Self {
            header_lines,
            decode,
        }
    }

    /// Decode the file at `path` into a trajectory identified by `id`.
    pub fn build_file(&self, path: &Path, id: &str) -> Result<FileOutcome, FileError> {
        let file = File::open(path).map_err(FileError::Open)?;
        self.build_from_reader(BufReader::new(file), id)
    }

    /// Decode an already opened source, header included.
    pub fn build_from_reader<R: BufRead>(
        &self,
        reader: R,
        id: &str,
    ) -> Result<FileOutcome, FileError> {
        let mut decoder = RowDecoder::new(reader, self.header_lines, self.decode)?;
        let mut path = Vec::new();
        let mut skipped_rows = 0u64;

        while decoder.has_next() {
            match decoder.read_current() {
                Ok(values) => path.push(Point::from(values)),
                Err(err @ RowError::InvalidField { .. })
                    if self.decode.on_invalid_field == InvalidFieldPolicy::FailFile =>
                {
                    return Err(FileError::Row {
                        line: decoder.current_line().unwrap_or_default(),
                        source: err,
                    });
                }
                Err(err) => {
                    debug!(id, line = ?decoder.current_line(), error = %err, "Skipping row");
                    skipped_rows += 1;
                }
            }
        }

        let rows_read = decoder.finish()?;

        Ok(FileOutcome {
            trajectory: Trajectory::new(id, path),
            rows_read,
            skipped_rows,
        })
    }
}

impl Default for TrajectoryBuilder {
    fn default() -> Self {
        Self::new(crate::decode::DEFAULT_HEADER_LINES, DecodeOptions::default())
    }
}
