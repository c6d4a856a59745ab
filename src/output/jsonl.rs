//! JSON Lines Writer
//!
//! Buffered writer that appends one compact JSON document per line. A record
//! that fails to serialize or write is dropped and counted; the stream keeps
//! going.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::warn;

/// Output file name used when none is configured
pub const DEFAULT_OUTPUT_FILE: &str = "geolife_simple.json";

/// Counters reported when the writer is finished
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkStats {
    pub written: u64,
    pub dropped: u64,
}

/// Newline-delimited JSON writer
pub struct JsonLinesWriter<W: Write> {
    writer: BufWriter<W>,
    line: Vec<u8>,
    stats: SinkStats,
}

impl JsonLinesWriter<File> {
    /// Create (or truncate) the output file.
    pub fn create(path: &Path) -> crate::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: BufWriter::new(inner),
            line: Vec::with_capacity(4096),
            stats: SinkStats::default(),
        }
    }

    /// Serialize `record` and append it as one line.
    ///
    /// The record is fully serialized before anything is written, so a
    /// serialization error never leaves a partial line behind.
    pub fn write_record<T: Serialize>(&mut self, record: &T) -> crate::Result<()> {
        self.line.clear();
        serde_json::to_writer(&mut self.line, record)?;
        self.line.push(b'\n');
        self.writer.write_all(&self.line)?;
        self.stats.written += 1;
        Ok(())
    }

    /// Like [`write_record`](Self::write_record), but a failure only drops
    /// the record. Returns whether it was written.
    pub fn write_or_drop<T: Serialize>(&mut self, record: &T, source: &Path) -> bool {
        match self.write_record(record) {
            Ok(()) => true,
            Err(err) => {
                self.stats.dropped += 1;
                warn!("Dropped record from {}: {}", source.display(), err);
                false
            }
        }
    }

    pub fn stats(&self) -> SinkStats {
        self.stats
    }

    /// Flush buffered lines and return the final counters.
    pub fn finish(mut self) -> crate::Result<SinkStats> {
        self.writer.flush()?;
        Ok(self.stats)
    }
}
