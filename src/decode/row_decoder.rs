//! Fixed-Column Row Decoder
//!
//! Reads the data section of a `.plt` log (everything after the header) and
//! exposes each row as a `(lat, lng, alt)` tuple taken from columns 0, 1 and 3.
//!
//! ```text
//! 39.984702,116.318417,0,492,39744.1201851852,2008-10-23,02:53:04
//! ^ lat     ^ lng      ^ ^ alt
//!                      unused
//! ```
//!
//! The decoder is built for one file and dropped with it. Usage follows a
//! pull loop:
//!
//! ```
//! use std::io::Cursor;
//! use traj_ingest::decode::{DecodeOptions, RowDecoder};
//!
//! let data = "h1\nh2\nh3\nh4\nh5\nh6\n39.9,116.3,0,50\n";
//! let mut decoder = RowDecoder::new(Cursor::new(data), 6, DecodeOptions::default()).unwrap();
//! while decoder.has_next() {
//!     let (lat, lng, alt) = decoder.read_current().unwrap();
//!     assert_eq!((lat, lng, alt), (39.9, 116.3, 50.0));
//! }
//! assert!(decoder.finish().is_ok());
//! ```

use csv::ByteRecord;
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

/// Number of metadata lines at the top of every log file
pub const DEFAULT_HEADER_LINES: usize = 6;

/// Minimum number of columns a data row must carry
pub const MIN_FIELDS: usize = 4;

const LAT_COLUMN: usize = 0;
const LNG_COLUMN: usize = 1;
const ALT_COLUMN: usize = 3;

/// What to do with a coordinate field that is not a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidFieldPolicy {
    /// Use the configured substitute value and keep the row
    #[default]
    Substitute,
    /// Drop the row, continue with the file
    SkipRow,
    /// Abandon the whole file
    FailFile,
}

/// Decoder settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodeOptions {
    pub on_invalid_field: InvalidFieldPolicy,
    /// Value used for unparseable fields under [`InvalidFieldPolicy::Substitute`]
    pub substitute_value: f64,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            on_invalid_field: InvalidFieldPolicy::Substitute,
            substitute_value: 0.0,
        }
    }
}

/// Reasons a single buffered row cannot be turned into a point
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("row has {fields} fields, expected at least {}", MIN_FIELDS)]
    ShortRow { fields: usize },

    #[error("column {column} is not a number: {value:?}")]
    InvalidField { column: usize, value: String },

    #[error("no row buffered; has_next() must return true first")]
    NoCurrentRow,
}

/// Stream-level failure that ended row iteration early
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read header: {0}")]
    Header(#[from] io::Error),

    #[error("failed to read row: {0}")]
    Read(#[from] csv::Error),
}

/// Consume up to `lines` newline-terminated lines from `reader`.
///
/// Returns how many lines were actually skipped; a file shorter than the
/// header simply ends early.
pub fn skip_header<R: BufRead>(reader: &mut R, lines: usize) -> io::Result<usize> {
    let mut buf = Vec::new();
    for skipped in 0..lines {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(skipped);
        }
    }
    Ok(lines)
}

/// Pull-style decoder over the data rows of one file
pub struct RowDecoder<R> {
    reader: csv::Reader<R>,
    current: ByteRecord,
    has_current: bool,
    header_lines: usize,
    rows_read: u64,
    options: DecodeOptions,
    stream_error: Option<csv::Error>,
}

impl<R: BufRead> RowDecoder<R> {
    /// Skip `header_lines` lines of `reader` and bind a decoder to the rest.
    pub fn new(
        mut reader: R,
        header_lines: usize,
        options: DecodeOptions,
    ) -> Result<Self, DecodeError> {
        let skipped = skip_header(&mut reader, header_lines)?;
        Ok(Self::from_data(reader, skipped, options))
    }
}

impl<R: io::Read> RowDecoder<R> {
    /// Bind a decoder to a reader already positioned at the first data row.
    ///
    /// `header_lines` is only used to report source line numbers. Rows are
    /// split on every comma; quotes carry no meaning and fields are raw bytes.
    pub fn from_data(reader: R, header_lines: usize, options: DecodeOptions) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .delimiter(b',')
            .from_reader(reader);

        Self {
            reader,
            current: ByteRecord::new(),
            has_current: false,
            header_lines,
            rows_read: 0,
            options,
            stream_error: None,
        }
    }

    /// Fetch the next row.
    ///
    /// Returns false at end of input and on a read error. A read error is
    /// kept and reported by [`RowDecoder::finish`].
    pub fn has_next(&mut self) -> bool {
        if self.stream_error.is_some() {
            return false;
        }

        match self.reader.read_byte_record(&mut self.current) {
            Ok(true) => {
                self.has_current = true;
                self.rows_read += 1;
                true
            }
            Ok(false) => {
                self.has_current = false;
                false
            }
            Err(err) => {
                self.has_current = false;
                self.stream_error = Some(err);
                false
            }
        }
    }

    /// Decode columns 0, 1 and 3 of the buffered row. Column 2 is never read.
    pub fn read_current(&self) -> Result<(f64, f64, f64), RowError> {
        if !self.has_current {
            return Err(RowError::NoCurrentRow);
        }
        if self.current.len() < MIN_FIELDS {
            return Err(RowError::ShortRow {
                fields: self.current.len(),
            });
        }

        let lat = self.parse_field(LAT_COLUMN)?;
        let lng = self.parse_field(LNG_COLUMN)?;
        let alt = self.parse_field(ALT_COLUMN)?;
        Ok((lat, lng, alt))
    }

    fn parse_field(&self, column: usize) -> Result<f64, RowError> {
        let raw = &self.current[column];
        let parsed = std::str::from_utf8(raw)
            .ok()
            .and_then(|text| text.trim().parse::<f64>().ok());
        match parsed {
            Some(value) => Ok(value),
            None if self.options.on_invalid_field == InvalidFieldPolicy::Substitute => {
                debug!(
                    line = ?self.current_line(),
                    column,
                    value = %String::from_utf8_lossy(raw),
                    "Substituting unparseable field"
                );
                Ok(self.options.substitute_value)
            }
            None => Err(RowError::InvalidField {
                column,
                value: String::from_utf8_lossy(raw).into_owned(),
            }),
        }
    }

    /// 1-based line number of the buffered row in the original file
    pub fn current_line(&self) -> Option<u64> {
        if !self.has_current {
            return None;
        }
        self.current
            .position()
            .map(|pos| pos.line() + self.header_lines as u64)
    }

    /// Drop the decoder, reporting whether iteration reached a clean end.
    pub fn finish(self) -> Result<u64, DecodeError> {
        match self.stream_error {
            Some(err) => Err(DecodeError::Read(err)),
            None => Ok(self.rows_read),
        }
    }
}
