//! Row decoding
//!
//! Turns the comma-separated data rows of a trajectory log into fixed-arity
//! numeric tuples.

pub mod row_decoder;

pub use row_decoder::{
    skip_header, DecodeError, DecodeOptions, InvalidFieldPolicy, RowDecoder, RowError,
    DEFAULT_HEADER_LINES,
};
