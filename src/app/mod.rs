//! Application Layer
//!
//! User-facing CLI, configuration management and the conversion run.

pub mod cli;
pub mod config;
pub mod convert;

pub use cli::Cli;
pub use config::Config;
pub use convert::{run_conversion, ConversionSummary};
