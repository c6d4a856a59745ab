//! Command-Line Interface

use super::config::Config;
use crate::decode::InvalidFieldPolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// traj-ingest - Convert .plt trajectory logs into newline-delimited JSON
#[derive(Parser, Debug)]
#[command(name = "traj-ingest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (converts when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Root directory of the unzipped dataset [default: .]
    #[arg(short, long = "in", value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Output file [default: geolife_simple.json]
    #[arg(short, long = "out", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Extension of trajectory files [default: plt]
    #[arg(long = "ext")]
    pub extension: Option<String>,

    /// Metadata lines skipped at the top of each file [default: 6]
    #[arg(long)]
    pub header_lines: Option<usize>,

    /// How to treat non-numeric coordinate fields
    #[arg(long, value_enum)]
    pub on_invalid_field: Option<InvalidFieldPolicy>,

    /// Visit files in name order for reproducible output
    #[arg(long)]
    pub sorted: bool,

    /// Exit with status 2 if any file could not be converted
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// View or create configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Write a default config file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Apply flags on top of values loaded from the config file
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.input.root = input.clone();
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(extension) = &self.extension {
            config.input.extension = extension.clone();
        }
        if let Some(header_lines) = self.header_lines {
            config.input.header_lines = header_lines;
        }
        if let Some(policy) = self.on_invalid_field {
            config.decode.on_invalid_field = policy;
        }
        if self.sorted {
            config.input.sorted = true;
        }
        if self.strict {
            config.output.strict = true;
        }
    }
}
