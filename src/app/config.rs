//! Configuration Management

use crate::decode::{DecodeOptions, InvalidFieldPolicy, DEFAULT_HEADER_LINES};
use crate::output::DEFAULT_OUTPUT_FILE;
use crate::walk::{WalkOptions, DEFAULT_EXTENSION};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Source tree settings
    #[serde(default)]
    pub input: InputConfig,
    /// Row decoding settings
    #[serde(default)]
    pub decode: DecodeConfig,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Root directory of the unzipped dataset
    pub root: PathBuf,
    /// Extension of trajectory log files
    pub extension: String,
    /// Metadata lines at the top of each file
    pub header_lines: usize,
    /// Follow symlinked directories
    pub follow_links: bool,
    /// Visit files in name order
    pub sorted: bool,
}

/// Decoder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Handling of non-numeric coordinate fields
    pub on_invalid_field: InvalidFieldPolicy,
    /// Value substituted for non-numeric fields
    pub substitute_value: f64,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination file
    pub path: PathBuf,
    /// Exit non-zero when any file failed
    pub strict: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extension: DEFAULT_EXTENSION.to_string(),
            header_lines: DEFAULT_HEADER_LINES,
            follow_links: false,
            sorted: false,
        }
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            on_invalid_field: InvalidFieldPolicy::Substitute,
            substitute_value: 0.0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            strict: false,
        }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        let ext = &self.input.extension;
        if ext.is_empty() || ext.contains('.') {
            return Err(crate::Error::Config(format!(
                "extension must be non-empty and contain no '.', got {:?}", ext
            )));
        }
        if !self.decode.substitute_value.is_finite() {
            return Err(crate::Error::Config(format!(
                "substitute_value must be finite, got {}", self.decode.substitute_value
            )));
        }
        if self.output.path.as_os_str().is_empty() {
            return Err(crate::Error::Config("output path must not be empty".to_string()));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &Path) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<(), crate::Error> {
        let content = self.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("traj-ingest").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("traj-ingest.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Traversal options derived from the `[input]` and `[decode]` sections
    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            extension: self.input.extension.clone(),
            header_lines: self.input.header_lines,
            decode: DecodeOptions {
                on_invalid_field: self.decode.on_invalid_field,
                substitute_value: self.decode.substitute_value,
            },
            follow_links: self.input.follow_links,
            sort_entries: self.input.sorted,
        }
    }
}
