//! Configuration file support for cfgxml-extract.
//!
//! Loads extractor settings from a TOML file. Every key is optional; a
//! missing file yields the defaults, which reproduce the fixed-path run.

use crate::error::{ExtractError, ExtractResult};
use crate::tables;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Input document settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path of the switch configuration document
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
}

/// Section locations inside the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConfig {
    /// Dotted path of the Ports section
    #[serde(default = "default_ports_path")]
    pub ports_path: String,

    /// Dotted path of the default VLAN section
    #[serde(default = "default_vlans_path")]
    pub vlans_path: String,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Output settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print a JSON summary after the report blocks
    #[serde(default)]
    pub json_summary: bool,
}

/// Complete extractor configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,

    /// Section configuration
    #[serde(default)]
    pub sections: SectionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_input_path() -> PathBuf {
    PathBuf::from(tables::DEFAULT_INPUT_PATH)
}

fn default_ports_path() -> String {
    tables::PORTS_SECTION.to_string()
}

fn default_vlans_path() -> String {
    tables::VLANS_SECTION.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
        }
    }
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            ports_path: default_ports_path(),
            vlans_path: default_vlans_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ExtractorConfig {
    /// Load configuration from file, falling back to defaults if file not found
    pub fn load_or_default(path: impl AsRef<Path>) -> ExtractResult<Self> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content).map_err(|e| {
                ExtractError::configuration(format!(
                    "Failed to parse config file {}: {}",
                    path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                eprintln!(
                    "cfgxml-extract: Config file {} not found, using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(ExtractError::configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Validate configuration
    pub fn validate(&self) -> ExtractResult<()> {
        if self.input.path.as_os_str().is_empty() {
            return Err(ExtractError::configuration("input.path must not be empty"));
        }

        validate_section_path("sections.ports_path", &self.sections.ports_path)?;
        validate_section_path("sections.vlans_path", &self.sections.vlans_path)?;

        if self.logging.level.trim().is_empty() {
            return Err(ExtractError::configuration("logging.level must not be empty"));
        }

        Ok(())
    }
}

fn validate_section_path(key: &str, path: &str) -> ExtractResult<()> {
    if path.is_empty() || path.split('.').any(str::is_empty) {
        return Err(ExtractError::configuration(format!(
            "{} must be a dotted path without empty segments, got '{}'",
            key, path
        )));
    }
    Ok(())
}
