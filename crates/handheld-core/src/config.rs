//! Configuration types for running and repairing boot code.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Interpreter options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Record every executed step in the returned execution
    pub record_trace: bool,
}

/// Repair search options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairConfig {
    /// Collect every single-toggle repair instead of stopping at the first
    pub exhaustive: bool,
}

/// How the command-line report is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Command-line configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Boot code file to load
    pub input_path: String,
    /// Report format
    pub output: OutputFormat,
    /// Fallback tracing filter when RUST_LOG is unset
    pub log_filter: String,
    pub execution: ExecutionConfig,
    pub repair: RepairConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            input_path: "data.txt".to_string(),
            output: OutputFormat::Text,
            log_filter: "warn,handheld=info,handheld_vm=info".to_string(),
            execution: ExecutionConfig::default(),
            repair: RepairConfig::default(),
        }
    }
}

impl CliConfig {
    /// Parse a JSON config; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&contents)
    }
}
