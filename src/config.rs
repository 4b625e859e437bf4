use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::DiagnosticCode;

pub const CONFIG_FILE_NAME: &str = ".docdrift.toml";

/// On-disk configuration. Everything here is a host-side concern: which
/// files to visit and which codes to silence. The checks themselves have
/// no tunables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocdriftConfig {
    #[serde(default)]
    pub ignore: IgnoreConfig,
    #[serde(default)]
    pub checks: ChecksConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IgnoreConfig {
    /// Glob patterns excluded from the walk, e.g. `**/venv/**`.
    #[serde(default)]
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecksConfig {
    /// Diagnostic codes dropped from every report, e.g. `DOC008`.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl DocdriftConfig {
    /// Load the config governing a checked root: `<root>/.docdrift.toml`
    /// when present, defaults otherwise. When the root is a single file,
    /// its directory is consulted instead.
    pub fn load(root: &Path) -> Result<Self> {
        let dir = if root.is_file() {
            root.parent().unwrap_or_else(|| Path::new("."))
        } else {
            root
        };
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Resolve the disabled-code strings, warning about any that name no
    /// known code rather than failing the run.
    pub fn disabled_codes(&self) -> Vec<DiagnosticCode> {
        parse_codes(&self.checks.disabled)
    }
}

/// Shared by the config file and the `--disable` flag.
pub fn parse_codes(raw: &[String]) -> Vec<DiagnosticCode> {
    let mut codes = Vec::new();
    for s in raw {
        match DiagnosticCode::parse(s) {
            Some(code) => codes.push(code),
            None => log::warn!("ignoring unknown diagnostic code '{s}'"),
        }
    }
    codes
}
