use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Name of the optional project-level configuration file
pub const CONFIG_FILE: &str = "abi-export.toml";

/// Settings shared by every external tool invocation.
///
/// Built once per run and handed by reference to each call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Introspection program (normally `forge`)
    pub program: String,
    /// Echo each command line and its output at info level
    pub verbose: bool,
    /// Environment variables set on every spawned process
    pub env: BTreeMap<String, String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: "forge".to_string(),
            verbose: false,
            env: BTreeMap::new(),
        }
    }
}

/// Main configuration for abi-export
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Project root; source paths and tool invocations are relative to it
    pub root: PathBuf,
    /// Directory (under `root`) scanned for contract sources
    pub source_dir: PathBuf,
    /// Directory (under `root`) receiving one `{name}.json` per artifact
    pub out_dir: PathBuf,
    /// File extension marking contract sources
    pub extension: String,
    /// Identifiers (`path:Name` or bare paths) whose outputs are never pruned
    pub keep: Vec<String>,
    /// Worker threads for the export phase (defaults to CPU count)
    pub jobs: Option<usize>,
    /// Fail the run when any single export fails
    pub strict: bool,
    /// External tool settings
    pub tool: ToolConfig,
}

impl ExportConfig {
    /// Validates the configuration, ensuring the source directory exists.
    pub fn validate(&self) -> anyhow::Result<()> {
        let source = self.source_path();
        if !source.is_dir() {
            anyhow::bail!("Source directory does not exist: {:?}", source);
        }
        if self.extension.is_empty() {
            anyhow::bail!("Source extension must not be empty");
        }
        if self.jobs == Some(0) {
            anyhow::bail!("jobs must be at least 1");
        }
        Ok(())
    }

    /// Attempts to load configuration from `abi-export.toml` under `dir`.
    ///
    /// A missing file yields `Ok(None)`; a malformed one is an error.
    pub fn load_from_dir(dir: &Path) -> anyhow::Result<Option<Self>> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        let config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid {}: {}", path.display(), e))?;
        Ok(Some(config))
    }

    pub fn source_path(&self) -> PathBuf {
        self.root.join(&self.source_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.out_dir)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            source_dir: PathBuf::from("src"),
            out_dir: PathBuf::from("abis"),
            extension: "sol".to_string(),
            keep: Vec::new(),
            jobs: None,
            strict: false,
            tool: ToolConfig::default(),
        }
    }
}
