//! ABI introspection through an external tool

use crate::config::ToolConfig;
use crate::export::ExportError;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

/// Source of raw ABI text for a qualified artifact id
pub trait Inspector: Sync {
    fn inspect_abi(&self, tool: &ToolConfig, qualified_id: &str) -> Result<String, ExportError>;
}

/// Runs `<program> inspect <id> abi --json` from the project root
#[derive(Debug, Clone)]
pub struct ForgeInspector {
    root: PathBuf,
}

impl ForgeInspector {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Inspector for ForgeInspector {
    fn inspect_abi(&self, tool: &ToolConfig, qualified_id: &str) -> Result<String, ExportError> {
        let args = ["inspect", qualified_id, "abi", "--json"];
        let command_line = format!("{} {}", tool.program, args.join(" "));
        if tool.verbose {
            info!("$ {}", command_line);
        } else {
            debug!("$ {}", command_line);
        }

        let output = Command::new(&tool.program)
            .args(args)
            .current_dir(&self.root)
            .envs(&tool.env)
            .output()
            .map_err(|source| ExportError::Spawn {
                program: tool.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ExportError::ToolFailed {
                command: command_line,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        if tool.verbose {
            info!("{}", stdout.trim_end());
        }
        Ok(stdout)
    }
}
