use std::path::PathBuf;
use thiserror::Error;

use crate::core::ArtifactRef;

/// Why a single artifact failed to export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    ToolFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("tool output is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A failed export, kept for the final report
#[derive(Debug)]
pub struct ExportFailure {
    pub artifact: ArtifactRef,
    pub error: ExportError,
}

impl std::fmt::Display for ExportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.artifact.qualified_id, self.error)
    }
}
