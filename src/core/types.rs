//! Core types shared across abi-export modules

use serde::Serialize;
use std::fmt;

/// One exportable contract or interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ArtifactRef {
    /// Path relative to the project root, `/`-separated (e.g. `src/Foo/Bar.sol`)
    pub source_path: String,
    /// File stem of the source; names the output file
    pub name: String,
    /// `source_path:name`, the key handed to the introspection tool
    pub qualified_id: String,
}

impl ArtifactRef {
    pub fn new(source_path: String, name: String) -> Self {
        let qualified_id = format!("{}:{}", source_path, name);
        Self {
            source_path,
            name,
            qualified_id,
        }
    }

    /// Output file name, `{name}.json`
    pub fn output_file_name(&self) -> String {
        format!("{}.json", self.name)
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_id)
    }
}

/// Events emitted during a generate run
#[derive(Debug, Clone)]
pub enum ExportEvent {
    /// Scanning has started
    StartScanning,
    /// Artifacts discovered by the scan
    ArtifactsFound(Vec<ArtifactRef>),
    /// An orphaned output file was deleted
    Pruned(String),
    /// An artifact's ABI was written
    Exported(String),
    /// An artifact failed to export
    Failed { artifact: String, error: String },
    /// Run complete with summary line
    Complete(String),
    /// Fatal error
    Error(String),
}
