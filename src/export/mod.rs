//! ABI export - inspect, format and write one JSON file per artifact

mod error;
pub mod format;
pub mod inspect;

pub use error::{ExportError, ExportFailure};
pub use format::format_json;
pub use inspect::{ForgeInspector, Inspector};

use crate::config::ToolConfig;
use crate::core::scanner::notify;
use crate::core::{ArtifactRef, ExportEvent};
use anyhow::Result;
use crossbeam_channel::Sender;
use rayon::prelude::*;
use std::path::Path;
use tracing::{error, info};

/// Results of one export batch, in artifact order
#[derive(Debug, Default)]
pub struct ExportBatch {
    /// Names of artifacts whose ABI file was written
    pub exported: Vec<String>,
    pub failures: Vec<ExportFailure>,
}

pub struct Exporter<'a, I: Inspector> {
    inspector: &'a I,
    tool: &'a ToolConfig,
    out_dir: &'a Path,
}

impl<'a, I: Inspector> Exporter<'a, I> {
    pub fn new(inspector: &'a I, tool: &'a ToolConfig, out_dir: &'a Path) -> Self {
        Self {
            inspector,
            tool,
            out_dir,
        }
    }

    /// Inspect, format and write a single artifact's ABI.
    pub fn export_one(&self, artifact: &ArtifactRef) -> Result<(), ExportError> {
        let raw = self.inspector.inspect_abi(self.tool, &artifact.qualified_id)?;
        let formatted = format_json(&raw)?;
        let path = self.out_dir.join(artifact.output_file_name());
        std::fs::write(&path, formatted).map_err(|source| ExportError::Write { path, source })
    }

    /// Export every artifact concurrently.
    ///
    /// With `jobs` set, work runs on a dedicated pool of that many threads;
    /// otherwise on the global rayon pool. A failing artifact never stops the
    /// others. The only error returned is failure to build the pool.
    pub fn export_all(
        &self,
        artifacts: &[ArtifactRef],
        jobs: Option<usize>,
        tx: &Option<Sender<ExportEvent>>,
    ) -> Result<ExportBatch> {
        let run = || {
            artifacts
                .par_iter()
                .map(|artifact| self.export_reporting(artifact, tx))
                .collect::<Vec<_>>()
        };

        let results = match jobs {
            Some(n) => rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()?
                .install(run),
            None => run(),
        };

        let mut batch = ExportBatch::default();
        for result in results {
            match result {
                Ok(name) => batch.exported.push(name),
                Err(failure) => batch.failures.push(failure),
            }
        }
        Ok(batch)
    }

    fn export_reporting(
        &self,
        artifact: &ArtifactRef,
        tx: &Option<Sender<ExportEvent>>,
    ) -> Result<String, ExportFailure> {
        match self.export_one(artifact) {
            Ok(()) => {
                info!("Generated ABI for {}", artifact.name);
                notify(tx, ExportEvent::Exported(artifact.name.clone()));
                Ok(artifact.name.clone())
            }
            Err(e) => {
                error!(artifact = %artifact.qualified_id, error = %e, "Failed to generate ABI");
                notify(
                    tx,
                    ExportEvent::Failed {
                        artifact: artifact.qualified_id.clone(),
                        error: e.to_string(),
                    },
                );
                Err(ExportFailure {
                    artifact: artifact.clone(),
                    error: e,
                })
            }
        }
    }
}
