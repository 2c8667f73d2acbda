//! Contract scanner
//!
//! Walks the source tree, classifies each contract source and produces the
//! artifact list every later phase works from.

use crate::config::ExportConfig;
use crate::core::ExportEvent;
use crate::core::classify::classify;
use crate::core::derive::output_collisions;
use crate::core::types::ArtifactRef;
use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use std::path::{Component, Path};
use tracing::{debug, warn};

/// Notify helper for optional sender
pub(crate) fn notify(tx: &Option<Sender<ExportEvent>>, event: ExportEvent) {
    if let Some(tx) = tx {
        let _ = tx.send(event);
    }
}

/// Discover exportable artifacts according to configuration.
pub fn discover_artifacts(
    config: &ExportConfig,
    tx: &Option<Sender<ExportEvent>>,
) -> Result<Vec<ArtifactRef>> {
    notify(tx, ExportEvent::StartScanning);
    let artifacts = scan_contracts(&config.root, &config.source_path(), &config.extension)?;
    notify(tx, ExportEvent::ArtifactsFound(artifacts.clone()));
    Ok(artifacts)
}

/// Scan `source_dir` for contract sources, naming them relative to `root`.
///
/// At most one artifact per file, identified as `relative/path.sol:FileStem`.
/// Sources are decoded lossily, so stray non-UTF-8 bytes do not matter. Any
/// unreadable file or directory, or a source directory outside `root`, aborts
/// the whole scan.
pub fn scan_contracts(root: &Path, source_dir: &Path, extension: &str) -> Result<Vec<ArtifactRef>> {
    let root = root
        .canonicalize()
        .with_context(|| format!("Failed to find project root: {:?}", root))?;
    let source_dir = source_dir
        .canonicalize()
        .with_context(|| format!("Failed to find source directory: {:?}", source_dir))?;

    let files = crate::fs::walk_sources(&source_dir, extension)?;
    let mut artifacts = Vec::new();

    for path in files {
        let bytes = std::fs::read(&path)
            .with_context(|| format!("Failed to read contract source: {:?}", path))?;
        let content = String::from_utf8_lossy(&bytes);

        let Some(declaration) = classify(&content) else {
            debug!(path = %path.display(), "skipping source without exportable declaration");
            continue;
        };

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .with_context(|| format!("Source file has no name: {:?}", path))?;
        debug!(path = %path.display(), declared = %declaration.name, "found artifact");

        artifacts.push(ArtifactRef::new(relative_source_path(&root, &path)?, name));
    }

    for (file, sources) in output_collisions(&artifacts) {
        warn!(
            file = %file,
            sources = %sources.join(", "),
            "several sources share one ABI file name; only one export will survive"
        );
    }

    Ok(artifacts)
}

/// `/`-joined path of `path` relative to `root`.
fn relative_source_path(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        anyhow::anyhow!("Contract source {:?} is outside the project root {:?}", path, root)
    })?;
    Ok(relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/"))
}
