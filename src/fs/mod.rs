use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Recursively collect every file under `path` with the given extension.
///
/// Nothing is filtered by `.gitignore` or hidden-file rules: a source tree is
/// scanned exactly as it sits on disk. Any walk error aborts the collection.
pub fn walk_sources(path: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut builder = WalkBuilder::new(path);
    builder.standard_filters(false);
    builder.follow_links(false);

    let mut files = Vec::new();
    for result in builder.build() {
        let entry = result.with_context(|| format!("Failed to walk {:?}", path))?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(entry.into_path());
        }
    }

    // Walk order depends on the OS; sort so unchanged trees scan identically.
    files.sort();
    Ok(files)
}
