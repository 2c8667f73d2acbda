//! Expected output file names

use crate::core::types::ArtifactRef;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Output file name for an identifier.
///
/// Accepts a qualified id (`src/Foo.sol:Foo`, name after the last `:`) or a
/// bare source path (`src/Foo.sol`, name is the file stem).
pub fn output_file_name(identifier: &str) -> String {
    let name = match identifier.rsplit_once(':') {
        Some((_, name)) => name.to_string(),
        None => Path::new(identifier)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| identifier.to_string()),
    };
    format!("{}.json", name)
}

/// The set of output files the current artifacts should produce.
///
/// Discovered artifacts contribute `{name}.json`, the same file the exporter
/// writes. `keep` identifiers go through [`output_file_name`].
pub fn expected_outputs(artifacts: &[ArtifactRef], keep: &[String]) -> BTreeSet<String> {
    artifacts
        .iter()
        .map(ArtifactRef::output_file_name)
        .chain(keep.iter().map(|id| output_file_name(id)))
        .collect()
}

/// Output files claimed by more than one artifact, with the claiming sources.
///
/// Each such file is written once per claimant and the last write wins.
pub fn output_collisions(artifacts: &[ArtifactRef]) -> BTreeMap<String, Vec<String>> {
    let mut claims: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for artifact in artifacts {
        claims
            .entry(artifact.output_file_name())
            .or_default()
            .push(artifact.source_path.clone());
    }
    claims.retain(|_, sources| sources.len() > 1);
    claims
}
