//! Orphan pruning - remove output files no current artifact produces

use crate::core::ExportEvent;
use crate::core::scanner::notify;
use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::Path;
use tracing::info;

/// Delete every `*.json` directly under `out_dir` that is not in `expected`.
///
/// Returns the removed file names in sorted order. A missing output directory
/// means nothing to prune.
pub fn prune_orphans(
    out_dir: &Path,
    expected: &BTreeSet<String>,
    tx: &Option<Sender<ExportEvent>>,
) -> Result<Vec<String>> {
    let entries = match std::fs::read_dir(out_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to list output directory: {:?}", out_dir));
        }
    };

    let mut orphans = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list output directory: {:?}", out_dir))?;
        if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().to_string();
        if file_name.ends_with(".json") && !expected.contains(&file_name) {
            orphans.push(file_name);
        }
    }
    orphans.sort();

    for file_name in &orphans {
        let path = out_dir.join(file_name);
        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to remove orphaned ABI file: {:?}", path))?;
        info!(file = %file_name, "Removed orphaned ABI file");
        notify(tx, ExportEvent::Pruned(file_name.clone()));
    }

    Ok(orphans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn expected(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_prunes_only_orphans() {
        let temp = TempDir::new().unwrap();
        let out = temp.path();
        fs::write(out.join("Old.json"), "[]").unwrap();
        fs::write(out.join("Token.json"), "[]").unwrap();
        fs::write(out.join("README.md"), "keep me").unwrap();

        let removed = prune_orphans(out, &expected(&["Token.json"]), &None).unwrap();
        assert_eq!(removed, vec!["Old.json".to_string()]);
        assert!(!out.join("Old.json").exists());
        assert!(out.join("Token.json").exists());
        assert!(out.join("README.md").exists());

        let again = prune_orphans(out, &expected(&["Token.json"]), &None).unwrap();
        assert!(again.is_empty());
        assert!(out.join("Token.json").exists());
    }

    #[test]
    fn test_missing_directory_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let removed = prune_orphans(&temp.path().join("abis"), &expected(&[]), &None).unwrap();
        assert!(removed.is_empty());
    }

    #[test]
    fn test_subdirectories_are_left_alone() {
        let temp = TempDir::new().unwrap();
        let out = temp.path();
        fs::create_dir(out.join("nested.json")).unwrap();
        fs::write(out.join("nested.json/Inner.json"), "[]").unwrap();

        let removed = prune_orphans(out, &expected(&[]), &None).unwrap();
        assert!(removed.is_empty());
        assert!(out.join("nested.json/Inner.json").exists());
    }

    #[test]
    fn test_listing_a_file_is_fatal() {
        let temp = TempDir::new().unwrap();
        let not_a_dir = temp.path().join("abis");
        fs::write(&not_a_dir, "oops").unwrap();
        assert!(prune_orphans(&not_a_dir, &expected(&[]), &None).is_err());
    }

    #[test]
    fn test_pruned_events_emitted() {
        let temp = TempDir::new().unwrap();
        let out = temp.path();
        fs::write(out.join("A.json"), "[]").unwrap();
        fs::write(out.join("B.json"), "[]").unwrap();

        let (tx, rx) = crossbeam_channel::unbounded();
        prune_orphans(out, &expected(&[]), &Some(tx)).unwrap();
        let pruned: Vec<String> = rx
            .try_iter()
            .filter_map(|e| match e {
                ExportEvent::Pruned(name) => Some(name),
                _ => None,
            })
            .collect();
        assert_eq!(pruned, vec!["A.json".to_string(), "B.json".to_string()]);
    }
}
