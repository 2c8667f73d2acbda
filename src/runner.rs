use crate::config::ExportConfig;
use crate::core::scanner::notify;
use crate::core::{ArtifactRef, ExportEvent, discover_artifacts, expected_outputs};
use crate::export::{ExportFailure, Exporter, ForgeInspector, Inspector};
use crate::prune::prune_orphans;
use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use std::fmt;
use tracing::info;

/// Everything a generate run did, printed before the run concludes
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub artifacts: Vec<ArtifactRef>,
    pub pruned: Vec<String>,
    pub exported: Vec<String>,
    pub failures: Vec<ExportFailure>,
}

impl GenerateReport {
    pub fn succeeded(&self) -> usize {
        self.exported.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn summary_line(&self) -> String {
        format!(
            "ABI generation complete: {} succeeded, {} failed",
            self.succeeded(),
            self.failed()
        )
    }
}

impl fmt::Display for GenerateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Found {} contracts/interfaces:", self.artifacts.len())?;
        for artifact in &self.artifacts {
            writeln!(f, "  - {}", artifact)?;
        }

        if !self.pruned.is_empty() {
            writeln!(f, "Removed orphaned ABI files:")?;
            for file in &self.pruned {
                writeln!(f, "  - {}", file)?;
            }
        }

        if !self.failures.is_empty() {
            writeln!(f, "Failed exports:")?;
            for failure in &self.failures {
                writeln!(f, "  - {}", failure)?;
            }
        }

        write!(f, "{}", self.summary_line())
    }
}

/// Scan, prune orphans, then export every artifact.
///
/// Scan and listing failures abort the run. Per-artifact export failures are
/// collected into the report and do not.
pub fn generate<I: Inspector>(
    config: &ExportConfig,
    inspector: &I,
    tx: Option<Sender<ExportEvent>>,
) -> Result<GenerateReport> {
    config.validate()?;

    let out_dir = config.output_path();
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", out_dir))?;

    let artifacts = discover_artifacts(config, &tx)?;
    info!("Found {} contracts/interfaces", artifacts.len());

    let expected = expected_outputs(&artifacts, &config.keep);
    let pruned = prune_orphans(&out_dir, &expected, &tx)?;

    let batch = Exporter::new(inspector, &config.tool, &out_dir).export_all(
        &artifacts,
        config.jobs,
        &tx,
    )?;

    let report = GenerateReport {
        artifacts,
        pruned,
        exported: batch.exported,
        failures: batch.failures,
    };
    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "ABI generation complete"
    );
    notify(&tx, ExportEvent::Complete(report.summary_line()));
    Ok(report)
}

/// Apply the exit policy: partial failures only fail the run when `strict`.
pub fn check_exit_policy(report: &GenerateReport, strict: bool) -> Result<()> {
    if strict && report.failed() > 0 {
        anyhow::bail!(
            "{} of {} ABI exports failed",
            report.failed(),
            report.artifacts.len()
        );
    }
    Ok(())
}

/// Main entry point in CLI mode.
///
/// Runs the generate pipeline against `forge` on a worker thread and consumes
/// its events on the calling thread, echoing progress when verbose. Prints the
/// final report, then applies the exit policy.
pub fn run(config: ExportConfig) -> Result<GenerateReport> {
    let inspector = ForgeInspector::new(&config.root);
    let (tx, rx) = crossbeam_channel::unbounded();
    let verbose = config.tool.verbose;

    let report = std::thread::scope(|s| {
        let (config, inspector) = (&config, &inspector);
        let worker = s.spawn(move || {
            let result = generate(config, inspector, Some(tx.clone()));
            if let Err(e) = &result {
                let _ = tx.send(ExportEvent::Error(e.to_string()));
            }
            result
        });

        for event in rx {
            if !verbose {
                continue;
            }
            match event {
                ExportEvent::StartScanning => println!("Scanning for contracts and interfaces..."),
                ExportEvent::ArtifactsFound(found) => println!("Found {} artifacts.", found.len()),
                ExportEvent::Pruned(file) => println!("Removed orphaned ABI file: {}", file),
                ExportEvent::Exported(name) => println!("Generated ABI for {}", name),
                ExportEvent::Failed { artifact, error } => {
                    eprintln!("Failed to generate ABI for {}: {}", artifact, error)
                }
                ExportEvent::Complete(msg) => println!("{}", msg),
                ExportEvent::Error(e) => eprintln!("Error: {}", e),
            }
        }

        worker
            .join()
            .map_err(|_| anyhow::anyhow!("generate worker panicked"))?
    })?;

    println!("\n{}", report);
    check_exit_policy(&report, config.strict)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportError;

    fn report_with_failure() -> GenerateReport {
        let bad = ArtifactRef::new("src/Bad.sol".into(), "Bad".into());
        GenerateReport {
            artifacts: vec![
                ArtifactRef::new("src/Good.sol".into(), "Good".into()),
                bad.clone(),
            ],
            pruned: vec!["Old.json".to_string()],
            exported: vec!["Good".to_string()],
            failures: vec![ExportFailure {
                artifact: bad,
                error: ExportError::ToolFailed {
                    command: "forge inspect src/Bad.sol:Bad abi --json".to_string(),
                    status: "exit status: 1".to_string(),
                    stderr: "Error: compilation failed".to_string(),
                },
            }],
        }
    }

    #[test]
    fn test_report_lists_everything() {
        let text = report_with_failure().to_string();
        assert!(text.contains("Found 2 contracts/interfaces:"));
        assert!(text.contains("  - src/Good.sol:Good"));
        assert!(text.contains("  - Old.json"));
        assert!(text.contains("src/Bad.sol:Bad: `forge inspect src/Bad.sol:Bad abi --json` exited"));
        assert!(text.ends_with("1 succeeded, 1 failed"));
    }

    #[test]
    fn test_exit_policy() {
        let report = report_with_failure();
        assert!(check_exit_policy(&report, false).is_ok());
        assert!(check_exit_policy(&report, true).is_err());
        assert!(check_exit_policy(&GenerateReport::default(), true).is_ok());
    }
}
