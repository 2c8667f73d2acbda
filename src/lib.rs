pub mod config;
pub mod core;
pub mod export;
pub mod fs;
pub mod logging;
pub mod prune;
pub mod runner;

// Re-export key items for convenience
pub use config::{ExportConfig, ToolConfig};
pub use core::{ArtifactRef, ExportEvent};
pub use runner::{GenerateReport, check_exit_policy, generate, run};
