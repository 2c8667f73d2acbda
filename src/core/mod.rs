//! Core module for abi-export
//!
//! Artifact types, the source scanner and the expected-output deriver.

pub mod classify;
pub mod derive;
pub mod scanner;
mod types;

pub use derive::{expected_outputs, output_collisions, output_file_name};
pub use scanner::{discover_artifacts, scan_contracts};
pub use types::*;
