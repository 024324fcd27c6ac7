/// Deployment Layer
///
/// Coordinates a run: selection resolution, the per-snippet
/// read → fetch → apply sequence, and the resulting report.

// Orchestrator driving the per-snippet pipeline
pub mod orchestrator;

// Per-snippet results and run summary
pub mod report;

// Re-export main types
pub use orchestrator::{list_entries, DeployOptions, Deployer, Selection};
pub use report::{DeployReport, DeployResult, DeployStatus, Stage};
