/// snipdeploy: push locally authored code snippets into n8n workflow Code nodes
///
/// Reads a registry mapping snippet ids to workflow/node targets, validates each
/// snippet file's marker line, and updates the matching Code node through the
/// n8n public API.

// Process configuration (credentials, paths)
pub mod config;

// Error taxonomy shared by every layer
pub mod error;

// Local side: registry loading and snippet reading
pub mod snippet;

// Remote side: n8n wire types, API trait, HTTP client
pub mod n8n;

// Orchestration and per-run reporting
pub mod deploy;

// Command-line arguments
pub mod cli;

// Invocation wiring and logging setup
pub mod app;

// Re-export commonly used types for external consumers
pub use deploy::{DeployOptions, DeployReport, DeployStatus, Deployer, Selection};
pub use error::DeployError;
pub use n8n::{N8nClient, WorkflowApi};
pub use snippet::{Registry, RegistryEntry, Snippet};
