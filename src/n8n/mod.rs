/// Remote n8n Layer
///
/// Client side of the n8n public API:
/// - Wire types (Workflow, Node, WorkflowUpdate)
/// - WorkflowApi trait used by the orchestrator
/// - reqwest implementation with status-to-error mapping

// Workflow and node wire types
pub mod types;

// Trait seam between orchestrator and transport
pub mod api;

// reqwest-backed client
pub mod client;

// Re-export commonly used types
pub use api::WorkflowApi;
pub use client::N8nClient;
pub use types::{Node, Workflow, WorkflowUpdate};
