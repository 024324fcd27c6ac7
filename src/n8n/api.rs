/// Remote workflow API seam
///
/// The orchestrator only talks to n8n through this trait, so tests can swap the
/// HTTP client for an in-memory fake and count calls.

use crate::error::Result;
use crate::n8n::types::{Workflow, WorkflowUpdate};
use async_trait::async_trait;

/// Workflow operations the deployer needs from a remote instance
#[async_trait]
pub trait WorkflowApi: Send + Sync {
    /// Fetch a workflow with all its nodes
    async fn get_workflow(&self, workflow_id: &str) -> Result<Workflow>;

    /// Replace a workflow's writable fields
    async fn put_workflow(&self, workflow_id: &str, update: &WorkflowUpdate) -> Result<Workflow>;

    /// Replace one Code node's source and resubmit the whole workflow
    async fn update_node_code(
        &self,
        workflow: &Workflow,
        node_name: &str,
        source: &str,
    ) -> Result<Workflow> {
        let updated = workflow.with_node_code(node_name, source)?;
        self.put_workflow(&workflow.id, &updated.to_update()).await
    }
}
