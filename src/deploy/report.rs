/// Per-run deployment report
///
/// One DeployResult per processed snippet, in registry order, plus run timestamps.
/// Rendered as status lines for the terminal and optionally written as JSON for CI.

use crate::error::DeployError;
use crate::snippet::RegistryEntry;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Terminal outcome of a snippet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployStatus {
    Success,
    Skipped,
    Failed,
}

/// Last stage a snippet reached: pending → validated → fetched → applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Pending,
    Validated,
    Fetched,
    Applied,
}

/// Outcome of deploying a single snippet
#[derive(Debug, Clone, Serialize)]
pub struct DeployResult {
    pub snippet_id: String,
    pub workflow_id: String,
    pub node_name: String,
    pub status: DeployStatus,
    pub stage: Stage,
    /// Human-readable detail (plan, confirmation, or error text)
    pub detail: String,
    /// Error variant name when status is failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
}

impl DeployResult {
    /// Fresh result for an entry that has not been processed yet
    pub fn pending(entry: &RegistryEntry) -> Self {
        Self {
            snippet_id: entry.snippet_id.clone(),
            workflow_id: entry.workflow_id.clone(),
            node_name: entry.node_name.clone(),
            status: DeployStatus::Failed,
            stage: Stage::Pending,
            detail: String::new(),
            error_kind: None,
        }
    }

    /// Record a failure, keeping the stage reached so far
    pub fn fail(&mut self, err: &DeployError) {
        self.status = DeployStatus::Failed;
        self.detail = err.to_string();
        self.error_kind = Some(err.kind());
    }
}

impl fmt::Display for DeployResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.status {
            DeployStatus::Success => "[ok]",
            DeployStatus::Skipped => "[skip]",
            DeployStatus::Failed => "[FAIL]",
        };
        write!(
            f,
            "{:<6} {} -> {} / {}: {}",
            tag, self.snippet_id, self.workflow_id, self.node_name, self.detail
        )
    }
}

/// All results of one run
#[derive(Debug, Clone, Serialize)]
pub struct DeployReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub dry_run: bool,
    pub results: Vec<DeployResult>,
}

impl DeployReport {
    fn count(&self, status: DeployStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    pub fn succeeded(&self) -> usize {
        self.count(DeployStatus::Success)
    }

    pub fn skipped(&self) -> usize {
        self.count(DeployStatus::Skipped)
    }

    pub fn failed(&self) -> usize {
        self.count(DeployStatus::Failed)
    }

    /// Drives the non-zero exit status
    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    pub fn summary(&self) -> String {
        let prefix = if self.dry_run { "Dry run complete" } else { "Deployment complete" };
        format!(
            "{}: {} succeeded, {} skipped, {} failed",
            prefix,
            self.succeeded(),
            self.skipped(),
            self.failed()
        )
    }

    /// Write the report as pretty JSON
    pub fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl fmt::Display for DeployReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.results {
            writeln!(f, "{}", result)?;
        }
        write!(f, "\n{}", self.summary())
    }
}
