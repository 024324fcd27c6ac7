/// Deploy orchestrator
///
/// Drives registry → reader → remote client for each selected snippet, in registry
/// order, one snippet at a time. A failing snippet is recorded and the loop moves on.

use crate::deploy::report::{DeployReport, DeployResult, DeployStatus, Stage};
use crate::error::{DeployError, Result};
use crate::n8n::WorkflowApi;
use crate::snippet::{read_snippet, Registry, RegistryEntry};
use chrono::Utc;
use std::collections::HashMap;
use std::path::PathBuf;

/// Which registry entries a run should process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every entry, in registry order
    All,
    /// A single entry by snippet_id
    One(String),
}

/// Flags that change how a selected snippet is applied
#[derive(Debug, Clone, Copy, Default)]
pub struct DeployOptions {
    /// Report the intended change without writing to the remote
    pub dry_run: bool,
    /// Leave nodes alone when their code already matches the local file
    pub skip_unchanged: bool,
}

/// Coordinates a deployment run against one remote instance
pub struct Deployer<'a> {
    /// Registry loaded once for the run
    registry: &'a Registry,
    /// Remote workflow API (HTTP client or test fake)
    api: &'a dyn WorkflowApi,
    /// Directory relative snippet paths resolve against
    root_dir: PathBuf,
}

impl<'a> Deployer<'a> {
    pub fn new(registry: &'a Registry, api: &'a dyn WorkflowApi, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            api,
            root_dir: root_dir.into(),
        }
    }

    /// Resolve a selection against the registry
    pub fn resolve(&self, selection: &Selection) -> Result<Vec<&'a RegistryEntry>> {
        match selection {
            Selection::All => Ok(self.registry.entries().iter().collect()),
            Selection::One(id) => self
                .registry
                .get(id)
                .map(|entry| vec![entry])
                .ok_or_else(|| DeployError::UnknownSnippet(id.clone())),
        }
    }

    /// Deploy the selected snippets and collect one result per snippet
    ///
    /// Only selection errors are returned as Err; per-snippet failures live in the report.
    pub async fn deploy(&self, selection: &Selection, options: DeployOptions) -> Result<DeployReport> {
        let entries = self.resolve(selection)?;
        let started_at = Utc::now();

        tracing::info!(
            "🚀 Deploying {} snippet(s){}",
            entries.len(),
            if options.dry_run { " [DRY RUN]" } else { "" }
        );

        let mut results = Vec::with_capacity(entries.len());
        for entry in entries {
            let result = self.deploy_one(entry, options).await;
            match result.status {
                DeployStatus::Success => tracing::info!("✅ {}: {}", result.snippet_id, result.detail),
                DeployStatus::Skipped => tracing::info!("⏭️ {}: {}", result.snippet_id, result.detail),
                DeployStatus::Failed => tracing::error!("❌ {}: {}", result.snippet_id, result.detail),
            }
            results.push(result);
        }

        Ok(DeployReport {
            started_at,
            finished_at: Utc::now(),
            dry_run: options.dry_run,
            results,
        })
    }

    /// Run the per-snippet sequence, never propagating its error
    async fn deploy_one(&self, entry: &RegistryEntry, options: DeployOptions) -> DeployResult {
        let mut result = DeployResult::pending(entry);
        match self.apply(entry, options, &mut result.stage).await {
            Ok((status, detail)) => {
                result.status = status;
                result.detail = detail;
            }
            Err(e) => result.fail(&e),
        }
        result
    }

    async fn apply(
        &self,
        entry: &RegistryEntry,
        options: DeployOptions,
        stage: &mut Stage,
    ) -> Result<(DeployStatus, String)> {
        let snippet = read_snippet(entry, &self.root_dir)?;
        *stage = Stage::Validated;

        let workflow = self.api.get_workflow(&entry.workflow_id).await?;
        let node = workflow.find_code_node(&entry.node_name)?;
        *stage = Stage::Fetched;

        let current = node.code().unwrap_or("");
        let unchanged = current == snippet.source;
        let (added, removed) = line_delta(current, &snippet.source);

        if options.dry_run {
            if unchanged {
                return Ok((
                    DeployStatus::Skipped,
                    "no change: already up to date".to_string(),
                ));
            }
            return Ok((
                DeployStatus::Skipped,
                format!(
                    "would update {} of '{}' in workflow '{}' (+{} -{} lines)",
                    node.code_param(),
                    node.name,
                    workflow.name,
                    added,
                    removed
                ),
            ));
        }

        if unchanged && options.skip_unchanged {
            return Ok((DeployStatus::Skipped, "already up to date".to_string()));
        }

        self.api
            .update_node_code(&workflow, &entry.node_name, &snippet.source)
            .await?;
        *stage = Stage::Applied;

        Ok((
            DeployStatus::Success,
            format!(
                "updated '{}' in workflow '{}' ({} lines, +{} -{})",
                entry.node_name,
                workflow.name,
                snippet.line_count(),
                added,
                removed
            ),
        ))
    }
}

/// Render every registry entry; never touches the remote instance
pub fn list_entries(registry: &Registry) -> String {
    let mut out = String::from("Available snippets:\n");
    for entry in registry.entries() {
        out.push_str(&format!(
            "  {} -> {} / {}\n",
            entry.snippet_id, entry.workflow_id, entry.node_name
        ));
        if let Some(name) = &entry.name {
            out.push_str(&format!("    {}\n", name));
        }
        if let Some(description) = &entry.description {
            out.push_str(&format!("    {}\n", description));
        }
    }
    out
}

/// Lines present in one text but not the other, counted as a multiset
fn line_delta(old: &str, new: &str) -> (usize, usize) {
    let mut counts: HashMap<&str, isize> = HashMap::new();
    for line in old.lines() {
        *counts.entry(line).or_default() -= 1;
    }
    for line in new.lines() {
        *counts.entry(line).or_default() += 1;
    }

    counts.values().fold((0, 0), |(added, removed), &n| {
        if n > 0 {
            (added + n as usize, removed)
        } else {
            (added, removed + (-n) as usize)
        }
    })
}
