/// Registry loader
///
/// Parses the JSON registry file into an ordered Registry. Accepts either
/// `{ "snippets": [...] }` or a bare array of entries. Rejects incomplete entries
/// and duplicate snippet ids so later stages can rely on a clean mapping.

use crate::error::{DeployError, Result};
use crate::snippet::types::{Registry, RegistryEntry};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// On-disk registry layouts
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RegistryFile {
    Wrapped { snippets: Vec<RegistryEntry> },
    Bare(Vec<RegistryEntry>),
}

/// Load and validate the registry file at `path`
pub fn load_registry(path: &Path) -> Result<Registry> {
    let content = std::fs::read_to_string(path).map_err(|e| DeployError::Parse {
        path: path.to_path_buf(),
        message: format!("cannot read file: {}", e),
    })?;

    let registry = parse_registry(path, &content)?;
    tracing::debug!("📋 Loaded {} registry entries from {}", registry.len(), path.display());
    Ok(registry)
}

/// Parse registry JSON; `path` is only used for error messages
pub fn parse_registry(path: &Path, content: &str) -> Result<Registry> {
    let parse_err = |message: String| DeployError::Parse {
        path: path.to_path_buf(),
        message,
    };

    // Untagged enums swallow serde's field-level messages, so probe the shape first
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?;
    let entries = match value {
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            match serde_json::from_value::<RegistryFile>(value.clone()) {
                Ok(RegistryFile::Wrapped { snippets }) => snippets,
                Ok(RegistryFile::Bare(entries)) => entries,
                Err(_) => return Err(parse_err(describe_entry_error(&value))),
            }
        }
        _ => {
            return Err(parse_err(
                "expected an array of entries or an object with a \"snippets\" array".into(),
            ))
        }
    };

    let mut seen = HashSet::new();
    for (index, entry) in entries.iter().enumerate() {
        for (field, value) in [
            ("snippet_id", &entry.snippet_id),
            ("workflow_id", &entry.workflow_id),
            ("node_name", &entry.node_name),
            ("file_path", &entry.file_path),
        ] {
            if value.trim().is_empty() {
                return Err(parse_err(format!("entry {}: field '{}' is empty", index, field)));
            }
        }
        if !seen.insert(entry.snippet_id.as_str()) {
            return Err(DeployError::DuplicateKey(entry.snippet_id.clone()));
        }
    }

    Ok(Registry::from_entries(entries))
}

/// Re-run deserialization entry by entry to surface which entry and field is wrong
fn describe_entry_error(value: &serde_json::Value) -> String {
    let items = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(map) => match map.get("snippets") {
            Some(serde_json::Value::Array(items)) => items,
            Some(_) => return "\"snippets\" must be an array".to_string(),
            None => return "missing \"snippets\" array".to_string(),
        },
        _ => return "unexpected registry layout".to_string(),
    };

    for (index, item) in items.iter().enumerate() {
        if let Err(e) = serde_json::from_value::<RegistryEntry>(item.clone()) {
            return format!("entry {}: {}", index, e);
        }
    }
    "unexpected registry layout".to_string()
}
