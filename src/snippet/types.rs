/// Core snippet type definitions
///
/// Defines registry entries and validated snippets. Registry entries are deserialized
/// from the JSON registry file; snippets are produced by the reader after marker checks.

use serde::{Deserialize, Serialize};

/// Prefix of the marker line every snippet file must start with
pub const MARKER_PREFIX: &str = "# snippet: ";

/// One registry entry mapping a snippet id to its deployment target
///
/// Field names are the registry file contract. The optional `name` and
/// `description` are only used for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Unique snippet identifier (e.g., "url_health_check")
    pub snippet_id: String,
    /// Target n8n workflow id
    pub workflow_id: String,
    /// Name of the Code node inside the workflow (e.g., "Check URL")
    pub node_name: String,
    /// Local source path, relative paths resolve against the repository root
    pub file_path: String,
    /// Human-readable snippet name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Short description shown by --list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RegistryEntry {
    /// The exact first line a snippet file for this entry must carry
    pub fn expected_marker(&self) -> String {
        marker_for(&self.snippet_id)
    }
}

/// Build the marker line for a snippet id
pub fn marker_for(snippet_id: &str) -> String {
    format!("{}{}", MARKER_PREFIX, snippet_id)
}

/// Ordered, duplicate-free set of registry entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Registry {
    /// Wrap already-validated entries (uniqueness is checked by the loader)
    pub(crate) fn from_entries(entries: Vec<RegistryEntry>) -> Self {
        Self { entries }
    }

    /// Entries in file order
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Look up an entry by snippet id
    pub fn get(&self, snippet_id: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|e| e.snippet_id == snippet_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A snippet whose marker line has been validated against its registry entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Snippet identifier taken from the registry
    pub id: String,
    /// Full file contents including the marker line, uploaded verbatim
    pub source: String,
}

impl Snippet {
    pub fn line_count(&self) -> usize {
        self.source.lines().count()
    }
}
