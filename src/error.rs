/// Error taxonomy for the snippet deployer
///
/// A single enum covers configuration, registry, snippet, and remote API failures.
/// Per-snippet variants are recorded in that snippet's DeployResult; the rest are fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, DeployError>;

/// Errors that can occur while loading, validating, or deploying snippets
#[derive(Error, Debug)]
pub enum DeployError {
    /// Missing or invalid process configuration (environment variables)
    #[error("configuration error: {0}")]
    Config(String),

    /// Registry file is unreadable, malformed, or an entry is incomplete
    #[error("failed to parse registry {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// Two registry entries share a snippet_id
    #[error("duplicate snippet_id in registry: {0}")]
    DuplicateKey(String),

    /// A requested snippet_id is not in the registry
    #[error("snippet '{0}' not found in registry")]
    UnknownSnippet(String),

    /// Snippet source file does not exist
    #[error("snippet file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Snippet source file exists but could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// First line of a snippet file is not `# snippet: <id>`
    #[error("marker mismatch in {}: expected '{expected}', found '{found}'", .path.display())]
    MarkerMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    /// Remote API rejected the credentials (401/403)
    #[error("authentication failed (HTTP {status}): {body}")]
    Auth { status: u16, body: String },

    /// Remote workflow does not exist (404)
    #[error("workflow not found: {0}")]
    NotFound(String),

    /// Workflow has no node with the requested name
    #[error("node '{node_name}' not found in workflow {workflow_id}")]
    NodeNotFound {
        workflow_id: String,
        node_name: String,
    },

    /// Target node exists but does not carry code
    #[error("node '{node_name}' is of type '{node_type}', not a Code node")]
    NotCodeNode {
        node_name: String,
        node_type: String,
    },

    /// Any other non-2xx response from the remote API
    #[error("remote API returned HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    /// Request never produced a response (connect error, timeout)
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// Response body was not the expected JSON shape
    #[error("failed to decode remote response: {0}")]
    Decode(String),
}

impl DeployError {
    /// Map a non-2xx HTTP status and body onto the taxonomy
    pub fn from_status(status: u16, body: String, workflow_id: &str) -> Self {
        match status {
            401 | 403 => DeployError::Auth { status, body },
            404 => DeployError::NotFound(workflow_id.to_string()),
            _ => DeployError::Remote { status, body },
        }
    }

    /// Map a failed workflow update; only auth statuses are special-cased
    ///
    /// The workflow was just fetched, so a 404 here is a remote failure whose body
    /// explains more than a bare "not found" would.
    pub fn from_update_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => DeployError::Auth { status, body },
            _ => DeployError::Remote { status, body },
        }
    }

    /// Short machine-friendly name of the variant, used in JSON reports
    pub fn kind(&self) -> &'static str {
        match self {
            DeployError::Config(_) => "config",
            DeployError::Parse { .. } => "parse",
            DeployError::DuplicateKey(_) => "duplicate_key",
            DeployError::UnknownSnippet(_) => "unknown_snippet",
            DeployError::FileNotFound(_) => "file_not_found",
            DeployError::Io { .. } => "io",
            DeployError::MarkerMismatch { .. } => "marker_mismatch",
            DeployError::Auth { .. } => "auth",
            DeployError::NotFound(_) => "not_found",
            DeployError::NodeNotFound { .. } => "node_not_found",
            DeployError::NotCodeNode { .. } => "not_code_node",
            DeployError::Remote { .. } => "remote",
            DeployError::Transport(_) => "transport",
            DeployError::Decode(_) => "decode",
        }
    }
}

impl From<reqwest::Error> for DeployError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DeployError::Decode(err.to_string())
        } else {
            DeployError::Transport(err.to_string())
        }
    }
}
