/// Configuration management for the snippet deployer
///
/// Handles n8n credentials, request timeouts, and local paths. Credentials come from
/// ENV_VARs so CI jobs can inject them as secrets; paths come from the CLI.

use crate::error::{DeployError, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default location of the registry file, relative to the repository root
pub const DEFAULT_REGISTRY_PATH: &str = "snippets/snippet_registry.json";

/// Default per-request timeout for n8n API calls
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main application configuration
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Remote n8n instance configuration
    pub n8n: N8nConfig,
    /// Local registry and snippet locations
    pub paths: PathsConfig,
}

/// Remote n8n instance configuration
#[derive(Clone, Serialize)]
pub struct N8nConfig {
    /// Base URL without trailing slash (e.g., "http://localhost:5678")
    pub host: String,
    /// API key sent as X-N8N-API-KEY, never logged
    #[serde(skip)]
    pub api_key: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for N8nConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("N8nConfig")
            .field("host", &self.host)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Local file locations
#[derive(Debug, Clone, Serialize)]
pub struct PathsConfig {
    /// Registry file mapping snippet ids to workflow nodes
    pub registry: PathBuf,
    /// Directory that relative snippet file paths are resolved against
    pub root_dir: PathBuf,
}

impl N8nConfig {
    /// Read N8N_HOST, N8N_API_KEY and the optional N8N_TIMEOUT_SECS from the environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests don't have to touch process env
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = non_empty("N8N_HOST");
        let api_key = non_empty("N8N_API_KEY");
        let (host, api_key) = match (host, api_key) {
            (Some(host), Some(api_key)) => (host, api_key),
            (host, api_key) => {
                let mut missing = Vec::new();
                if host.is_none() {
                    missing.push("N8N_HOST");
                }
                if api_key.is_none() {
                    missing.push("N8N_API_KEY");
                }
                return Err(DeployError::Config(format!(
                    "missing required environment variable(s): {}",
                    missing.join(", ")
                )));
            }
        };

        let timeout_secs = match non_empty("N8N_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(DeployError::Config(format!(
                        "N8N_TIMEOUT_SECS must be a positive integer, got '{}'",
                        raw
                    )))
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            host: host.trim().trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl Config {
    /// Full configuration for a deploy run: environment credentials plus CLI paths
    pub fn from_env(paths: PathsConfig) -> Result<Self> {
        Ok(Self {
            n8n: N8nConfig::from_env()?,
            paths,
        })
    }
}
