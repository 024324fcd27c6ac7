/// Command-line arguments
///
/// `snipdeploy` with no arguments deploys every registry entry.

use crate::config::{PathsConfig, DEFAULT_REGISTRY_PATH};
use crate::deploy::{DeployOptions, Selection};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "snipdeploy",
    version,
    about = "Deploy local code snippets into n8n workflow Code nodes",
    after_help = "Environment:\n  N8N_HOST          n8n base URL (e.g. http://localhost:5678)\n  N8N_API_KEY       n8n API key\n  N8N_TIMEOUT_SECS  request timeout in seconds (default 30)\n\nExamples:\n  snipdeploy                              Deploy all snippets\n  snipdeploy --snippet url_health_check   Deploy one snippet\n  snipdeploy --dry-run                    Show what would be deployed\n  snipdeploy --list                       List registered snippets"
)]
pub struct Args {
    /// Deploy only this snippet id
    #[arg(short, long, value_name = "ID")]
    pub snippet: Option<String>,

    /// Show what would be deployed without writing to n8n
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// List registered snippets and exit
    #[arg(short, long, conflicts_with_all = ["snippet", "dry_run", "skip_unchanged", "report"])]
    pub list: bool,

    /// Skip the update for nodes whose code already matches
    #[arg(long)]
    pub skip_unchanged: bool,

    /// Registry file mapping snippet ids to workflow nodes
    #[arg(long, value_name = "PATH", default_value = DEFAULT_REGISTRY_PATH)]
    pub registry: PathBuf,

    /// Directory relative snippet paths are resolved against
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Write a JSON report of the run to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn selection(&self) -> Selection {
        match &self.snippet {
            Some(id) => Selection::One(id.clone()),
            None => Selection::All,
        }
    }

    pub fn options(&self) -> DeployOptions {
        DeployOptions {
            dry_run: self.dry_run,
            skip_unchanged: self.skip_unchanged,
        }
    }

    pub fn paths(&self) -> PathsConfig {
        PathsConfig {
            registry: self.registry.clone(),
            root_dir: self.root.clone(),
        }
    }
}
