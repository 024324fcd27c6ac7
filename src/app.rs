/// Application setup and run loop
///
/// Wires together configuration, registry, n8n client, and orchestrator for one
/// CLI invocation and maps the outcome to a process exit code.

use crate::{
    cli::Args,
    config::Config,
    deploy::{list_entries, Deployer},
    n8n::N8nClient,
    snippet::load_registry,
};
use anyhow::{Context, Result};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// How an invocation ended when no fatal error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every snippet succeeded or was skipped (or the registry was listed)
    Success,
    /// At least one snippet failed
    SnippetFailures,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::SnippetFailures => ExitCode::FAILURE,
        }
    }
}

/// Initialize the tracing subscriber; logs go to stderr so stdout stays the report
pub fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "snipdeploy=debug" } else { "snipdeploy=info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Execute one invocation
///
/// Fatal errors (registry, credentials, unknown snippet) are returned as Err and abort
/// before any snippet is processed. Per-snippet failures only affect the exit code.
pub async fn run(args: Args) -> Result<Outcome> {
    let paths = args.paths();

    tracing::debug!("📋 Loading registry: {}", paths.registry.display());
    let registry = load_registry(&paths.registry)
        .with_context(|| format!("unable to load registry {}", paths.registry.display()))?;

    if args.list {
        print!("{}", list_entries(&registry));
        return Ok(Outcome::Success);
    }

    let config = Config::from_env(paths)?;
    tracing::debug!("⚙️ Using n8n instance {} (timeout {:?})", config.n8n.host, config.n8n.timeout);

    let client = N8nClient::new(&config.n8n)?;
    let deployer = Deployer::new(&registry, &client, config.paths.root_dir.clone());

    let report = deployer.deploy(&args.selection(), args.options()).await?;
    println!("{}", report);

    if let Some(path) = &args.report {
        report
            .write_json(path)
            .with_context(|| format!("unable to write report {}", path.display()))?;
        tracing::info!("📝 Wrote report to {}", path.display());
    }

    Ok(if report.has_failures() {
        Outcome::SnippetFailures
    } else {
        Outcome::Success
    })
}
