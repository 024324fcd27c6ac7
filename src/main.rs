/// snipdeploy: n8n snippet deployment CLI
///
/// Main entry point. Parses arguments, sets up logging, and runs one deployment
/// (or listing). Exit code is non-zero when any snippet fails or startup fails.

use clap::Parser;
use snipdeploy::{app, cli::Args};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    app::init_tracing(args.verbose);

    let outcome = app::run(args).await?;
    Ok(outcome.exit_code())
}
