//! schematic-build
//!
//! Runs a schematic build from the command line. Stage progress goes to
//! stderr through `tracing`; `--json` prints the build report on stdout.

mod cli;

use anyhow::Result;
use clap::Parser;
use schematic_builder::prelude::*;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "schematic_builder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let options = cli.builder_options()?;
    let (workspace_root, cwd) = cli.directories()?;
    debug!(workspace_root = %workspace_root.display(), cwd = %cwd.display(), "Resolved directories");

    let context = BuilderContext::new(Arc::new(TracingLogger::new()), workspace_root, cwd);
    let builder = SchematicBuilder::new().with_compiler(Arc::new(TscCompiler::new(cli.tsc.clone())));
    let report = builder.run_with_report(&options, &context).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if let Some(error) = report.output.error() {
        eprintln!("{error}");
    }

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
