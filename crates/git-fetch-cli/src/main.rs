mod config;
mod factory;
mod output;
mod pipeline;
mod report;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use git_fetch::{FailurePolicy, TaskPool};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::pipeline::JobOptions;

#[derive(Parser)]
#[command(name = "git-fetch")]
#[command(about = "Collect GitHub and GitLab pull requests into one normalized JSON file")]
struct Cli {
    /// Job configuration file (JSON array, or TOML with [[connections]])
    #[arg(long, default_value = "configs/job_config.json")]
    config: PathBuf,
    /// Where to write the normalized output
    #[arg(long, default_value = "normalized_output.json")]
    output: PathBuf,
    /// Maximum number of connections or repositories fetched at once
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u16).range(1..))]
    concurrency: u16,
    /// What to do when a connection or repository fails
    #[arg(long, value_enum, default_value_t = OnError::Abort)]
    on_error: OnError,
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OnError {
    /// Fail the whole run
    Abort,
    /// Skip the failing unit and report it
    Skip,
}

impl From<OnError> for FailurePolicy {
    fn from(value: OnError) -> Self {
        match value {
            OnError::Abort => Self::Abort,
            OnError::Skip => Self::Skip,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)))
        .init();

    let options = JobOptions {
        config: cli.config,
        output: cli.output,
        pool: TaskPool::new(usize::from(cli.concurrency)),
        policy: cli.on_error.into(),
    };

    let summary = pipeline::run(&options).await?;
    report::log_report(&summary);
    tracing::info!(path = %options.output.display(), "wrote normalized output");

    Ok(())
}
