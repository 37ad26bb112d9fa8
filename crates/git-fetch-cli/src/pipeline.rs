use std::path::PathBuf;

use anyhow::{Context, Result};
use git_fetch::{FailurePolicy, Orchestrator, RunReport, TaskPool};

use crate::config::load_job_config;
use crate::factory::ProviderFactory;
use crate::output::write_atomically;

pub struct JobOptions {
    pub config: PathBuf,
    pub output: PathBuf,
    pub pool: TaskPool,
    pub policy: FailurePolicy,
}

/// Load configs, fetch everything, and write the output file. Nothing is
/// written unless the whole run succeeds.
pub async fn run(options: &JobOptions) -> Result<RunReport> {
    let configs = load_job_config(&options.config)?;

    let orchestrator = Orchestrator::new(ProviderFactory)
        .with_pool(options.pool)
        .with_policy(options.policy);

    let outcome = match orchestrator.run(&configs).await {
        Ok(outcome) => outcome,
        Err(e) if e.is_preflight() => {
            return Err(anyhow::Error::new(e).context("no requests were made"));
        }
        Err(e) => return Err(e.into()),
    };

    let json = git_fetch::to_json(&outcome.repositories)?;
    write_atomically(&options.output, &json)
        .with_context(|| format!("failed to write output: {}", options.output.display()))?;

    Ok(outcome.report)
}
