use crate::connector::{ConnectionConfig, Connector, ConnectorFactory, Listing};
use crate::error::FetchError;
use crate::feedback::{Feedback, SkippedUnit};
use crate::pool::TaskPool;
use crate::repository::{NormalizedRepository, Repository};
use crate::source::SourceKind;

/// What to do when a single connection or repository fails mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Fail the whole run on the first failure.
    #[default]
    Abort,
    /// Drop the failing unit, record it in the report, and keep going.
    Skip,
}

/// Counts and diagnostics for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub connections: usize,
    pub repositories: usize,
    pub pull_requests: usize,
    pub skipped: usize,
    pub feedback: Vec<Feedback>,
}

/// The aggregated result of a successful run.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub repositories: Vec<NormalizedRepository>,
    pub report: RunReport,
}

/// Drives repository discovery and pull-request fetching over many
/// connections.
///
/// A run is a single linear pipeline: build every connector (no network),
/// list repositories per connector, flatten in configuration order, then
/// normalize each repository. Nothing is kept between runs.
pub struct Orchestrator<F> {
    factory: F,
    pool: TaskPool,
    policy: FailurePolicy,
}

impl<F: ConnectorFactory> Orchestrator<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            pool: TaskPool::default(),
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_pool(mut self, pool: TaskPool) -> Self {
        self.pool = pool;
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub async fn run(&self, configs: &[ConnectionConfig]) -> Result<FetchOutcome, FetchError> {
        let mut report = RunReport {
            connections: configs.len(),
            ..RunReport::default()
        };

        let connectors = self.preflight(configs, &mut report)?;
        let listings = self.discover(connectors, &mut report).await?;

        let repositories: Vec<Box<dyn Repository>> =
            listings.into_iter().flat_map(|l| l.repositories).collect();

        let normalized = self.fetch(repositories, &mut report).await?;

        report.repositories = normalized.len();
        report.pull_requests = normalized.iter().map(|r| r.pull_requests.len()).sum();

        Ok(FetchOutcome {
            repositories: normalized,
            report,
        })
    }

    /// Build every connector up front so credential problems surface before
    /// any network call.
    fn preflight(
        &self,
        configs: &[ConnectionConfig],
        report: &mut RunReport,
    ) -> Result<Vec<Box<dyn Connector>>, FetchError> {
        let connectors = configs
            .iter()
            .map(|config| self.factory.connect(config))
            .collect::<Result<Vec<_>, _>>()?;

        for connector in &connectors {
            report.feedback.extend(connector.notices());
        }

        Ok(connectors)
    }

    async fn discover(
        &self,
        connectors: Vec<Box<dyn Connector>>,
        report: &mut RunReport,
    ) -> Result<Vec<Listing>, FetchError> {
        let origins: Vec<(SourceKind, String)> = connectors
            .iter()
            .map(|connector| (connector.source(), connector.label().to_owned()))
            .collect();

        let listings: Vec<Result<Listing, FetchError>> = match self.policy {
            FailurePolicy::Abort => self
                .pool
                .try_map_collect(connectors, |connector| async move {
                    connector.repositories().await
                })
                .await?
                .into_iter()
                .map(Ok)
                .collect(),
            FailurePolicy::Skip => {
                self.pool
                    .map_collect(connectors, |connector| async move {
                        connector.repositories().await
                    })
                    .await
            }
        };

        let mut kept = Vec::with_capacity(listings.len());
        for ((source, label), listing) in origins.into_iter().zip(listings) {
            match listing {
                Ok(listing) => {
                    report.feedback.push(Feedback::Listed {
                        source,
                        account: listing.account.clone(),
                        repositories: listing.repositories.len(),
                    });
                    kept.push(listing);
                }
                Err(e) => {
                    report.skipped += 1;
                    report.feedback.push(Feedback::Skipped {
                        unit: SkippedUnit::Connection { source, label },
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(kept)
    }

    async fn fetch(
        &self,
        repositories: Vec<Box<dyn Repository>>,
        report: &mut RunReport,
    ) -> Result<Vec<NormalizedRepository>, FetchError> {
        let identities: Vec<String> = repositories
            .iter()
            .map(|repo| repo.info().external_id.clone())
            .collect();

        let results: Vec<Result<NormalizedRepository, FetchError>> = match self.policy {
            FailurePolicy::Abort => self
                .pool
                .try_map_collect(repositories, |repo| async move { repo.normalize().await })
                .await?
                .into_iter()
                .map(Ok)
                .collect(),
            FailurePolicy::Skip => {
                self.pool
                    .map_collect(repositories, |repo| async move { repo.normalize().await })
                    .await
            }
        };

        let mut normalized = Vec::with_capacity(results.len());
        for (external_id, result) in identities.into_iter().zip(results) {
            match result {
                Ok(repo) => {
                    report.feedback.push(Feedback::Fetched {
                        source: repo.source,
                        external_id,
                        pull_requests: repo.pull_requests.len(),
                    });
                    normalized.push(repo);
                }
                Err(e) => {
                    report.skipped += 1;
                    report.feedback.push(Feedback::Skipped {
                        unit: SkippedUnit::Repository { external_id },
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(normalized)
    }
}
