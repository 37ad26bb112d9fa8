use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    ConnectionConfig, Connector, ConnectorFactory, FetchError, Feedback, Listing, PullRequest,
    Repository, RepositoryInfo, SourceKind,
};

/// In-memory repository for testing. Counts how often pull requests are
/// fetched.
pub struct StaticRepository {
    info: RepositoryInfo,
    pull_requests: Result<Vec<PullRequest>, String>,
    calls: Arc<AtomicUsize>,
}

impl StaticRepository {
    pub fn new(info: RepositoryInfo, pull_requests: Vec<PullRequest>) -> Self {
        Self {
            info,
            pull_requests: Ok(pull_requests),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A repository whose pull-request fetch fails with a network error.
    pub fn failing(info: RepositoryInfo, message: impl Into<String>) -> Self {
        Self {
            info,
            pull_requests: Err(message.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> &Arc<AtomicUsize> {
        &self.calls
    }
}

#[async_trait::async_trait]
impl Repository for StaticRepository {
    fn info(&self) -> &RepositoryInfo {
        &self.info
    }

    async fn pull_requests(&self) -> Result<Vec<PullRequest>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pull_requests.clone().map_err(FetchError::Network)
    }
}

/// A repository fixture: identity, pull requests, and whether fetching them
/// should fail.
#[derive(Debug, Clone)]
pub struct RepositoryFixture {
    pub info: RepositoryInfo,
    pub pull_requests: Vec<PullRequest>,
    pub failure: Option<String>,
}

impl RepositoryFixture {
    pub fn new(source: SourceKind, owner: &str, name: &str, private: bool) -> Self {
        Self {
            info: RepositoryInfo {
                owner: owner.to_owned(),
                source,
                external_id: format!("https://{source}.example/{owner}/{name}"),
                name: name.to_owned(),
                private,
            },
            pull_requests: Vec::new(),
            failure: None,
        }
    }

    pub fn with_pull_request(mut self, author: &str, state: &str, title: &str) -> Self {
        let url = format!(
            "{}/pull/{}",
            self.info.external_id,
            self.pull_requests.len() + 1
        );
        self.pull_requests
            .push(PullRequest::new(author, state, title, url));
        self
    }

    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    fn build(&self) -> StaticRepository {
        match &self.failure {
            Some(message) => StaticRepository::failing(self.info.clone(), message.clone()),
            None => StaticRepository::new(self.info.clone(), self.pull_requests.clone()),
        }
    }
}

/// In-memory connector for testing. Each listing builds fresh repositories
/// from its fixtures and reports the account as the label unless overridden.
#[derive(Clone)]
pub struct StaticConnector {
    source: SourceKind,
    label: String,
    account: Option<String>,
    repositories: Vec<RepositoryFixture>,
    failure: Option<String>,
    notices: Vec<Feedback>,
    listings: Arc<AtomicUsize>,
}

impl StaticConnector {
    pub fn new(source: SourceKind, label: impl Into<String>) -> Self {
        Self {
            source,
            label: label.into(),
            account: None,
            repositories: Vec::new(),
            failure: None,
            notices: Vec::new(),
            listings: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Account name the listing resolves to.
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn with_repository(mut self, fixture: RepositoryFixture) -> Self {
        self.repositories.push(fixture);
        self
    }

    pub fn with_notice(mut self, notice: Feedback) -> Self {
        self.notices.push(notice);
        self
    }

    /// Make every listing fail with a network error.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Number of times `repositories()` ran, shared across clones.
    pub fn listings(&self) -> usize {
        self.listings.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Connector for StaticConnector {
    fn source(&self) -> SourceKind {
        self.source
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn notices(&self) -> Vec<Feedback> {
        self.notices.clone()
    }

    async fn repositories(&self) -> Result<Listing, FetchError> {
        self.listings.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            return Err(FetchError::Network(message.clone()));
        }
        Ok(Listing {
            account: self.account.clone().unwrap_or_else(|| self.label.clone()),
            repositories: self
                .repositories
                .iter()
                .map(|fixture| Box::new(fixture.build()) as Box<dyn Repository>)
                .collect(),
        })
    }
}

/// Factory serving [`StaticConnector`]s keyed by `(source, username)`.
///
/// Enforces the shared credential rule (a token is required) and rejects
/// unknown sources the same way a real factory does.
#[derive(Clone, Default)]
pub struct StaticFactory {
    connectors: Vec<(SourceKind, Option<String>, StaticConnector)>,
}

impl StaticFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        source: SourceKind,
        username: Option<&str>,
        connector: StaticConnector,
    ) -> Self {
        self.connectors
            .push((source, username.map(str::to_owned), connector));
        self
    }
}

impl ConnectorFactory for StaticFactory {
    fn connect(&self, config: &ConnectionConfig) -> Result<Box<dyn Connector>, FetchError> {
        let source = SourceKind::parse(&config.source)?;
        if config.token.is_none() {
            return Err(FetchError::Configuration(format!(
                "\"token\" must be specified for {source}"
            )));
        }

        self.connectors
            .iter()
            .find(|(kind, username, _)| *kind == source && *username == config.username)
            .map(|(_, _, connector)| Box::new(connector.clone()) as Box<dyn Connector>)
            .ok_or_else(|| {
                FetchError::Configuration(format!("no fixture for {source} {:?}", config.username))
            })
    }
}
