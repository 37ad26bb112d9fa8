use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::pull_request::PullRequest;
use crate::source::SourceKind;

/// Provider-independent identity of a repository.
///
/// Built by a connector while listing; the `source` is fixed by the
/// repository variant that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryInfo {
    pub owner: String,
    pub source: SourceKind,
    /// Canonical web URL of the repository.
    pub external_id: String,
    pub name: String,
    pub private: bool,
}

/// A repository with its pull requests attached, as written to the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRepository {
    pub owner: String,
    pub source: SourceKind,
    pub external_id: String,
    pub name: String,
    pub private: bool,
    pub pull_requests: Vec<PullRequest>,
}

impl NormalizedRepository {
    pub fn new(info: &RepositoryInfo, pull_requests: Vec<PullRequest>) -> Self {
        Self {
            owner: info.owner.clone(),
            source: info.source,
            external_id: info.external_id.clone(),
            name: info.name.clone(),
            private: info.private,
            pull_requests,
        }
    }
}

/// A repository on some hosting provider.
///
/// Implementations keep whatever provider handle they need to fetch pull
/// requests private; callers only see [`RepositoryInfo`].
#[async_trait::async_trait]
pub trait Repository: Send + Sync {
    fn info(&self) -> &RepositoryInfo;

    /// Fetch every pull request of this repository, in all states.
    async fn pull_requests(&self) -> Result<Vec<PullRequest>, FetchError>;

    /// Fetch pull requests once and attach them to the repository identity.
    async fn normalize(&self) -> Result<NormalizedRepository, FetchError> {
        let pull_requests = self.pull_requests().await?;
        Ok(NormalizedRepository::new(self.info(), pull_requests))
    }
}
