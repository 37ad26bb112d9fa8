use git_fetch::{FetchError, PullRequest, Repository, RepositoryInfo, SourceKind};

use crate::client::GitHubClient;
use crate::wire::{PullResponse, RepoResponse};

/// Login GitHub shows for pull requests whose author account was deleted.
const GHOST_LOGIN: &str = "ghost";

/// A repository hosted on GitHub.
pub struct GitHubRepository {
    info: RepositoryInfo,
    full_name: String,
    client: GitHubClient,
}

impl GitHubRepository {
    pub(crate) fn from_response(repo: RepoResponse, client: GitHubClient) -> Self {
        Self {
            info: RepositoryInfo {
                owner: repo.owner.login,
                source: SourceKind::GitHub,
                external_id: repo.html_url,
                name: repo.name,
                private: repo.private,
            },
            full_name: repo.full_name,
            client,
        }
    }
}

#[async_trait::async_trait]
impl Repository for GitHubRepository {
    fn info(&self) -> &RepositoryInfo {
        &self.info
    }

    async fn pull_requests(&self) -> Result<Vec<PullRequest>, FetchError> {
        let pulls: Vec<PullResponse> = self
            .client
            .get_all(&format!("/repos/{}/pulls?state=all", self.full_name))
            .await?;

        Ok(pulls
            .into_iter()
            .map(|pull| PullRequest {
                author: pull
                    .user
                    .map_or_else(|| GHOST_LOGIN.to_owned(), |user| user.login),
                state: pull.state,
                title: pull.title,
                url: pull.html_url,
            })
            .collect())
    }
}
