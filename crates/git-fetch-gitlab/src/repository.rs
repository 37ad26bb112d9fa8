use git_fetch::{FetchError, PullRequest, Repository, RepositoryInfo, SourceKind};

use crate::client::GitLabClient;
use crate::wire::{MergeRequestResponse, ProjectResponse};

/// GitLab has three visibility levels; only `public` maps to a
/// non-private repository, so `internal` counts as private.
pub fn is_private(visibility: &str) -> bool {
    visibility != "public"
}

/// A project hosted on GitLab.
pub struct GitLabRepository {
    info: RepositoryInfo,
    project_id: u64,
    client: GitLabClient,
}

impl GitLabRepository {
    pub(crate) fn from_response(project: ProjectResponse, client: GitLabClient) -> Self {
        let owner = project
            .owner
            .map_or(project.namespace.full_path, |owner| owner.username);

        Self {
            info: RepositoryInfo {
                owner,
                source: SourceKind::GitLab,
                external_id: project.web_url,
                name: project.name,
                private: is_private(&project.visibility),
            },
            project_id: project.id,
            client,
        }
    }
}

#[async_trait::async_trait]
impl Repository for GitLabRepository {
    fn info(&self) -> &RepositoryInfo {
        &self.info
    }

    async fn pull_requests(&self) -> Result<Vec<PullRequest>, FetchError> {
        let merge_requests: Vec<MergeRequestResponse> = self
            .client
            .get_all(&format!(
                "/projects/{}/merge_requests?state=all",
                self.project_id
            ))
            .await?;

        Ok(merge_requests
            .into_iter()
            .map(|mr| PullRequest {
                author: mr.author.username,
                state: mr.state,
                title: mr.title,
                url: mr.web_url,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_normalization() {
        assert!(!is_private("public"));
        assert!(is_private("private"));
        assert!(is_private("internal"));
    }
}
