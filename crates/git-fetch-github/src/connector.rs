use git_fetch::{Connector, FetchError, Feedback, Listing, Repository, SourceKind};

use crate::DEFAULT_API_BASE;
use crate::client::GitHubClient;
use crate::repository::GitHubRepository;
use crate::wire::{Account, RepoResponse};

/// Credentials and endpoint for a GitHub connection.
#[derive(Debug, Clone, Default)]
pub struct GitHubConnectorConfig {
    /// Ignored when a token is present; listing always targets the
    /// authenticated user.
    pub username: Option<String>,
    pub token: Option<String>,
    pub api_base_url: Option<String>,
}

/// Lists every repository visible to a GitHub token.
pub struct GitHubConnector {
    client: GitHubClient,
    notices: Vec<Feedback>,
}

impl GitHubConnector {
    /// Validate credentials. Makes no network call.
    pub fn new(config: GitHubConnectorConfig) -> Result<Self, FetchError> {
        let token = config.token.ok_or_else(|| {
            FetchError::Configuration("\"token\" must be specified for github".into())
        })?;

        let mut notices = Vec::new();
        if let Some(username) = config.username {
            notices.push(Feedback::IgnoredUsername {
                source: SourceKind::GitHub,
                username,
            });
        }

        let api_base = config
            .api_base_url
            .unwrap_or_else(|| DEFAULT_API_BASE.to_owned());

        Ok(Self {
            client: GitHubClient::new(token, api_base),
            notices,
        })
    }
}

#[async_trait::async_trait]
impl Connector for GitHubConnector {
    fn source(&self) -> SourceKind {
        SourceKind::GitHub
    }

    /// The account behind a token is only known after `GET /user`.
    fn label(&self) -> &str {
        "authenticated user"
    }

    fn notices(&self) -> Vec<Feedback> {
        self.notices.clone()
    }

    async fn repositories(&self) -> Result<Listing, FetchError> {
        let user: Account = self.client.get("/user").await?;
        let repos: Vec<RepoResponse> = self.client.get_all("/user/repos").await?;

        Ok(Listing {
            account: user.login,
            repositories: repos
                .into_iter()
                .map(|repo| {
                    Box::new(GitHubRepository::from_response(repo, self.client.clone()))
                        as Box<dyn Repository>
                })
                .collect(),
        })
    }
}
