use git_fetch::{Connector, FetchError, Listing, Repository, SourceKind};

use crate::DEFAULT_API_BASE;
use crate::client::GitLabClient;
use crate::repository::GitLabRepository;
use crate::wire::{ProjectResponse, ProjectSummary, UserResponse};

/// Guest access. Projects where the user holds less are not listed.
pub const MIN_ACCESS_LEVEL: u32 = 10;

/// Credentials and endpoint for a GitLab connection. Both `username` and
/// `token` are required.
#[derive(Debug, Clone, Default)]
pub struct GitLabConnectorConfig {
    pub username: Option<String>,
    pub token: Option<String>,
    pub api_base_url: Option<String>,
}

/// Lists the projects a named GitLab user can access.
pub struct GitLabConnector {
    username: String,
    client: GitLabClient,
}

impl GitLabConnector {
    /// Validate credentials. Makes no network call.
    pub fn new(config: GitLabConnectorConfig) -> Result<Self, FetchError> {
        let (Some(username), Some(token)) = (config.username, config.token) else {
            return Err(FetchError::Configuration(
                "\"token\" and \"username\" must be specified for gitlab".into(),
            ));
        };

        let api_base = config
            .api_base_url
            .unwrap_or_else(|| DEFAULT_API_BASE.to_owned());

        Ok(Self {
            username,
            client: GitLabClient::new(token, api_base),
        })
    }

    /// Resolve the configured username to exactly one user.
    async fn resolve_user(&self) -> Result<UserResponse, FetchError> {
        let path = format!("/users?username={}", urlencoding::encode(&self.username));
        let mut users: Vec<UserResponse> = self.client.get(&path).await?;

        match users.len() {
            0 => Err(FetchError::Lookup(format!(
                "no gitlab user named \"{}\"",
                self.username
            ))),
            1 => Ok(users.remove(0)),
            n => Err(FetchError::Lookup(format!(
                "username \"{}\" matches {n} gitlab users",
                self.username
            ))),
        }
    }
}

#[async_trait::async_trait]
impl Connector for GitLabConnector {
    fn source(&self) -> SourceKind {
        SourceKind::GitLab
    }

    fn label(&self) -> &str {
        &self.username
    }

    async fn repositories(&self) -> Result<Listing, FetchError> {
        let user = self.resolve_user().await?;

        let projects: Vec<ProjectSummary> = self
            .client
            .get_all(&format!(
                "/users/{}/projects?min_access_level={MIN_ACCESS_LEVEL}",
                user.id
            ))
            .await?;

        let mut repositories: Vec<Box<dyn Repository>> = Vec::with_capacity(projects.len());
        for project in projects {
            let detail: ProjectResponse = self
                .client
                .get(&format!("/projects/{}", project.id))
                .await?;
            repositories.push(Box::new(GitLabRepository::from_response(
                detail,
                self.client.clone(),
            )));
        }

        Ok(Listing {
            account: user.username,
            repositories,
        })
    }
}
