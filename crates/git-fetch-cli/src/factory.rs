use git_fetch::{ConnectionConfig, Connector, ConnectorFactory, FetchError, SourceKind};
use git_fetch_github::{GitHubConnector, GitHubConnectorConfig};
use git_fetch_gitlab::{GitLabConnector, GitLabConnectorConfig};

/// Builds the connector for each configured source. Registering a new
/// provider means adding a [`SourceKind`] variant and an arm here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderFactory;

impl ConnectorFactory for ProviderFactory {
    fn connect(&self, config: &ConnectionConfig) -> Result<Box<dyn Connector>, FetchError> {
        let username = config.username.clone();
        let token = config.token.clone();
        let api_base_url = config.base_url.clone();

        match SourceKind::parse(&config.source)? {
            SourceKind::GitHub => Ok(Box::new(GitHubConnector::new(GitHubConnectorConfig {
                username,
                token,
                api_base_url,
            })?)),
            SourceKind::GitLab => Ok(Box::new(GitLabConnector::new(GitLabConnectorConfig {
                username,
                token,
                api_base_url,
            })?)),
        }
    }
}
