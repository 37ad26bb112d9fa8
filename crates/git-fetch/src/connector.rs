use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::feedback::Feedback;
use crate::repository::Repository;
use crate::source::SourceKind;

/// One entry of the job configuration: which provider to reach and with
/// which credentials.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionConfig {
    pub source: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    /// API root override for self-hosted instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ConnectionConfig {
    pub fn new(
        source: impl Into<String>,
        username: Option<&str>,
        token: Option<&str>,
    ) -> Self {
        Self {
            source: source.into(),
            username: username.map(str::to_owned),
            token: token.map(str::to_owned),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("source", &self.source)
            .field("username", &self.username)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// What a connector found: the account the credentials resolved to and the
/// repositories visible to it.
pub struct Listing {
    pub account: String,
    pub repositories: Vec<Box<dyn Repository>>,
}

/// An authenticated view onto one provider account.
///
/// Constructors validate credentials without touching the network, so a
/// bad configuration fails before any listing starts.
#[async_trait::async_trait]
pub trait Connector: Send + Sync {
    fn source(&self) -> SourceKind;

    /// Label for the configured account, known before any request is made.
    fn label(&self) -> &str;

    /// Diagnostics recorded while the connector was built.
    fn notices(&self) -> Vec<Feedback> {
        Vec::new()
    }

    /// Resolve the account and list every repository it can access.
    async fn repositories(&self) -> Result<Listing, FetchError>;
}

/// Maps a configuration entry to a concrete connector.
pub trait ConnectorFactory: Send + Sync {
    fn connect(&self, config: &ConnectionConfig) -> Result<Box<dyn Connector>, FetchError>;
}
