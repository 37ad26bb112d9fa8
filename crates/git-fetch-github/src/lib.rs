mod client;
pub mod connector;
pub mod repository;
pub mod wire;

pub use connector::{GitHubConnector, GitHubConnectorConfig};
pub use repository::GitHubRepository;

/// Default API root for github.com.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
