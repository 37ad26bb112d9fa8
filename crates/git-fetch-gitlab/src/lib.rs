mod client;
pub mod connector;
pub mod repository;
pub mod wire;

pub use connector::{GitLabConnector, GitLabConnectorConfig, MIN_ACCESS_LEVEL};
pub use repository::{GitLabRepository, is_private};

/// Default API root for gitlab.com.
pub const DEFAULT_API_BASE: &str = "https://gitlab.com/api/v4";
