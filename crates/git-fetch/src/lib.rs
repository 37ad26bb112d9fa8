pub mod connector;
pub mod error;
pub mod feedback;
pub mod orchestrator;
pub mod output;
pub mod pool;
pub mod pull_request;
pub mod repository;
pub mod source;

pub use connector::{ConnectionConfig, Connector, ConnectorFactory, Listing};
pub use error::FetchError;
pub use feedback::{Feedback, SkippedUnit};
pub use orchestrator::{FailurePolicy, FetchOutcome, Orchestrator, RunReport};
pub use output::to_json;
pub use pool::TaskPool;
pub use pull_request::PullRequest;
pub use repository::{NormalizedRepository, Repository, RepositoryInfo};
pub use source::SourceKind;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
