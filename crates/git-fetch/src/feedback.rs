use std::fmt;

use crate::source::SourceKind;

/// A unit of work dropped under [`FailurePolicy::Skip`](crate::FailurePolicy::Skip).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkippedUnit {
    Connection { source: SourceKind, label: String },
    Repository { external_id: String },
}

impl fmt::Display for SkippedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection { source, label } => write!(f, "connection {label} on {source}"),
            Self::Repository { external_id } => write!(f, "repository {external_id}"),
        }
    }
}

/// One event of a run, with the counts a reporter needs.
///
/// Fetch code never logs. Connectors and the orchestrator return these and
/// the binary turns them into log records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// A username was supplied alongside a token and dropped.
    IgnoredUsername { source: SourceKind, username: String },
    /// A connection finished listing.
    Listed {
        source: SourceKind,
        account: String,
        repositories: usize,
    },
    /// A repository's pull requests were fetched.
    Fetched {
        source: SourceKind,
        external_id: String,
        pull_requests: usize,
    },
    Skipped { unit: SkippedUnit, error: String },
}

impl Feedback {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Self::IgnoredUsername { .. })
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IgnoredUsername { source, username } => write!(
                f,
                "{source} username \"{username}\" ignored; listing repositories of the token owner"
            ),
            Self::Listed {
                source,
                account,
                repositories,
            } => write!(f, "{source} account {account}: {repositories} repositories"),
            Self::Fetched {
                external_id,
                pull_requests,
                ..
            } => write!(f, "{external_id}: {pull_requests} pull requests"),
            Self::Skipped { unit, error } => write!(f, "skipped {unit}: {error}"),
        }
    }
}
